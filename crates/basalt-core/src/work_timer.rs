use std::time::{Duration, Instant};

/// Tallies the time spent on individual work items (e.g. chunk regenerations) within one batch, alongside the wall time of
/// the whole batch.
pub struct WorkTimer {
    started_at: Instant,
    item_time: Duration,
    slowest_item: Duration,
    items_completed: u32,
}

impl WorkTimer {
    pub fn start() -> Self {
        Self {
            started_at: Instant::now(),
            item_time: Duration::ZERO,
            slowest_item: Duration::ZERO,
            items_completed: 0,
        }
    }

    /// Runs `work` and counts it as one completed item.
    pub fn time_item<T>(&mut self, work: impl FnOnce() -> T) -> T {
        let item_start = Instant::now();
        let output = work();
        self.complete_item(item_start.elapsed());
        output
    }

    pub fn complete_item(&mut self, d: Duration) {
        self.item_time += d;
        self.slowest_item = self.slowest_item.max(d);
        self.items_completed += 1;
    }

    pub fn items_completed(&self) -> u32 {
        self.items_completed
    }

    pub fn item_time(&self) -> Duration {
        self.item_time
    }

    pub fn slowest_item(&self) -> Duration {
        self.slowest_item
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn average_item_time_us(&self) -> u32 {
        let total_us = u32::try_from(self.item_time.as_micros()).unwrap_or(u32::MAX);

        total_us / self.items_completed.max(1)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn average_of_no_items_is_zero() {
        let timer = WorkTimer::start();
        assert_eq!(timer.items_completed(), 0);
        assert_eq!(timer.average_item_time_us(), 0);
    }

    #[test]
    fn tracks_total_and_slowest_item() {
        let mut timer = WorkTimer::start();
        timer.complete_item(Duration::from_micros(100));
        timer.complete_item(Duration::from_micros(300));

        assert_eq!(timer.items_completed(), 2);
        assert_eq!(timer.item_time(), Duration::from_micros(400));
        assert_eq!(timer.slowest_item(), Duration::from_micros(300));
        assert_eq!(timer.average_item_time_us(), 200);
    }

    #[test]
    fn time_item_returns_the_work_output() {
        let mut timer = WorkTimer::start();
        let x = timer.time_item(|| 7);
        assert_eq!(x, 7);
        assert_eq!(timer.items_completed(), 1);
    }
}
