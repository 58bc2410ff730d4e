//! Headless flythrough: moves a viewer through the world at constant velocity and logs generation statistics.
//!
//! Usage: `flythrough [config.ron] [ticks]`. Set `RUST_LOG=info` (or `debug`) to see the output.

use basalt::basalt_map::glam::Vec3A;
use basalt::basalt_map::GenerationReport;
use basalt::{Config, Error, RunMode, TerrainWorld};
use log::{info, warn};

const TICKS_PER_SECOND: u32 = 60;

fn main() -> Result<(), Error> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => Config::read_file(path)?,
        None => Config::default(),
    };
    let ticks: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(10 * TICKS_PER_SECOND);
    config.validate()?;

    let mut world = TerrainWorld::from_config(&config)?;
    world.set_run_mode(RunMode::Play);

    let velocity = Vec3A::new(2.0, 0.0, 1.0);
    let delta_seconds = 1.0 / TICKS_PER_SECOND as f32;
    let mut second = GenerationReport::default();
    for tick in 1..=ticks {
        world.viewer_mut().position += velocity * delta_seconds;
        let report = world.tick(delta_seconds);

        if report.regenerated == 0 {
            if let Some((coordinates, e)) = report.failures.first() {
                warn!("Every chunk failed this tick, first at {}", coordinates);
                return Err(e.clone().into());
            }
        }
        second.merge(report);

        if tick % TICKS_PER_SECOND == 0 {
            info!(
                "t = {}s viewer {} iso {:.2}: {} active, {} created, {} recycled, {} evicted, {} regenerated, {} triangles, \
                 {} failures, {:?} generating",
                tick / TICKS_PER_SECOND,
                world.viewer().position,
                world.iso_level(),
                world.manager().state().len(),
                second.created,
                second.recycled,
                second.evicted,
                second.regenerated,
                second.triangles,
                second.failures.len(),
                second.elapsed,
            );
            second = GenerationReport::default();
        }
    }

    Ok(())
}
