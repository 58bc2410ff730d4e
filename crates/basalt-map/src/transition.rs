use crate::{ConfigError, NoiseParameters, NoiseRanges, ParameterRange};

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Seconds spent blending from one configuration to the next.
    pub duration: f32,
    /// Seeds the generator that draws targets, so a run can be replayed.
    pub rng_seed: u64,
    pub iso_level_range: ParameterRange,
    pub ranges: NoiseRanges,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration: 5.0,
            rng_seed: 0,
            iso_level_range: ParameterRange::new(0.0, 20.0),
            ranges: NoiseRanges::default(),
        }
    }
}

impl TransitionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(ConfigError::InvalidDuration(self.duration));
        }
        self.iso_level_range.validate("iso_level")?;
        self.ranges.validate()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionPhase {
    /// A new transition starts on the next tick.
    Idle,
    Transitioning {
        start: NoiseParameters,
        target: NoiseParameters,
        start_iso_level: f32,
        target_iso_level: f32,
        elapsed: f32,
    },
}

/// What a call to [`ParameterTransitionController::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionEvent {
    /// A new target was drawn. Nothing changed yet.
    Started,
    /// Interpolated parameters at fraction `t` were applied.
    Interpolated { t: f32 },
    /// The target became the current configuration.
    Committed,
}

impl TransitionEvent {
    /// True when the applied parameters changed and meshes should be rebuilt.
    pub fn requests_regeneration(&self) -> bool {
        !matches!(self, Self::Started)
    }
}

/// Endlessly blends the terrain between randomly drawn noise configurations.
pub struct ParameterTransitionController {
    config: TransitionConfig,
    rng: ChaCha8Rng,
    params: NoiseParameters,
    iso_level: f32,
    phase: TransitionPhase,
}

impl ParameterTransitionController {
    pub fn new(config: TransitionConfig, params: NoiseParameters, iso_level: f32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            config,
            params,
            iso_level,
            phase: TransitionPhase::Idle,
        })
    }

    /// The currently applied parameters.
    pub fn params(&self) -> &NoiseParameters {
        &self.params
    }

    pub fn iso_level(&self) -> f32 {
        self.iso_level
    }

    pub fn phase(&self) -> &TransitionPhase {
        &self.phase
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Advances the state machine by `delta_seconds`. Negative deltas count as zero.
    pub fn tick(&mut self, delta_seconds: f32) -> TransitionEvent {
        match &mut self.phase {
            TransitionPhase::Idle => {
                let target = self.config.ranges.random_parameters(&mut self.rng);
                let target_iso_level = self.config.iso_level_range.sample(&mut self.rng);
                info!(
                    "Starting {}s transition to iso level {:.2}",
                    self.config.duration, target_iso_level
                );
                self.phase = TransitionPhase::Transitioning {
                    start: self.params,
                    target,
                    start_iso_level: self.iso_level,
                    target_iso_level,
                    elapsed: 0.0,
                };
                TransitionEvent::Started
            }
            TransitionPhase::Transitioning {
                start,
                target,
                start_iso_level,
                target_iso_level,
                elapsed,
            } => {
                if *elapsed < self.config.duration {
                    let t = (*elapsed / self.config.duration).clamp(0.0, 1.0);
                    self.params = NoiseParameters::lerp(start, target, t);
                    self.iso_level = *start_iso_level + (*target_iso_level - *start_iso_level) * t;
                    *elapsed += delta_seconds.max(0.0);
                    debug!("Transition at t = {:.3}", t);
                    TransitionEvent::Interpolated { t }
                } else {
                    self.params = *target;
                    self.iso_level = *target_iso_level;
                    self.phase = TransitionPhase::Idle;
                    info!("Transition committed");
                    TransitionEvent::Committed
                }
            }
        }
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

    use approx::assert_relative_eq;

    fn controller(duration: f32, seed: u64) -> ParameterTransitionController {
        let config = TransitionConfig {
            duration,
            rng_seed: seed,
            ..Default::default()
        };
        ParameterTransitionController::new(config, NoiseParameters::default(), 4.0).unwrap()
    }

    fn target_iso_level(c: &ParameterTransitionController) -> f32 {
        match c.phase() {
            TransitionPhase::Transitioning { target_iso_level, .. } => *target_iso_level,
            TransitionPhase::Idle => panic!("not transitioning"),
        }
    }

    #[test]
    fn threshold_moves_monotonically() {
        let mut c = controller(4.0, 9);
        assert_eq!(c.tick(1.0), TransitionEvent::Started);
        let a = c.iso_level();
        let b = target_iso_level(&c);

        let mut samples = Vec::new();
        for expected_t in [0.0, 0.25, 0.5, 0.75] {
            assert_eq!(c.tick(1.0), TransitionEvent::Interpolated { t: expected_t });
            samples.push(c.iso_level());
        }
        assert_eq!(c.tick(1.0), TransitionEvent::Committed);
        samples.push(c.iso_level());

        assert_relative_eq!(samples[0], a);
        assert_relative_eq!(samples[4], b);
        for pair in samples.windows(2) {
            if b >= a {
                assert!(pair[0] <= pair[1]);
            } else {
                assert!(pair[0] >= pair[1]);
            }
        }
    }

    #[test]
    fn commit_applies_the_target_and_restarts() {
        let mut c = controller(1.0, 3);
        c.tick(0.5);
        let target = match c.phase() {
            TransitionPhase::Transitioning { target, .. } => *target,
            TransitionPhase::Idle => panic!("not transitioning"),
        };
        assert!(c.config().ranges.noise_weight.contains(target.noise_weight));
        assert_eq!(target.num_octaves, 8);

        while c.tick(0.5) != TransitionEvent::Committed {}
        assert_eq!(*c.params(), target);
        assert_eq!(c.phase(), &TransitionPhase::Idle);

        // Transitions never stop.
        assert_eq!(c.tick(0.5), TransitionEvent::Started);
    }

    #[test]
    fn booleans_switch_halfway() {
        let mut c = controller(4.0, 1);
        c.tick(1.0);
        assert!(!c.params().close_edges);
        c.tick(1.0); // t = 0
        c.tick(1.0); // t = 0.25
        assert!(!c.params().close_edges);
        c.tick(1.0); // t = 0.5
        assert!(c.params().close_edges);
    }

    #[test]
    fn same_seed_replays_the_same_targets() {
        let mut a = controller(2.0, 77);
        let mut b = controller(2.0, 77);
        for _ in 0..20 {
            assert_eq!(a.tick(0.3), b.tick(0.3));
            assert_eq!(a.params(), b.params());
            assert_eq!(a.iso_level(), b.iso_level());
        }
    }

    #[test]
    fn stalled_clock_makes_no_progress() {
        let mut c = controller(1.0, 5);
        c.tick(0.0);
        for _ in 0..5 {
            assert_eq!(c.tick(-1.0), TransitionEvent::Interpolated { t: 0.0 });
        }
    }

    #[test]
    fn rejects_bad_config() {
        let config = TransitionConfig {
            duration: 0.0,
            ..Default::default()
        };
        assert_eq!(
            ParameterTransitionController::new(config, NoiseParameters::default(), 0.0).err(),
            Some(ConfigError::InvalidDuration(0.0))
        );

        let config = TransitionConfig {
            iso_level_range: ParameterRange::new(5.0, 1.0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
