use crate::ConfigError;

use basalt_core::glam::Vec3A;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Octave offsets are drawn from `[-OCTAVE_OFFSET_RANGE, OCTAVE_OFFSET_RANGE]` on each axis.
pub const OCTAVE_OFFSET_RANGE: f32 = 1000.0;

/// One configuration of the layered ("fractal") noise that drives terrain density.
///
/// Values are treated as immutable once handed to a sampler; transitions produce new values with [`NoiseParameters::lerp`].
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct NoiseParameters {
    /// Seeds both the coherent noise and the per-octave offsets.
    pub seed: i32,
    /// Number of noise layers. Values below 1 are treated as 1.
    pub num_octaves: i32,
    /// Frequency multiplier between consecutive octaves.
    pub lacunarity: f32,
    /// Amplitude multiplier between consecutive octaves.
    pub persistence: f32,
    /// Zooms the noise pattern. The first octave samples at frequency `noise_scale / 100`.
    pub noise_scale: f32,
    /// Contribution of the accumulated noise to the final density.
    pub noise_weight: f32,
    /// Seals the outer shell of a bounded world.
    pub close_edges: bool,
    /// Vertical offset of the ground plane.
    pub floor_offset: f32,
    /// Feedback gain between octaves; larger values make ridges sharper.
    pub weight_multiplier: f32,
    /// Below this height, `hard_floor_weight` is added to the density.
    pub hard_floor_height: f32,
    pub hard_floor_weight: f32,
    /// Period of the vertical terracing term.
    pub terrace_height: f32,
    /// Strength of the terracing term; zero disables it.
    pub terrace_weight: f32,
}

impl Default for NoiseParameters {
    fn default() -> Self {
        Self {
            seed: 0,
            num_octaves: 4,
            lacunarity: 2.0,
            persistence: 0.5,
            noise_scale: 1.0,
            noise_weight: 1.0,
            close_edges: false,
            floor_offset: 1.0,
            weight_multiplier: 1.0,
            hard_floor_height: 0.0,
            hard_floor_weight: 0.0,
            terrace_height: 1.0,
            terrace_weight: 0.0,
        }
    }
}

impl NoiseParameters {
    /// The octave count actually used for sampling.
    pub fn octaves(&self) -> u32 {
        self.num_octaves.max(1) as u32
    }

    /// Interpolates every numeric field. Integer fields are rounded to the nearest value and booleans switch from `a` to `b`
    /// at `t = 0.5`.
    pub fn lerp(a: &Self, b: &Self, t: f32) -> Self {
        let lerp = |x: f32, y: f32| x + (y - x) * t;
        let lerp_int = |x: i32, y: i32| lerp(x as f32, y as f32).round() as i32;

        Self {
            seed: lerp_int(a.seed, b.seed),
            num_octaves: lerp_int(a.num_octaves, b.num_octaves),
            lacunarity: lerp(a.lacunarity, b.lacunarity),
            persistence: lerp(a.persistence, b.persistence),
            noise_scale: lerp(a.noise_scale, b.noise_scale),
            noise_weight: lerp(a.noise_weight, b.noise_weight),
            close_edges: if t < 0.5 { a.close_edges } else { b.close_edges },
            floor_offset: lerp(a.floor_offset, b.floor_offset),
            weight_multiplier: lerp(a.weight_multiplier, b.weight_multiplier),
            hard_floor_height: lerp(a.hard_floor_height, b.hard_floor_height),
            hard_floor_weight: lerp(a.hard_floor_weight, b.hard_floor_weight),
            terrace_height: lerp(a.terrace_height, b.terrace_height),
            terrace_weight: lerp(a.terrace_weight, b.terrace_weight),
        }
    }

    /// One offset per octave, drawn from a generator seeded with `self.seed`. Equal seeds always give equal offsets.
    pub fn octave_offsets(&self) -> Vec<Vec3A> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed as u32 as u64);
        let mut unit = move || rng.random::<f32>() * 2.0 - 1.0;

        (0..self.octaves())
            .map(|_| {
                let x = unit();
                let y = unit();
                let z = unit();
                Vec3A::new(x, y, z) * OCTAVE_OFFSET_RANGE
            })
            .collect()
    }
}

/// An inclusive `[min, max]` range for one randomized field.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct ParameterRange {
    pub min: f32,
    pub max: f32,
}

impl ParameterRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange {
                field,
                min: self.min,
                max: self.max,
            })
        }
    }

    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        if self.min >= self.max {
            self.min
        } else {
            rng.random_range(self.min..=self.max)
        }
    }

    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }
}

/// Fields of [`NoiseParameters`] that are held constant for every randomly drawn configuration.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct FixedNoiseFields {
    pub seed: i32,
    pub close_edges: bool,
    pub num_octaves: i32,
    pub lacunarity: f32,
    pub persistence: f32,
}

impl Default for FixedNoiseFields {
    fn default() -> Self {
        Self {
            seed: 1,
            close_edges: true,
            num_octaves: 8,
            lacunarity: 2.0,
            persistence: 0.54,
        }
    }
}

/// Randomization ranges for the remaining fields of [`NoiseParameters`].
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct NoiseRanges {
    pub fixed: FixedNoiseFields,
    pub noise_scale: ParameterRange,
    pub noise_weight: ParameterRange,
    pub floor_offset: ParameterRange,
    pub weight_multiplier: ParameterRange,
    pub hard_floor_height: ParameterRange,
    pub hard_floor_weight: ParameterRange,
}

impl Default for NoiseRanges {
    fn default() -> Self {
        Self {
            fixed: FixedNoiseFields::default(),
            noise_scale: ParameterRange::new(0.5, 3.0),
            noise_weight: ParameterRange::new(2.0, 12.0),
            floor_offset: ParameterRange::new(-5.0, 5.0),
            weight_multiplier: ParameterRange::new(1.0, 4.0),
            hard_floor_height: ParameterRange::new(-10.0, 0.0),
            hard_floor_weight: ParameterRange::new(0.0, 30.0),
        }
    }
}

impl NoiseRanges {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.noise_scale.validate("noise_scale")?;
        self.noise_weight.validate("noise_weight")?;
        self.floor_offset.validate("floor_offset")?;
        self.weight_multiplier.validate("weight_multiplier")?;
        self.hard_floor_height.validate("hard_floor_height")?;
        self.hard_floor_weight.validate("hard_floor_weight")
    }

    /// Draws a new configuration. Fields without a range come from `self.fixed`; terracing is left disabled.
    pub fn random_parameters(&self, rng: &mut impl Rng) -> NoiseParameters {
        NoiseParameters {
            seed: self.fixed.seed,
            close_edges: self.fixed.close_edges,
            num_octaves: self.fixed.num_octaves,
            lacunarity: self.fixed.lacunarity,
            persistence: self.fixed.persistence,
            noise_scale: self.noise_scale.sample(rng),
            noise_weight: self.noise_weight.sample(rng),
            floor_offset: self.floor_offset.sample(rng),
            weight_multiplier: self.weight_multiplier.sample(rng),
            hard_floor_height: self.hard_floor_height.sample(rng),
            hard_floor_weight: self.hard_floor_weight.sample(rng),
            ..NoiseParameters::default()
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

    #[test]
    fn octave_count_is_clamped() {
        let params = NoiseParameters {
            num_octaves: -3,
            ..Default::default()
        };
        assert_eq!(params.octaves(), 1);
        assert_eq!(params.octave_offsets().len(), 1);
    }

    #[test]
    fn offsets_are_deterministic_per_seed() {
        let a = NoiseParameters {
            seed: 42,
            num_octaves: 6,
            ..Default::default()
        };
        let b = NoiseParameters { seed: 43, ..a };

        assert_eq!(a.octave_offsets(), a.octave_offsets());
        assert_ne!(a.octave_offsets(), b.octave_offsets());
        for offset in a.octave_offsets() {
            assert!(offset.abs().max_element() <= OCTAVE_OFFSET_RANGE);
        }
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = NoiseParameters::default();
        let b = NoiseParameters {
            seed: 10,
            num_octaves: 8,
            noise_weight: 3.0,
            close_edges: true,
            ..Default::default()
        };

        assert_eq!(NoiseParameters::lerp(&a, &b, 0.0), a);
        assert_eq!(NoiseParameters::lerp(&a, &b, 1.0), b);

        let quarter = NoiseParameters::lerp(&a, &b, 0.25);
        assert_eq!(quarter.num_octaves, 5);
        assert_eq!(quarter.seed, 3);
        assert_relative_eq!(quarter.noise_weight, 1.5);
        assert!(!quarter.close_edges);

        let half = NoiseParameters::lerp(&a, &b, 0.5);
        assert!(half.close_edges);
    }

    #[test]
    fn random_parameters_respect_ranges() {
        let ranges = NoiseRanges::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            let p = ranges.random_parameters(&mut rng);
            assert!(ranges.noise_scale.contains(p.noise_scale));
            assert!(ranges.noise_weight.contains(p.noise_weight));
            assert!(ranges.floor_offset.contains(p.floor_offset));
            assert!(ranges.weight_multiplier.contains(p.weight_multiplier));
            assert!(ranges.hard_floor_height.contains(p.hard_floor_height));
            assert!(ranges.hard_floor_weight.contains(p.hard_floor_weight));
            assert_eq!(p.seed, ranges.fixed.seed);
            assert_eq!(p.num_octaves, ranges.fixed.num_octaves);
            assert_eq!(p.close_edges, ranges.fixed.close_edges);
        }
    }

    #[test]
    fn degenerate_range_yields_its_bound() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(ParameterRange::new(3.0, 3.0).sample(&mut rng), 3.0);
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert_eq!(
            ParameterRange::new(2.0, 1.0).validate("x"),
            Err(ConfigError::InvalidRange {
                field: "x",
                min: 2.0,
                max: 1.0
            })
        );
    }
}
