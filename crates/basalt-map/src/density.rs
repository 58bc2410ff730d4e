//! Density samplers that fill a chunk's lattice.
//!
//! Every sampler evaluates noise at world-space lattice positions, so two chunks that share a face agree on the densities
//! along it. Densities at or above the iso level are solid.

use crate::{
    delinearize, lattice_shape, CaveParameters, ComputeBuffer, GenerationError, LatticePoint, NoiseParameters,
    OctaveOffset, SampleRegion, SamplerConfig,
};

use basalt_core::glam::Vec3A;
use log::trace;
use noise::{NoiseFn, Perlin};
use rayon::prelude::*;

/// Density forced onto the shell of a bounded world when edges are closed.
pub const CLOSED_EDGE_DENSITY: f32 = -100.0;

/// The lattice buffers a sampler may write.
pub struct LatticeBuffers<'a> {
    pub primary: &'a mut ComputeBuffer<LatticePoint>,
    /// Scratch space for samplers that combine two fields.
    pub secondary: &'a mut ComputeBuffer<LatticePoint>,
}

pub trait SampleDensity {
    /// Writes one position and density per lattice point of `region` into `lattice.primary`.
    fn sample(
        &self,
        params: &NoiseParameters,
        lattice: LatticeBuffers<'_>,
        region: &SampleRegion,
    ) -> Result<(), GenerationError>;
}

fn check_len(points: &ComputeBuffer<LatticePoint>, region: &SampleRegion) -> Result<(), GenerationError> {
    if region.points_per_axis < 2 || points.len() != region.num_points() {
        return Err(GenerationError::InvalidResolution(region.points_per_axis));
    }
    Ok(())
}

fn fill_lattice(
    points: &mut ComputeBuffer<LatticePoint>,
    region: &SampleRegion,
    density: impl Fn(Vec3A) -> f32 + Sync,
) {
    let shape = lattice_shape(region.points_per_axis);
    points
        .as_mut_slice()
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, point)| {
            let p = region.position(delinearize(&shape, i));
            *point = LatticePoint {
                position: p.to_array(),
                density: density(p),
            };
        });
}

fn sample_noise(noise: &Perlin, q: Vec3A) -> f32 {
    noise.get(q.as_dvec3().to_array()) as f32
}

/// Ridged multi-octave terrain above a ground plane.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoiseSampler;

impl NoiseSampler {
    /// Density of the terrain field at world position `p`.
    pub fn density(
        noise: &Perlin,
        params: &NoiseParameters,
        offsets: &[OctaveOffset],
        region: &SampleRegion,
        p: Vec3A,
    ) -> f32 {
        let mut frequency = params.noise_scale / 100.0;
        let mut amplitude = 1.0;
        let mut weight = 1.0;
        let mut total = 0.0;
        for octave in offsets {
            let n = sample_noise(noise, p * frequency + Vec3A::from(octave.offset) + region.offset);
            let ridge = 1.0 - n.abs();
            let v = ridge * ridge * weight;
            weight = (v * params.weight_multiplier).clamp(0.0, 1.0);
            total += v * amplitude;
            amplitude *= params.persistence;
            frequency *= params.lacunarity;
        }

        let mut density = -(p.y + params.floor_offset) + total * params.noise_weight;
        if params.terrace_height != 0.0 && params.terrace_weight != 0.0 {
            density += (p.y % params.terrace_height) * params.terrace_weight;
        }
        if p.y < params.hard_floor_height {
            density += params.hard_floor_weight;
        }
        if params.close_edges && region.is_world_shell(p) {
            density = CLOSED_EDGE_DENSITY;
        }
        density
    }

    fn sample_into(
        &self,
        params: &NoiseParameters,
        points: &mut ComputeBuffer<LatticePoint>,
        region: &SampleRegion,
    ) -> Result<(), GenerationError> {
        check_len(points, region)?;

        let offsets: Vec<_> = params
            .octave_offsets()
            .into_iter()
            .map(|o| OctaveOffset { offset: o.to_array() })
            .collect();
        let offsets = ComputeBuffer::from_data(&offsets)?;
        trace!("Created offsets buffer ({} octaves)", offsets.len());

        let noise = Perlin::new(params.seed as u32);
        fill_lattice(points, region, |p| {
            Self::density(&noise, params, offsets.as_slice(), region, p)
        });

        drop(offsets);
        trace!("Released offsets buffer");
        Ok(())
    }
}

impl SampleDensity for NoiseSampler {
    fn sample(
        &self,
        params: &NoiseParameters,
        lattice: LatticeBuffers<'_>,
        region: &SampleRegion,
    ) -> Result<(), GenerationError> {
        self.sample_into(params, lattice.primary, region)
    }
}

/// Worm-like tunnels: air wherever two decorrelated noise fields are both close to zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaveNoiseSampler {
    pub cave: CaveParameters,
}

impl CaveNoiseSampler {
    pub fn new(cave: CaveParameters) -> Self {
        Self { cave }
    }

    fn sample_into(
        &self,
        params: &NoiseParameters,
        points: &mut ComputeBuffer<LatticePoint>,
        region: &SampleRegion,
    ) -> Result<(), GenerationError> {
        check_len(points, region)?;

        let seed = params.seed.wrapping_add(self.cave.seed_offset);
        let first = Perlin::new(seed as u32);
        let second = Perlin::new(seed.wrapping_add(self.cave.seed_offset) as u32);
        let frequency = self.cave.noise_scale / 100.0;
        let iso_level = region.iso_level;
        let cave = self.cave;

        fill_lattice(points, region, |p| {
            let q = p * frequency + region.offset;
            let r = sample_noise(&first, q).hypot(sample_noise(&second, q));
            if params.close_edges && region.is_world_shell(p) {
                return CLOSED_EDGE_DENSITY;
            }
            iso_level + (r - cave.tunnel_radius) * cave.carve_weight
        });
        Ok(())
    }
}

impl SampleDensity for CaveNoiseSampler {
    fn sample(
        &self,
        params: &NoiseParameters,
        lattice: LatticeBuffers<'_>,
        region: &SampleRegion,
    ) -> Result<(), GenerationError> {
        self.sample_into(params, lattice.primary, region)
    }
}

/// Terrain with tunnels carved out of it.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompositeSampler {
    pub terrain: NoiseSampler,
    pub caves: CaveNoiseSampler,
}

impl SampleDensity for CompositeSampler {
    fn sample(
        &self,
        params: &NoiseParameters,
        lattice: LatticeBuffers<'_>,
        region: &SampleRegion,
    ) -> Result<(), GenerationError> {
        self.terrain.sample_into(params, lattice.primary, region)?;
        self.caves.sample_into(params, lattice.secondary, region)?;

        // Solid only where both fields are solid.
        lattice
            .primary
            .as_mut_slice()
            .par_iter_mut()
            .zip(lattice.secondary.as_slice().par_iter())
            .for_each(|(terrain, cave)| terrain.density = terrain.density.min(cave.density));
        Ok(())
    }
}

/// The configured density sampler.
#[derive(Clone, Copy, Debug)]
pub enum DensitySampler {
    Noise(NoiseSampler),
    Cave(CaveNoiseSampler),
    Composite(CompositeSampler),
}

impl Default for DensitySampler {
    fn default() -> Self {
        Self::Noise(NoiseSampler)
    }
}

impl DensitySampler {
    pub fn from_config(config: &SamplerConfig) -> Self {
        match *config {
            SamplerConfig::Noise => Self::Noise(NoiseSampler),
            SamplerConfig::Caves(cave) => Self::Cave(CaveNoiseSampler::new(cave)),
            SamplerConfig::Composite(cave) => Self::Composite(CompositeSampler {
                terrain: NoiseSampler,
                caves: CaveNoiseSampler::new(cave),
            }),
        }
    }
}

impl SampleDensity for DensitySampler {
    fn sample(
        &self,
        params: &NoiseParameters,
        lattice: LatticeBuffers<'_>,
        region: &SampleRegion,
    ) -> Result<(), GenerationError> {
        match self {
            Self::Noise(s) => s.sample(params, lattice, region),
            Self::Cave(s) => s.sample(params, lattice, region),
            Self::Composite(s) => s.sample(params, lattice, region),
        }
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
