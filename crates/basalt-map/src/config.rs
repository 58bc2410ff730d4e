use crate::ConfigError;

use basalt_core::glam::{IVec3, Vec3A};
use serde::{Deserialize, Serialize};

/// Resolution and extent of the lattice sampled for every chunk.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct LatticeConfig {
    /// Lattice points along each axis of a chunk. Neighboring chunks share their boundary points.
    pub points_per_axis: u32,
    /// Edge length of a chunk in world units.
    pub chunk_size: f32,
    /// Added to every noise input, shifting the whole field.
    pub noise_offset: [f32; 3],
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            points_per_axis: 30,
            chunk_size: 1.0,
            noise_offset: [0.0; 3],
        }
    }
}

impl LatticeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.points_per_axis < 2 {
            return Err(ConfigError::LatticeTooSmall(self.points_per_axis));
        }
        if !(self.chunk_size.is_finite() && self.chunk_size > 0.0) {
            return Err(ConfigError::InvalidChunkSize(self.chunk_size));
        }
        Ok(())
    }

    /// World distance between adjacent lattice points.
    pub fn spacing(&self) -> f32 {
        self.chunk_size / (self.points_per_axis - 1) as f32
    }

    pub fn noise_offset(&self) -> Vec3A {
        Vec3A::from(self.noise_offset)
    }

    /// Worst-case triangle count for one chunk.
    pub fn triangle_capacity(&self) -> usize {
        let cells = (self.points_per_axis as usize).saturating_sub(1);
        5 * cells * cells * cells
    }
}

/// How the set of live chunks is chosen.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub enum StreamingMode {
    /// A dense grid of chunks centered on the origin.
    Fixed { num_chunks: [u32; 3] },
    /// Only chunks within `view_distance` of the viewer.
    ViewerRelative { view_distance: f32 },
}

impl Default for StreamingMode {
    fn default() -> Self {
        Self::Fixed {
            num_chunks: [1, 1, 1],
        }
    }
}

impl StreamingMode {
    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed { .. })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Fixed { num_chunks } => {
                if num_chunks.contains(&0) {
                    return Err(ConfigError::EmptyGrid(num_chunks));
                }
            }
            Self::ViewerRelative { view_distance } => {
                if !(view_distance.is_finite() && view_distance > 0.0) {
                    return Err(ConfigError::InvalidViewDistance(view_distance));
                }
            }
        }
        Ok(())
    }

    /// World-space center of the chunk at `coordinates`.
    pub fn chunk_center(&self, coordinates: IVec3, chunk_size: f32) -> Vec3A {
        let coords = coordinates.as_vec3a();
        match *self {
            Self::Fixed { num_chunks } => {
                let grid = Vec3A::new(num_chunks[0] as f32, num_chunks[1] as f32, num_chunks[2] as f32);
                -grid * chunk_size / 2.0 + coords * chunk_size + Vec3A::splat(chunk_size / 2.0)
            }
            Self::ViewerRelative { .. } => coords * chunk_size,
        }
    }

    /// Extent of the whole world, if it is bounded.
    pub fn world_size(&self, chunk_size: f32) -> Option<Vec3A> {
        match *self {
            Self::Fixed { num_chunks } => Some(
                Vec3A::new(num_chunks[0] as f32, num_chunks[1] as f32, num_chunks[2] as f32) * chunk_size,
            ),
            Self::ViewerRelative { .. } => None,
        }
    }
}

/// Tunnel ("worm") field parameters.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct CaveParameters {
    /// Mixed into the terrain seed so that tunnels don't follow the surface noise.
    pub seed_offset: i32,
    /// Tunnel noise frequency, in the same units as `NoiseParameters::noise_scale`.
    pub noise_scale: f32,
    /// Tunnels open where the combined noise magnitude is below this radius.
    pub tunnel_radius: f32,
    /// Slope of the density across the tunnel wall.
    pub carve_weight: f32,
}

impl Default for CaveParameters {
    fn default() -> Self {
        Self {
            seed_offset: 7919,
            noise_scale: 50.0,
            tunnel_radius: 0.12,
            carve_weight: 40.0,
        }
    }
}

/// Selects the density sampler variant.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub enum SamplerConfig {
    #[default]
    Noise,
    Caves(CaveParameters),
    /// Terrain with tunnels carved out of it.
    Composite(CaveParameters),
}

/// Opaque handle forwarded to the renderer.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct MaterialId(pub u32);

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct MapConfig {
    pub lattice: LatticeConfig,
    pub mode: StreamingMode,
    pub material: MaterialId,
    pub generate_colliders: bool,
    pub sampler: SamplerConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            lattice: LatticeConfig::default(),
            mode: StreamingMode::default(),
            material: MaterialId::default(),
            generate_colliders: false,
            sampler: SamplerConfig::default(),
        }
    }
}

impl MapConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lattice.validate()?;
        self.mode.validate()
    }

    pub fn chunk_center(&self, coordinates: IVec3) -> Vec3A {
        self.mode.chunk_center(coordinates, self.lattice.chunk_size)
    }

    pub fn world_size(&self) -> Option<Vec3A> {
        self.mode.world_size(self.lattice.chunk_size)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
