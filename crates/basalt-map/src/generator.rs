use crate::{
    extract, read_triangles, BufferPool, Chunk, DensitySampler, GenerationError, LatticeBuffers, LatticeConfig,
    NoiseParameters, SampleDensity, SampleRegion,
};

use basalt_core::glam::Vec3A;
use log::{debug, trace};

/// The per-chunk pipeline: sample densities, extract the isosurface, and rebuild the chunk's mesh.
///
/// One generator regenerates one chunk at a time on its shared [`BufferPool`].
pub struct ChunkGenerator {
    lattice: LatticeConfig,
    sampler: DensitySampler,
    pool: BufferPool,
    /// Extent of a bounded world, used to seal its outer shell.
    world_size: Option<Vec3A>,
}

impl ChunkGenerator {
    pub fn new(lattice: LatticeConfig, sampler: DensitySampler, world_size: Option<Vec3A>) -> Self {
        Self {
            lattice,
            sampler,
            pool: BufferPool::new(),
            world_size,
        }
    }

    pub fn lattice(&self) -> &LatticeConfig {
        &self.lattice
    }

    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }

    pub fn release_buffers(&mut self) {
        self.pool.release();
    }

    pub fn region(&self, center: Vec3A, iso_level: f32) -> SampleRegion {
        SampleRegion {
            points_per_axis: self.lattice.points_per_axis,
            chunk_size: self.lattice.chunk_size,
            center,
            offset: self.lattice.noise_offset(),
            spacing: self.lattice.spacing(),
            world_size: self.world_size,
            iso_level,
        }
    }

    /// Overwrites `chunk.mesh` with the surface of the chunk centered at `center`, returning the triangle count.
    ///
    /// On error the mesh is cleared rather than left stale.
    pub fn regenerate(
        &mut self,
        chunk: &mut Chunk,
        center: Vec3A,
        params: &NoiseParameters,
        iso_level: f32,
    ) -> Result<usize, GenerationError> {
        let result = self.run(chunk, center, params, iso_level);
        if result.is_err() {
            chunk.mesh.clear();
        }
        result
    }

    fn run(
        &mut self,
        chunk: &mut Chunk,
        center: Vec3A,
        params: &NoiseParameters,
        iso_level: f32,
    ) -> Result<usize, GenerationError> {
        let region = self.region(center, iso_level);
        let buffers = self.pool.prepare(region.points_per_axis)?;

        self.sampler.sample(
            params,
            LatticeBuffers {
                primary: &mut buffers.points,
                secondary: &mut buffers.aux_points,
            },
            &region,
        )?;
        extract(buffers, iso_level);
        let triangles = read_triangles(buffers);
        trace!("{}: {} triangles", chunk.name, triangles.len());

        chunk.mesh.set_triangles(&triangles);
        chunk.mesh.recalculate_normals();
        if triangles.is_empty() {
            debug!("{} is empty", chunk.name);
        }
        Ok(triangles.len())
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
