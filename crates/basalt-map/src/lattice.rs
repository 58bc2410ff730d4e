use basalt_core::glam::{UVec3, Vec3A};
use ndshape::{RuntimeShape, Shape};

/// Cubic lattice shape; X varies fastest in the flattened order.
pub type LatticeShape = RuntimeShape<u32, 3>;

pub fn lattice_shape(points_per_axis: u32) -> LatticeShape {
    RuntimeShape::<u32, 3>::new([points_per_axis; 3])
}

/// Lattice id of the flattened `index`.
pub fn delinearize(shape: &LatticeShape, index: usize) -> UVec3 {
    UVec3::from(shape.delinearize(index as u32))
}

pub fn linearize(shape: &LatticeShape, id: UVec3) -> usize {
    shape.linearize(id.to_array()) as usize
}

/// Where and how densely one chunk's lattice samples world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleRegion {
    pub points_per_axis: u32,
    pub chunk_size: f32,
    /// World-space center of the chunk.
    pub center: Vec3A,
    /// Added to every noise input.
    pub offset: Vec3A,
    pub spacing: f32,
    /// Outer extent of a bounded world, used to seal its shell.
    pub world_size: Option<Vec3A>,
    pub iso_level: f32,
}

impl SampleRegion {
    pub fn num_points(&self) -> usize {
        (self.points_per_axis as usize).pow(3)
    }

    /// World-space position of lattice point `id`.
    ///
    /// Built from the world-space center rather than from chunk-local coordinates, so chunks sharing a face produce the same
    /// positions along it.
    pub fn position(&self, id: UVec3) -> Vec3A {
        self.center + id.as_vec3a() * self.spacing - Vec3A::splat(self.chunk_size / 2.0)
    }

    /// True if `p` lies on or beyond the shell of a bounded world.
    pub fn is_world_shell(&self, p: Vec3A) -> bool {
        match self.world_size {
            Some(world) => {
                let edge = (2.0 * p).abs() - world + Vec3A::splat(self.spacing / 2.0);
                edge.max_element() > 0.0
            }
            None => false,
        }
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
