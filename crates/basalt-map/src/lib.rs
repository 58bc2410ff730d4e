//! The basalt terrain pipeline.
//!
//! # Density
//!
//! Terrain is the solid region of a scalar density field: points whose density is at or above the iso level. A
//! [`DensitySampler`](crate::DensitySampler) evaluates layered noise described by [`NoiseParameters`](crate::NoiseParameters)
//! over a cubic lattice of world-space points for each chunk. Because positions are world-space, chunks that share a face
//! sample identical densities along it.
//!
//! # Extraction
//!
//! [`extract`](crate::extract) runs marching cubes over every lattice cell in parallel, appending triangles into a buffer sized
//! for the worst case of 5 triangles per cell. The true count is read back afterwards and only that prefix is copied out. The
//! lattice and triangle buffers live in a [`BufferPool`](crate::BufferPool) that reallocates only when the lattice resolution
//! changes.
//!
//! # Streaming
//!
//! A [`ChunkStreamingManager`](crate::ChunkStreamingManager) either keeps a fixed grid of chunks or pages chunks around a
//! moving [`Viewer`](crate::Viewer), recycling chunks that leave the view distance. Chunk objects are owned by a
//! [`ChunkStore`](crate::ChunkStore) so hosts can attach them to their own scene graph.
//!
//! # Transitions
//!
//! A [`ParameterTransitionController`](crate::ParameterTransitionController) blends the noise parameters and iso level toward
//! randomly drawn targets over time.

mod buffer;
mod chunk;
mod config;
mod density;
mod error;
mod generator;
mod lattice;
mod marching_cubes;
mod mesh;
mod parameters;
mod pool;
mod store;
mod streaming;
mod transition;

pub use buffer::*;
pub use chunk::*;
pub use config::*;
pub use density::*;
pub use error::*;
pub use generator::*;
pub use lattice::*;
pub use marching_cubes::*;
pub use mesh::*;
pub use parameters::*;
pub use pool::*;
pub use store::*;
pub use streaming::*;
pub use transition::*;

// Re-exports.
pub use basalt_core::{geometry, glam};
