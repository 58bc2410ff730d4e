//! Streamed, procedurally generated voxel terrain.
//!
//! [`TerrainWorld`] is the host-facing entry point. Load a [`Config`] from a RON file, set the [`RunMode`], move the viewer,
//! and call [`TerrainWorld::tick`] once per frame. Finished chunk meshes are read back through
//! [`TerrainWorld::manager`]. The pipeline itself lives in the `basalt-map` crate.

mod config;
mod error;
mod terrain;

pub use config::{AutoUpdate, Config};
pub use error::Error;
pub use terrain::{RunMode, TerrainWorld};

pub use basalt_map;
