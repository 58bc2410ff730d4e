use crate::{ChunkMesh, MaterialId};

use basalt_core::glam::IVec3;

/// One cubic region of the world and its generated mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chunk {
    pub name: String,
    /// Position in chunk space, not world space.
    pub coordinates: IVec3,
    pub mesh: ChunkMesh,
    pub material: MaterialId,
    pub wants_collision: bool,
    /// Inactive chunks wait in the recyclable pool and should not be drawn.
    pub active: bool,
}

pub fn chunk_name(coordinates: IVec3) -> String {
    format!("Chunk ({}, {}, {})", coordinates.x, coordinates.y, coordinates.z)
}

impl Chunk {
    pub fn new(coordinates: IVec3) -> Self {
        Self {
            name: chunk_name(coordinates),
            coordinates,
            active: true,
            ..Default::default()
        }
    }

    /// Moves the chunk to `coordinates`, keeping its identity.
    pub fn reassign(&mut self, coordinates: IVec3) {
        self.coordinates = coordinates;
        self.name = chunk_name(coordinates);
    }

    /// Applies the render and collision settings handed to the collaborators.
    pub fn set_up(&mut self, material: MaterialId, wants_collision: bool) {
        self.material = material;
        self.wants_collision = wants_collision;
        self.active = true;
    }

    /// Drops the mesh and hides the chunk until it is reused.
    pub fn deactivate(&mut self) {
        self.mesh.clear();
        self.active = false;
    }
}
