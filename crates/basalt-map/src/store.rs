//! Ownership of chunk objects.
//!
//! The streaming manager never creates or drops chunks directly. It goes through a [`ChunkStore`], which is the seam where a
//! host engine attaches chunks to its own scene graph.

use crate::Chunk;

use basalt_core::glam::IVec3;
use basalt_core::static_assertions::const_assert_eq;
use log::debug;
use slab::Slab;
use std::{mem, num::NonZeroU32};

/// Identifies a chunk for as long as it lives in its store. `Option<ChunkId>` is still 32 bits.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ChunkId(NonZeroU32);

const_assert_eq!(mem::size_of::<Option<ChunkId>>(), mem::size_of::<ChunkId>());

impl ChunkId {
    // Indices are XORed with u32::MAX so that index 0 maps to a nonzero id.
    fn from_index(index: usize) -> Option<Self> {
        let index = u32::try_from(index).ok().filter(|&i| i < u32::MAX)?;
        NonZeroU32::new(index ^ u32::MAX).map(Self)
    }

    fn index(self) -> usize {
        (self.0.get() ^ u32::MAX) as usize
    }
}

pub trait ChunkStore {
    /// Creates a chunk at `coordinates` and returns its id.
    ///
    /// # Panics
    ///
    /// Implementations may panic when they have no id left to hand out.
    fn create(&mut self, coordinates: IVec3) -> ChunkId;

    /// Tears down a chunk, returning it if it existed.
    fn destroy(&mut self, id: ChunkId) -> Option<Chunk>;

    fn find_by_coord(&self, coordinates: IVec3) -> Option<ChunkId>;

    /// Every chunk that currently exists, in a stable order.
    fn enumerate_existing(&self) -> Vec<ChunkId>;

    fn get(&self, id: ChunkId) -> Option<&Chunk>;

    fn get_mut(&mut self, id: ChunkId) -> Option<&mut Chunk>;
}

/// In-memory store for hosts without a scene graph. Chunks are parented under a named holder.
pub struct SlabChunkStore {
    holder: String,
    chunks: Slab<Chunk>,
}

impl Default for SlabChunkStore {
    fn default() -> Self {
        Self::new("Chunks")
    }
}

impl SlabChunkStore {
    pub fn new(holder: impl Into<String>) -> Self {
        Self {
            holder: holder.into(),
            chunks: Slab::new(),
        }
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChunkId, &Chunk)> {
        self.chunks
            .iter()
            .filter_map(|(i, c)| ChunkId::from_index(i).map(|id| (id, c)))
    }

    /// Inserts an existing chunk, as a host does when it loads a scene.
    ///
    /// # Panics
    ///
    /// Panics if the store already holds `u32::MAX` chunks. [`ChunkStore::create`] has the same limit.
    pub fn adopt(&mut self, chunk: Chunk) -> ChunkId {
        self.insert(chunk)
    }

    fn insert(&mut self, chunk: Chunk) -> ChunkId {
        let entry = self.chunks.vacant_entry();
        match ChunkId::from_index(entry.key()) {
            Some(id) => {
                debug!("{}: added {}", self.holder, chunk.name);
                entry.insert(chunk);
                id
            }
            None => panic!("chunk store is full ({} chunks)", self.chunks.len()),
        }
    }
}

impl ChunkStore for SlabChunkStore {
    fn create(&mut self, coordinates: IVec3) -> ChunkId {
        self.insert(Chunk::new(coordinates))
    }

    fn destroy(&mut self, id: ChunkId) -> Option<Chunk> {
        let chunk = self.chunks.try_remove(id.index())?;
        debug!("{}: removed {}", self.holder, chunk.name);
        Some(chunk)
    }

    fn find_by_coord(&self, coordinates: IVec3) -> Option<ChunkId> {
        self.iter().find(|(_, c)| c.coordinates == coordinates).map(|(id, _)| id)
    }

    fn enumerate_existing(&self) -> Vec<ChunkId> {
        self.iter().map(|(id, _)| id).collect()
    }

    fn get(&self, id: ChunkId) -> Option<&Chunk> {
        self.chunks.get(id.index())
    }

    fn get_mut(&mut self, id: ChunkId) -> Option<&mut Chunk> {
        self.chunks.get_mut(id.index())
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

    #[test]
    fn ids_round_trip_through_slab_indices() {
        let mut store = SlabChunkStore::default();
        let a = store.create(IVec3::new(1, 2, 3));
        let b = store.create(IVec3::ZERO);
        assert_ne!(a, b);
        assert_eq!(store.get(a).unwrap().name, "Chunk (1, 2, 3)");
        assert_eq!(store.find_by_coord(IVec3::ZERO), Some(b));
        assert_eq!(store.find_by_coord(IVec3::ONE), None);
    }

    #[test]
    fn last_slab_index_has_no_id() {
        let max = u32::MAX as usize;
        assert_eq!(ChunkId::from_index(max - 1).map(ChunkId::index), Some(max - 1));
        assert_eq!(ChunkId::from_index(max), None);
        assert_eq!(ChunkId::from_index(usize::MAX), None);
    }

    #[test]
    fn destroy_is_idempotent() {
        let mut store = SlabChunkStore::new("Terrain");
        let id = store.create(IVec3::ZERO);
        assert!(store.destroy(id).is_some());
        assert!(store.destroy(id).is_none());
        assert!(store.get(id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn enumerates_adopted_chunks() {
        let mut store = SlabChunkStore::default();
        let mut chunk = Chunk::new(IVec3::X);
        chunk.wants_collision = true;
        let id = store.adopt(chunk);
        store.create(IVec3::Y);
        assert_eq!(store.enumerate_existing().len(), 2);
        assert!(store.get(id).unwrap().wants_collision);
    }
}
