//! Decides which chunks exist and keeps their meshes current.
//!
//! In [`StreamingMode::Fixed`] the manager keeps a dense grid of chunks centered on the origin. In
//! [`StreamingMode::ViewerRelative`] it pages chunks in and out around a moving [`Viewer`], recycling chunks that fall out of
//! view instead of destroying them.

use crate::{
    Chunk, ChunkGenerator, ChunkId, ChunkStore, ConfigError, DensitySampler, GenerationError, MapConfig,
    NoiseParameters, StreamingMode,
};

use basalt_core::geometry::{Aabb, Frustum};
use basalt_core::glam::{IVec3, Vec3A};
use basalt_core::work_timer::WorkTimer;
use basalt_core::SmallKeyHashMap;
use log::{debug, info, warn};
use std::collections::VecDeque;
use std::time::Duration;

/// Where the world is being viewed from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewer {
    pub position: Vec3A,
    /// `None` treats every chunk as visible.
    pub frustum: Option<Frustum>,
}

impl Viewer {
    pub fn new(position: Vec3A) -> Self {
        Self {
            position,
            frustum: None,
        }
    }

    pub fn with_frustum(mut self, frustum: Frustum) -> Self {
        self.frustum = Some(frustum);
        self
    }

    pub fn sees(&self, bounds: &Aabb) -> bool {
        self.frustum.map_or(true, |f| f.intersects_aabb(bounds))
    }
}

/// The live set of chunks.
///
/// A coordinate is in `index` iff its chunk is in `active`, and no chunk is both active and recyclable.
#[derive(Debug, Default)]
pub struct StreamingState {
    active: Vec<ChunkId>,
    index: SmallKeyHashMap<IVec3, ChunkId>,
    recyclable: VecDeque<ChunkId>,
}

impl StreamingState {
    pub fn active(&self) -> &[ChunkId] {
        &self.active
    }

    pub fn recyclable(&self) -> impl Iterator<Item = ChunkId> + '_ {
        self.recyclable.iter().copied()
    }

    pub fn get(&self, coordinates: IVec3) -> Option<ChunkId> {
        self.index.get(&coordinates).copied()
    }

    pub fn contains(&self, coordinates: IVec3) -> bool {
        self.index.contains_key(&coordinates)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    fn activate(&mut self, coordinates: IVec3, id: ChunkId) {
        self.active.push(id);
        self.index.insert(coordinates, id);
    }

    fn clear(&mut self) {
        self.active.clear();
        self.index.clear();
        self.recyclable.clear();
    }
}

/// What one rebuild or update did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenerationReport {
    pub created: usize,
    pub recycled: usize,
    pub evicted: usize,
    pub destroyed: usize,
    pub regenerated: usize,
    pub triangles: usize,
    /// Chunks whose regeneration failed. Their meshes were cleared.
    pub failures: Vec<(IVec3, GenerationError)>,
    pub elapsed: Duration,
}

impl GenerationReport {
    pub fn is_noop(&self) -> bool {
        self.created == 0
            && self.recycled == 0
            && self.evicted == 0
            && self.destroyed == 0
            && self.regenerated == 0
            && self.failures.is_empty()
    }

    /// Folds `other` into `self`.
    pub fn merge(&mut self, other: GenerationReport) {
        self.created += other.created;
        self.recycled += other.recycled;
        self.evicted += other.evicted;
        self.destroyed += other.destroyed;
        self.regenerated += other.regenerated;
        self.triangles += other.triangles;
        self.failures.extend(other.failures);
        self.elapsed += other.elapsed;
    }
}

pub struct ChunkStreamingManager<S> {
    config: MapConfig,
    store: S,
    generator: ChunkGenerator,
    state: StreamingState,
}

impl<S: ChunkStore> ChunkStreamingManager<S> {
    pub fn new(config: MapConfig, store: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let generator = ChunkGenerator::new(
            config.lattice,
            DensitySampler::from_config(&config.sampler),
            config.world_size(),
        );
        Ok(Self {
            config,
            store,
            generator,
            state: StreamingState::default(),
        })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> &StreamingState {
        &self.state
    }

    pub fn generator(&self) -> &ChunkGenerator {
        &self.generator
    }

    /// Frees the working buffers. They are reallocated by the next regeneration.
    pub fn release_buffers(&mut self) {
        self.generator.release_buffers();
    }

    /// The active chunks, in activation order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.state.active.iter().filter_map(|&id| self.store.get(id))
    }

    pub fn chunk_at(&self, coordinates: IVec3) -> Option<&Chunk> {
        self.state.get(coordinates).and_then(|id| self.store.get(id))
    }

    pub fn chunk_bounds(&self, coordinates: IVec3) -> Aabb {
        Aabb::from_center_and_size(
            self.config.chunk_center(coordinates),
            Vec3A::splat(self.config.lattice.chunk_size),
        )
    }

    /// Chunk containing `position` in viewer-relative mode.
    pub fn viewer_coordinates(&self, position: Vec3A) -> IVec3 {
        (position / self.config.lattice.chunk_size).round().as_ivec3()
    }

    /// Rebuilds the fixed grid from scratch and regenerates every chunk in it.
    ///
    /// Chunks already in the store are matched to grid slots by coordinate and reused. Chunks without a slot are
    /// destroyed, and empty slots get new chunks. In viewer-relative mode this only regenerates the active chunks.
    pub fn rebuild(&mut self, params: &NoiseParameters, iso_level: f32) -> GenerationReport {
        let mut timer = WorkTimer::start();
        let mut report = GenerationReport::default();

        if let StreamingMode::Fixed { num_chunks } = self.config.mode {
            self.reconcile_grid(num_chunks, &mut report);
            if report.created + report.destroyed > 0 {
                info!(
                    "Rebuilt {:?} chunk grid: {} created, {} destroyed",
                    num_chunks, report.created, report.destroyed
                );
            } else {
                debug!("Regenerating {:?} chunk grid in place", num_chunks);
            }
        }
        self.regenerate_active(params, iso_level, &mut timer, &mut report);

        report.elapsed = timer.elapsed();
        report
    }

    fn reconcile_grid(&mut self, num_chunks: [u32; 3], report: &mut GenerationReport) {
        let mut existing = SmallKeyHashMap::default();
        let mut leftovers = Vec::new();
        for id in self.store.enumerate_existing() {
            if let Some(chunk) = self.store.get(id) {
                if existing.contains_key(&chunk.coordinates) {
                    leftovers.push(id);
                } else {
                    existing.insert(chunk.coordinates, id);
                }
            }
        }

        self.state.clear();
        let [nx, ny, nz] = num_chunks.map(|n| n as i32);
        for x in 0..nx {
            for y in 0..ny {
                for z in 0..nz {
                    let coordinates = IVec3::new(x, y, z);
                    let id = match existing.remove(&coordinates) {
                        Some(id) => id,
                        None => {
                            report.created += 1;
                            self.store.create(coordinates)
                        }
                    };
                    self.set_up_chunk(id, coordinates);
                    self.state.activate(coordinates, id);
                }
            }
        }

        leftovers.extend(existing.into_iter().map(|(_, id)| id));
        for id in leftovers {
            if self.store.destroy(id).is_some() {
                report.destroyed += 1;
            }
        }
    }

    /// Pages chunks in and out around `viewer`, regenerating only the chunks that came into view.
    ///
    /// Does nothing in fixed mode.
    pub fn update_viewer(&mut self, viewer: &Viewer, params: &NoiseParameters, iso_level: f32) -> GenerationReport {
        self.page(viewer, params, iso_level, false)
    }

    /// Pages chunks around `viewer` and then regenerates every active chunk, e.g. after the noise parameters changed.
    pub fn refresh(&mut self, viewer: &Viewer, params: &NoiseParameters, iso_level: f32) -> GenerationReport {
        self.page(viewer, params, iso_level, true)
    }

    fn page(&mut self, viewer: &Viewer, params: &NoiseParameters, iso_level: f32, regenerate_all: bool) -> GenerationReport {
        let mut timer = WorkTimer::start();
        let mut report = GenerationReport::default();

        let view_distance = match self.config.mode {
            StreamingMode::ViewerRelative { view_distance } => view_distance,
            StreamingMode::Fixed { .. } => {
                if regenerate_all {
                    self.regenerate_active(params, iso_level, &mut timer, &mut report);
                }
                report.elapsed = timer.elapsed();
                return report;
            }
        };
        let max_sq_dist = view_distance * view_distance;

        self.evict_out_of_view(viewer.position, max_sq_dist, &mut report);

        let center = self.viewer_coordinates(viewer.position);
        let radius = (view_distance / self.config.lattice.chunk_size).ceil() as i32;
        for x in -radius..=radius {
            for y in -radius..=radius {
                for z in -radius..=radius {
                    let coordinates = center + IVec3::new(x, y, z);
                    if self.state.contains(coordinates) {
                        continue;
                    }
                    let bounds = self.chunk_bounds(coordinates);
                    if bounds.squared_distance_to_point(viewer.position) > max_sq_dist || !viewer.sees(&bounds) {
                        continue;
                    }
                    let id = self.materialize(coordinates, &mut report);
                    if !regenerate_all {
                        self.regenerate_chunk(id, params, iso_level, &mut timer, &mut report);
                    }
                }
            }
        }

        if regenerate_all {
            self.regenerate_active(params, iso_level, &mut timer, &mut report);
        }
        if report.created + report.recycled + report.evicted > 0 {
            debug!(
                "Paged around {}: {} created, {} recycled, {} evicted, {} active",
                center,
                report.created,
                report.recycled,
                report.evicted,
                self.state.len()
            );
        }

        report.elapsed = timer.elapsed();
        report
    }

    fn evict_out_of_view(&mut self, viewer_position: Vec3A, max_sq_dist: f32, report: &mut GenerationReport) {
        // Backwards so removal doesn't skip entries; `remove` keeps activation order.
        for i in (0..self.state.active.len()).rev() {
            let id = self.state.active[i];
            let coordinates = match self.store.get(id) {
                Some(chunk) => chunk.coordinates,
                None => {
                    // Destroyed behind our back.
                    self.state.active.remove(i);
                    self.state.index.retain(|_, v| *v != id);
                    continue;
                }
            };
            let sq_dist = self.chunk_bounds(coordinates).squared_distance_to_point(viewer_position);
            if sq_dist <= max_sq_dist {
                continue;
            }

            self.state.active.remove(i);
            self.state.index.remove(&coordinates);
            if let Some(chunk) = self.store.get_mut(id) {
                chunk.deactivate();
                debug!("Evicted {}", chunk.name);
            }
            self.state.recyclable.push_back(id);
            report.evicted += 1;
        }
    }

    /// Activates a chunk at `coordinates`, recycling one if possible.
    fn materialize(&mut self, coordinates: IVec3, report: &mut GenerationReport) -> ChunkId {
        let id = match self.take_recyclable(coordinates) {
            Some(id) => {
                report.recycled += 1;
                id
            }
            None => {
                report.created += 1;
                self.store.create(coordinates)
            }
        };
        self.set_up_chunk(id, coordinates);
        self.state.activate(coordinates, id);
        id
    }

    /// Prefers a recyclable chunk that still carries `coordinates`, so a stale coordinate never outlives its reuse.
    fn take_recyclable(&mut self, coordinates: IVec3) -> Option<ChunkId> {
        let store = &self.store;
        let matching = self
            .state
            .recyclable
            .iter()
            .position(|&id| store.get(id).map_or(false, |c| c.coordinates == coordinates));
        match matching {
            Some(i) => self.state.recyclable.remove(i),
            None => self.state.recyclable.pop_front(),
        }
    }

    fn set_up_chunk(&mut self, id: ChunkId, coordinates: IVec3) {
        if let Some(chunk) = self.store.get_mut(id) {
            if chunk.coordinates != coordinates {
                debug!("Recycling {} as {}", chunk.name, coordinates);
            }
            chunk.reassign(coordinates);
            chunk.set_up(self.config.material, self.config.generate_colliders);
        }
    }

    /// Regenerates every active chunk.
    pub fn regenerate_all(&mut self, params: &NoiseParameters, iso_level: f32) -> GenerationReport {
        let mut timer = WorkTimer::start();
        let mut report = GenerationReport::default();
        self.regenerate_active(params, iso_level, &mut timer, &mut report);
        report.elapsed = timer.elapsed();
        report
    }

    fn regenerate_active(
        &mut self,
        params: &NoiseParameters,
        iso_level: f32,
        timer: &mut WorkTimer,
        report: &mut GenerationReport,
    ) {
        for i in 0..self.state.active.len() {
            let id = self.state.active[i];
            self.regenerate_chunk(id, params, iso_level, timer, report);
        }
    }

    fn regenerate_chunk(
        &mut self,
        id: ChunkId,
        params: &NoiseParameters,
        iso_level: f32,
        timer: &mut WorkTimer,
        report: &mut GenerationReport,
    ) {
        let chunk = match self.store.get_mut(id) {
            Some(chunk) => chunk,
            None => return,
        };
        let center = self.config.chunk_center(chunk.coordinates);
        let generator = &mut self.generator;
        match timer.time_item(|| generator.regenerate(chunk, center, params, iso_level)) {
            Ok(triangles) => {
                report.regenerated += 1;
                report.triangles += triangles;
            }
            Err(e) => {
                warn!("Failed to regenerate {}: {}", chunk.name, e);
                report.failures.push((chunk.coordinates, e));
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
    use crate::{LatticeConfig, MaterialId, SlabChunkStore};

    use basalt_core::glam::{Mat4, Vec3};

    fn fixed_config(num_chunks: [u32; 3], points_per_axis: u32) -> MapConfig {
        MapConfig {
            lattice: LatticeConfig {
                points_per_axis,
                chunk_size: 1.0,
                ..Default::default()
            },
            mode: StreamingMode::Fixed { num_chunks },
            material: MaterialId(3),
            generate_colliders: true,
            ..Default::default()
        }
    }

    fn viewer_config(view_distance: f32) -> MapConfig {
        MapConfig {
            lattice: LatticeConfig {
                points_per_axis: 4,
                chunk_size: 1.0,
                ..Default::default()
            },
            mode: StreamingMode::ViewerRelative { view_distance },
            ..Default::default()
        }
    }

    fn assert_consistent<S: ChunkStore>(manager: &ChunkStreamingManager<S>) {
        let state = manager.state();
        assert_eq!(state.index.len(), state.active.len());
        for &id in &state.active {
            let chunk = manager.store().get(id).unwrap();
            assert!(chunk.active);
            assert_eq!(state.get(chunk.coordinates), Some(id));
        }
        for id in state.recyclable() {
            assert!(!state.active.contains(&id));
            let chunk = manager.store().get(id).unwrap();
            assert!(!chunk.active);
            assert_ne!(state.get(chunk.coordinates), Some(id));
            assert!(!state.contains(chunk.coordinates));
        }
    }

    fn active_coordinates<S: ChunkStore>(manager: &ChunkStreamingManager<S>) -> Vec<IVec3> {
        manager.chunks().map(|c| c.coordinates).collect()
    }

    #[test]
    fn two_by_one_by_two_grid() {
        let mut manager = ChunkStreamingManager::new(fixed_config([2, 1, 2], 30), SlabChunkStore::default()).unwrap();
        let report = manager.rebuild(&NoiseParameters::default(), 0.0);

        assert_eq!(report.created, 4);
        assert_eq!(report.regenerated, 4);
        assert!(report.failures.is_empty());
        assert_eq!(manager.store().len(), 4);

        let mut coords = active_coordinates(&manager);
        coords.sort_by_key(|c| (c.z, c.x));
        assert_eq!(
            coords,
            vec![
                IVec3::new(0, 0, 0),
                IVec3::new(1, 0, 0),
                IVec3::new(0, 0, 1),
                IVec3::new(1, 0, 1)
            ]
        );
        for chunk in manager.chunks() {
            assert!(chunk.mesh.triangle_count() <= 5 * 29 * 29 * 29);
            assert_eq!(chunk.material, MaterialId(3));
            assert!(chunk.wants_collision);
        }
        assert_consistent(&manager);
    }

    #[test]
    fn rebuild_reuses_existing_chunks() {
        let mut store = SlabChunkStore::default();
        let kept = store.adopt(Chunk::new(IVec3::ZERO));
        let stray = store.adopt(Chunk::new(IVec3::new(5, 5, 5)));

        let mut manager = ChunkStreamingManager::new(fixed_config([2, 1, 2], 4), store).unwrap();
        let report = manager.rebuild(&NoiseParameters::default(), 0.0);
        assert_eq!(report.created, 3);
        assert_eq!(report.destroyed, 1);
        assert_eq!(manager.state().get(IVec3::ZERO), Some(kept));
        assert!(manager.store().get(stray).is_none());

        let again = manager.rebuild(&NoiseParameters::default(), 0.0);
        assert_eq!(again.created, 0);
        assert_eq!(again.destroyed, 0);
        assert_eq!(again.regenerated, 4);
        assert_eq!(manager.store().len(), 4);
        assert_eq!(manager.generator().pool().allocation_count(), 1);
    }

    #[test]
    fn fixed_mode_ignores_the_viewer() {
        let mut manager = ChunkStreamingManager::new(fixed_config([1, 1, 1], 4), SlabChunkStore::default()).unwrap();
        manager.rebuild(&NoiseParameters::default(), 0.0);
        let report = manager.update_viewer(
            &Viewer::new(Vec3A::splat(100.0)),
            &NoiseParameters::default(),
            0.0,
        );
        assert!(report.is_noop());
        assert_eq!(manager.state().len(), 1);
    }

    #[test]
    fn chunks_within_view_distance_are_loaded() {
        let mut manager = ChunkStreamingManager::new(viewer_config(2.0), SlabChunkStore::default()).unwrap();
        let viewer = Viewer::new(Vec3A::new(0.2, 0.1, -0.3));
        let report = manager.update_viewer(&viewer, &NoiseParameters::default(), 0.0);

        assert!(report.created > 0);
        assert_eq!(report.regenerated, report.created);
        assert_eq!(report.recycled, 0);
        for coords in active_coordinates(&manager) {
            let d = manager.chunk_bounds(coords).squared_distance_to_point(viewer.position);
            assert!(d <= 4.0);
        }
        assert!(manager.state().contains(IVec3::ZERO));
        assert!(manager.state().contains(IVec3::new(2, 0, 0)));
        assert!(!manager.state().contains(IVec3::new(3, 0, 0)));
        assert_consistent(&manager);
    }

    #[test]
    fn unmoved_viewer_causes_no_churn() {
        let mut manager = ChunkStreamingManager::new(viewer_config(2.5), SlabChunkStore::default()).unwrap();
        let viewer = Viewer::new(Vec3A::new(1.3, 0.0, 0.4));
        let params = NoiseParameters::default();
        manager.update_viewer(&viewer, &params, 0.0);

        let active = manager.state().active().to_vec();
        let index = manager.state().index.clone();
        for _ in 0..3 {
            let report = manager.update_viewer(&viewer, &params, 0.0);
            assert!(report.is_noop());
            assert_eq!(manager.state().active(), active.as_slice());
            assert_eq!(*manager.state().index, *index);
        }
    }

    #[test]
    fn unchanged_frustum_causes_no_churn() {
        let mut manager = ChunkStreamingManager::new(viewer_config(3.0), SlabChunkStore::default()).unwrap();
        let params = NoiseParameters::default();
        let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
        let position = Vec3A::new(0.4, 0.2, -0.3);

        for step in 0..24 {
            let angle = step as f32 * std::f32::consts::TAU / 24.0;
            let forward = Vec3::new(angle.sin(), 0.0, -angle.cos());
            let view = Mat4::look_at_rh(position.into(), Vec3::from(position) + forward, Vec3::Y);
            let viewer = Viewer::new(position).with_frustum(Frustum::from_view_projection(proj * view));

            manager.update_viewer(&viewer, &params, 0.0);
            assert_consistent(&manager);
            let active = manager.state().active().to_vec();

            let again = manager.update_viewer(&viewer, &params, 0.0);
            assert!(again.is_noop(), "step {step}: {again:?}");
            assert_eq!(manager.state().active(), active.as_slice());
            assert_consistent(&manager);
        }
    }

    #[test]
    fn moving_viewer_recycles_chunks() {
        let mut manager = ChunkStreamingManager::new(viewer_config(2.0), SlabChunkStore::default()).unwrap();
        let params = NoiseParameters::default();
        let mut viewer = Viewer::new(Vec3A::ZERO);
        manager.update_viewer(&viewer, &params, 0.0);

        let mut recycled = 0;
        for step in 1..=12 {
            viewer.position = Vec3A::new(0.75 * step as f32, 0.0, 0.0);
            let report = manager.update_viewer(&viewer, &params, 0.0);
            recycled += report.recycled;
            if report.created > 0 {
                // Only create once the pool is exhausted.
                assert_eq!(manager.state().recyclable().count(), 0);
            }
            assert_eq!(
                manager.store().len(),
                manager.state().len() + manager.state().recyclable().count()
            );
            assert_consistent(&manager);
        }
        assert!(recycled > 0);

        for id in manager.state().recyclable() {
            let chunk = manager.store().get(id).unwrap();
            assert!(chunk.mesh.is_empty());
        }
    }

    #[test]
    fn returning_coordinate_reuses_its_own_chunk() {
        let mut manager = ChunkStreamingManager::new(viewer_config(1.0), SlabChunkStore::default()).unwrap();
        let params = NoiseParameters::default();
        manager.update_viewer(&Viewer::new(Vec3A::ZERO), &params, 0.0);
        let back = manager.state().get(IVec3::new(-1, 0, 0)).unwrap();

        manager.update_viewer(&Viewer::new(Vec3A::new(0.6, 0.0, 0.0)), &params, 0.0);
        assert!(!manager.state().contains(IVec3::new(-1, 0, 0)));
        assert_consistent(&manager);

        manager.update_viewer(&Viewer::new(Vec3A::ZERO), &params, 0.0);
        assert_eq!(manager.state().get(IVec3::new(-1, 0, 0)), Some(back));
        assert_consistent(&manager);
    }

    #[test]
    fn frustum_culls_chunks_behind_the_viewer() {
        let params = NoiseParameters::default();
        let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
        let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y);
        let frustum = Frustum::from_view_projection(proj * view);

        let mut culled = ChunkStreamingManager::new(viewer_config(3.0), SlabChunkStore::default()).unwrap();
        culled.update_viewer(&Viewer::new(Vec3A::ZERO).with_frustum(frustum), &params, 0.0);
        let mut all = ChunkStreamingManager::new(viewer_config(3.0), SlabChunkStore::default()).unwrap();
        all.update_viewer(&Viewer::new(Vec3A::ZERO), &params, 0.0);

        assert!(culled.state().len() < all.state().len());
        assert!(culled.state().contains(IVec3::new(0, 0, -2)));
        assert!(!culled.state().contains(IVec3::new(0, 0, 3)));
    }

    #[test]
    fn refresh_regenerates_every_active_chunk() {
        let mut manager = ChunkStreamingManager::new(viewer_config(1.5), SlabChunkStore::default()).unwrap();
        let viewer = Viewer::new(Vec3A::ZERO);
        let first = manager.refresh(&viewer, &NoiseParameters::default(), 0.0);
        assert_eq!(first.regenerated, manager.state().len());

        let second = manager.refresh(&viewer, &NoiseParameters::default(), 0.0);
        assert_eq!(second.created, 0);
        assert_eq!(second.regenerated, manager.state().len());
    }

    #[test]
    fn rejects_invalid_config() {
        let result = ChunkStreamingManager::new(fixed_config([2, 1, 2], 1), SlabChunkStore::default());
        assert_eq!(result.err(), Some(ConfigError::LatticeTooSmall(1)));
    }
}
