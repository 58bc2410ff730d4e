use crate::{AutoUpdate, Config, Error};

use basalt_map::{
    ChunkStore, ChunkStreamingManager, GenerationReport, NoiseParameters, ParameterTransitionController, SlabChunkStore,
    Viewer,
};
use log::debug;

/// Whether the host is editing the scene or running it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RunMode {
    #[default]
    Edit,
    Play,
}

/// Streaming, generation and parameter transitions behind one per-frame [`tick`](Self::tick).
pub struct TerrainWorld<S = SlabChunkStore> {
    manager: ChunkStreamingManager<S>,
    transitions: ParameterTransitionController,
    transitions_enabled: bool,
    auto_update: AutoUpdate,
    run_mode: RunMode,
    viewer: Viewer,
    settings_dirty: bool,
}

impl TerrainWorld<SlabChunkStore> {
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::new(config, SlabChunkStore::new("Chunks"))
    }
}

impl<S: ChunkStore> TerrainWorld<S> {
    /// The first tick generates meshes, since settings start out dirty.
    pub fn new(config: &Config, store: S) -> Result<Self, Error> {
        Ok(Self {
            manager: ChunkStreamingManager::new(config.map, store)?,
            transitions: ParameterTransitionController::new(config.transition, config.noise, config.iso_level)?,
            transitions_enabled: config.transitions_enabled,
            auto_update: config.auto_update,
            run_mode: RunMode::default(),
            viewer: Viewer::default(),
            settings_dirty: true,
        })
    }

    pub fn manager(&self) -> &ChunkStreamingManager<S> {
        &self.manager
    }

    pub fn params(&self) -> &NoiseParameters {
        self.transitions.params()
    }

    pub fn iso_level(&self) -> f32 {
        self.transitions.iso_level()
    }

    pub fn transitions(&self) -> &ParameterTransitionController {
        &self.transitions
    }

    pub fn run_mode(&self) -> RunMode {
        self.run_mode
    }

    pub fn set_run_mode(&mut self, mode: RunMode) {
        if mode != self.run_mode {
            debug!("Run mode {:?} -> {:?}", self.run_mode, mode);
            self.run_mode = mode;
            self.settings_dirty = true;
        }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut Viewer {
        &mut self.viewer
    }

    /// Requests one mesh update on the next tick.
    pub fn mark_settings_changed(&mut self) {
        self.settings_dirty = true;
    }

    /// Advances the world by `delta_seconds`.
    pub fn tick(&mut self, delta_seconds: f32) -> GenerationReport {
        let mut report = GenerationReport::default();
        let playing = self.run_mode == RunMode::Play;

        if playing && !self.manager.config().mode.is_fixed() && !self.settings_dirty {
            let params = *self.transitions.params();
            let iso_level = self.transitions.iso_level();
            report.merge(self.manager.update_viewer(&self.viewer, &params, iso_level));
        }

        if self.settings_dirty {
            self.settings_dirty = false;
            report.merge(self.request_mesh_update());
        }

        if playing && self.transitions_enabled && self.transitions.tick(delta_seconds).requests_regeneration() {
            report.merge(self.request_mesh_update());
        }

        report
    }

    /// Regenerates meshes with the current parameters if auto-update allows it in the current run mode.
    pub fn request_mesh_update(&mut self) -> GenerationReport {
        let allowed = match self.run_mode {
            RunMode::Edit => self.auto_update.in_editor,
            RunMode::Play => self.auto_update.in_game,
        };
        if !allowed {
            return GenerationReport::default();
        }

        let params = *self.transitions.params();
        let iso_level = self.transitions.iso_level();
        let report = if self.manager.config().mode.is_fixed() {
            self.manager.rebuild(&params, iso_level)
        } else if self.run_mode == RunMode::Play {
            self.manager.refresh(&self.viewer, &params, iso_level)
        } else {
            // Viewer-relative chunks only exist while playing.
            GenerationReport::default()
        };

        if self.run_mode == RunMode::Edit {
            self.manager.release_buffers();
        }
        report
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
    use basalt_map::{LatticeConfig, MapConfig, StreamingMode, TransitionPhase};
    use basalt_map::glam::Vec3A;

    fn config(mode: StreamingMode) -> Config {
        Config {
            map: MapConfig {
                lattice: LatticeConfig {
                    points_per_axis: 5,
                    chunk_size: 1.0,
                    ..Default::default()
                },
                mode,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn first_tick_builds_the_fixed_grid_once() {
        let mut world = TerrainWorld::from_config(&config(StreamingMode::Fixed { num_chunks: [2, 1, 2] })).unwrap();
        let first = world.tick(0.016);
        assert_eq!(first.created, 4);
        assert_eq!(first.regenerated, 4);
        // Edit mode frees the working buffers after each run.
        assert!(!world.manager().generator().pool().is_allocated());

        assert!(world.tick(0.016).is_noop());

        world.mark_settings_changed();
        let again = world.tick(0.016);
        assert_eq!(again.created, 0);
        assert_eq!(again.regenerated, 4);
    }

    #[test]
    fn auto_update_flags_gate_updates() {
        let mut config = config(StreamingMode::Fixed { num_chunks: [1, 1, 1] });
        config.auto_update.in_editor = false;
        let mut world = TerrainWorld::from_config(&config).unwrap();
        assert!(world.tick(0.016).is_noop());

        world.set_run_mode(RunMode::Play);
        assert_eq!(world.tick(0.016).regenerated, 1);
        assert!(world.manager().generator().pool().is_allocated());
    }

    #[test]
    fn viewer_relative_paging_runs_only_while_playing() {
        let mode = StreamingMode::ViewerRelative { view_distance: 1.5 };
        let mut world = TerrainWorld::from_config(&config(mode)).unwrap();
        assert!(world.tick(0.016).is_noop());
        assert!(world.manager().state().is_empty());

        world.set_run_mode(RunMode::Play);
        let report = world.tick(0.016);
        assert!(report.created > 0);
        let loaded = world.manager().state().len();

        world.viewer_mut().position = Vec3A::new(10.0, 0.0, 0.0);
        let report = world.tick(0.016);
        assert_eq!(report.evicted, loaded);
        assert_eq!(report.created, 0);
        assert_eq!(world.manager().state().len(), loaded);
    }

    #[test]
    fn transitions_regenerate_while_playing() {
        let mut config = config(StreamingMode::Fixed { num_chunks: [1, 1, 1] });
        config.transitions_enabled = true;
        config.transition.duration = 1.0;
        let mut world = TerrainWorld::from_config(&config).unwrap();
        world.tick(0.5);
        assert_eq!(world.params(), &NoiseParameters::default());

        world.set_run_mode(RunMode::Play);
        // Settings changed plus the transition start.
        assert_eq!(world.tick(0.5).regenerated, 1);
        // Interpolated at t = 0.
        assert_eq!(world.tick(0.5).regenerated, 1);
        assert_eq!(world.tick(0.5).regenerated, 1);
        // Committed.
        let (target, target_iso_level) = match world.transitions().phase() {
            TransitionPhase::Transitioning {
                target,
                target_iso_level,
                ..
            } => (*target, *target_iso_level),
            TransitionPhase::Idle => panic!("not transitioning"),
        };
        assert_eq!(world.tick(0.5).regenerated, 1);
        assert_eq!(world.params(), &target);
        assert_relative_eq!(world.iso_level(), target_iso_level);
    }
}
