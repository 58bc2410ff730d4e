use crate::Error;

use basalt_map::{MapConfig, NoiseParameters, TransitionConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which host loop updates are allowed to regenerate meshes.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct AutoUpdate {
    pub in_editor: bool,
    pub in_game: bool,
}

impl Default for AutoUpdate {
    fn default() -> Self {
        Self {
            in_editor: true,
            in_game: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    pub map: MapConfig,
    /// Parameters used until the first transition step.
    pub noise: NoiseParameters,
    pub iso_level: f32,
    pub transition: TransitionConfig,
    pub transitions_enabled: bool,
    pub auto_update: AutoUpdate,
}

impl Config {
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let reader = std::fs::File::open(path)?;

        Ok(ron::de::from_reader(reader)?)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.map.validate()?;
        self.transition.validate()?;
        Ok(())
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
    use basalt_map::StreamingMode;

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = ron::from_str(
            "(
                map: (mode: ViewerRelative(view_distance: 12.0)),
                iso_level: 2.5,
            )",
        )
        .unwrap();
        assert_eq!(config.map.mode, StreamingMode::ViewerRelative { view_distance: 12.0 });
        assert_eq!(config.map.lattice.points_per_axis, 30);
        assert_relative_eq!(config.iso_level, 2.5);
        assert!(config.auto_update.in_game);
        assert!(!config.transitions_enabled);
        assert_eq!(config.validate().ok(), Some(()));
    }

    #[test]
    fn round_trips_through_ron() {
        let config = Config {
            transitions_enabled: true,
            ..Default::default()
        };
        let text = ron::to_string(&config).unwrap();
        assert_eq!(ron::from_str::<Config>(&text).unwrap(), config);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(Config::read_file("does/not/exist.ron"), Err(Error::Io(_))));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = Config::default();
        config.map.lattice.points_per_axis = 1;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
