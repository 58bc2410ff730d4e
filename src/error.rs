use basalt_map::{ConfigError, GenerationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
