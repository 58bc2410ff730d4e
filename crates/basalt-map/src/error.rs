use thiserror::Error;

/// Rejected configuration. Constructors validate eagerly so that bad settings never reach a dispatch.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("lattice needs at least 2 points per axis, got {0}")]
    LatticeTooSmall(u32),
    #[error("chunk size must be positive and finite, got {0}")]
    InvalidChunkSize(f32),
    #[error("view distance must be positive and finite, got {0}")]
    InvalidViewDistance(f32),
    #[error("fixed grid must contain at least one chunk, got {0:?}")]
    EmptyGrid([u32; 3]),
    #[error("range for {field} is inverted or not finite: [{min}, {max}]")]
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("transition duration must be positive and finite, got {0}")]
    InvalidDuration(f32),
}

/// Failure of a single chunk's regeneration pass.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GenerationError {
    #[error("lattice needs at least 2 points per axis, got {0}")]
    InvalidResolution(u32),
    #[error("failed to allocate {bytes} bytes for the {buffer} buffer")]
    BufferAllocation { buffer: &'static str, bytes: usize },
}
