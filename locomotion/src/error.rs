use std::path::PathBuf;

use thiserror::Error;

use crate::driver::CharacterId;

/// Errors surfaced by the locomotion API.
///
/// Per-tick simulation never fails; these cover the driver-facing edges.
#[derive(Debug, Error)]
pub enum LocomotionError {
    /// Camera-relative movement was requested but no camera could be resolved.
    #[error("no camera available for camera-relative movement")]
    NoCameraAvailable,

    #[error("failed to read locomotion config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse locomotion config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("unknown character {0}")]
    UnknownCharacter(CharacterId),
}
