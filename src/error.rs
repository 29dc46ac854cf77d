use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the file-facing helpers. Generation and meshing never fail.
#[derive(Debug, Error)]
pub enum SceneryError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to load texture atlas: {0}")]
    Image(#[from] image::ImageError),

    #[error("texture atlas {width}x{height} cannot be split into {block_width}x{block_width} square cells")]
    AtlasDimensions {
        width: u32,
        height: u32,
        block_width: u32,
    },

    #[error("atlas map uses {map} cells per row but {expected} were requested")]
    BlockWidthMismatch { map: u32, expected: u32 },
}

pub type Result<T> = std::result::Result<T, SceneryError>;
