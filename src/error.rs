use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Malformed manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),

    #[error("'{}' or '{}' not found", .json.display(), .image.display())]
    MissingFile { json: PathBuf, image: PathBuf },

    #[error("Invalid color code: {0}")]
    InvalidColor(String),

    #[error("Invalid size format: {0} (e.g. 800x600)")]
    InvalidSize(String),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Unknown animation: {0}")]
    UnknownAnimation(String),

    #[error("Frame {index} is outside the {columns}x{rows} sheet grid")]
    FrameOutOfBounds { index: u32, columns: u32, rows: u32 },
}

pub type SpriteResult<T> = Result<T, SpriteError>;
