use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// No free rectangle for the fragment on the current canvas. Caught by the size search.
    #[error(
        "cannot place {fragment_width}x{fragment_height} fragment: {width}x{height} canvas is full"
    )]
    BufferFull {
        width: u32,
        height: u32,
        fragment_width: u32,
        fragment_height: u32,
    },
    #[error("Invalid palette: {0}")]
    InvalidPalette(String),
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Archive '{archive}' has no entry named '{entry}'")]
    UnknownEntry { archive: String, entry: String },
}

impl AtlasError {
    /// True for the recoverable placement failure that triggers a retry at the next size.
    pub fn is_buffer_full(&self) -> bool {
        matches!(self, AtlasError::BufferFull { .. })
    }
}

pub type Result<T> = std::result::Result<T, AtlasError>;
