use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid filter configuration: {0}")]
    Configuration(String),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShapeError {
    /// Whether the failure came from the caller's input rather than the environment
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, ShapeError>;
