use std::path::PathBuf;

use image::ImageError;


pub type MergeResult<T> = Result<T, MergeError>;

#[derive(Debug, thiserror::Error)]
pub enum MergeError {

    #[error("Failed to load image: {}: {}", .path.display(), .source)]
    Load {
        path: PathBuf,
        source: ImageError,
    },

    #[error("Failed to save image: {}: {}", .path.display(), .source)]
    Save {
        path: PathBuf,
        source: ImageError,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl MergeError {

    pub fn load(path: impl Into<PathBuf>, source: impl Into<ImageError>) -> Self {
        MergeError::Load { path: path.into(), source: source.into() }
    }

    pub fn save(path: impl Into<PathBuf>, source: impl Into<ImageError>) -> Self {
        MergeError::Save { path: path.into(), source: source.into() }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        MergeError::Config(msg.into())
    }
}
