use std::io;
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{} does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("Malformed movie file: {0}")]
    Format(String),

    #[error("No .jpg, .jpeg or .png images found in {}", dir.display())]
    EmptyInput { dir: PathBuf },

    #[error("Couldn't decode image {}: {source}", path.display())]
    DecodeFailure {
        path: PathBuf,
        #[source]
        source: ::image::ImageError,
    },

    #[error("Frame {index} is out of range (movie has {frame_count} frames)")]
    OutOfRange { index: i64, frame_count: usize },

    #[error("Frame rate must be positive")]
    InvalidFps,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    pub(crate) fn out_of_range(index: impl TryInto<i64>, frame_count: usize) -> Self {
        Self::OutOfRange {
            index: index.try_into().unwrap_or(i64::MAX),
            frame_count,
        }
    }
}
