use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Please select both input and output files")]
    MissingPaths,

    #[error("Please drop an image file (jpg, jpeg, png, bmp, gif)\nDropped: {0}")]
    UnsupportedFile(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Removal(String),

    #[error("Worker stopped without reporting a result")]
    WorkerLost,

    #[error("Background removal is already running")]
    Busy,
}

/// How a failure is reported to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Io,
    Processing,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::MissingPaths | AppError::UnsupportedFile(_) | AppError::Busy => {
                ErrorKind::Validation
            }
            AppError::Image(_) | AppError::Io(_) => ErrorKind::Io,
            AppError::Removal(_) | AppError::WorkerLost => ErrorKind::Processing,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
