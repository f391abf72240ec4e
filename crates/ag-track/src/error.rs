use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("record parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type TrackResult<T> = Result<T, TrackError>;
