use ag_core::GhostError;
use ag_track::TrackError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("configuration error: {0}")]
    Config(#[from] GhostError),

    #[error("track error: {0}")]
    Track(#[from] TrackError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;
