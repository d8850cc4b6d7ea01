use crate::domain::audio::AudioDecodeError;
use crate::domain::document::DocumentError;
use crate::domain::speech::SpeechError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("a synthesis request is already in progress")]
    Busy,
    #[error("history entry not found: {0}")]
    NotFound(String),
    #[error("nothing is loaded for playback")]
    NothingLoaded,
    #[error(transparent)]
    Speech(#[from] SpeechError),
    #[error(transparent)]
    Audio(#[from] AudioDecodeError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("failed to save audio: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Busy => AppError::Busy(err.to_string()),
            SessionError::NotFound(_) | SessionError::NothingLoaded => {
                AppError::NotFound(err.to_string())
            }
            SessionError::Speech(e) => AppError::from(e),
            SessionError::Audio(e) => AppError::from(e),
            SessionError::Document(e) => AppError::from(e),
            SessionError::Io(e) => AppError::Io(e.to_string()),
        }
    }
}
