use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum AudioDecodeError {
    #[error("malformed audio payload: {0}")]
    Malformed(String),
    #[error("audio data too large for a WAV container: {0} bytes")]
    TooLarge(usize),
}

impl From<AudioDecodeError> for AppError {
    fn from(err: AudioDecodeError) -> Self {
        AppError::AudioDecode(err.to_string())
    }
}
