use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("no provider credential configured (set GEMINI_API_KEY)")]
    MissingCredential,
    #[error("no audio returned by the provider; check content filters")]
    NoAudio,
    #[error("synthesis provider error: {0}")]
    Provider(String),
}

impl From<SpeechError> for AppError {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::MissingCredential => AppError::Configuration(err.to_string()),
            SpeechError::NoAudio | SpeechError::Provider(_) => AppError::Synthesis(err.to_string()),
        }
    }
}
