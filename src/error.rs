use serde::{Deserialize, Serialize};

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Could not read document: {0}")]
    DocumentRead(String),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("Could not decode audio: {0}")]
    AudioDecode(String),

    #[error("Busy: {0}")]
    Busy(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Error response structure - simplified to just kind + message
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub kind: String,
    pub message: String,
}

impl AppError {
    /// Stable identifier for presentation code
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::DocumentRead(_) => "document_read",
            Self::Synthesis(_) => "synthesis",
            Self::AudioDecode(_) => "audio_decode",
            Self::Busy(_) => "busy",
            Self::NotFound(_) => "not_found",
            Self::Io(_) => "io",
        }
    }

    /// Whether the message is meant to be shown to the user as-is
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::Io(_))
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            kind: self.kind().to_string(),
            message: self.to_string(),
        }
    }

    /// One line for the terminal. JSON mode emits the whole response;
    /// other failures only name their kind and defer to the log.
    pub fn render(&self, json: bool) -> String {
        let response = self.to_response();
        if json {
            return serde_json::to_string(&response).unwrap_or(response.message);
        }
        if self.is_user_facing() {
            response.message
        } else {
            format!("{} error, see the log for details", response.kind)
        }
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
