pub mod error;
pub mod service;

pub use error::SessionError;
pub use service::{SpeakOutcome, SpeechSession};
