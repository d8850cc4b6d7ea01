//! Text-to-speech studio core: document text extraction, speech synthesis
//! through an external provider, WAV container encoding and a bounded,
//! persisted history of recent sessions.

pub mod domain;
pub mod error;
pub mod infrastructure;
