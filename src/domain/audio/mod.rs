pub mod encoder;
pub mod error;
pub mod wav;

pub use encoder::{AudioContainerEncoder, CurrentHandle, PlayableHandle};
pub use error::AudioDecodeError;

/// Suggested filename for the save-to-disk action
pub const DOWNLOAD_FILENAME: &str = "synthesized_voice.wav";
