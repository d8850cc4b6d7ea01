use super::error::AudioDecodeError;
use super::wav;
use super::DOWNLOAD_FILENAME;
use crate::infrastructure::platform::{BinaryCodec, EphemeralResources};
use bytes::Bytes;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Live reference to an encoded WAV container.
///
/// Handles are not persisted and not clonable. Whoever receives one must
/// hand it back to [`AudioContainerEncoder::release`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "playable handles must be released"]
pub struct PlayableHandle {
    uri: String,
    size: usize,
}

impl PlayableHandle {
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Container length in bytes, header included
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn filename(&self) -> &'static str {
        DOWNLOAD_FILENAME
    }

    pub fn mime(&self) -> &'static str {
        wav::WAV_MIME
    }
}

/// Turns raw provider payloads into playable WAV resources
pub struct AudioContainerEncoder {
    codec: Arc<dyn BinaryCodec>,
    resources: Arc<dyn EphemeralResources>,
}

impl AudioContainerEncoder {
    pub fn new(codec: Arc<dyn BinaryCodec>, resources: Arc<dyn EphemeralResources>) -> Self {
        Self { codec, resources }
    }

    /// Decode `raw_payload`, wrap it in a WAV container and register the
    /// result as an ephemeral resource.
    pub fn encode(&self, raw_payload: &str) -> Result<PlayableHandle, AudioDecodeError> {
        let pcm = self
            .codec
            .decode(raw_payload)
            .map_err(AudioDecodeError::Malformed)?;
        let container = wav::container(&pcm)?;
        let size = container.len();
        let uri = self.resources.create(Bytes::from(container), wav::WAV_MIME);

        tracing::debug!(
            uri = %uri,
            pcm_bytes = pcm.len(),
            duration_secs = pcm.len() as f64 / (wav::SAMPLE_RATE as f64 * 2.0),
            "Audio container encoded"
        );

        Ok(PlayableHandle { uri, size })
    }

    pub fn release(&self, handle: PlayableHandle) -> bool {
        self.resources.release(&handle.uri)
    }

    /// Container bytes behind a live handle
    pub fn contents(&self, handle: &PlayableHandle) -> Option<Bytes> {
        self.resources.get(&handle.uri)
    }

    /// Write the container to `dir` under the download filename
    pub async fn save(&self, handle: &PlayableHandle, dir: &Path) -> std::io::Result<PathBuf> {
        let data = self.contents(handle).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("resource {} is no longer live", handle.uri),
            )
        })?;

        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(handle.filename());
        tokio::fs::write(&path, &data).await?;

        tracing::info!(path = %path.display(), size = data.len(), "Audio saved");
        Ok(path)
    }
}

/// Single slot for the handle the interactive flow is currently playing.
///
/// Installing a new handle releases the previous one first; dropping the
/// slot releases whatever it still holds.
pub struct CurrentHandle {
    encoder: Arc<AudioContainerEncoder>,
    slot: Option<PlayableHandle>,
}

impl CurrentHandle {
    pub fn new(encoder: Arc<AudioContainerEncoder>) -> Self {
        Self {
            encoder,
            slot: None,
        }
    }

    pub fn install(&mut self, handle: PlayableHandle) -> &PlayableHandle {
        self.release();
        self.slot.insert(handle)
    }

    pub fn get(&self) -> Option<&PlayableHandle> {
        self.slot.as_ref()
    }

    /// Give up ownership without releasing; the caller inherits the obligation
    pub fn take(&mut self) -> Option<PlayableHandle> {
        self.slot.take()
    }

    pub fn release(&mut self) {
        if let Some(previous) = self.slot.take() {
            self.encoder.release(previous);
        }
    }
}

impl Drop for CurrentHandle {
    fn drop(&mut self) {
        self.release();
    }
}
