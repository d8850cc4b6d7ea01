use super::error::SessionError;
use crate::domain::audio::{AudioContainerEncoder, CurrentHandle};
use crate::domain::document::{Document, TextExtractor};
use crate::domain::history::{HistoryEntry, SessionHistoryStore};
use crate::domain::speech::{SpeechSynthesisApi, SpeechSynthesisClient, SynthesisRequest};
use crate::error::{AppError, AppResult};
use crate::infrastructure::config::Config;
use crate::infrastructure::documents::PdfDocumentReader;
use crate::infrastructure::platform::{Base64Codec, FileStorage, InMemoryResources};
use crate::infrastructure::repositories::GeminiSynthesisRepository;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Result of a successful `speak`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakOutcome {
    pub entry_id: String,
    pub uri: String,
    pub size: usize,
    pub truncated: bool,
}

/// The interactive flow: text in, one current playable handle out, with
/// every success recorded in history.
///
/// Only one synthesis may be in flight; overlapping calls are rejected
/// rather than racing for the current handle.
pub struct SpeechSession {
    synthesis: Arc<dyn SpeechSynthesisApi>,
    encoder: Arc<AudioContainerEncoder>,
    extractor: TextExtractor,
    history: Mutex<SessionHistoryStore>,
    current: Mutex<CurrentHandle>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag however `speak` exits
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SpeechSession {
    pub fn new(
        synthesis: Arc<dyn SpeechSynthesisApi>,
        encoder: Arc<AudioContainerEncoder>,
        extractor: TextExtractor,
        history: SessionHistoryStore,
    ) -> Self {
        let current = CurrentHandle::new(encoder.clone());
        Self {
            synthesis,
            encoder,
            extractor,
            history: Mutex::new(history),
            current: Mutex::new(current),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Wire the production collaborators and load persisted history
    pub async fn from_config(config: &Config) -> AppResult<Self> {
        let repository = GeminiSynthesisRepository::new(
            config.gemini_base_url.clone(),
            Duration::from_secs(config.http_timeout_secs),
        )
        .map_err(AppError::Configuration)?;
        let synthesis = Arc::new(SpeechSynthesisClient::new(
            Arc::new(repository),
            config.gemini_model.clone(),
            config.gemini_api_key.clone(),
        ));

        let encoder = Arc::new(AudioContainerEncoder::new(
            Arc::new(Base64Codec),
            Arc::new(InMemoryResources::new()),
        ));
        let storage = Arc::new(FileStorage::new(config.history_dir.clone()));
        let history = SessionHistoryStore::load(storage, encoder.clone()).await;
        let extractor = TextExtractor::new(Arc::new(PdfDocumentReader::new()));

        Ok(Self::new(synthesis, encoder, extractor, history))
    }

    pub fn encoder(&self) -> &Arc<AudioContainerEncoder> {
        &self.encoder
    }

    pub async fn extract(&self, document: Document) -> Result<String, SessionError> {
        Ok(self.extractor.extract(document).await?)
    }

    /// Synthesize, install the result as current and record it in history
    pub async fn speak(&self, request: &SynthesisRequest) -> Result<SpeakOutcome, SessionError> {
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or_else(|| {
            tracing::warn!("Synthesis rejected, another request is in flight");
            SessionError::Busy
        })?;

        let output = self.synthesis.synthesize(request).await?;
        let handle = self.encoder.encode(&output.payload)?;
        let entry = HistoryEntry::from_request(request, output.payload);
        let entry_id = entry.id.clone();

        let (uri, size) = {
            let mut current = self.current.lock().await;
            let handle = current.install(handle);
            (handle.uri().to_string(), handle.size())
        };

        self.history.lock().await.append(entry).await;

        tracing::info!(
            entry_id = %entry_id,
            uri = %uri,
            size = size,
            truncated = output.truncated,
            "Speech ready"
        );

        Ok(SpeakOutcome {
            entry_id,
            uri,
            size,
            truncated: output.truncated,
        })
    }

    /// Make a stored session current again without calling the provider
    pub async fn replay(&self, id: &str) -> Result<String, SessionError> {
        let handle = {
            let history = self.history.lock().await;
            let entry = history
                .get(id)
                .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
            history.replay(entry)?
        };

        let mut current = self.current.lock().await;
        let uri = current.install(handle).uri().to_string();
        tracing::info!(entry_id = id, uri = %uri, "History entry replayed");
        Ok(uri)
    }

    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.history.lock().await.entries().to_vec()
    }

    pub async fn remove(&self, id: &str) -> bool {
        self.history.lock().await.remove(id).await
    }

    pub async fn clear(&self) {
        self.history.lock().await.clear().await;
    }

    pub async fn current_uri(&self) -> Option<String> {
        self.current
            .lock()
            .await
            .get()
            .map(|handle| handle.uri().to_string())
    }

    /// Save the current audio as `synthesized_voice.wav` inside `dir`
    pub async fn save_current(&self, dir: &Path) -> Result<PathBuf, SessionError> {
        let current = self.current.lock().await;
        let handle = current.get().ok_or(SessionError::NothingLoaded)?;
        Ok(self.encoder.save(handle, dir).await?)
    }

    /// End of session: release the current handle
    pub async fn close(&self) {
        self.current.lock().await.release();
    }
}
