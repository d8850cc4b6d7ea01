use crate::domain::speech::SpeechPrompt;
use async_trait::async_trait;

/// Repository for speech synthesis calls.
/// Abstracts the underlying provider so the client's request rules can be
/// exercised without a network.
///
/// Implementations are responsible for:
/// - Translating the prompt into the provider's wire format
/// - Presenting the credential
/// - Locating the audio payload in the response
#[async_trait]
pub trait SynthesisRepository: Send + Sync {
    /// Ask the provider to speak a prompt
    ///
    /// Returns the encoded audio payload, or `None` when the response carries
    /// no audio (e.g. rejected by a safety filter)
    ///
    /// # Errors
    /// Returns error on transport failure or a non-success provider status
    async fn generate(&self, api_key: &str, prompt: &SpeechPrompt) -> Result<Option<String>, String>;
}
