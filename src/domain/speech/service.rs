use super::error::SpeechError;
use super::{SpeechPrompt, SynthesisRequest};
use crate::infrastructure::repositories::SynthesisRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Raw provider audio plus whether the submitted text was cut short
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOutput {
    pub payload: String,
    pub truncated: bool,
}

pub struct SpeechSynthesisClient {
    synthesis_repo: Arc<dyn SynthesisRepository>,
    model: String,
    api_key: Option<String>,
}

impl SpeechSynthesisClient {
    pub fn new(
        synthesis_repo: Arc<dyn SynthesisRepository>,
        model: String,
        api_key: Option<String>,
    ) -> Self {
        Self {
            synthesis_repo,
            model,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn prompt_for(&self, request: &SynthesisRequest) -> SpeechPrompt {
        SpeechPrompt {
            model: self.model.clone(),
            instruction: request.instruction(),
            voice: request.gender.voice(),
        }
    }
}

#[async_trait]
pub trait SpeechSynthesisApi: Send + Sync {
    /// Synthesize speech for a request
    ///
    /// This operation:
    /// - Fails fast without a configured credential
    /// - Truncates text to 5000 characters
    /// - Makes exactly one provider call, never retried
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisOutput, SpeechError>;
}

#[async_trait]
impl SpeechSynthesisApi for SpeechSynthesisClient {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisOutput, SpeechError> {
        let api_key = self.api_key.as_deref().ok_or(SpeechError::MissingCredential)?;

        let (_, truncated) = request.submitted_text();
        if truncated {
            tracing::warn!(
                text_length = request.text.chars().count(),
                limit = super::MAX_TEXT_CHARS,
                "Text truncated before synthesis"
            );
        }

        let prompt = self.prompt_for(request);
        tracing::info!(
            model = %prompt.model,
            voice = %prompt.voice,
            language = %request.language,
            instruction_length = prompt.instruction.len(),
            "Speech synthesis request"
        );

        let payload = self
            .synthesis_repo
            .generate(api_key, &prompt)
            .await
            .map_err(SpeechError::Provider)?
            .filter(|payload| !payload.is_empty())
            .ok_or(SpeechError::NoAudio)?;

        Ok(SynthesisOutput { payload, truncated })
    }
}
