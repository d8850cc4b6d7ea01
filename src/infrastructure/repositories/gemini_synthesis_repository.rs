use super::synthesis_repository::SynthesisRepository;
use crate::domain::speech::SpeechPrompt;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gemini `generateContent` implementation of the synthesis repository
pub struct GeminiSynthesisRepository {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_modalities: [&'static str; 1],
    speech_config: SpeechConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig<'a> {
    voice_config: VoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig<'a> {
    prebuilt_voice_config: PrebuiltVoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig<'a> {
    voice_name: &'a str,
}

/// Only the path down to the inline audio is modelled; everything else is ignored
#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].inlineData.data`
    fn into_audio(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .inline_data?
            .data
    }
}

impl GeminiSynthesisRepository {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("failed to build HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    fn build_body<'a>(prompt: &'a SpeechPrompt) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![TextPart {
                    text: &prompt.instruction,
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: ["AUDIO"],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: prompt.voice.as_str(),
                        },
                    },
                },
            },
        }
    }
}

#[async_trait]
impl SynthesisRepository for GeminiSynthesisRepository {
    async fn generate(&self, api_key: &str, prompt: &SpeechPrompt) -> Result<Option<String>, String> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            model = %prompt.model,
            voice = %prompt.voice,
            instruction_length = prompt.instruction.len(),
            "Calling Gemini speech API"
        );

        let response = self
            .client
            .post(self.endpoint(&prompt.model))
            .header("x-goog-api-key", api_key)
            .json(&Self::build_body(prompt))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, model = %prompt.model, "Gemini speech API call failed");
                format!("Gemini request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                body = %body,
                "Gemini speech API returned an error status"
            );
            return Err(format!("Gemini returned HTTP {}: {}", status.as_u16(), body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| format!("Gemini response could not be parsed: {}", e))?;
        let audio = parsed.into_audio();

        tracing::info!(
            provider = "gemini",
            model = %prompt.model,
            voice = %prompt.voice,
            latency_ms = start_time.elapsed().as_millis(),
            audio_payload_chars = audio.as_ref().map(|a| a.len()).unwrap_or(0),
            has_audio = audio.is_some(),
            "Speech synthesis completed"
        );

        Ok(audio)
    }
}
