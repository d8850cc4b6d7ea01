use super::EXCERPT_CHARS;
use crate::domain::speech::{Gender, SynthesisRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One past synthesis session. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub text_excerpt: String,
    pub language: String,
    pub accent: String,
    pub gender: Gender,
    pub tone: String,
    pub created_at: DateTime<Utc>,
    pub raw_payload: String,
}

impl HistoryEntry {
    pub fn from_request(request: &SynthesisRequest, raw_payload: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text_excerpt: request.text.chars().take(EXCERPT_CHARS).collect(),
            language: request.language.clone(),
            accent: request.accent.clone(),
            gender: request.gender,
            tone: request.tone.clone(),
            created_at: Utc::now(),
            raw_payload,
        }
    }
}
