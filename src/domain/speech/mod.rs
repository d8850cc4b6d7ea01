pub mod error;
pub mod service;

pub use error::SpeechError;
pub use service::{SpeechSynthesisApi, SpeechSynthesisClient, SynthesisOutput};

use serde::{Deserialize, Serialize};

/// Longest text, in characters, ever sent to the provider
pub const MAX_TEXT_CHARS: usize = 5000;

/// Sentinel accepted for both accent and tone meaning "no particular style"
pub const NATIVE: &str = "Native";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Fixed one-to-one voice selection
    pub fn voice(&self) -> Voice {
        match self {
            Gender::Male => Voice::Puck,
            Gender::Female => Voice::Kore,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(format!("unknown gender '{}', expected male or female", other)),
        }
    }
}

/// Prebuilt provider voices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Voice {
    Puck,
    Kore,
}

impl Voice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::Puck => "Puck",
            Voice::Kore => "Kore",
        }
    }
}

impl std::fmt::Display for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the user asked to hear
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    pub text: String,
    pub language: String,
    pub gender: Gender,
    pub accent: String,
    pub tone: String,
}

impl SynthesisRequest {
    pub fn new(
        text: impl Into<String>,
        language: impl Into<String>,
        gender: Gender,
        accent: impl Into<String>,
        tone: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
            gender,
            accent: accent.into(),
            tone: tone.into(),
        }
    }

    /// Accent as embedded in the instruction
    pub fn accent_phrase(&self) -> &str {
        if self.accent == NATIVE {
            "standard"
        } else {
            &self.accent
        }
    }

    /// Tone as embedded in the instruction
    pub fn tone_phrase(&self) -> String {
        if self.tone == NATIVE {
            "natural and proper".to_string()
        } else {
            self.tone.to_lowercase()
        }
    }

    /// Text as submitted, cut to [`MAX_TEXT_CHARS`], and whether anything was dropped
    pub fn submitted_text(&self) -> (&str, bool) {
        match self.text.char_indices().nth(MAX_TEXT_CHARS) {
            Some((cut, _)) => (&self.text[..cut], true),
            None => (&self.text, false),
        }
    }

    /// Natural-language directive followed by the submitted text
    pub fn instruction(&self) -> String {
        let (text, _) = self.submitted_text();
        format!(
            "Read the following text in {} with a {} accent as a {}. The tone should be {}. {}",
            self.language,
            self.accent_phrase(),
            self.gender,
            self.tone_phrase(),
            text
        )
    }
}

/// Provider-facing form of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechPrompt {
    pub model: String,
    pub instruction: String,
    pub voice: Voice,
}
