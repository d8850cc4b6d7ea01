use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Converts between the provider's text encoding of audio and raw bytes.
pub trait BinaryCodec: Send + Sync {
    /// Decode a text payload into raw bytes
    fn decode(&self, encoded: &str) -> Result<Vec<u8>, String>;

    /// Encode raw bytes into the text form stored alongside history entries
    fn encode(&self, bytes: &[u8]) -> String;
}

/// Standard-alphabet, padded base64 as returned by the synthesis provider
#[derive(Debug, Default, Clone, Copy)]
pub struct Base64Codec;

impl BinaryCodec for Base64Codec {
    fn decode(&self, encoded: &str) -> Result<Vec<u8>, String> {
        // Providers occasionally wrap long payloads
        let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| format!("invalid base64 payload: {}", e))
    }

    fn encode(&self, bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }
}
