//! RIFF/WAVE container layout for 16-bit mono PCM at 24 kHz.
//!
//! ```text
//! 0  "RIFF"   4  36 + data   8  "WAVE"
//! 12 "fmt "   16 16          20 1 (PCM)     22 channels
//! 24 rate     28 byte rate   32 block align 34 bits/sample
//! 36 "data"   40 data size   44 samples...
//! ```

use super::error::AudioDecodeError;

pub const SAMPLE_RATE: u32 = 24_000;
pub const CHANNELS: u16 = 1;
pub const BITS_PER_SAMPLE: u16 = 16;
pub const WAV_HEADER_LEN: usize = 44;
pub const WAV_MIME: &str = "audio/wav";

const FMT_CHUNK_LEN: u32 = 16;
const PCM_FORMAT: u16 = 1;
const BYTE_RATE: u32 = SAMPLE_RATE * CHANNELS as u32 * BITS_PER_SAMPLE as u32 / 8;
const BLOCK_ALIGN: u16 = CHANNELS * BITS_PER_SAMPLE / 8;

/// Wrap raw little-endian PCM bytes in a playable WAV container.
///
/// The PCM bytes are copied verbatim after the 44-byte header; no padding
/// byte is added for odd lengths.
pub fn container(pcm: &[u8]) -> Result<Vec<u8>, AudioDecodeError> {
    let data_size = u32::try_from(pcm.len())
        .ok()
        .filter(|size| size.checked_add(36).is_some())
        .ok_or(AudioDecodeError::TooLarge(pcm.len()))?;

    let mut out = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_size).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
    out.extend_from_slice(&PCM_FORMAT.to_le_bytes());
    out.extend_from_slice(&CHANNELS.to_le_bytes());
    out.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    out.extend_from_slice(&BYTE_RATE.to_le_bytes());
    out.extend_from_slice(&BLOCK_ALIGN.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());
    out.extend_from_slice(pcm);

    debug_assert_eq!(out.len(), WAV_HEADER_LEN + pcm.len());
    Ok(out)
}

fn read_u32(buf: &[u8], at: usize) -> Option<u32> {
    let bytes = buf.get(at..at + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Locate the `data` sub-chunk of a RIFF/WAVE buffer.
pub fn data_chunk(container: &[u8]) -> Option<&[u8]> {
    if container.get(0..4)? != b"RIFF" || container.get(8..12)? != b"WAVE" {
        return None;
    }

    let mut idx = 12;
    while idx + 8 <= container.len() {
        let chunk_id = &container[idx..idx + 4];
        let size = read_u32(container, idx + 4)? as usize;
        let start = idx + 8;
        if chunk_id == b"data" {
            return container.get(start..start.checked_add(size)?);
        }
        // Chunks are word aligned
        idx = start + size + (size & 1);
    }
    None
}
