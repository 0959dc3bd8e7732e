//! Line-delimited JSON framing shared by the provider transports

use thiserror::Error;

use crate::domain::payload::PushPayload;

/// Why a single frame could not become a payload
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Decode one frame from raw bytes, trailing newline optional.
///
/// Blank frames carry nothing and yield `None`. A bad frame only affects
/// itself; readers keep going with the next line.
pub fn decode_frame(frame: &[u8]) -> Option<Result<PushPayload, FrameError>> {
    let line = match std::str::from_utf8(frame) {
        Ok(line) => line,
        Err(e) => return Some(Err(e.into())),
    };
    decode_line(line).map(|r| r.map_err(FrameError::from))
}

/// Decode one text frame. Blank lines yield `None`.
pub fn decode_line(line: &str) -> Option<Result<PushPayload, serde_json::Error>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(PushPayload::from_json(line))
}

/// Encode one frame, newline included
pub fn encode_line(payload: &PushPayload) -> Result<String, serde_json::Error> {
    let mut line = payload.to_json()?;
    line.push('\n');
    Ok(line)
}
