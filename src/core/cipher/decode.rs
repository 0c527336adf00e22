//! Base64 decoding of KMS payloads.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{CipherError, Result};

const BLOCK: usize = 4;

/// Decode a standard base64 payload.
///
/// Payloads whose trailing `=` padding was dropped (common when values are
/// pasted by hand) are padded back to a multiple of four first.
pub fn decode(payload: &str) -> Result<Vec<u8>> {
    let mut padded = payload.to_string();
    let remainder = padded.len() % BLOCK;
    if remainder != 0 {
        padded.extend(std::iter::repeat('=').take(BLOCK - remainder));
    }

    STANDARD
        .decode(padded.as_bytes())
        .map_err(|e| CipherError::Decode(e.to_string()).into())
}
