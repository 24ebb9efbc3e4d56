//! Base64 with the substituted alphabet used by save files.
//!
//! The alphabet is standard base64 with `+` replaced by `-` and `/` replaced
//! by `_`, which is exactly the RFC 4648 URL-safe alphabet. Output is padded.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::Result;

/// Padded on encode, padding-indifferent on decode.
const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Encode bytes as substituted-alphabet base64 text.
pub fn encode(data: &[u8]) -> String {
    ENGINE.encode(data)
}

/// Decode substituted-alphabet base64 text.
///
/// Trailing NUL bytes and ASCII whitespace are ignored, as is anything after
/// the `=` padding. A dangling final symbol (length one past a multiple of
/// four) cannot carry a whole byte and is dropped; any other malformed input
/// is rejected.
pub fn decode(text: &[u8]) -> Result<Vec<u8>> {
    let end = text
        .iter()
        .rposition(|&b| b != 0 && !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    let mut text = &text[..end];

    if let Some(pad) = text.iter().position(|&b| b == b'=') {
        let end = pad + text[pad..].iter().take_while(|&&b| b == b'=').count();
        if end < text.len() {
            log::warn!("ignoring {} bytes after base64 padding", text.len() - end);
            text = &text[..end];
        }
    }

    if text.len() % 4 == 1 {
        log::warn!(
            "base64 input length {} is not decodable, dropping final symbol",
            text.len()
        );
        text = &text[..text.len() - 1];
    }

    Ok(ENGINE.decode(text)?)
}
