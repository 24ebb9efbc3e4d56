//! Save blob transcoding.
//!
//! A save blob is stored in one of two shapes:
//!
//! - **Classic**: `xor(base64'(gzip(plaintext)), 0x0B)`, where `base64'` uses
//!   `-`/`_` for `+`/`/` and the gzip member is built by [`envelope::wrap`].
//! - **Block cipher**: raw AES-256-ECB ciphertext of the plaintext.
//!
//! The shape of an existing blob is detected once from its leading byte; the
//! shape to encode into is always chosen by the caller.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use gdsave_common::{b64, xor};

use crate::error::Stage;
use crate::{crypto, envelope, Error, Result};

/// Declaration that starts a decoded classic save.
pub const PLAIN_DECLARATION: &str = "<?xml version=\"1.0\"?>";

/// Declaration that starts a decoded macOS save.
pub const MACOS_DECLARATION: &str = "<?xml version='1.0' encoding='UTF-8' standalone='yes'?>";

/// Leading symbols of a classic-encoded bare [`PLAIN_DECLARATION`]. Input
/// starting with this is already encoded.
pub const ENCODED_SIGNATURE: &str = "C?xBJJJJJJJJH<Dsy3aE^XcGGXyDqF&q]_G^F:Hr|FJ[H]iAs^JJJJ6";

/// On-disk shape of a save blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// XOR + substituted base64 + gzip (Windows, Android, iOS).
    Classic,
    /// AES-256-ECB (macOS).
    BlockCipher,
}

impl Variant {
    /// Leading byte of every classic blob: `'H' ^ 0x0B`, the first base64
    /// symbol of a gzip header.
    pub const CLASSIC_MARKER: u8 = b'C';

    /// Detect the variant of an encoded blob from its leading byte.
    pub fn sniff(raw: &[u8]) -> Self {
        match raw.first() {
            Some(&Self::CLASSIC_MARKER) => Variant::Classic,
            _ => Variant::BlockCipher,
        }
    }

    /// Canonical name, as accepted by [`Variant::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::BlockCipher => "block-cipher",
        }
    }

    /// The XML declaration the client for this variant writes.
    pub fn declaration(self) -> &'static str {
        match self {
            Variant::Classic => PLAIN_DECLARATION,
            Variant::BlockCipher => MACOS_DECLARATION,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "classic" | "windows" | "false" => Ok(Variant::Classic),
            "block-cipher" | "blockcipher" | "macos" | "mac" | "true" => Ok(Variant::BlockCipher),
            _ => Err(Error::UnsupportedVariant(s.to_string())),
        }
    }
}

/// Encoder and decoder for save blobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveCodec;

impl SaveCodec {
    /// Check if data is already decoded markup.
    pub fn is_plaintext(raw: &[u8]) -> bool {
        raw.starts_with(b"<?xml")
    }

    /// Check if text is already a classic encoded blob.
    pub fn is_encoded(text: &str) -> bool {
        text.starts_with(ENCODED_SIGNATURE)
    }

    /// Decode a save blob into markup text.
    ///
    /// Already-decoded markup is returned unchanged. Otherwise the variant is
    /// detected with [`Variant::sniff`].
    pub fn decrypt(raw: &[u8]) -> Result<String> {
        if Self::is_plaintext(raw) {
            log::debug!("input is already decoded markup");
            return into_text(raw.to_vec());
        }

        let variant = Variant::sniff(raw);
        log::debug!("detected {} save ({} bytes)", variant, raw.len());
        Self::decrypt_as(raw, variant)
    }

    /// Decode a save blob of a known variant.
    pub fn decrypt_as(raw: &[u8], variant: Variant) -> Result<String> {
        let plaintext = match variant {
            Variant::Classic => {
                // Padding appended after encoding is not XORed.
                let end = raw
                    .iter()
                    .rposition(|&b| b != 0 && !b.is_ascii_whitespace())
                    .map_or(0, |i| i + 1);
                if end < raw.len() {
                    log::debug!("ignoring {} trailing padding bytes", raw.len() - end);
                }

                let text = xor::xor(&raw[..end], xor::SAVE_KEY);
                let member = b64::decode(&text)?;
                envelope::unwrap(&member)?
            }
            Variant::BlockCipher => crypto::decrypt(raw)?,
        };

        into_text(plaintext)
    }

    /// Encode markup text into a save blob of the given variant.
    ///
    /// Text that already carries [`ENCODED_SIGNATURE`] is returned unchanged.
    pub fn encrypt(plaintext: &str, variant: Variant) -> Result<Vec<u8>> {
        if Self::is_encoded(plaintext) {
            log::debug!("input is already encoded, passing through");
            return Ok(plaintext.as_bytes().to_vec());
        }

        match variant {
            Variant::Classic => {
                let member = envelope::wrap(plaintext.as_bytes())?;
                let mut encoded = b64::encode(&member).into_bytes();
                xor::xor_in_place(&mut encoded, xor::SAVE_KEY);
                Ok(encoded)
            }
            Variant::BlockCipher => Ok(crypto::encrypt(plaintext.as_bytes())),
        }
    }

    /// Swap a leading XML declaration for the one `variant`'s client writes.
    pub fn retarget_declaration(plaintext: &str, variant: Variant) -> Cow<'_, str> {
        let target = variant.declaration();
        let other = match variant {
            Variant::Classic => MACOS_DECLARATION,
            Variant::BlockCipher => PLAIN_DECLARATION,
        };

        match plaintext.strip_prefix(other) {
            Some(rest) => Cow::Owned(format!("{target}{rest}")),
            None => Cow::Borrowed(plaintext),
        }
    }
}

fn into_text(plaintext: Vec<u8>) -> Result<String> {
    String::from_utf8(plaintext).map_err(|e| Error::corrupt(Stage::Utf8, e))
}
