//! Save blob codec for Geometry Dash save files.
//!
//! Save files (`CCGameManager.dat`, `CCLocalLevels.dat`) are stored in one of
//! two encoded shapes. This crate turns either shape into plaintext markup
//! and back:
//!
//! - XOR with `0x0B` over substituted-alphabet base64 of a gzip member
//!   (the classic shape)
//! - AES-256-ECB with PKCS#7 padding and a fixed key (macOS)
//!
//! # Example
//!
//! ```no_run
//! use gdsave_codec::{SaveCodec, Variant};
//!
//! let raw = std::fs::read("CCGameManager.dat")?;
//! let markup = SaveCodec::decrypt(&raw)?;
//!
//! let encoded = SaveCodec::encrypt(&markup, Variant::Classic)?;
//! std::fs::write("CCGameManager.dat", encoded)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod codec;
mod error;

pub mod crypto;
pub mod envelope;

pub use codec::{SaveCodec, Variant, ENCODED_SIGNATURE, MACOS_DECLARATION, PLAIN_DECLARATION};
pub use error::{Error, Result, Stage};
