//! Common utilities for gdsave.
//!
//! This crate provides the leaf byte transforms that the save codec is
//! assembled from. None of them depend on each other:
//!
//! - [`xor`] - Single-byte XOR stream cipher
//! - [`b64`] - Base64 with the `-`/`_` substituted alphabet
//! - [`crc`] - CRC32 (the gzip polynomial) for hand-built gzip trailers

mod error;

pub mod b64;
pub mod crc;
pub mod xor;

pub use error::{Error, Result};
