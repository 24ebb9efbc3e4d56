//! gdsave - Geometry Dash save file conversion library.
//!
//! This crate provides a unified interface to the gdsave crates.
//!
//! # Crates
//!
//! - [`gdsave_common`] - Leaf transforms (XOR, base64 variant, CRC32)
//! - [`gdsave_codec`] - Save blob codec (classic gzip path, AES-256-ECB path)
//! - [`gdsave_plist`] - Save markup parser, writer and key translator
//!
//! # Example
//!
//! ```no_run
//! use gdsave::prelude::*;
//!
//! let raw = std::fs::read("CCGameManager.dat")?;
//! let json = gdsave::convert::decode(&raw, OutputFormat::Json, Strictness::Lenient)?;
//! println!("{}", json);
//!
//! let markup = std::fs::read_to_string("CCGameManager.xml")?;
//! let encoded = gdsave::convert::encode_markup(&markup, Variant::Classic)?;
//! std::fs::write("CCGameManager.dat", encoded)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;

pub mod convert;

// Re-export all sub-crates
pub use gdsave_codec as codec;
pub use gdsave_common as common;
pub use gdsave_plist as plist;

pub use error::{Error, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::convert::{OutputFormat, SaveInfo};
    pub use gdsave_codec::{SaveCodec, Variant};
    pub use gdsave_common::crc;
    pub use gdsave_plist::{
        Dict, Element, KeyTranslator, Node, ParseOptions, SaveDocument, Scalar, Strictness,
        WriteOptions,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
