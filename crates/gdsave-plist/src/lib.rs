//! Save markup parser and writer for Geometry Dash save files.
//!
//! Decoded saves are plist-like XML: a `<plist>` wrapper around a `<dict>`
//! of alternating `<k>` key elements and typed value elements (`r`, `i`,
//! `s`, `t`, `f`, or a nested `d`). This crate maps that markup to a typed
//! tree and back, and can rename numeric keys for display.
//!
//! # Example
//!
//! ```no_run
//! use gdsave_plist::{parse_str, serialize, KeyTranslator, ParseOptions};
//!
//! let xml = std::fs::read_to_string("CCGameManager.xml")?;
//! let mut doc = parse_str(&xml, ParseOptions::default())?;
//!
//! KeyTranslator::new().translate(&mut doc.root);
//! println!("{}", gdsave_plist::to_json_string(&doc.root, true)?);
//!
//! let markup = serialize(&doc)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod node;
mod parser;
mod translate;
mod writer;

pub mod markup;
pub mod tables;

#[cfg(feature = "json-export")]
mod json;

pub use error::{Error, Result, ValidationFailure};
pub use markup::Element;
pub use node::{Dict, Node, SaveDocument, Scalar, DEFAULT_WRAPPER_ATTRIBUTES};
pub use parser::{
    parse, parse_str, validate, ParseOptions, Strictness, DICT_TAG, FINGERPRINT_KEYS, KEY_TAG,
};
pub use tables::RenameTables;
pub use translate::{KeyTranslator, TranslateSummary, EVENTS_BLOCK, SETTINGS_BLOCK, STATS_BLOCK};
pub use writer::{serialize, serialize_with, to_element, WriteOptions};

#[cfg(feature = "json-export")]
pub use json::to_json_string;
