//! End-to-end conversions between save blobs and readable output.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use gdsave_codec::{SaveCodec, Variant};
use gdsave_plist::{
    self as plist, Element, KeyTranslator, ParseOptions, RenameTables, Strictness, KEY_TAG,
    SETTINGS_BLOCK,
};

use crate::{Error, Result};

/// Output format for decoded saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Decoded markup exactly as stored.
    #[default]
    Xml,
    /// Tab-indented markup, entry order unchanged.
    PrettyXml,
    /// JSON with reserved and numeric keys renamed.
    Json,
    /// JSON with keys exactly as stored.
    RawJson,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Xml | OutputFormat::PrettyXml => "xml",
            OutputFormat::Json | OutputFormat::RawJson => "json",
        }
    }

    /// Short name accepted by [`OutputFormat::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Xml => "xml",
            OutputFormat::PrettyXml => "pxml",
            OutputFormat::Json => "json",
            OutputFormat::RawJson => "rjson",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(OutputFormat::Xml),
            "pxml" | "pretty-xml" => Ok(OutputFormat::PrettyXml),
            "json" => Ok(OutputFormat::Json),
            "rjson" | "raw-json" => Ok(OutputFormat::RawJson),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// Decode a save blob and render it as `format`.
///
/// The decoded markup is checked with `strictness` before rendering, so a
/// blob that decodes to something other than a save is rejected.
pub fn decode(raw: &[u8], format: OutputFormat, strictness: Strictness) -> Result<String> {
    let markup = SaveCodec::decrypt(raw)?;
    let root = Element::parse(&markup)?;
    plist::validate(&root, strictness)?;

    render(markup, &root, format)
}

fn render(markup: String, root: &Element, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Xml => Ok(markup),
        OutputFormat::PrettyXml => Ok(root.to_pretty_string()?),
        OutputFormat::Json => {
            let mut doc = plist::parse(root, ParseOptions::default())?;
            let summary = KeyTranslator::new().translate(&mut doc.root);
            log::debug!("renamed {} keys for display", summary.total());
            Ok(plist::to_json_string(&doc.root, true)?)
        }
        OutputFormat::RawJson => {
            let doc = plist::parse(root, ParseOptions::raw())?;
            Ok(plist::to_json_string(&doc.root, true)?)
        }
    }
}

/// Encode save markup into a blob of the given variant.
///
/// Already-encoded input passes through. Prettified markup is compacted and
/// the declaration is swapped for the one `variant`'s client writes. Markup
/// produced by a key-renaming export is refused.
pub fn encode_markup(markup: &str, variant: Variant) -> Result<Vec<u8>> {
    if SaveCodec::is_encoded(markup) {
        return Ok(SaveCodec::encrypt(markup, variant)?);
    }

    let root = Element::parse(markup)?;
    plist::validate(&root, Strictness::Lenient)?;
    check_technical_keys(&root)?;

    let compact = if markup.contains(|c| c == '\n' || c == '\t') {
        log::debug!("compacting prettified markup");
        Cow::Owned(root.to_compact_string()?)
    } else {
        Cow::Borrowed(markup)
    };

    let plaintext = SaveCodec::retarget_declaration(&compact, variant);
    Ok(SaveCodec::encrypt(&plaintext, variant)?)
}

/// Refuse markup whose keys were renamed for display.
fn check_technical_keys(root: &Element) -> Result<()> {
    let tables = RenameTables::get();
    let entries = &root.children[0].children;

    for pair in entries.chunks_exact(2) {
        let (key, value) = (&pair[0], &pair[1]);
        if key.tag != KEY_TAG {
            continue;
        }

        if tables.is_readable_alias(&key.text) {
            return Err(Error::TranslatedKeys(key.text.clone()));
        }

        // Every settings key is `<prefix>_<number>` until translated.
        if key.text == SETTINGS_BLOCK {
            let renamed = value
                .children
                .iter()
                .step_by(2)
                .filter(|k| k.tag == KEY_TAG)
                .find(|k| !has_numeric_suffix(&k.text));

            if let Some(renamed) = renamed {
                return Err(Error::TranslatedKeys(renamed.text.clone()));
            }
        }
    }

    Ok(())
}

fn has_numeric_suffix(key: &str) -> bool {
    key.rsplit_once('_')
        .is_some_and(|(_, n)| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Summary of a save blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveInfo {
    /// Encoded shape, `None` if the input was already markup.
    pub variant: Option<Variant>,
    /// Size of the input in bytes.
    pub encoded_len: usize,
    /// Size of the decoded markup in bytes.
    pub plaintext_len: usize,
    /// Top-level keys as stored.
    pub top_level_keys: Vec<String>,
    /// Whether the first key is one of the known save fingerprints.
    pub fingerprint: bool,
}

/// Decode `raw` and describe what it holds.
pub fn inspect(raw: &[u8]) -> Result<SaveInfo> {
    let variant = (!SaveCodec::is_plaintext(raw)).then(|| Variant::sniff(raw));
    let markup = SaveCodec::decrypt(raw)?;
    let root = Element::parse(&markup)?;
    let doc = plist::parse(&root, ParseOptions::raw())?;

    Ok(SaveInfo {
        variant,
        encoded_len: raw.len(),
        plaintext_len: markup.len(),
        top_level_keys: doc.root.keys().map(str::to_string).collect(),
        fingerprint: plist::validate(&root, Strictness::Fingerprint).is_ok(),
    })
}
