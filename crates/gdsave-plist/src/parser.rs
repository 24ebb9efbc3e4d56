//! Save markup to typed tree.
//!
//! A save document looks like
//!
//! ```text
//! <plist version="1.0" gjver="2.0">
//!     <dict>
//!         <k>key</k><i>5</i>
//!         <k>nested</k><d><k>x</k><s>hi</s></d>
//!     </dict>
//! </plist>
//! ```
//!
//! Every dictionary alternates `<k>` elements with value elements. Scalar
//! entries keep their source order; dictionary entries follow them, sorted
//! by key. Keys are unique within a dictionary.

use crate::error::ValidationFailure;
use crate::markup::Element;
use crate::node::{Dict, Node, Scalar, SaveDocument};
use crate::tables::{RenameTables, UNUSED_KEY};
use crate::{Error, Result};

/// Tag of key elements.
pub const KEY_TAG: &str = "k";

/// Tag of nested dictionary elements.
pub const DICT_TAG: &str = "d";

/// Known first keys of save documents: `CCGameManager` then `CCLocalLevels`.
pub const FINGERPRINT_KEYS: &[&str] = &["valueKeeper", "LLM_01"];

/// How much of the document shape to check before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// The wrapper must hold at least one key/value pair.
    #[default]
    Lenient,
    /// Additionally, the first key must be one of [`FINGERPRINT_KEYS`].
    Fingerprint,
}

/// Parsing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Keep top-level keys exactly as written: no reserved-key renaming and
    /// no dropping of `[unused]` entries.
    pub raw: bool,
}

impl ParseOptions {
    pub fn raw() -> Self {
        Self { raw: true }
    }
}

/// Check that `root` looks like a save document.
pub fn validate(root: &Element, strictness: Strictness) -> Result<()> {
    let dict = root
        .children
        .first()
        .ok_or(Error::Validation(ValidationFailure::EmptyDocument))?;

    let first_key = dict.children.first();
    if first_key.is_none() {
        return Err(Error::Validation(ValidationFailure::EmptyDict));
    }

    if strictness == Strictness::Fingerprint {
        let found = first_key
            .filter(|k| k.tag == KEY_TAG)
            .map(|k| k.text.as_str());

        if !found.is_some_and(|key| FINGERPRINT_KEYS.contains(&key)) {
            return Err(Error::Validation(ValidationFailure::MissingFingerprint {
                found: found.map(str::to_string),
            }));
        }
    }

    Ok(())
}

/// Parse a document root (the `<plist>` element) into a [`SaveDocument`].
pub fn parse(root: &Element, options: ParseOptions) -> Result<SaveDocument> {
    validate(root, Strictness::Lenient)?;

    let dict = parse_dict(&root.children[0], Some(options))?;
    log::debug!("parsed save document with {} top-level entries", dict.len());

    Ok(SaveDocument {
        attributes: root.attributes.clone(),
        root: dict,
    })
}

/// Parse markup text into a [`SaveDocument`].
pub fn parse_str(xml: &str, options: ParseOptions) -> Result<SaveDocument> {
    parse(&Element::parse(xml)?, options)
}

/// Parse one dictionary element. `top_level` carries the options that only
/// apply to the outermost dictionary.
fn parse_dict(element: &Element, top_level: Option<ParseOptions>) -> Result<Dict> {
    if element.children.len() % 2 != 0 {
        return Err(Error::OddEntryCount {
            tag: element.tag.clone(),
            count: element.children.len(),
        });
    }

    let tables = RenameTables::get();
    let mut scalars = Vec::new();
    let mut dicts = Vec::new();

    for pair in element.children.chunks_exact(2) {
        let (key_element, value_element) = (&pair[0], &pair[1]);

        if key_element.tag != KEY_TAG {
            return Err(Error::ExpectedKey {
                found: key_element.tag.clone(),
            });
        }

        let mut key = key_element.text.clone();
        if let Some(options) = top_level {
            if !options.raw {
                if let Some(readable) = tables.reserved_key(&key) {
                    if readable == UNUSED_KEY {
                        continue;
                    }
                    key = readable.to_string();
                }
            }
        }

        if value_element.tag == DICT_TAG {
            dicts.push((key, Node::Dict(parse_dict(value_element, None)?)));
        } else {
            let scalar = match Scalar::parse(&value_element.tag, &value_element.text)? {
                Scalar::Text { value, .. } if value_element.self_closing => Scalar::Text {
                    value,
                    empty_tag: true,
                },
                scalar => scalar,
            };
            scalars.push((key, Node::Leaf(scalar)));
        }
    }

    dicts.sort_by(|(a, _), (b, _)| a.cmp(b));

    Ok(scalars.into_iter().chain(dicts).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(entries: &str) -> String {
        format!(r#"<?xml version="1.0"?><plist version="1.0" gjver="2.0"><dict>{entries}</dict></plist>"#)
    }

    fn int(v: i64) -> Node {
        Node::Leaf(Scalar::integer(v))
    }

    #[test]
    fn test_parse_scalars() {
        let doc = parse_str(&wrap("<k>a</k><i>5</i><k>b</k><t />"), ParseOptions::default()).unwrap();

        let expected: Dict = vec![
            ("a".to_string(), int(5)),
            ("b".to_string(), Node::Leaf(Scalar::Bool(true))),
        ]
        .into_iter()
        .collect();
        assert_eq!(doc.root, expected);
    }

    #[test]
    fn test_parse_nested_dict() {
        let doc = parse_str(&wrap("<k>c</k><d><k>x</k><s>hi</s></d>"), ParseOptions::default()).unwrap();

        let inner = doc.root.get("c").and_then(Node::as_dict).unwrap();
        assert_eq!(
            inner.get("x").and_then(Node::as_scalar),
            Some(&Scalar::text("hi"))
        );
    }

    #[test]
    fn test_all_scalar_kinds() {
        let doc = parse_str(
            &wrap("<k>r</k><r>1.5</r><k>i</k><i>-3</i><k>s</k><s>text</s><k>t</k><t /><k>f</k><f />"),
            ParseOptions::default(),
        )
        .unwrap();

        assert_eq!(doc.root.get("r"), Some(&Node::Leaf(Scalar::real(1.5))));
        assert_eq!(doc.root.get("i"), Some(&int(-3)));
        assert_eq!(
            doc.root.get("s"),
            Some(&Node::Leaf(Scalar::text("text")))
        );
        assert_eq!(doc.root.get("t"), Some(&Node::Leaf(Scalar::Bool(true))));
        assert_eq!(doc.root.get("f"), Some(&Node::Leaf(Scalar::Bool(false))));
    }

    #[test]
    fn test_dicts_follow_scalars_sorted() {
        let doc = parse_str(
            &wrap("<k>zeta</k><d /><k>one</k><i>1</i><k>alpha</k><d><k>x</k><i>0</i></d><k>two</k><i>2</i>"),
            ParseOptions::default(),
        )
        .unwrap();

        assert_eq!(
            doc.root.keys().collect::<Vec<_>>(),
            vec!["one", "two", "alpha", "zeta"]
        );
    }

    #[test]
    fn test_reserved_keys_renamed() {
        let doc = parse_str(
            &wrap("<k>playerName</k><s>RobTop</s><k>secretNumber</k><i>7</i><k>valueKeeper</k><d><k>gv_0001</k><s>1</s></d>"),
            ParseOptions::default(),
        )
        .unwrap();

        assert_eq!(
            doc.root.keys().collect::<Vec<_>>(),
            vec!["username", "gameVariables"]
        );
        // Nested keys are never remapped.
        let variables = doc.root.get("gameVariables").and_then(Node::as_dict).unwrap();
        assert!(variables.contains_key("gv_0001"));
    }

    #[test]
    fn test_raw_mode_keeps_keys() {
        let doc = parse_str(
            &wrap("<k>playerName</k><s>RobTop</s><k>secretNumber</k><i>7</i><k>[unused]</k><i>0</i>"),
            ParseOptions::raw(),
        )
        .unwrap();

        assert_eq!(
            doc.root.keys().collect::<Vec<_>>(),
            vec!["playerName", "secretNumber", "[unused]"]
        );
    }

    #[test]
    fn test_wrapper_attributes_kept() {
        let doc = parse_str(&wrap("<k>a</k><i>1</i>"), ParseOptions::default()).unwrap();
        assert_eq!(
            doc.attributes,
            vec![
                ("version".to_string(), "1.0".to_string()),
                ("gjver".to_string(), "2.0".to_string())
            ]
        );
    }

    #[test]
    fn test_odd_entry_count() {
        let result = parse_str(&wrap("<k>a</k><i>1</i><k>b</k>"), ParseOptions::default());
        assert!(matches!(result, Err(Error::OddEntryCount { count: 3, .. })));
    }

    #[test]
    fn test_expected_key() {
        let result = parse_str(&wrap("<s>a</s><i>1</i>"), ParseOptions::default());
        assert!(matches!(result, Err(Error::ExpectedKey { .. })));
    }

    #[test]
    fn test_unknown_value_tag() {
        let result = parse_str(&wrap("<k>a</k><x>1</x>"), ParseOptions::default());
        assert!(matches!(result, Err(Error::UnknownTag(tag)) if tag == "x"));
    }

    #[test]
    fn test_validate_empty() {
        let root = Element::parse("<plist></plist>").unwrap();
        assert!(matches!(
            validate(&root, Strictness::Lenient),
            Err(Error::Validation(ValidationFailure::EmptyDocument))
        ));

        let root = Element::parse("<plist><dict></dict></plist>").unwrap();
        assert!(matches!(
            validate(&root, Strictness::Lenient),
            Err(Error::Validation(ValidationFailure::EmptyDict))
        ));
    }

    #[test]
    fn test_validate_accepts_pair() {
        let root = Element::parse(&wrap("<k>a</k><i>1</i>")).unwrap();
        assert!(validate(&root, Strictness::Lenient).is_ok());
    }

    #[test]
    fn test_validate_fingerprint() {
        let root = Element::parse(&wrap("<k>a</k><i>1</i>")).unwrap();
        assert!(matches!(
            validate(&root, Strictness::Fingerprint),
            Err(Error::Validation(ValidationFailure::MissingFingerprint { found: Some(_) }))
        ));

        let root = Element::parse(&wrap("<k>valueKeeper</k><d />")).unwrap();
        assert!(validate(&root, Strictness::Fingerprint).is_ok());

        let root = Element::parse(&wrap("<k>LLM_01</k><d />")).unwrap();
        assert!(validate(&root, Strictness::Fingerprint).is_ok());
    }
}
