//! Typed save tree.

use rustc_hash::FxHashMap;

use crate::{Error, Result};

/// A scalar value element.
///
/// Numbers keep their source literal when it differs from the canonical
/// rendering (`1.0`, `007`, `1e-7`), and text remembers whether it was
/// written `<s />`, so a parsed tree re-emits the markup it came from.
/// Equality compares values only.
#[derive(Debug, Clone)]
pub enum Scalar {
    /// `<r>` floating point value.
    Real { value: f64, literal: Option<String> },
    /// `<i>` integer value.
    Integer { value: i64, literal: Option<String> },
    /// `<s>` string value.
    Text { value: String, empty_tag: bool },
    /// `<t />` or `<f />`.
    Bool(bool),
}

impl Scalar {
    pub fn real(value: f64) -> Self {
        Scalar::Real { value, literal: None }
    }

    pub fn integer(value: i64) -> Self {
        Scalar::Integer { value, literal: None }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Scalar::Text {
            value: value.into(),
            empty_tag: false,
        }
    }

    /// Parse the literal content of a scalar element with the given tag.
    pub fn parse(tag: &str, literal: &str) -> Result<Self> {
        match tag {
            "r" => {
                let value: f64 = literal.trim().parse().map_err(|_| invalid("r", literal))?;
                Ok(Scalar::Real {
                    value,
                    literal: unless_canonical(value.to_string(), literal),
                })
            }
            "i" => {
                let value: i64 = literal.trim().parse().map_err(|_| invalid("i", literal))?;
                Ok(Scalar::Integer {
                    value,
                    literal: unless_canonical(value.to_string(), literal),
                })
            }
            "s" => Ok(Scalar::text(literal)),
            "t" => Ok(Scalar::Bool(true)),
            "f" => Ok(Scalar::Bool(false)),
            other => Err(Error::UnknownTag(other.to_string())),
        }
    }

    /// Element tag for this scalar.
    pub fn tag(&self) -> &'static str {
        match self {
            Scalar::Real { .. } => "r",
            Scalar::Integer { .. } => "i",
            Scalar::Text { .. } => "s",
            Scalar::Bool(true) => "t",
            Scalar::Bool(false) => "f",
        }
    }

    /// Literal element content, `None` for elements written self-closing.
    pub fn literal(&self) -> Option<String> {
        match self {
            Scalar::Real { value, literal } => {
                Some(literal.clone().unwrap_or_else(|| value.to_string()))
            }
            Scalar::Integer { value, literal } => {
                Some(literal.clone().unwrap_or_else(|| value.to_string()))
            }
            Scalar::Text { value, empty_tag } if *empty_tag && value.is_empty() => None,
            Scalar::Text { value, .. } => Some(value.clone()),
            Scalar::Bool(_) => None,
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Real { value: a, .. }, Scalar::Real { value: b, .. }) => a == b,
            (Scalar::Integer { value: a, .. }, Scalar::Integer { value: b, .. }) => a == b,
            (Scalar::Text { value: a, .. }, Scalar::Text { value: b, .. }) => a == b,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            _ => false,
        }
    }
}

fn unless_canonical(canonical: String, literal: &str) -> Option<String> {
    (canonical != literal).then(|| literal.to_string())
}

fn invalid(tag: &'static str, literal: &str) -> Error {
    Error::InvalidScalar {
        tag,
        literal: literal.to_string(),
    }
}

/// A value in the save tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(Scalar),
    Dict(Dict),
}

impl Node {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Leaf(s) => Some(s),
            Node::Dict(_) => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Node::Dict(d) => Some(d),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_dict_mut(&mut self) -> Option<&mut Dict> {
        match self {
            Node::Dict(d) => Some(d),
            Node::Leaf(_) => None,
        }
    }

    pub fn is_dict(&self) -> bool {
        matches!(self, Node::Dict(_))
    }
}

impl From<Scalar> for Node {
    fn from(scalar: Scalar) -> Self {
        Node::Leaf(scalar)
    }
}

impl From<Dict> for Node {
    fn from(dict: Dict) -> Self {
        Node::Dict(dict)
    }
}

/// An ordered dictionary with unique keys.
///
/// Entries keep insertion order; a side index makes lookups and inserts
/// constant time.
#[derive(Debug, Clone, Default)]
pub struct Dict {
    entries: Vec<(String, Node)>,
    index: FxHashMap<String, usize>,
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        let i = *self.index.get(key)?;
        Some(&mut self.entries[i].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Insert an entry.
    ///
    /// An existing entry with the same key keeps its position and has its
    /// value replaced; the old value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        let key = key.into();
        let value = value.into();

        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Node> {
        let removed = self.index.remove(key)?;
        for i in self.index.values_mut() {
            if *i > removed {
                *i -= 1;
            }
        }
        Some(self.entries.remove(removed).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Rename every key through `rename`, returning how many changed.
    ///
    /// Keys that collide after renaming are merged as by [`Dict::insert`].
    pub fn rename_keys<F>(&mut self, mut rename: F) -> usize
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut renamed = 0;
        let entries = std::mem::take(&mut self.entries);
        self.index.clear();

        for (key, value) in entries {
            match rename(&key) {
                Some(new_key) if new_key != key => {
                    renamed += 1;
                    self.insert(new_key, value);
                }
                _ => {
                    self.insert(key, value);
                }
            }
        }

        renamed
    }
}

impl PartialEq for Dict {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl FromIterator<(String, Node)> for Dict {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut dict = Dict::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            dict.insert(key, value);
        }
        dict
    }
}

impl IntoIterator for Dict {
    type Item = (String, Node);
    type IntoIter = std::vec::IntoIter<(String, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Default attributes of the outer `<plist>` wrapper.
pub const DEFAULT_WRAPPER_ATTRIBUTES: [(&str, &str); 2] = [("version", "1.0"), ("gjver", "2.0")];

/// A parsed save document: the root dictionary plus the wrapper attributes
/// needed to write it back.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveDocument {
    /// Attributes of the `<plist>` wrapper element.
    pub attributes: Vec<(String, String)>,
    /// Top-level key/value sequence.
    pub root: Dict,
}

impl SaveDocument {
    pub fn new(root: Dict) -> Self {
        Self {
            attributes: DEFAULT_WRAPPER_ATTRIBUTES
                .iter()
                .map(|&(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            root,
        }
    }
}
