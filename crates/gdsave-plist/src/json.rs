//! Structured (JSON) output of the save tree.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::node::{Dict, Node, Scalar, SaveDocument};
use crate::Result;

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Scalar::Real { value, .. } => serializer.serialize_f64(*value),
            Scalar::Integer { value, .. } => serializer.serialize_i64(*value),
            Scalar::Text { value, .. } => serializer.serialize_str(value),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Node::Leaf(scalar) => scalar.serialize(serializer),
            Node::Dict(dict) => dict.serialize(serializer),
        }
    }
}

impl Serialize for Dict {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for SaveDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}

/// Serialize a dictionary as JSON in tree order, tab-indented when `pretty`.
pub fn to_json_string(dict: &Dict, pretty: bool) -> Result<String> {
    if !pretty {
        return Ok(serde_json::to_string(dict)?);
    }

    let mut output = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut output, formatter);
    dict.serialize(&mut serializer)?;

    // serde_json only writes valid UTF-8.
    Ok(String::from_utf8_lossy(&output).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_str, ParseOptions};

    #[test]
    fn test_scalars_to_json() {
        let doc = parse_str(
            "<plist><dict><k>a</k><i>5</i><k>b</k><t /></dict></plist>",
            ParseOptions::raw(),
        )
        .unwrap();
        assert_eq!(to_json_string(&doc.root, false).unwrap(), r#"{"a":5,"b":true}"#);
    }

    #[test]
    fn test_nested_to_json() {
        let doc = parse_str(
            "<plist><dict><k>c</k><d><k>x</k><s>hi</s></d></dict></plist>",
            ParseOptions::raw(),
        )
        .unwrap();
        assert_eq!(
            to_json_string(&doc.root, false).unwrap(),
            r#"{"c":{"x":"hi"}}"#
        );
    }

    #[test]
    fn test_order_preserved() {
        let mut dict = Dict::new();
        dict.insert("z", Scalar::real(0.5));
        dict.insert("a", Scalar::text("s"));
        dict.insert("m", Scalar::Bool(false));
        assert_eq!(
            to_json_string(&dict, false).unwrap(),
            r#"{"z":0.5,"a":"s","m":false}"#
        );
    }

    #[test]
    fn test_pretty_uses_tabs() {
        let mut dict = Dict::new();
        dict.insert("a", Scalar::integer(1));
        assert_eq!(to_json_string(&dict, true).unwrap(), "{\n\t\"a\": 1\n}");
    }
}
