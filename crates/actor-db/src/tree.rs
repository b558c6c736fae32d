//! Generic document tree produced by the loader.
//!
//! XML is flattened into three shapes: objects (attributes and child elements
//! keyed by name), arrays (repeated child elements) and text. Typed field
//! access happens only after [`XmlValue::normalize_inner_text`] has run.

use std::collections::BTreeMap;

use serde::Serialize;

/// Key under which the loader stores the inline text of an element that also
/// carries attributes or children.
pub const INNER_TEXT_MARKER: &str = "$t";

/// Stable key that downstream code reads inline text from.
pub const INNER_TEXT_KEY: &str = "tagInnerText";

/// A node of the flattened document tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum XmlValue {
    Object(BTreeMap<String, XmlValue>),
    Array(Vec<XmlValue>),
    Text(String),
}

impl XmlValue {
    /// Rebuilds the tree, passing every object key at every depth through `rule`.
    ///
    /// `rule` returns `Some(new_key)` to rename a key and `None` to keep it.
    /// When a renamed key collides with an existing key, the renamed entry wins.
    pub fn rewrite_keys<F>(self, rule: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match self {
            XmlValue::Object(fields) => {
                let mut rewritten = BTreeMap::new();
                let mut kept = Vec::new();

                for (key, value) in fields {
                    let value = value.rewrite_keys(rule);
                    match rule(&key) {
                        Some(new_key) => {
                            rewritten.insert(new_key, value);
                        }
                        None => kept.push((key, value)),
                    }
                }

                for (key, value) in kept {
                    rewritten.entry(key).or_insert(value);
                }

                XmlValue::Object(rewritten)
            }
            XmlValue::Array(items) => {
                XmlValue::Array(items.into_iter().map(|item| item.rewrite_keys(rule)).collect())
            }
            text @ XmlValue::Text(_) => text,
        }
    }

    /// Renames the inline-text marker to [`INNER_TEXT_KEY`] throughout the tree.
    pub fn normalize_inner_text(self) -> Self {
        self.rewrite_keys(&|key: &str| (key == INNER_TEXT_MARKER).then(|| INNER_TEXT_KEY.to_string()))
    }

    /// Looks up a field of an object node.
    pub fn get(&self, key: &str) -> Option<&XmlValue> {
        match self {
            XmlValue::Object(fields) => fields.get(key),
            _ => None,
        }
    }

    /// Returns the text of a node.
    ///
    /// Plain text nodes yield their content; objects yield their inline text
    /// when they carry one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            XmlValue::Text(text) => Some(text.as_str()),
            XmlValue::Object(fields) => match fields.get(INNER_TEXT_KEY) {
                Some(XmlValue::Text(text)) => Some(text.as_str()),
                _ => None,
            },
            XmlValue::Array(_) => None,
        }
    }

    /// Views the node as a list; a single item becomes a one-item slice.
    pub fn items(&self) -> &[XmlValue] {
        match self {
            XmlValue::Array(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    /// Appends a repeated element, turning this node into an array if needed.
    pub(crate) fn push(&mut self, value: XmlValue) {
        match self {
            XmlValue::Array(items) => items.push(value),
            single => {
                let first = std::mem::replace(single, XmlValue::Array(Vec::with_capacity(2)));
                if let XmlValue::Array(items) = single {
                    items.push(first);
                    items.push(value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(pairs: Vec<(&str, XmlValue)>) -> XmlValue {
        XmlValue::Object(
            pairs
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        )
    }

    fn text(value: &str) -> XmlValue {
        XmlValue::Text(value.to_string())
    }

    #[test]
    fn normalize_inner_text_reaches_objects_inside_arrays() {
        let tree = object(vec![(
            "Actor",
            XmlValue::Array(vec![object(vec![(
                "Variable",
                XmlValue::Array(vec![
                    object(vec![("Var", text("0100")), ("$t", text("One"))]),
                    object(vec![("Var", text("0200")), ("$t", text("Two"))]),
                ]),
            )])]),
        )]);

        let tree = tree.normalize_inner_text();
        let variables = tree.get("Actor").unwrap().items()[0].get("Variable").unwrap();

        for variable in variables.items() {
            assert!(variable.get("$t").is_none());
            assert!(variable.get(INNER_TEXT_KEY).is_some());
        }
        assert_eq!(variables.items()[1].as_text(), Some("Two"));
    }

    #[test]
    fn renamed_key_wins_over_existing_key() {
        let tree = object(vec![("$t", text("renamed")), ("tagInnerText", text("original"))]);

        let tree = tree.normalize_inner_text();

        assert_eq!(tree.get(INNER_TEXT_KEY), Some(&text("renamed")));
        assert!(tree.get(INNER_TEXT_MARKER).is_none());
    }

    #[test]
    fn rewrite_keys_applies_arbitrary_rules() {
        let tree = object(vec![("a", object(vec![("b", text("x"))]))]);

        let tree = tree.rewrite_keys(&|key: &str| Some(key.to_uppercase()));

        assert_eq!(tree.get("A").and_then(|a| a.get("B")), Some(&text("x")));
    }

    #[test]
    fn push_promotes_single_value_to_array() {
        let mut value = text("first");
        value.push(text("second"));
        value.push(text("third"));

        assert_eq!(
            value,
            XmlValue::Array(vec![text("first"), text("second"), text("third")])
        );
    }

    #[test]
    fn items_wraps_single_values() {
        let single = text("only");
        assert_eq!(single.items(), &[text("only")]);

        let list = XmlValue::Array(vec![text("a"), text("b")]);
        assert_eq!(list.items().len(), 2);
    }

    #[test]
    fn as_text_ignores_objects_without_inner_text() {
        assert_eq!(object(vec![("Var", text("0001"))]).as_text(), None);
        assert_eq!(XmlValue::Array(vec![]).as_text(), None);
    }
}
