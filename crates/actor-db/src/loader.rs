//! Actor database loader.
//!
//! Reads the editor's actor table XML and flattens it into [`XmlValue`] trees:
//!
//! ```xml
//! <Table>
//!     <Actor Key="0002" Name="En_Test" Object="0032" Properties="FF00,00FF"
//!            PropertiesNames="Low,High" PropertiesTarget="Var,ZRot">
//!         <Notes>Stalfos</Notes>
//!         <Variable Var="0003">Rises from the ground</Variable>
//!     </Actor>
//! </Table>
//! ```
//!
//! Attributes and child elements become object keys, repeated children become
//! arrays, and inline text ends up under
//! [`INNER_TEXT_KEY`](crate::tree::INNER_TEXT_KEY) once the tree has
//! been normalized.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::Path;

use crate::error::LoadError;
use crate::tree::{INNER_TEXT_MARKER, XmlValue};

/// Root element of the actor database.
pub const TABLE_TAG: &str = "Table";

/// Element holding one actor record.
pub const ACTOR_TAG: &str = "Actor";

/// Parses XML text into a tree of the form `{ <root tag>: <root element> }`.
///
/// Inline text is stored under [`INNER_TEXT_MARKER`]; call
/// [`XmlValue::normalize_inner_text`] before reading fields.
pub fn parse_document(text: &str) -> Result<XmlValue, LoadError> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let document = roxmltree::Document::parse_with_options(text, options)?;
    let root = document.root_element();

    let mut fields = BTreeMap::new();
    fields.insert(root.tag_name().name().to_string(), element_value(root));
    Ok(XmlValue::Object(fields))
}

fn element_value(node: roxmltree::Node<'_, '_>) -> XmlValue {
    let mut fields: BTreeMap<String, XmlValue> = BTreeMap::new();
    let mut text = String::new();

    for attribute in node.attributes() {
        fields.insert(
            attribute.name().to_string(),
            XmlValue::Text(attribute.value().to_string()),
        );
    }

    for child in node.children() {
        if child.is_element() {
            let value = element_value(child);
            match fields.entry(child.tag_name().name().to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(mut slot) => slot.get_mut().push(value),
            }
        } else if child.is_text() {
            if let Some(chunk) = child.text() {
                text.push_str(chunk);
            }
        }
    }

    let text = text.trim();
    if fields.is_empty() {
        if text.is_empty() {
            return XmlValue::Object(fields);
        }
        return XmlValue::Text(text.to_string());
    }

    if !text.is_empty() {
        fields.insert(INNER_TEXT_MARKER.to_string(), XmlValue::Text(text.to_string()));
    }
    XmlValue::Object(fields)
}

/// Parses an actor table from XML text and returns its raw actor records.
pub fn parse_actor_table(text: &str) -> Result<Vec<XmlValue>, LoadError> {
    let document = parse_document(text)?.normalize_inner_text();

    let table = document.get(TABLE_TAG).ok_or(LoadError::MissingTable)?;
    let actors = table.get(ACTOR_TAG).ok_or(LoadError::MissingActors)?;

    Ok(actors.items().to_vec())
}

/// Reads an actor table XML file and returns its raw actor records.
pub fn load_actor_table(path: &Path) -> Result<Vec<XmlValue>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let actors = parse_actor_table(&text)?;
    tracing::debug!("Loaded {} actor records from {}", actors.len(), path.display());
    Ok(actors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::INNER_TEXT_KEY;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Table>
    <Actor Key="0002" Name="En_Test" Object="0032">
        <Notes>Stalfos</Notes>
        <Variable Var="0003">Rises from the ground</Variable>
        <Variable Var="0001">Waits</Variable>
    </Actor>
    <Actor Key="0003" Name="En_Empty"/>
</Table>
"#;

    #[test]
    fn attributes_and_children_become_fields() {
        let actors = parse_actor_table(SAMPLE).unwrap();
        assert_eq!(actors.len(), 2);

        let first = &actors[0];
        assert_eq!(first.get("Name").and_then(XmlValue::as_text), Some("En_Test"));
        assert_eq!(first.get("Key").and_then(XmlValue::as_text), Some("0002"));
        assert_eq!(first.get("Notes"), Some(&XmlValue::Text("Stalfos".to_string())));
    }

    #[test]
    fn repeated_children_collapse_into_arrays_with_inner_text() {
        let actors = parse_actor_table(SAMPLE).unwrap();
        let variables = actors[0].get("Variable").unwrap();

        assert!(matches!(variables, XmlValue::Array(items) if items.len() == 2));
        let first = &variables.items()[0];
        assert_eq!(first.get("Var").and_then(XmlValue::as_text), Some("0003"));
        assert_eq!(
            first.get(INNER_TEXT_KEY).and_then(XmlValue::as_text),
            Some("Rises from the ground")
        );
        assert!(first.get(INNER_TEXT_MARKER).is_none());
    }

    #[test]
    fn single_actor_becomes_one_item_list() {
        let actors = parse_actor_table(r#"<Table><Actor Key="0001" Name="Solo"/></Table>"#).unwrap();
        assert_eq!(actors.len(), 1);
    }

    #[test]
    fn empty_element_is_empty_object() {
        let document = parse_document("<Table><Notes/></Table>").unwrap();
        let notes = document.get("Table").and_then(|table| table.get("Notes"));
        assert_eq!(notes, Some(&XmlValue::Object(BTreeMap::new())));
    }

    #[test]
    fn wrong_root_is_rejected() {
        let err = parse_actor_table("<Objects><Object/></Objects>").unwrap_err();
        assert!(matches!(err, LoadError::MissingTable));
    }

    #[test]
    fn table_without_actors_is_rejected() {
        let err = parse_actor_table("<Table></Table>").unwrap_err();
        assert!(matches!(err, LoadError::MissingActors));
    }

    #[test]
    fn malformed_xml_is_fatal() {
        let err = parse_actor_table("<Table><Actor></Table>").unwrap_err();
        assert!(matches!(err, LoadError::Xml(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_actor_table(Path::new("/nonexistent/ActorNames.xml")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("ActorNames.xml"));
    }
}
