//! Bitfield property parsing.
//!
//! Reference data:
//! `Properties="FF00,00FF" PropertiesNames="Low Byte,High Byte" PropertiesTarget="Var,ZRot"`
//!
//! The legacy `Dropdown`/`DropdownNames` attributes (semicolon-separated
//! tables) are intentionally not read; their layout never matched the
//! property lists reliably.

use crate::error::Warning;
use crate::model::{FULL_VAR_MASK, PropertyEntry, TARGET_VAR};
use crate::normalize::parse_hex;
use crate::tree::XmlValue;

/// Explicit properties of an actor and the variable bits they leave free.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct PropertyTable {
    pub entries: Option<Vec<PropertyEntry>>,
    pub free_mask: u16,
}

impl PropertyTable {
    fn empty() -> Self {
        Self {
            entries: None,
            free_mask: FULL_VAR_MASK,
        }
    }
}

/// Builds the explicit property list of an actor record.
///
/// Every `Var` property reserves its mask bits, so they are excluded from the
/// free mask later used for presets. When the parallel lists disagree in
/// length, or a mask is not hex, no property list is produced and the free
/// mask stays full.
pub(crate) fn parse_properties(
    name: &str,
    record: &XmlValue,
    warnings: &mut Vec<Warning>,
) -> PropertyTable {
    let Some(masks) = record.get("Properties").and_then(XmlValue::as_text) else {
        return PropertyTable::empty();
    };

    let masks: Vec<&str> = masks.split(',').collect();
    let names: Vec<&str> = record
        .get("PropertiesNames")
        .and_then(XmlValue::as_text)
        .map(|names| names.split(',').collect())
        .unwrap_or_default();
    let targets: Vec<&str> = match record.get("PropertiesTarget").and_then(XmlValue::as_text) {
        Some(targets) => targets.split(',').collect(),
        None => vec![TARGET_VAR; masks.len()],
    };

    if masks.len() != names.len() || masks.len() != targets.len() {
        warnings.push(Warning::PropertyCountMismatch {
            name: name.to_string(),
            masks: masks.len(),
            names: names.len(),
            targets: targets.len(),
        });
        return PropertyTable::empty();
    }

    let mut entries = Vec::with_capacity(masks.len());
    let mut free_mask = FULL_VAR_MASK;

    for ((token, property_name), target) in masks.iter().zip(&names).zip(&targets) {
        let Some(mask) = parse_hex(token) else {
            warnings.push(Warning::InvalidPropertyMask {
                name: name.to_string(),
                token: token.to_string(),
            });
            return PropertyTable::empty();
        };

        let entry = PropertyEntry::new(mask, *property_name, *target);
        if entry.is_var() {
            // Only the low 16 bits exist in the variable word.
            free_mask &= !(mask as u16);
        }
        entries.push(entry);
    }

    PropertyTable {
        entries: Some(entries),
        free_mask,
    }
}
