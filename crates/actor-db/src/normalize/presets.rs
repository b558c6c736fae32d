//! Preset derivation from `Variable` entries.
//!
//! Each `<Variable Var="0100">Label</Variable>` names a full variable value.
//! The presets are re-expressed relative to the free mask so the editor can
//! show them as one dropdown over the unclaimed bits.

use crate::error::Warning;
use crate::model::{DropdownOption, PRESETS_NAME, PropertyEntry, TARGET_VAR};
use crate::normalize::parse_hex;
use crate::tree::XmlValue;

/// Bit position of the lowest set bit of `free_mask`, or 0 for an empty mask.
pub(crate) fn preset_shift(free_mask: u16) -> u32 {
    if free_mask == 0 {
        0
    } else {
        free_mask.trailing_zeros()
    }
}

/// Synthesizes the `Presets` property for an actor.
///
/// `variables` is either a single entry or a list of entries. Entries without
/// a hex `Var` value are dropped with a warning; a missing label becomes an
/// empty string.
pub(crate) fn derive_presets(
    name: &str,
    variables: &XmlValue,
    free_mask: u16,
    warnings: &mut Vec<Warning>,
) -> PropertyEntry {
    let entries = variables.items();

    if free_mask == 0 && !entries.is_empty() {
        warnings.push(Warning::EmptyFreeMask {
            name: name.to_string(),
            presets: entries.len(),
        });
    }

    let shift = preset_shift(free_mask);
    let mut dropdown = Vec::with_capacity(entries.len());

    for entry in entries {
        let label = entry.as_text().unwrap_or_default();
        if label.is_empty() {
            tracing::debug!(actor = name, "preset without label");
        }

        let Some(value) = entry.get("Var").and_then(XmlValue::as_text).and_then(parse_hex) else {
            warnings.push(Warning::InvalidPreset {
                name: name.to_string(),
                label: label.to_string(),
            });
            continue;
        };

        dropdown.push(DropdownOption(value >> shift, label.to_string()));
    }

    let mut presets = PropertyEntry::new(u32::from(free_mask), PRESETS_NAME, TARGET_VAR);
    presets.dropdown = Some(dropdown);
    presets
}
