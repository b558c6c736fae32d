//! Normalized actor records, shaped after the scene editor's `actors.toml` schema.

use serde::Serialize;

/// Target of a property whose mask packs into the actor's variable word.
pub const TARGET_VAR: &str = "Var";

/// Name of the property synthesized from `Variable` entries.
pub const PRESETS_NAME: &str = "Presets";

/// Every bit of the 16-bit variable word.
pub const FULL_VAR_MASK: u16 = 0xFFFF;

/// One placeable actor definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NormalizedActor {
    pub name: String,
    pub index: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects: Option<Vec<u32>>,
    #[serde(rename = "Property", skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertyEntry>>,
}

impl NormalizedActor {
    pub fn new(name: impl Into<String>, index: u16) -> Self {
        Self {
            name: name.into(),
            index,
            category: None,
            notes: None,
            objects: None,
            properties: None,
        }
    }
}

/// A named bit range of the actor's parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PropertyEntry {
    pub mask: u32,
    pub name: String,
    /// Free-form target field, e.g. `Var`, `XRot`, `ZRot`.
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropdown: Option<Vec<DropdownOption>>,
}

impl PropertyEntry {
    pub fn new(mask: u32, name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            mask,
            name: name.into(),
            target: target.into(),
            dropdown: None,
        }
    }

    /// Returns true if the mask addresses the variable word.
    pub fn is_var(&self) -> bool {
        self.target == TARGET_VAR
    }
}

/// A `(value, label)` choice shown by the editor. Serializes as `[value, "label"]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DropdownOption(pub u32, pub String);

impl DropdownOption {
    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn label(&self) -> &str {
        &self.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_editor_field_names() {
        let mut actor = NormalizedActor::new("En_Test", 2);
        let mut presets = PropertyEntry::new(0x0F00, PRESETS_NAME, TARGET_VAR);
        presets.dropdown = Some(vec![DropdownOption(1, "One".to_string())]);
        actor.properties = Some(vec![presets]);

        let json = serde_json::to_string(&actor).unwrap();

        assert_eq!(
            json,
            r#"{"Name":"En_Test","Index":2,"Property":[{"Mask":3840,"Name":"Presets","Target":"Var","Dropdown":[[1,"One"]]}]}"#
        );
    }

    #[test]
    fn only_var_targets_address_the_variable_word() {
        assert!(PropertyEntry::new(0xFF00, "Low", "Var").is_var());
        assert!(!PropertyEntry::new(0x00FF, "High", "ZRot").is_var());
    }
}
