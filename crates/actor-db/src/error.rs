//! Error and diagnostic types raised while converting an actor database.
//!
//! Three classes exist:
//! - [`LoadError`]: fatal, nothing is converted
//! - [`SkipReason`]: one actor record is dropped, the batch continues
//! - [`Warning`]: the actor is emitted with a fallback for the affected field

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while reading the source XML.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("document root is not a <Table> element")]
    MissingTable,

    #[error("<Table> contains no <Actor> records")]
    MissingActors,
}

/// Why an actor record was left out of the output.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("actor missing name or index")]
    MissingNameOrIndex { name: Option<String> },

    #[error("actor '{name}' index unexpected formatting: {index}")]
    IndexFormat { name: String, index: String },

    #[error("actor '{name}' objects unexpected formatting: {objects}")]
    ObjectsFormat { name: String, objects: String },

    #[error("actor '{name}' {field} is not a hex value: '{token}'")]
    InvalidHex {
        name: String,
        field: &'static str,
        token: String,
    },
}

impl SkipReason {
    /// Name of the skipped actor, when the record carried one.
    pub fn actor_name(&self) -> Option<&str> {
        match self {
            Self::MissingNameOrIndex { name } => name.as_deref(),
            Self::IndexFormat { name, .. }
            | Self::ObjectsFormat { name, .. }
            | Self::InvalidHex { name, .. } => Some(name),
        }
    }
}

/// Anomalies that are logged while the actor is still emitted.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Warning {
    #[error("actor '{name}' multiple notes")]
    MultipleNotes { name: String },

    #[error(
        "actor '{name}' properties unexpected formatting: \
         {masks} masks, {names} names, {targets} targets"
    )]
    PropertyCountMismatch {
        name: String,
        masks: usize,
        names: usize,
        targets: usize,
    },

    #[error("actor '{name}' property mask is not a hex value: '{token}'")]
    InvalidPropertyMask { name: String, token: String },

    #[error("actor '{name}' free variable mask is zero but it has {presets} presets")]
    EmptyFreeMask { name: String, presets: usize },

    #[error("actor '{name}' preset '{label}' has no usable Var value")]
    InvalidPreset { name: String, label: String },
}

impl Warning {
    /// Name of the actor the warning refers to.
    pub fn actor_name(&self) -> &str {
        match self {
            Self::MultipleNotes { name }
            | Self::PropertyCountMismatch { name, .. }
            | Self::InvalidPropertyMask { name, .. }
            | Self::EmptyFreeMask { name, .. }
            | Self::InvalidPreset { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_messages_name_the_actor_and_field() {
        let reason = SkipReason::IndexFormat {
            name: "En_Test".to_string(),
            index: "12345".to_string(),
        };
        assert_eq!(
            reason.to_string(),
            "actor 'En_Test' index unexpected formatting: 12345"
        );
        assert_eq!(reason.actor_name(), Some("En_Test"));

        let anonymous = SkipReason::MissingNameOrIndex { name: None };
        assert_eq!(anonymous.to_string(), "actor missing name or index");
        assert_eq!(anonymous.actor_name(), None);
    }

    #[test]
    fn warning_messages_include_counts() {
        let warning = Warning::PropertyCountMismatch {
            name: "En_Sw".to_string(),
            masks: 2,
            names: 1,
            targets: 2,
        };
        assert_eq!(
            warning.to_string(),
            "actor 'En_Sw' properties unexpected formatting: 2 masks, 1 names, 2 targets"
        );
        assert_eq!(warning.actor_name(), "En_Sw");
    }
}
