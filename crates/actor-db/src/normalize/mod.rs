//! Raw actor record normalization.
//!
//! Turns each [`XmlValue`] actor record into a [`NormalizedActor`]:
//! - `Key` becomes the 16-bit `Index`
//! - `Object` becomes an ordered list of object ids
//! - `Properties*` become [`PropertyEntry`](crate::model::PropertyEntry) records
//! - `Variable` entries become one synthesized `Presets` property
//!
//! Records that fail validation are skipped with a [`SkipReason`]; the rest of
//! the batch is unaffected.

mod presets;
mod properties;

use crate::error::{SkipReason, Warning};
use crate::model::NormalizedActor;
use crate::report::{Batch, RecordOutcome};
use crate::tree::XmlValue;

/// Width of the `Key` and single `Object` tokens.
const HEX_TOKEN_WIDTH: usize = 4;

/// Normalizes every record of an actor table, in source order.
pub fn normalize_table(records: &[XmlValue]) -> Batch {
    let batch: Batch = records.iter().map(normalize_actor).collect();
    tracing::debug!("{}", batch.summary());
    batch
}

/// Normalizes one actor record.
///
/// Every diagnostic is logged here; the outcome carries the same diagnostics
/// for the batch summary.
pub fn normalize_actor(record: &XmlValue) -> RecordOutcome {
    let mut warnings = Vec::new();

    match convert(record, &mut warnings) {
        Ok(actor) => {
            for warning in &warnings {
                tracing::warn!(actor = warning.actor_name(), "{}", warning);
            }
            RecordOutcome::Converted { actor, warnings }
        }
        Err(reason) => {
            tracing::warn!(actor = reason.actor_name(), "{}", reason);
            RecordOutcome::Skipped(reason)
        }
    }
}

fn convert(record: &XmlValue, warnings: &mut Vec<Warning>) -> Result<NormalizedActor, SkipReason> {
    let name = text_field(record, "Name").filter(|name| !name.is_empty());
    let key = text_field(record, "Key");

    let (Some(name), Some(key)) = (name, key) else {
        return Err(SkipReason::MissingNameOrIndex {
            name: name.map(str::to_string),
        });
    };

    let index = parse_index(name, key)?;
    let mut actor = NormalizedActor::new(name, index);

    actor.category = text_field(record, "Category").map(str::to_string);
    actor.notes = record
        .get("Notes")
        .and_then(|notes| collapse_notes(name, notes, warnings));
    actor.objects = match record.get("Object") {
        Some(objects) => Some(parse_objects(name, objects)?),
        None => None,
    };

    let table = properties::parse_properties(name, record, warnings);
    actor.properties = table.entries;

    if let Some(variables) = record.get("Variable") {
        let presets = presets::derive_presets(name, variables, table.free_mask, warnings);
        actor.properties.get_or_insert_with(Vec::new).push(presets);
    }

    Ok(actor)
}

fn text_field<'a>(record: &'a XmlValue, key: &str) -> Option<&'a str> {
    record.get(key).and_then(XmlValue::as_text)
}

fn parse_index(name: &str, key: &str) -> Result<u16, SkipReason> {
    if key.chars().count() != HEX_TOKEN_WIDTH {
        return Err(SkipReason::IndexFormat {
            name: name.to_string(),
            index: key.to_string(),
        });
    }

    parse_hex(key)
        .and_then(|value| u16::try_from(value).ok())
        .ok_or_else(|| SkipReason::InvalidHex {
            name: name.to_string(),
            field: "Key",
            token: key.to_string(),
        })
}

/// Joins repeated `Notes` elements into one newline-separated string.
fn collapse_notes(name: &str, notes: &XmlValue, warnings: &mut Vec<Warning>) -> Option<String> {
    if let XmlValue::Array(entries) = notes {
        warnings.push(Warning::MultipleNotes {
            name: name.to_string(),
        });
        let joined: Vec<&str> = entries.iter().filter_map(XmlValue::as_text).collect();
        return Some(joined.join("\n"));
    }

    let text = notes.as_text();
    if text.is_none() {
        tracing::debug!(actor = name, "ignoring Notes without text");
    }
    text.map(str::to_string)
}

/// Parses the `Object` field.
///
/// Comma-joined lists are taken as-is; a single token must be exactly four
/// characters wide.
fn parse_objects(name: &str, objects: &XmlValue) -> Result<Vec<u32>, SkipReason> {
    let format_error = |raw: &str| SkipReason::ObjectsFormat {
        name: name.to_string(),
        objects: raw.to_string(),
    };

    let raw = objects.as_text().ok_or_else(|| format_error("<not text>"))?;
    if !raw.contains(',') && raw.chars().count() != HEX_TOKEN_WIDTH {
        return Err(format_error(raw));
    }

    raw.split(',')
        .map(|token| {
            parse_hex(token).ok_or_else(|| SkipReason::InvalidHex {
                name: name.to_string(),
                field: "Object",
                token: token.to_string(),
            })
        })
        .collect()
}

/// Parses the leading run of hex digits of `token`.
///
/// Trailing non-hex characters are ignored; a token that does not start with
/// a hex digit, or that overflows `u32`, yields `None`.
pub(crate) fn parse_hex(token: &str) -> Option<u32> {
    let digits = token
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(token.len());
    u32::from_str_radix(&token[..digits], 16).ok()
}
