//! Actor database conversion.
//!
//! Converts the game editor's actor table (XML) into the `actors.toml` list
//! read by the scene editor:
//! - [`loader`]: XML → generic [`XmlValue`] tree, inline text under `tagInnerText`
//! - [`normalize`]: raw records → [`NormalizedActor`] with properties and presets
//! - [`writer`]: normalized actors → TOML text
//! - [`sink`]: text → file or standard output
//!
//! Malformed records are skipped or partially emitted; the [`Batch`] keeps
//! count of both so a run can be reviewed after the fact.

pub mod error;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod report;
pub mod sink;
pub mod tree;
pub mod writer;

use std::path::Path;

pub use error::{LoadError, SkipReason, Warning};
pub use loader::{load_actor_table, parse_actor_table};
pub use model::{DropdownOption, NormalizedActor, PropertyEntry};
pub use normalize::{normalize_actor, normalize_table};
pub use report::{Batch, BatchSummary, RecordOutcome};
pub use sink::Sink;
pub use tree::XmlValue;
pub use writer::{TomlWriter, write_actors};

/// Loads an actor table file and normalizes every record.
pub fn convert_file(path: &Path) -> Result<Batch, LoadError> {
    let records = load_actor_table(path)?;
    Ok(normalize_table(&records))
}

/// Normalizes an actor table held in memory.
pub fn convert_str(xml: &str) -> Result<Batch, LoadError> {
    let records = parse_actor_table(xml)?;
    Ok(normalize_table(&records))
}
