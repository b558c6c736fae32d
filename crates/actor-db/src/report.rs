//! Per-record outcomes and batch summary.

use std::fmt;

use crate::error::{SkipReason, Warning};
use crate::model::NormalizedActor;

/// Result of normalizing one raw actor record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The actor is emitted; `warnings` lists fallbacks applied on the way.
    Converted {
        actor: NormalizedActor,
        warnings: Vec<Warning>,
    },
    /// The record is left out of the output.
    Skipped(SkipReason),
}

/// Converted actors plus every diagnostic raised for the table.
#[derive(Clone, Debug, Default)]
pub struct Batch {
    actors: Vec<NormalizedActor>,
    skipped: Vec<SkipReason>,
    warnings: Vec<Warning>,
    warned_actors: usize,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Converted { actor, warnings } => {
                if !warnings.is_empty() {
                    self.warned_actors += 1;
                }
                self.warnings.extend(warnings);
                self.actors.push(actor);
            }
            RecordOutcome::Skipped(reason) => self.skipped.push(reason),
        }
    }

    /// Converted actors in source order.
    pub fn actors(&self) -> &[NormalizedActor] {
        &self.actors
    }

    pub fn skipped(&self) -> &[SkipReason] {
        &self.skipped
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            total: self.actors.len() + self.skipped.len(),
            converted: self.actors.len(),
            skipped: self.skipped.len(),
            warned: self.warned_actors,
        }
    }

    /// Renders the converted actors in the editor's TOML layout.
    pub fn to_toml(&self) -> String {
        crate::writer::write_actors(&self.actors)
    }

    /// Renders the converted actors as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.actors)
    }
}

impl FromIterator<RecordOutcome> for Batch {
    fn from_iter<I: IntoIterator<Item = RecordOutcome>>(iter: I) -> Self {
        let mut batch = Batch::new();
        for outcome in iter {
            batch.push(outcome);
        }
        batch
    }
}

/// Record counts for one conversion run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub converted: usize,
    pub skipped: usize,
    /// Converted actors that raised at least one warning.
    pub warned: usize,
}

impl BatchSummary {
    /// Returns true if every record was converted without warnings.
    pub fn is_clean(&self) -> bool {
        self.skipped == 0 && self.warned == 0
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} actor records: {} converted, {} skipped, {} with warnings",
            self.total, self.converted, self.skipped, self.warned
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn converted(name: &str, warnings: Vec<Warning>) -> RecordOutcome {
        RecordOutcome::Converted {
            actor: NormalizedActor::new(name, 1),
            warnings,
        }
    }

    #[test]
    fn summary_counts_each_outcome_class() {
        let batch: Batch = vec![
            converted("A", Vec::new()),
            converted(
                "B",
                vec![
                    Warning::MultipleNotes { name: "B".to_string() },
                    Warning::EmptyFreeMask {
                        name: "B".to_string(),
                        presets: 2,
                    },
                ],
            ),
            RecordOutcome::Skipped(SkipReason::MissingNameOrIndex { name: None }),
        ]
        .into_iter()
        .collect();

        let summary = batch.summary();
        assert_eq!(
            summary,
            BatchSummary {
                total: 3,
                converted: 2,
                skipped: 1,
                warned: 1,
            }
        );
        assert_eq!(batch.warnings().len(), 2);
        assert!(!summary.is_clean());
        assert_eq!(
            summary.to_string(),
            "3 actor records: 2 converted, 1 skipped, 1 with warnings"
        );
    }

    #[test]
    fn empty_batch_is_clean() {
        let batch = Batch::new();
        assert!(batch.summary().is_clean());
        assert_eq!(batch.to_toml(), "");
        assert_eq!(batch.to_json().unwrap(), "[]");
    }
}
