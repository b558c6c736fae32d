//! The `convert` command.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use actor_db::{Batch, BatchSummary, Sink};

/// Convert an editor actor database (XML) into scene editor actors (TOML)
#[derive(Parser, Debug)]
#[command(name = "convert")]
#[command(about = "Convert actor database XML into actor TOML", long_about = None)]
#[command(version)]
pub struct Convert {
    /// Actor database XML (e.g. bin/ootActorNames.xml)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (e.g. toml/oot/actors.toml); prints to stdout if omitted
    #[arg(value_name = "OUTPUT", env = "ACTOR_DB_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "toml", env = "ACTOR_DB_FORMAT")]
    pub format: OutputFormat,

    /// Log per-record details
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Scene editor actor list
    Toml,
    /// Normalized records as pretty-printed JSON
    Json,
}

impl Convert {
    pub fn execute(self) -> Result<()> {
        let batch = actor_db::convert_file(&self.input).with_context(|| {
            format!("Failed to load actor database: {}", self.input.display())
        })?;

        let text = render(&batch, self.format)?;

        let sink = Sink::new(self.output);
        sink.write(&text).with_context(|| match sink.path() {
            Some(path) => format!("Failed to write output: {}", path.display()),
            None => "Failed to write to stdout".to_string(),
        })?;

        if let Some(path) = sink.path() {
            tracing::info!("Wrote {} actors to {}", batch.actors().len(), path.display());
        }
        print_summary(&batch.summary());

        Ok(())
    }
}

fn render(batch: &Batch, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Toml => Ok(batch.to_toml()),
        OutputFormat::Json => batch.to_json().context("Failed to encode actors as JSON"),
    }
}

fn print_summary(summary: &BatchSummary) {
    let mark = if summary.is_clean() {
        style("✓").green().bold()
    } else {
        style("!").yellow().bold()
    };

    eprintln!(
        "{} {} converted, {} skipped, {} with warnings ({} records)",
        mark,
        style(summary.converted).bold(),
        style(summary.skipped).bold(),
        style(summary.warned).bold(),
        summary.total
    );
}
