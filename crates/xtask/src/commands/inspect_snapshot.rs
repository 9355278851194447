//! Read and inspect encounter snapshot files
//!
//! Accepts both encodings written by `simulate --snapshot-out`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use combat_core::EncounterSnapshot;
use console::style;

use crate::utils;

/// Inspect an encounter snapshot
#[derive(Parser)]
pub struct InspectSnapshot {
    /// Snapshot file (JSON or bincode)
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Check version and law fingerprint against content in this directory
    /// (or the embedded defaults with --verify)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Check version and law fingerprint against the content
    #[arg(long)]
    verify: bool,

    /// Number of trailing log entries to show in the summary
    #[arg(short, long, default_value_t = 10)]
    log: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Summary view (round, phase, combatants, recent log)
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl InspectSnapshot {
    pub fn execute(self) -> Result<()> {
        let (snapshot, size) = utils::read_snapshot(&self.path)?;

        println!(
            "{} {}",
            style("Snapshot File:").bold().cyan(),
            self.path.display()
        );
        println!(
            "{} {}",
            style("File Size:").bold().cyan(),
            utils::format_bytes(size)
        );
        println!("{} {}", style("Version:").bold().cyan(), snapshot.version);
        println!(
            "{} {}",
            style("Law Fingerprint:").bold().cyan(),
            snapshot.law_fingerprint
        );

        if self.verify || self.data_dir.is_some() {
            let ruleset = utils::factory(self.data_dir).load_ruleset()?;
            match snapshot.verify(&ruleset) {
                Ok(()) => println!("{} matches content", style("Verified:").bold().green()),
                Err(err) => println!("{} {}", style("Mismatch:").bold().red(), err),
            }
        }
        println!();

        match self.format {
            OutputFormat::Summary => print_summary(&snapshot, self.log),
            OutputFormat::Json => print_json(&snapshot)?,
            OutputFormat::Debug => println!("{:#?}", snapshot),
        }

        Ok(())
    }
}

fn print_summary(snapshot: &EncounterSnapshot, log_lines: usize) {
    let encounter = &snapshot.encounter;
    println!("{}", style("=== Encounter Summary ===").bold().green());
    println!();

    println!("{}", style("Turn Information:").bold().yellow());
    println!("  Round: {}", encounter.round());
    println!("  Phase: {}", encounter.phase());
    let order: Vec<String> = encounter.turn_order().iter().map(ToString::to_string).collect();
    println!("  Turn Order: {}", order.join(" → "));
    if let Some(winner) = encounter.winner() {
        println!("  Winner: {}", winner);
    }
    println!();

    println!("{}", style("Combatants:").bold().yellow());
    for combatant in encounter.participants() {
        utils::print_combatant(combatant);
    }
    if !encounter.fled().is_empty() {
        println!("{}", style("Fled:").bold().yellow());
        for combatant in encounter.fled() {
            utils::print_combatant(combatant);
        }
    }
    println!();

    let log = encounter.log();
    if !log.is_empty() && log_lines > 0 {
        println!("{}", style("Recent Log:").bold().yellow());
        for entry in &log[log.len().saturating_sub(log_lines)..] {
            println!("  [R{}] {}", entry.round, entry.message);
        }
    }
}

fn print_json(snapshot: &EncounterSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)
        .context("Failed to serialize snapshot to JSON")?;
    println!("{}", json);
    Ok(())
}
