//! Run an AI-versus-AI encounter and print the turn log
//!
//! Every combatant in the roster preset has a personality, so the default
//! behavior-tree AI drives the whole fight.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use combat_core::{ActionOutcome, ActionResult};
use console::style;
use runtime::{AiConfig, Session, TargetStrategy, TurnReport};
use tracing::debug;

use crate::utils;

/// Run an AI-versus-AI encounter from the roster
#[derive(Parser)]
pub struct Simulate {
    /// Encounter key from the roster (e.g., sect_vs_demons, duel)
    #[arg(value_name = "ENCOUNTER", default_value = "sect_vs_demons")]
    encounter: String,

    /// Seed for combat rolls and AI tie-breaks (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many turns even if the fight is not over
    #[arg(short = 'n', long, default_value_t = 500)]
    max_turns: u32,

    /// Directory overriding the embedded content files
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Target strategy used by every AI combatant
    #[arg(long, default_value_t = TargetStrategy::HighestThreat)]
    strategy: TargetStrategy,

    /// Write the final encounter snapshot here (.json for JSON, bincode otherwise)
    #[arg(long, value_name = "PATH")]
    snapshot_out: Option<PathBuf>,

    /// Only print the summary
    #[arg(short, long)]
    quiet: bool,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let factory = utils::factory(self.data_dir);
        let ruleset = factory.load_ruleset()?;
        let roster = factory.load_roster()?;
        let encounter = roster
            .build_encounter(&self.encounter)
            .with_context(|| format!("Failed to build encounter '{}'", self.encounter))?;

        let mut builder = Session::builder(&ruleset).encounter(encounter).ai_config(AiConfig {
            strategy: self.strategy,
            ..AiConfig::default()
        });
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        let mut session = builder.build()?;
        debug!(encounter = %self.encounter, seed = session.seed(), strategy = %self.strategy, "simulation started");

        println!(
            "{} {} (seed {})",
            style("Encounter:").bold().cyan(),
            self.encounter,
            session.seed()
        );
        for combatant in session.encounter().participants() {
            utils::print_combatant(combatant);
        }
        println!();

        while session.turns() < self.max_turns {
            let Some(report) = session.play_turn()? else {
                break;
            };
            if !self.quiet {
                print_turn(&session, &report);
            }
        }

        let summary = session.summary();
        println!();
        println!("{}", style("=== Summary ===").bold().green());
        match &summary.winner {
            Some(team) => println!("  Winner: {}", style(team).bold().yellow()),
            None if summary.finished => println!("  Winner: nobody"),
            None => println!("  Stopped after {} turns without a winner", summary.turns),
        }
        println!("  Rounds: {}", summary.rounds);
        println!("  Turns: {}", summary.turns);
        if !summary.fled.is_empty() {
            let fled: Vec<String> = summary.fled.iter().map(ToString::to_string).collect();
            println!("  Fled: {}", fled.join(", "));
        }
        println!();
        for combatant in session.encounter().participants() {
            utils::print_combatant(combatant);
        }

        if let Some(path) = self.snapshot_out {
            let size = utils::write_snapshot(&path, &session.snapshot())?;
            println!();
            println!(
                "{} {} ({})",
                style("Snapshot written:").bold().cyan(),
                path.display(),
                utils::format_bytes(size)
            );
        }

        Ok(())
    }
}

fn print_turn(session: &Session<'_>, report: &TurnReport) {
    let name = session
        .encounter()
        .participant(report.actor)
        .map_or_else(|| report.actor.to_string(), |c| c.name.clone());
    println!(
        "{} {} {}",
        style(format!("[R{}]", report.round)).dim(),
        style(name).bold(),
        outcome_line(&report.result)
    );
    for line in &report.result.law_messages {
        println!("      {}", style(line).magenta());
    }
}

fn outcome_line(result: &ActionResult) -> String {
    match &result.outcome {
        ActionOutcome::Resolved => result.message.clone(),
        ActionOutcome::Rejected(_) => style(&result.message).red().to_string(),
        ActionOutcome::Intercepted => style(&result.message).magenta().bold().to_string(),
    }
}
