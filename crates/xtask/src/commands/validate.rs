//! Load every content file and cross-check the roster
//!
//! Ruleset validation (duplicate ids, unknown statuses, bad formulas, law
//! thresholds) happens while loading; this command adds the roster checks a
//! ruleset cannot do on its own.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use combat_content::Roster;
use combat_core::Ruleset;
use console::style;

use crate::utils;

/// Load and cross-check content files
#[derive(Parser)]
pub struct Validate {
    /// Directory overriding the embedded content files
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl Validate {
    pub fn execute(self) -> Result<()> {
        let factory = utils::factory(self.data_dir);
        match factory.data_dir() {
            Some(dir) => println!("{} {}", style("Content:").bold().cyan(), dir.display()),
            None => println!("{} embedded defaults", style("Content:").bold().cyan()),
        }

        let ruleset = factory.load_ruleset()?;
        println!(
            "  {} {} skills, {} statuses, {} items",
            style("✓").green(),
            ruleset.skills().count(),
            ruleset.statuses().count(),
            ruleset.items().count()
        );
        println!(
            "  {} law fingerprint {}",
            style("✓").green(),
            &ruleset.laws().fingerprint()[..12]
        );

        let roster = factory.load_roster()?;
        let problems = roster_problems(&roster, &ruleset);
        if !problems.is_empty() {
            for problem in &problems {
                println!("  {} {}", style("✗").red(), problem);
            }
            bail!("{} roster problem(s) found", problems.len());
        }
        println!(
            "  {} {} combatants, {} encounters",
            style("✓").green(),
            roster.combatants.len(),
            roster.encounters.len()
        );

        println!("{}", style("Content is valid").bold().green());
        Ok(())
    }
}

/// Every roster reference the ruleset cannot resolve, plus encounters that
/// fail to build or cannot start.
pub fn roster_problems(roster: &Roster, ruleset: &Ruleset) -> Vec<String> {
    let mut problems = Vec::new();

    for spec in &roster.combatants {
        for skill in &spec.skills {
            if ruleset.skill(skill).is_none() {
                problems.push(format!("combatant '{}' knows unknown skill '{}'", spec.key, skill));
            }
        }
        for item in spec.items.keys() {
            if ruleset.item(item).is_none() {
                problems.push(format!("combatant '{}' carries unknown item '{}'", spec.key, item));
            }
        }
    }

    for spec in &roster.encounters {
        match roster.build(&spec.teams) {
            Ok(mut encounter) => {
                if let Err(err) = encounter.start() {
                    problems.push(format!("encounter '{}' cannot start: {}", spec.key, err));
                }
            }
            Err(err) => problems.push(format!("encounter '{}': {:#}", spec.key, err)),
        }
    }

    problems
}
