//! Utility functions for xtask commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use combat_content::ContentFactory;
use combat_core::{Combatant, EncounterSnapshot, ResourceKind};
use console::style;

/// Content from `data_dir` when given, embedded defaults otherwise.
pub fn factory(data_dir: Option<PathBuf>) -> ContentFactory {
    match data_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::embedded(),
    }
}

/// Writes a snapshot as JSON for `.json` paths and bincode otherwise.
pub fn write_snapshot(path: &Path, snapshot: &EncounterSnapshot) -> Result<usize> {
    let bytes = if is_json(path) {
        snapshot.to_json()?.into_bytes()
    } else {
        snapshot.to_bytes()?
    };
    std::fs::write(path, &bytes)
        .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
    Ok(bytes.len())
}

/// Reads a snapshot in either encoding. JSON is recognised by extension or by
/// a leading `{`.
pub fn read_snapshot(path: &Path) -> Result<(EncounterSnapshot, usize)> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    let looks_json = bytes.iter().find(|b| !b.is_ascii_whitespace()) == Some(&b'{');

    let snapshot = if is_json(path) || looks_json {
        let text = std::str::from_utf8(&bytes).context("Snapshot is not valid UTF-8")?;
        EncounterSnapshot::from_json(text)
    } else {
        EncounterSnapshot::from_bytes(&bytes)
    }
    .with_context(|| format!("Failed to decode snapshot: {}", path.display()))?;

    Ok((snapshot, bytes.len()))
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// One line per combatant: name, team, realm, health and mana.
pub fn print_combatant(combatant: &Combatant) {
    let stats = combatant.stats();
    let health = format!(
        "{:.0}/{:.0}",
        combatant.resources.health, stats.derived.max_health
    );
    let health = if combatant.is_alive() {
        style(health).green()
    } else {
        style(health).red()
    };
    println!(
        "  {} {} [{}] {} HP {} MP {:.0}%",
        style(combatant.id).dim(),
        style(&combatant.name).bold(),
        combatant.team,
        combatant.realm(),
        health,
        combatant.fraction(ResourceKind::Mana) * 100.0,
    );
    for effect in combatant.status.iter() {
        println!(
            "      {} x{} ({:?} left)",
            effect.name, effect.stacks, effect.remaining
        );
    }
}

pub fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{CombatEngine, SNAPSHOT_VERSION};

    fn snapshot() -> EncounterSnapshot {
        let factory = ContentFactory::embedded();
        let ruleset = factory.load_ruleset().unwrap();
        let encounter = factory.load_roster().unwrap().build_encounter("duel").unwrap();
        let mut engine = CombatEngine::new(&ruleset, encounter, 3);
        engine.start().unwrap();
        engine.snapshot()
    }

    #[test]
    fn snapshots_round_trip_through_both_encodings() {
        let dir = tempfile::tempdir().unwrap();
        let original = snapshot();

        for name in ["fight.json", "fight.bin"] {
            let path = dir.path().join(name);
            let written = write_snapshot(&path, &original).unwrap();
            let (read, size) = read_snapshot(&path).unwrap();
            assert_eq!(read, original);
            assert_eq!(size, written);
            assert_eq!(read.version, SNAPSHOT_VERSION);
        }
    }

    #[test]
    fn json_is_detected_without_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fight.snapshot");
        std::fs::write(&path, snapshot().to_json().unwrap()).unwrap();

        assert!(read_snapshot(&path).is_ok());
    }

    #[test]
    fn garbage_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.bin");
        std::fs::write(&path, [0xff, 0x00, 0x13]).unwrap();

        let err = read_snapshot(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.bin"));
    }

    #[test]
    fn format_bytes_picks_units() {
        assert_eq!(format_bytes(512), "512 bytes");
        assert_eq!(format_bytes(2048), "2.00 KB");
    }
}
