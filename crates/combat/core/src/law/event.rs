//! Punitive events raised by world laws and the per-action scratch context.

use tracing::info;

use crate::combatant::Combatant;
use crate::cultivation::Realm;
use crate::status::{EffectSource, StatusTemplate};

/// How hard heaven strikes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TribulationSeverity {
    Moderate,
    Severe,
    Fatal,
}

impl TribulationSeverity {
    pub const fn damage(self) -> f64 {
        match self {
            TribulationSeverity::Moderate => 500.0,
            TribulationSeverity::Severe => 9_999.0,
            TribulationSeverity::Fatal => 99_999.0,
        }
    }
}

/// A punishment attached to an action attempt. Events always land on the actor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LawEvent {
    ThunderTribulation {
        severity: TribulationSeverity,
    },
    ForbiddenArtBacklash {
        technique: String,
        backlash_fraction: f64,
    },
    BreakthroughTribulation {
        realm: Realm,
        difficulty: u32,
        damage: f64,
    },
}

impl LawEvent {
    /// Applies the event to `target` and returns a display message.
    ///
    /// Health never drops below 1 from a law event; heaven punishes, it does
    /// not execute.
    pub fn apply(&self, target: &mut Combatant) -> String {
        let message = match self {
            LawEvent::ThunderTribulation { severity } => {
                let lost = target.take_damage_nonlethal(severity.damage());
                target.apply_status(&StatusTemplate::scorched(), EffectSource::default());
                let flavor = match severity {
                    TribulationSeverity::Moderate => {
                        format!("Heavenly lightning strikes {}, leaving them scorched black", target.name)
                    }
                    TribulationSeverity::Severe => {
                        format!("Nine bolts of heavenly thunder crash down on {}", target.name)
                    }
                    TribulationSeverity::Fatal => {
                        format!("Annihilating thunder engulfs {}", target.name)
                    }
                };
                format!("{flavor}! ({lost:.0} damage)")
            }
            LawEvent::ForbiddenArtBacklash {
                technique,
                backlash_fraction,
            } => {
                let max_health = target.stats().derived.max_health;
                let lost = target.take_damage_nonlethal(max_health * backlash_fraction);
                format!(
                    "The forbidden art {technique} lashes back at {}! ({lost:.0} damage)",
                    target.name
                )
            }
            LawEvent::BreakthroughTribulation {
                realm,
                difficulty,
                damage,
            } => {
                let lost = target.take_damage_nonlethal(*damage);
                format!(
                    "{} weathers a level {difficulty} tribulation on the way to {realm}. ({lost:.0} damage)",
                    target.name
                )
            }
        };
        info!(target: "combat::law", combatant = %target.id, %message, "law event applied");
        message
    }
}

/// Per-attempt scratch state, discarded after resolution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionContext {
    pub cancelled: bool,
    pub reason: Option<String>,
    pub events: Vec<LawEvent>,
}

impl ActionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&mut self, reason: impl Into<String>) {
        self.cancelled = true;
        self.reason = Some(reason.into());
    }

    /// Applies every event to `actor` in insertion order.
    pub fn apply_events(&self, actor: &mut Combatant) -> Vec<String> {
        self.events.iter().map(|event| event.apply(actor)).collect()
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }
}
