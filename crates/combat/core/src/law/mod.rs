//! World Law Engine.
//!
//! Heaven laws run before an action resolves. A law may cancel the action,
//! attach punitive [`LawEvent`]s, or both. Laws are independent of each other
//! and read-only once loaded; events apply in the order they were attached.

pub mod event;
pub mod rules;

pub use event::{ActionContext, LawEvent, TribulationSeverity};
pub use rules::{
    CrossRealmKill, ForbiddenArts, LawCode, LawError, LawParams, RealmBreakthrough, WorldLaw,
    WorldLaws,
};

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::combatant::Combatant;
use crate::cultivation::Realm;
use crate::error::{ErrorSeverity, GameError};

/// Outcome of a successful breakthrough.
#[derive(Clone, Debug, PartialEq)]
pub struct BreakthroughReport {
    pub from: Realm,
    pub to: Realm,
    pub messages: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BreakthroughError {
    #[error("cannot break through from {current} to {requested}; the next realm is {next}")]
    NotNextRealm {
        current: Realm,
        requested: Realm,
        next: String,
    },
}

impl GameError for BreakthroughError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "BREAKTHROUGH_NOT_NEXT_REALM"
    }
}

/// Validated, read-only law table with enforcement entry points.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldLawEngine {
    laws: WorldLaws,
    fingerprint: String,
}

impl WorldLawEngine {
    pub fn new(laws: WorldLaws) -> Result<Self, LawError> {
        laws.validate()?;
        let fingerprint = hex::encode(Sha256::digest(format!("{laws:?}").as_bytes()));
        Ok(Self { laws, fingerprint })
    }

    pub fn laws(&self) -> &WorldLaws {
        &self.laws
    }

    /// SHA-256 of the law table, hex encoded. Snapshots carry it so they cannot
    /// be resumed under different laws.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Checks a damaging action of `actor` against `target`.
    ///
    /// Cross-realm kill: a realm gap of at least `max_gap` cancels the action
    /// and calls down a thunder tribulation on the actor. Only the realm tier
    /// matters; a weaker actor attacking upward always passes.
    pub fn enforce(&self, actor: &Combatant, target: Option<&Combatant>, ctx: &mut ActionContext) {
        let law = &self.laws.cross_realm_kill;
        let Some(target) = target else { return };
        if !law.enabled {
            return;
        }

        let gap = actor.realm().gap(target.realm());
        let rule = &law.params;
        if gap < i32::from(rule.max_gap) {
            return;
        }

        let severity = if gap >= i32::from(rule.fatal_threshold) {
            TribulationSeverity::Fatal
        } else if gap >= i32::from(rule.severity_threshold) {
            TribulationSeverity::Severe
        } else {
            TribulationSeverity::Moderate
        };

        info!(
            target: "combat::law",
            actor = %actor.id,
            target = %target.id,
            gap,
            %severity,
            "cross-realm kill forbidden"
        );
        ctx.cancel(format!(
            "Heaven forbids it! A {} cultivator may not slay a {} cultivator.",
            actor.realm(),
            target.realm()
        ));
        ctx.events.push(LawEvent::ThunderTribulation { severity });
    }

    /// Whether [`enforce`](Self::enforce) would cancel a strike of `actor`
    /// against `target`. Has no side effects.
    pub fn forbids_strike(&self, actor: &Combatant, target: &Combatant) -> bool {
        let law = &self.laws.cross_realm_kill;
        law.enabled && actor.realm().gap(target.realm()) >= i32::from(law.params.max_gap)
    }

    /// Checks a technique at cast time. A forbidden technique costs karma
    /// immediately and attaches a backlash event; it never cancels the cast.
    pub fn check_forbidden_art(&self, actor: &mut Combatant, technique: &str, ctx: &mut ActionContext) {
        let law = &self.laws.forbidden_arts;
        if !law.enabled || !law.params.techniques.iter().any(|t| t == technique) {
            return;
        }

        actor.karma -= law.params.karma_penalty;
        info!(
            target: "combat::law",
            actor = %actor.id,
            technique,
            karma = actor.karma,
            "forbidden art used"
        );
        ctx.events.push(LawEvent::ForbiddenArtBacklash {
            technique: technique.to_owned(),
            backlash_fraction: law.params.backlash_fraction,
        });
    }

    /// Attaches a tribulation when `new_realm` is a major realm.
    pub fn check_breakthrough(&self, actor: &Combatant, new_realm: Realm, ctx: &mut ActionContext) {
        let law = &self.laws.realm_breakthrough;
        if !law.enabled || !law.params.major_realms.contains(&new_realm) {
            return;
        }

        let difficulty = law.params.difficulty(new_realm);
        debug!(target: "combat::law", actor = %actor.id, realm = %new_realm, difficulty, "breakthrough tribulation");
        ctx.events.push(LawEvent::BreakthroughTribulation {
            realm: new_realm,
            difficulty,
            damage: f64::from(difficulty) * law.params.damage_per_difficulty,
        });
    }

    /// Advances `actor` one realm, enduring whatever tribulation heaven sends.
    pub fn attempt_breakthrough(
        &self,
        actor: &mut Combatant,
        new_realm: Realm,
    ) -> Result<BreakthroughReport, BreakthroughError> {
        let current = actor.realm();
        let next = current.next();
        if next != Some(new_realm) {
            return Err(BreakthroughError::NotNextRealm {
                current,
                requested: new_realm,
                next: next.map_or_else(|| "none".to_owned(), |realm| realm.to_string()),
            });
        }

        let mut ctx = ActionContext::new();
        self.check_breakthrough(actor, new_realm, &mut ctx);
        let messages = ctx.apply_events(actor);
        actor.attributes.realm = new_realm;

        Ok(BreakthroughReport {
            from: current,
            to: new_realm,
            messages,
        })
    }
}
