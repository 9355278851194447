use combat_content::ContentFactory;
use combat_core::{ActionKind, ActionRequest, CombatantId, Encounter, Ruleset, TeamId};
use runtime::{
    ProviderKind, RuntimeError, ScriptedActionProvider, Session, WaitActionProvider,
};

fn ruleset() -> Ruleset {
    ContentFactory::embedded().load_ruleset().unwrap()
}

fn encounter(key: &str) -> Encounter {
    ContentFactory::embedded()
        .load_roster()
        .unwrap()
        .build_encounter(key)
        .unwrap()
}

#[test]
fn ai_battle_runs_to_completion() {
    let ruleset = ruleset();
    let mut session = Session::builder(&ruleset)
        .encounter(encounter("sect_vs_demons"))
        .seed(42)
        .build()
        .unwrap();

    let summary = session.run(2_000).unwrap();

    assert!(summary.finished);
    assert!(session.is_over());
    assert!(summary.turns > 0);
    assert!(summary.rounds >= 1);
    assert!(!summary.log.is_empty());
    assert!(session.play_turn().unwrap().is_none());
}

#[test]
fn same_seed_replays_the_same_fight() {
    let ruleset = ruleset();
    let play = |seed| {
        let mut session = Session::builder(&ruleset)
            .encounter(encounter("sect_vs_demons"))
            .seed(seed)
            .build()
            .unwrap();
        session.run(2_000).unwrap()
    };

    assert_eq!(play(9), play(9));
}

#[test]
fn turn_cap_stops_an_unfinished_fight() {
    let ruleset = ruleset();
    let mut session = Session::builder(&ruleset)
        .encounter(encounter("duel"))
        .seed(1)
        .npc_provider(WaitActionProvider)
        .build()
        .unwrap();

    let summary = session.run(6).unwrap();

    assert!(!summary.finished);
    assert_eq!(summary.turns, 6);
    assert_eq!(summary.winner, None);
}

#[test]
fn player_combatants_need_a_player_provider() {
    let ruleset = ruleset();
    let mut encounter = encounter("duel");
    for id in [1, 2] {
        encounter
            .participant_mut(CombatantId(id))
            .unwrap()
            .personality = None;
    }
    let mut session = Session::builder(&ruleset)
        .encounter(encounter)
        .seed(3)
        .build()
        .unwrap();

    let err = session.play_turn().unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::ProviderNotSet {
            kind: ProviderKind::Player
        }
    ));

    // The turn stays pending until a provider shows up.
    session.set_player_provider(WaitActionProvider);
    let report = session.play_turn().unwrap().unwrap();
    assert_eq!(report.provider, ProviderKind::Player);
    assert_eq!(report.request.kind, ActionKind::Wait);
}

#[test]
fn scripted_player_plays_its_lines() {
    let ruleset = ruleset();
    let mut encounter = encounter("duel");
    encounter
        .participant_mut(CombatantId(1))
        .unwrap()
        .personality = None;

    let script = ScriptedActionProvider::new([
        ActionRequest::defend(CombatantId(1)),
        ActionRequest::attack(CombatantId(1), CombatantId(2)),
    ]);
    let mut session = Session::builder(&ruleset)
        .encounter(encounter)
        .seed(11)
        .player_provider(script)
        .build()
        .unwrap();

    let mut player_moves = Vec::new();
    while player_moves.len() < 2 {
        let report = session.play_turn().unwrap().unwrap();
        if report.actor == CombatantId(1) {
            assert_eq!(report.provider, ProviderKind::Player);
            player_moves.push(report.request.kind);
        } else {
            assert_eq!(report.provider, ProviderKind::Npc);
        }
        if session.is_over() {
            break;
        }
    }

    assert_eq!(player_moves.first(), Some(&ActionKind::Defend));
}

#[test]
fn provider_answering_for_someone_else_is_rejected() {
    struct Impostor;

    impl runtime::ActionProvider for Impostor {
        fn provide_action(
            &mut self,
            _actor: CombatantId,
            _engine: &combat_core::CombatEngine<'_>,
        ) -> runtime::Result<ActionRequest> {
            Ok(ActionRequest::wait(CombatantId(99)))
        }
    }

    let ruleset = ruleset();
    let mut session = Session::builder(&ruleset)
        .encounter(encounter("duel"))
        .seed(5)
        .npc_provider(Impostor)
        .build()
        .unwrap();

    assert!(matches!(
        session.play_turn(),
        Err(RuntimeError::InvalidActionActor {
            provided: CombatantId(99),
            ..
        })
    ));
}

#[test]
fn missing_encounter_is_reported() {
    let ruleset = ruleset();
    assert!(matches!(
        Session::builder(&ruleset).build(),
        Err(RuntimeError::MissingEncounter)
    ));
}

#[test]
fn single_team_encounter_cannot_start() {
    let ruleset = ruleset();
    let roster = ContentFactory::embedded().load_roster().unwrap();
    let lonely = roster
        .build(&[(TeamId::new("sect"), vec!["herbalist".to_owned()])])
        .unwrap();

    assert!(matches!(
        Session::builder(&ruleset).encounter(lonely).seed(1).build(),
        Err(RuntimeError::Combat(_))
    ));
}

#[test]
fn snapshot_resumes_mid_fight() {
    let ruleset = ruleset();
    let mut session = Session::builder(&ruleset)
        .encounter(encounter("sect_vs_demons"))
        .seed(21)
        .build()
        .unwrap();
    for _ in 0..4 {
        session.play_turn().unwrap();
    }

    let snapshot = session.snapshot();
    let round = session.encounter().round();
    let mut resumed = Session::builder(&ruleset)
        .snapshot(snapshot)
        .seed(21)
        .build()
        .unwrap();

    assert_eq!(resumed.encounter().round(), round);
    let summary = resumed.run(2_000).unwrap();
    assert!(summary.finished);
}
