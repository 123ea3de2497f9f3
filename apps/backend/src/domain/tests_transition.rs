use crate::domain::phase::TrialPhase;
use crate::domain::state::{PartyRole, Readiness, TrialState};
use crate::domain::transition::{action_effects, ActionKind, Effect};

fn state() -> TrialState {
    TrialState::new("ada".to_string(), "ben".to_string())
}

#[test]
fn role_and_turn_helpers() {
    let mut s = state();
    assert_eq!(s.role_of("ada"), Some(PartyRole::Plaintiff));
    assert_eq!(s.role_of("ben"), Some(PartyRole::Defendant));
    assert_eq!(s.role_of("carol"), None);
    assert!(!s.holds_turn("ada"));

    s.set_turn(PartyRole::Plaintiff);
    assert!(s.holds_turn("ada"));
    s.switch_turn();
    assert!(s.holds_turn("ben"));
    assert_eq!(s.turn_role(), Some(PartyRole::Defendant));
}

#[test]
fn readiness_gate_requires_both() {
    let mut ready = Readiness::default();
    assert!(!ready.all_ready());
    ready.set(PartyRole::Plaintiff);
    assert!(!ready.all_ready());
    ready.set(PartyRole::Defendant);
    assert!(ready.all_ready());
    ready.reset();
    assert!(!ready.all_ready() && !ready.plaintiff && !ready.defendant);
}

#[test]
fn plaintiff_opening_statement_alternates_turn() {
    let effects = action_effects(
        TrialPhase::OpeningStatements,
        PartyRole::Plaintiff,
        ActionKind::OpeningStatement,
    );
    assert_eq!(effects, vec![Effect::SwitchTurn]);
}

#[test]
fn defendant_opening_statement_ends_the_phase() {
    let effects = action_effects(
        TrialPhase::OpeningStatements,
        PartyRole::Defendant,
        ActionKind::OpeningStatement,
    );
    assert_eq!(
        effects,
        vec![
            Effect::AdvancePhase(TrialPhase::PresentationOfEvidencePlaintiff),
            Effect::SetTurn(PartyRole::Plaintiff),
        ]
    );
}

#[test]
fn rest_case_walks_the_evidence_phases() {
    let cases = [
        (
            TrialPhase::PresentationOfEvidencePlaintiff,
            TrialPhase::PresentationOfEvidenceDefendant,
            PartyRole::Defendant,
        ),
        (
            TrialPhase::PresentationOfEvidenceDefendant,
            TrialPhase::Rebuttal,
            PartyRole::Plaintiff,
        ),
        (
            TrialPhase::Rebuttal,
            TrialPhase::ClosingArguments,
            PartyRole::Plaintiff,
        ),
    ];
    for (from, to, turn) in cases {
        let effects = action_effects(from, PartyRole::Plaintiff, ActionKind::RestCase);
        assert_eq!(
            effects,
            vec![Effect::AdvancePhase(to), Effect::SetTurn(turn)],
            "rest_case from {from:?}"
        );
        assert!(from.is_forward_of(to));
    }
}

#[test]
fn rest_case_outside_evidence_phases_is_inert() {
    for phase in [
        TrialPhase::PreTrial,
        TrialPhase::OpeningStatements,
        TrialPhase::ClosingArguments,
        TrialPhase::Verdict,
    ] {
        assert!(action_effects(phase, PartyRole::Plaintiff, ActionKind::RestCase).is_empty());
    }
}

#[test]
fn defendant_closing_argument_triggers_verdict() {
    let effects = action_effects(
        TrialPhase::ClosingArguments,
        PartyRole::Defendant,
        ActionKind::ClosingArgument,
    );
    assert_eq!(
        effects,
        vec![
            Effect::AdvancePhase(TrialPhase::Verdict),
            Effect::ResolveVerdict,
        ]
    );

    let plaintiff = action_effects(
        TrialPhase::ClosingArguments,
        PartyRole::Plaintiff,
        ActionKind::ClosingArgument,
    );
    assert_eq!(plaintiff, vec![Effect::SwitchTurn]);
}

#[test]
fn call_witness_and_introduce_evidence_hold_phase_and_turn() {
    let call = action_effects(
        TrialPhase::PresentationOfEvidencePlaintiff,
        PartyRole::Plaintiff,
        ActionKind::CallWitness,
    );
    assert_eq!(call, vec![Effect::StartExamination]);

    let intro = action_effects(
        TrialPhase::PresentationOfEvidencePlaintiff,
        PartyRole::Plaintiff,
        ActionKind::IntroduceEvidence,
    );
    assert!(intro.is_empty());
}

#[test]
fn unknown_action_is_accepted_and_ignored() {
    assert_eq!(ActionKind::parse("do_a_flip"), ActionKind::Other);
    for phase in TrialPhase::SEQUENCE {
        for role in [PartyRole::Plaintiff, PartyRole::Defendant] {
            assert!(action_effects(phase, role, ActionKind::Other).is_empty());
        }
    }
}

#[test]
fn action_kind_parses_known_wire_names() {
    assert_eq!(
        ActionKind::parse("opening_statement"),
        ActionKind::OpeningStatement
    );
    assert_eq!(ActionKind::parse("call_witness"), ActionKind::CallWitness);
    assert_eq!(
        ActionKind::parse("introduce_evidence"),
        ActionKind::IntroduceEvidence
    );
    assert_eq!(ActionKind::parse("rest_case"), ActionKind::RestCase);
    assert_eq!(
        ActionKind::parse("closing_argument"),
        ActionKind::ClosingArgument
    );
}

#[test]
fn scripted_rows_only_advance_forward() {
    // Each phase paired with the action the script expects there.
    let rows = [
        (TrialPhase::OpeningStatements, ActionKind::OpeningStatement),
        (
            TrialPhase::PresentationOfEvidencePlaintiff,
            ActionKind::RestCase,
        ),
        (
            TrialPhase::PresentationOfEvidenceDefendant,
            ActionKind::RestCase,
        ),
        (TrialPhase::Rebuttal, ActionKind::RestCase),
        (TrialPhase::ClosingArguments, ActionKind::ClosingArgument),
    ];
    for (phase, action) in rows {
        for role in [PartyRole::Plaintiff, PartyRole::Defendant] {
            for effect in action_effects(phase, role, action) {
                if let Effect::AdvancePhase(next) = effect {
                    assert!(
                        phase.is_forward_of(next),
                        "{phase:?} -> {next:?} via {action:?} as {role:?}"
                    );
                }
            }
        }
    }
}
