use std::sync::Arc;

use time::OffsetDateTime;

use crate::domain::{
    ActionType, DecisionPolicy, Ruling, Scripted, SpeakerRole, TrialPhase, VerdictOutcome,
};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::protocol::ServerMsg;
use crate::repos::trials::Trial;
use crate::services::trial_flow::{ActionSubmission, Emit, Outcome, PersistCmd, TrialFlow};

fn trial_row() -> Trial {
    Trial {
        trial_id: "trial-1".to_string(),
        title: "alice v. bob".to_string(),
        description: "The case of the missing teapot".to_string(),
        plaintiff_id: "alice".to_string(),
        defendant_id: "bob".to_string(),
        current_phase: TrialPhase::PreTrial,
        current_turn_username: None,
        created_at: OffsetDateTime::now_utc(),
        motion_to_judgment_called: false,
    }
}

fn flow_with(policy: Arc<dyn DecisionPolicy>) -> TrialFlow {
    TrialFlow::from_trial(&trial_row(), policy)
}

fn flow() -> TrialFlow {
    flow_with(Arc::new(Scripted::new(&[0])))
}

fn action(action_type: &str) -> ActionSubmission {
    ActionSubmission {
        action_type: action_type.to_string(),
        content: String::new(),
        witness_name: None,
        evidence_description: None,
    }
}

fn room_events(out: &Outcome) -> Vec<&ServerMsg> {
    out.events
        .iter()
        .filter_map(|e| match e {
            Emit::Room(msg) => Some(msg),
            Emit::Caller(_) => None,
        })
        .collect()
}

/// Both parties ready and the turn handed over, ready to act.
fn opened_flow() -> TrialFlow {
    let mut flow = flow();
    flow.set_ready("alice").unwrap();
    flow.set_ready("bob").unwrap();
    flow
}

#[test]
fn join_announces_to_room_and_snapshots_to_caller() {
    let mut flow = flow();
    let out = flow.join("alice");
    assert_eq!(
        out.events[0],
        Emit::Room(ServerMsg::JoinedTrial {
            message: "alice has joined the trial.".to_string(),
        })
    );
    assert_eq!(
        out.events[1],
        Emit::Caller(ServerMsg::TrialState {
            current_phase: TrialPhase::PreTrial,
            current_turn: None,
        })
    );
    assert!(out.persist.is_empty());
}

#[test]
fn single_ready_does_not_advance() {
    let mut flow = flow();
    let out = flow.set_ready("alice").unwrap();
    assert_eq!(
        room_events(&out),
        vec![&ServerMsg::UserReady {
            username: "alice".to_string(),
        }]
    );
    assert_eq!(flow.state().phase, TrialPhase::PreTrial);
    assert_eq!(flow.state().turn, None);
    assert!(out.persist.is_empty());
}

#[test]
fn readiness_gate_opens_trial_and_resets() {
    let mut flow = flow();
    flow.set_ready("alice").unwrap();
    let out = flow.set_ready("bob").unwrap();

    let events = room_events(&out);
    assert_eq!(
        events,
        vec![
            &ServerMsg::UserReady {
                username: "bob".to_string(),
            },
            &ServerMsg::PhaseAdvanced {
                next_phase: TrialPhase::OpeningStatements,
            },
            &ServerMsg::TurnChanged {
                current_turn: "alice".to_string(),
            },
        ]
    );
    assert_eq!(flow.state().phase, TrialPhase::OpeningStatements);
    assert_eq!(flow.state().turn.as_deref(), Some("alice"));
    // The gate resets so it cannot re-fire.
    assert!(!flow.state().ready.plaintiff);
    assert!(!flow.state().ready.defendant);
    assert_eq!(
        out.persist,
        vec![PersistCmd::Progress {
            phase: TrialPhase::OpeningStatements,
            turn: Some("alice".to_string()),
        }]
    );
}

#[test]
fn readiness_after_opening_never_regresses_phase() {
    let mut flow = opened_flow();
    flow.submit_action("alice", &action("opening_statement"))
        .unwrap();
    flow.submit_action("bob", &action("opening_statement"))
        .unwrap();
    assert_eq!(
        flow.state().phase,
        TrialPhase::PresentationOfEvidencePlaintiff
    );

    // Re-arming the gate mid-trial leaves the phase alone.
    flow.set_ready("alice").unwrap();
    let out = flow.set_ready("bob").unwrap();
    assert_eq!(
        flow.state().phase,
        TrialPhase::PresentationOfEvidencePlaintiff
    );
    assert_eq!(
        room_events(&out),
        vec![&ServerMsg::UserReady {
            username: "bob".to_string(),
        }]
    );
}

#[test]
fn set_ready_rejects_outsiders() {
    let mut flow = flow();
    let err = flow.set_ready("mallory").unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert!(!flow.state().ready.plaintiff);
    assert!(!flow.state().ready.defendant);
}

#[test]
fn out_of_turn_action_is_rejected_without_mutation() {
    let mut flow = opened_flow();
    let before_phase = flow.state().phase;
    let err = flow
        .submit_action("bob", &action("opening_statement"))
        .unwrap_err();
    assert!(matches!(err, DomainError::OutOfTurn));
    assert_eq!(err.client_message(), "Not your turn.");
    assert_eq!(flow.state().phase, before_phase);
    assert_eq!(flow.state().turn.as_deref(), Some("alice"));
    assert!(flow.transcript().is_empty());
}

#[test]
fn plaintiff_opening_switches_turn() {
    let mut flow = opened_flow();
    let mut submission = action("opening_statement");
    submission.content = "We will show the teapot was taken.".to_string();
    let out = flow.submit_action("alice", &submission).unwrap();

    let events = room_events(&out);
    assert!(matches!(
        events[0],
        ServerMsg::TranscriptUpdated {
            speaker_role: SpeakerRole::Plaintiff,
            action_type: ActionType::OpeningStatement,
            ..
        }
    ));
    assert_eq!(
        events[1],
        &ServerMsg::TurnChanged {
            current_turn: "bob".to_string(),
        }
    );
    assert_eq!(flow.state().phase, TrialPhase::OpeningStatements);
    assert_eq!(flow.state().turn.as_deref(), Some("bob"));
}

#[test]
fn defendant_opening_advances_to_plaintiff_evidence() {
    let mut flow = opened_flow();
    flow.submit_action("alice", &action("opening_statement"))
        .unwrap();
    let out = flow
        .submit_action("bob", &action("opening_statement"))
        .unwrap();

    let events = room_events(&out);
    assert!(matches!(events[0], ServerMsg::TranscriptUpdated { .. }));
    assert_eq!(
        events[1],
        &ServerMsg::PhaseAdvanced {
            next_phase: TrialPhase::PresentationOfEvidencePlaintiff,
        }
    );
    assert_eq!(
        events[2],
        &ServerMsg::TurnChanged {
            current_turn: "alice".to_string(),
        }
    );
    assert_eq!(
        out.persist.last(),
        Some(&PersistCmd::Progress {
            phase: TrialPhase::PresentationOfEvidencePlaintiff,
            turn: Some("alice".to_string()),
        })
    );
}

#[test]
fn call_witness_records_and_starts_examination() {
    let mut flow = opened_flow();
    flow.submit_action("alice", &action("opening_statement"))
        .unwrap();
    flow.submit_action("bob", &action("opening_statement"))
        .unwrap();

    let mut submission = action("call_witness");
    submission.witness_name = Some("Dr. Pott".to_string());
    let out = flow.submit_action("alice", &submission).unwrap();

    let events = room_events(&out);
    match events[0] {
        ServerMsg::TranscriptUpdated {
            content,
            action_type,
            ..
        } => {
            assert_eq!(content, "Called witness: Dr. Pott");
            assert_eq!(*action_type, ActionType::CallWitness);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(
        events[1],
        &ServerMsg::StartExamination {
            witness_name: "Dr. Pott".to_string(),
        }
    );
    // No phase or turn movement.
    assert_eq!(
        flow.state().phase,
        TrialPhase::PresentationOfEvidencePlaintiff
    );
    assert_eq!(flow.state().turn.as_deref(), Some("alice"));
}

#[test]
fn call_witness_without_name_is_invalid() {
    let mut flow = opened_flow();
    flow.submit_action("alice", &action("opening_statement"))
        .unwrap();
    flow.submit_action("bob", &action("opening_statement"))
        .unwrap();
    let err = flow
        .submit_action("alice", &action("call_witness"))
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert!(flow.transcript().len() == 2);
}

#[test]
fn unknown_action_is_accepted_but_ignored() {
    let mut flow = opened_flow();
    let out = flow.submit_action("alice", &action("jazz_hands")).unwrap();
    assert!(out.events.is_empty());
    assert!(out.persist.is_empty());
    assert!(flow.transcript().is_empty());
    assert_eq!(flow.state().turn.as_deref(), Some("alice"));
}

#[test]
fn rest_case_walks_evidence_phases() {
    let mut flow = opened_flow();
    flow.submit_action("alice", &action("opening_statement"))
        .unwrap();
    flow.submit_action("bob", &action("opening_statement"))
        .unwrap();

    let out = flow.submit_action("alice", &action("rest_case")).unwrap();
    match room_events(&out)[0] {
        ServerMsg::TranscriptUpdated { content, .. } => {
            assert_eq!(content, "alice rests their case.");
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(
        flow.state().phase,
        TrialPhase::PresentationOfEvidenceDefendant
    );
    assert_eq!(flow.state().turn.as_deref(), Some("bob"));

    flow.submit_action("bob", &action("rest_case")).unwrap();
    assert_eq!(flow.state().phase, TrialPhase::Rebuttal);
    assert_eq!(flow.state().turn.as_deref(), Some("alice"));

    flow.submit_action("alice", &action("rest_case")).unwrap();
    assert_eq!(flow.state().phase, TrialPhase::ClosingArguments);
    assert_eq!(flow.state().turn.as_deref(), Some("alice"));
}

#[test]
fn defendant_closing_resolves_verdict() {
    // Judge/jury choices scripted: verdict in favor of the defendant.
    let mut flow = flow_with(Arc::new(Scripted::new(&[1])));
    flow.set_ready("alice").unwrap();
    flow.set_ready("bob").unwrap();
    flow.submit_action("alice", &action("opening_statement"))
        .unwrap();
    flow.submit_action("bob", &action("opening_statement"))
        .unwrap();
    flow.submit_action("alice", &action("rest_case")).unwrap();
    flow.submit_action("bob", &action("rest_case")).unwrap();
    flow.submit_action("alice", &action("rest_case")).unwrap();

    flow.submit_action("alice", &action("closing_argument"))
        .unwrap();
    assert_eq!(flow.state().turn.as_deref(), Some("bob"));

    let out = flow.submit_action("bob", &action("closing_argument")).unwrap();
    let events = room_events(&out);
    assert!(matches!(
        events[0],
        ServerMsg::TranscriptUpdated {
            action_type: ActionType::ClosingArgument,
            ..
        }
    ));
    assert_eq!(
        events[1],
        &ServerMsg::PhaseAdvanced {
            next_phase: TrialPhase::Verdict,
        }
    );
    match events[2] {
        ServerMsg::TranscriptUpdated {
            speaker_role,
            speaker_username,
            content,
            action_type,
            ..
        } => {
            assert_eq!(*speaker_role, SpeakerRole::Jury);
            assert_eq!(*speaker_username, None);
            assert_eq!(
                content,
                "Verdict: in_favor_of_defendant. Reasoning: Based on the evidence and testimony presented."
            );
            assert_eq!(*action_type, ActionType::Verdict);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(
        events[3],
        &ServerMsg::VerdictAnnounced {
            verdict: VerdictOutcome::InFavorOfDefendant,
            reasoning: "Based on the evidence and testimony presented.".to_string(),
        }
    );
    assert_eq!(flow.state().phase, TrialPhase::Verdict);
}

#[test]
fn question_records_and_notifies() {
    let mut flow = opened_flow();
    let out = flow.submit_question("alice", "Where were you?").unwrap();
    let events = room_events(&out);
    match events[0] {
        ServerMsg::TranscriptUpdated {
            content,
            action_type,
            ..
        } => {
            assert_eq!(content, "Q: Where were you?");
            assert_eq!(*action_type, ActionType::Question);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(
        events[1],
        &ServerMsg::QuestionAsked {
            question: "Where were you?".to_string(),
            asked_by: "alice".to_string(),
        }
    );
}

#[test]
fn objection_is_ruled_immediately() {
    let mut flow = flow_with(Arc::new(Scripted::new(&[0])));
    let out = flow.raise_objection("bob", "Hearsay").unwrap();

    let events = room_events(&out);
    match events[0] {
        ServerMsg::TranscriptUpdated {
            speaker_role,
            content,
            action_type,
            ..
        } => {
            assert_eq!(*speaker_role, SpeakerRole::Defendant);
            assert_eq!(content, "Objection: Hearsay");
            assert_eq!(*action_type, ActionType::Objection);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    match events[1] {
        ServerMsg::TranscriptUpdated {
            speaker_role,
            speaker_username,
            content,
            action_type,
            ..
        } => {
            assert_eq!(*speaker_role, SpeakerRole::Judge);
            assert_eq!(*speaker_username, None);
            assert_eq!(content, "Objection sustained.");
            assert_eq!(*action_type, ActionType::JudgeRuling);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(
        events[2],
        &ServerMsg::ObjectionRuled {
            ruling: Ruling::Sustained,
        }
    );
    assert_eq!(flow.transcript().len(), 2);
}

#[test]
fn evidence_and_witness_submissions_queue_writes() {
    let mut flow = flow();
    let out = flow.submit_evidence("alice", "A chipped teapot");
    assert_eq!(
        room_events(&out),
        vec![&ServerMsg::EvidenceUpdated {
            username: "alice".to_string(),
            description: "A chipped teapot".to_string(),
        }]
    );
    assert!(matches!(out.persist[0], PersistCmd::Evidence(_)));

    let out = flow.submit_witness("bob", "Dr. Pott");
    assert_eq!(
        room_events(&out),
        vec![&ServerMsg::WitnessUpdated {
            username: "bob".to_string(),
            witness_name: "Dr. Pott".to_string(),
        }]
    );
    assert!(matches!(out.persist[0], PersistCmd::Witness(_)));
}

#[test]
fn transcript_is_append_only_and_ordered() {
    let mut flow = opened_flow();
    flow.submit_action("alice", &action("opening_statement"))
        .unwrap();
    flow.submit_question("bob", "Really?").unwrap();
    flow.raise_objection("alice", "Relevance").unwrap();

    let entries = flow.transcript().entries();
    let kinds: Vec<ActionType> = entries.iter().map(|e| e.action_type).collect();
    assert_eq!(
        kinds,
        vec![
            ActionType::OpeningStatement,
            ActionType::Question,
            ActionType::Objection,
            ActionType::JudgeRuling,
        ]
    );

    // Append order is time order: the objection appends two entries in
    // one command and even those must not go backwards.
    assert!(entries
        .windows(2)
        .all(|pair| pair[0].timestamp <= pair[1].timestamp));

    // Server-assigned ids are unique per entry.
    let mut ids: Vec<&str> = entries.iter().map(|e| e.entry_id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), entries.len());
}

#[test]
fn opponent_ready_reports_the_other_party() {
    let mut flow = flow();
    assert!(!flow.opponent_ready("alice").unwrap());
    flow.set_ready("bob").unwrap();
    assert!(flow.opponent_ready("alice").unwrap());
    assert!(!flow.opponent_ready("bob").unwrap());

    let err = flow.opponent_ready("mallory").unwrap_err();
    assert!(matches!(
        err,
        DomainError::NotFound(NotFoundKind::Opponent, _)
    ));
}
