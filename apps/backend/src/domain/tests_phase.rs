use crate::domain::phase::TrialPhase;

#[test]
fn sequence_has_seven_stages_in_order() {
    let seq = TrialPhase::SEQUENCE;
    assert_eq!(seq.len(), 7);
    for pair in seq.windows(2) {
        assert!(pair[0].is_forward_of(pair[1]), "{:?} -> {:?}", pair[0], pair[1]);
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn next_walks_the_sequence_and_stops_at_verdict() {
    let mut phase = TrialPhase::PreTrial;
    let mut visited = vec![phase];
    while let Some(next) = phase.next() {
        assert!(phase.is_forward_of(next));
        phase = next;
        visited.push(phase);
    }
    assert_eq!(phase, TrialPhase::Verdict);
    assert_eq!(visited, TrialPhase::SEQUENCE.to_vec());
}

#[test]
fn wire_names_match_serde() {
    for phase in TrialPhase::SEQUENCE {
        let json = serde_json::to_string(&phase).expect("serialize phase");
        assert_eq!(json, format!("\"{}\"", phase.as_str()));
    }
    assert_eq!(
        TrialPhase::PresentationOfEvidencePlaintiff.as_str(),
        "presentation_of_evidence_plaintiff"
    );
}
