mod common;

use common::*;
use zora::error::PipelineError;
use zora::kernel::{frame, split_sentences, OperatingMode, Session};

#[test]
fn test_mode_directive_skips_annotation() {
    // The annotator knows no sentence at all: a mode change must not reach it
    let mut session = session_with(hold_kb(), FixedAnnotator::new());

    let result = session.handle("Zora, mode HOLD please").unwrap();
    assert_eq!(strings(&result), vec![""]);
    assert_eq!(frame(&result), ";");

    let result = session.handle("mode Sequential").unwrap();
    assert_eq!(strings(&result), vec!["SAY-MS", "RR-00"]);
    assert_eq!(session.state().mode(), OperatingMode::Sequential);
}

#[test]
fn test_sequential_sentences_start_with_reset() {
    let sentence = "Zora raise your right arm.";
    let annotator = FixedAnnotator::new().with(sentence, raise_right_arm());
    let mut session = session_with(sequential_kb(), annotator);

    let first = session.handle(sentence).unwrap();
    assert_eq!(strings(&first), vec!["RR-00", "AR-0"]);

    let second = session.handle(sentence).unwrap();
    assert_eq!(strings(&second), vec!["RR-00", "AR-0"]);
    assert_eq!(frame(&second), "RR-00;AR-0;");
    assert_eq!(session.state().pose().right_arm, "raise");
}

#[test]
fn test_sequential_reset_lowers_raised_leg() {
    let annotator = FixedAnnotator::new()
        .with("Zora move up your left leg.", move_up_left_leg())
        .with("Zora raise your right arm.", raise_right_arm());
    let mut session = session_with(sequential_kb(), annotator);

    session.handle("Zora move up your left leg.").unwrap();
    let result = session.handle("Zora raise your right arm.").unwrap();

    assert_eq!(strings(&result), vec!["LL-1", "RR-00", "AR-0"]);
    assert_eq!(session.state().pose().left_leg, "down");
}

#[test]
fn test_hold_keeps_pose_between_sentences() {
    let annotator = FixedAnnotator::new()
        .with("Zora move up your left leg.", move_up_left_leg())
        .with("Zora sit down.", sit_down());
    let mut session = session_with(hold_kb(), annotator);

    assert_eq!(strings(&session.handle("Zora move up your left leg.").unwrap()), vec!["LL-0"]);
    assert_eq!(strings(&session.handle("Zora sit down.").unwrap()), vec!["ERR-INC:leg up"]);
}

#[test]
fn test_disambiguation_resumes_sentence() {
    let sentence = "Zora raise your arm and open your right hand";
    let annotator = FixedAnnotator::new().with(sentence, raise_arm_and_open_right_hand());
    let mut session = session_with(hold_kb(), annotator);

    let result = session.handle(sentence).unwrap();
    assert_eq!(strings(&result), vec!["ERR-MA:AL-0/AR-0/"]);
    assert!(session.awaiting_choice());

    let result = session.handle("*AR-0").unwrap();
    assert_eq!(strings(&result), vec!["AR-0", "MR-0"], "Chosen action first, then the rest of the sentence");
    assert!(!session.awaiting_choice());
    assert_eq!(session.state().pose().right_arm, "raise");
    assert_eq!(session.state().pose().right_hand, "open");

    let snapshot = session.telemetry().snapshot();
    assert_eq!(snapshot.sentence_stats.ambiguous, 1);
    assert_eq!(snapshot.action_stats.disambiguated, 1);
    assert_eq!(snapshot.action_stats.accepted, 2);
}

#[test]
fn test_choice_without_pending_sentence() {
    let mut session = session_with(sequential_kb(), FixedAnnotator::new());

    let result = session.handle("*ML-0").unwrap();

    assert_eq!(strings(&result), vec!["RR-00", "ML-0"]);
    assert_eq!(session.state().pose().left_hand, "open");
}

#[test]
fn test_choice_alone_keeps_finished_sentence_trace() {
    let annotator = FixedAnnotator::new().with("raise", raise_right_arm());
    let mut session = session_with(hold_kb(), annotator);

    session.handle("raise").unwrap();
    assert_eq!(session.last_trace().len(), 3);

    let result = session.handle("*ML-0").unwrap();

    assert_eq!(strings(&result), vec!["ML-0"]);
    assert_eq!(session.last_trace().len(), 3, "Previous sentence trace survives a lone choice");
    assert_eq!(session.last_trace()[1].anchor, "raise");
    assert!(!session.awaiting_choice());
    assert_eq!(session.state().pose().left_hand, "open");
}

#[test]
fn test_unknown_choice_keeps_sentence_pending() {
    let sentence = "Zora raise your arm and open your right hand";
    let annotator = FixedAnnotator::new().with(sentence, raise_arm_and_open_right_hand());
    let mut session = session_with(hold_kb(), annotator);
    session.handle(sentence).unwrap();

    let err = session.handle("*QQ-7").unwrap_err();
    assert!(matches!(err, PipelineError::UnknownAction(_)), "got {:?}", err);
    assert!(session.awaiting_choice(), "A bad answer does not cancel the question");

    let result = session.handle("*AL-0").unwrap();
    assert_eq!(strings(&result), vec!["AL-0", "MR-0"]);
}

#[test]
fn test_annotator_failure_is_a_pipeline_error() {
    let mut session = Session::new(hold_kb(), Box::new(FailingAnnotator)).unwrap();

    let err = session.handle("Zora raise your right arm").unwrap_err();

    assert!(matches!(err, PipelineError::Annotator(_)), "got {:?}", err);
    assert!(session.state().pose().is_default(), "Failure must not touch the pose");
}

#[test]
fn test_trace_and_telemetry_follow_sentence() {
    let annotator = FixedAnnotator::new()
        .with("raise", raise_right_arm())
        .with("nothing", annotate(&[("Hello", "UH")], &[]));
    let mut session = session_with(hold_kb(), annotator);

    session.handle("raise").unwrap();
    assert_eq!(session.last_trace().len(), 3, "Claimed words are never anchors");

    session.handle("nothing").unwrap();
    session.handle("mode sequential").unwrap();

    let status = session.status();
    assert_eq!(status.mode, OperatingMode::Sequential);
    assert_eq!(status.telemetry.sentence_stats.analyzed, 2);
    assert_eq!(status.telemetry.sentence_stats.no_action, 1);
    assert_eq!(status.telemetry.action_stats.accepted, 1);
    assert_eq!(status.telemetry.action_stats.per_code.get("AR-0"), Some(&1));
    assert_eq!(status.telemetry.mode_stats.switches, 1);
    assert_eq!(status.telemetry.mode_stats.resets, 1);
    assert!(session.last_trace().is_empty(), "A mode change drops the sentence context");
}

#[test]
fn test_split_sentences() {
    let parts = split_sentences("Zora stand up. mode HOLD. Zora raise your right arm.");
    assert_eq!(parts, vec!["Zora stand up.", "mode HOLD.", "Zora raise your right arm."]);

    assert!(split_sentences("   ").is_empty());
    assert_eq!(split_sentences("3.5 steps"), vec!["3.5 steps"]);
}
