mod common;

use std::sync::Arc;

use comprehension_engine::{AssessmentError, RenderInstruction, Stage};

#[tokio::test]
async fn test_reference_substring_scores_full_credit() {
    let service = common::create_test_service();
    let session_id = common::advance_to_questions(&service).await;

    let set = service
        .session_snapshot(session_id)
        .await
        .unwrap()
        .question_set
        .unwrap();
    let index = set
        .iter()
        .position(|pair| pair.question == "What is the main idea of the story?")
        .expect("builtin bank question must be in the set");

    service
        .submit_answer(session_id, index, "honesty")
        .await
        .unwrap();

    let state = service.session_snapshot(session_id).await.unwrap();
    let record = &state.records[0];
    assert_eq!(record.question_index, index);
    assert_eq!(record.score, 1.0);
    assert_eq!(record.transcript, "honesty");
    assert!(state.answered[index]);
}

#[tokio::test]
async fn test_unmatched_answer_scores_zero() {
    let service = common::create_test_service();
    let session_id = common::advance_to_questions(&service).await;

    let set = service
        .session_snapshot(session_id)
        .await
        .unwrap()
        .question_set
        .unwrap();
    let index = set
        .iter()
        .position(|pair| pair.question == "What is the main idea of the story?")
        .unwrap();

    service
        .submit_answer(session_id, index, "dishonesty policy nonsense")
        .await
        .unwrap();

    let state = service.session_snapshot(session_id).await.unwrap();
    assert_eq!(state.records[0].score, 0.0);
    assert!(state.answered[index]);
}

#[tokio::test]
async fn test_answer_submission_is_idempotent() {
    let service = common::create_test_service();
    let session_id = common::advance_to_questions(&service).await;

    let first = service.submit_answer(session_id, 0, "honesty").await.unwrap();
    let second = service.submit_answer(session_id, 0, "honesty").await.unwrap();
    assert_eq!(first, second);

    // A different text for the same slot is ignored too.
    service
        .submit_answer(session_id, 0, "a completely different answer")
        .await
        .unwrap();

    let state = service.session_snapshot(session_id).await.unwrap();
    assert_eq!(state.records.len(), 1);
    assert_eq!(state.records[0].transcript, "honesty");
    assert_eq!(state.answered.iter().filter(|a| **a).count(), 1);
}

#[tokio::test]
async fn test_empty_answer_is_ignored_and_retryable() {
    let service = common::create_test_service();
    let session_id = common::advance_to_questions(&service).await;

    service.submit_answer(session_id, 0, "   ").await.unwrap();

    let state = service.session_snapshot(session_id).await.unwrap();
    assert!(state.records.is_empty());
    assert!(!state.answered[0]);

    // The slot is still open for a real answer.
    service.submit_answer(session_id, 0, "honesty").await.unwrap();
    let state = service.session_snapshot(session_id).await.unwrap();
    assert_eq!(state.records.len(), 1);
    assert!(state.answered[0]);
}

#[tokio::test]
async fn test_out_of_range_slot_is_ignored() {
    let service = common::create_test_service();
    let session_id = common::advance_to_questions(&service).await;

    let view = service.submit_answer(session_id, 17, "honesty").await.unwrap();
    assert!(matches!(view, RenderInstruction::Questions { .. }));

    let state = service.session_snapshot(session_id).await.unwrap();
    assert!(state.records.is_empty());
}

#[tokio::test]
async fn test_audio_answers_go_through_the_transcriber() {
    let service = common::create_test_service();
    let session_id = common::advance_to_questions(&service).await;

    let set = service
        .session_snapshot(session_id)
        .await
        .unwrap()
        .question_set
        .unwrap();
    let index = set
        .iter()
        .position(|pair| pair.question == "Why did the character feel guilty?")
        .unwrap();

    // EchoTranscriber turns the bytes straight into the transcript.
    service
        .submit_answer_audio(session_id, index, b"they lied about breaking the vase")
        .await
        .unwrap();

    let state = service.session_snapshot(session_id).await.unwrap();
    assert_eq!(state.records[0].score, 1.0);
    assert_eq!(state.records[0].transcript, "they lied about breaking the vase");
}

#[tokio::test]
async fn test_transcriber_failure_leaves_slot_unanswered() {
    let service = common::create_test_service_with(Arc::new(common::FailingTranscriber));
    let session_id = common::advance_to_questions(&service).await;

    let err = service
        .submit_answer_audio(session_id, 0, b"unintelligible noise")
        .await
        .unwrap_err();
    assert!(matches!(err, AssessmentError::Transcription(_)));

    let state = service.session_snapshot(session_id).await.unwrap();
    assert!(state.records.is_empty());
    assert!(!state.answered[0]);
    assert_eq!(state.stage, Stage::Questions);

    // Retry with a usable transcript succeeds on the next interaction.
    service.submit_answer(session_id, 0, "honesty").await.unwrap();
    let state = service.session_snapshot(session_id).await.unwrap();
    assert!(state.answered[0]);
}

#[tokio::test]
async fn test_silent_recording_is_a_collaborator_failure() {
    let service = common::create_test_service_with(Arc::new(common::SilentTranscriber));
    let session_id = common::advance_to_questions(&service).await;

    let err = service
        .submit_answer_audio(session_id, 0, b"...")
        .await
        .unwrap_err();
    assert!(matches!(err, AssessmentError::Transcription(_)));

    let state = service.session_snapshot(session_id).await.unwrap();
    assert!(!state.answered[0]);
}

#[tokio::test]
async fn test_retelling_audio_is_transcribed_and_stored() {
    let service = common::create_test_service();
    let (session_id, _) = service.start_session().await.unwrap();
    service.signal_ready(session_id).await.unwrap();

    let view = service
        .submit_retelling_audio(session_id, b"the kid broke a vase and told mom")
        .await
        .unwrap();
    let RenderInstruction::Retelling { transcript } = view else {
        panic!("expected retelling screen");
    };
    assert_eq!(transcript.as_deref(), Some("the kid broke a vase and told mom"));
}
