mod common;

use common::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use vitallm_generate::{
    ChatMessage, ChatSession, GenerateError, GenerationConfig, GenerationStatus, Generator,
    PromptTemplate, Role, Tokenizer,
};

fn decode(ids: &[u32]) -> String {
    tokenizer().decode(ids).unwrap()
}

#[test]
fn reply_fills_assistant_turn() {
    let model = ScriptedModel::new(b"rest", 512);
    let tok = tokenizer();
    let generator = Generator::new(&model, &tok);
    let mut session = ChatSession::new("Be kind.").with_config(GenerationConfig::new(4, 0.4, 1));

    session.submit("I have a headache.");
    let status = session.reply(&generator, StdRng::seed_from_u64(0)).unwrap();

    assert_eq!(status, GenerationStatus::DoneMaxTokens);
    assert_eq!(
        session.history(),
        &[
            ChatMessage::user("I have a headache."),
            ChatMessage::assistant("rest"),
        ]
    );
    assert_eq!(
        decode(&model.contexts()[0]),
        "Be kind.\n\nPatient: I have a headache.\nDoctor:"
    );
}

#[test]
fn reply_conditions_only_on_latest_user_turn() {
    let model = ScriptedModel::new(b"ok", 512);
    let tok = tokenizer();
    let generator = Generator::new(&model, &tok);
    let mut session = ChatSession::new("sys").with_config(GenerationConfig::new(2, 0.4, 1));

    session.submit("first question");
    session.reply(&generator, StdRng::seed_from_u64(0)).unwrap();
    session.submit("second question");
    session.reply(&generator, StdRng::seed_from_u64(0)).unwrap();

    let second_prompt = decode(&model.contexts()[2]);
    assert_eq!(second_prompt, "sys\n\nPatient: second question\nDoctor:");
    assert!(!second_prompt.contains("first question"));
    assert_eq!(session.history().len(), 4);
    assert_eq!(session.history()[3].role, Role::Assistant);
}

#[test]
fn reply_with_streams_updates_and_can_stop() {
    let model = ScriptedModel::new(b"abcdefghij", 512);
    let tok = tokenizer();
    let generator = Generator::new(&model, &tok);
    let mut session = ChatSession::default().with_config(GenerationConfig::new(10, 0.4, 1));

    session.submit("hello");
    let mut updates = Vec::new();
    let status = session
        .reply_with(&generator, StdRng::seed_from_u64(0), |text| {
            updates.push(text.to_string());
            updates.len() < 2
        })
        .unwrap();

    assert_eq!(status, GenerationStatus::DoneCancelled);
    assert_eq!(updates, vec!["a", "ab"]);
    assert_eq!(session.history()[1].content, "ab");
    assert_eq!(model.calls(), 2);
}

#[test]
fn custom_template_labels() {
    let model = ScriptedModel::new(b"k", 512);
    let tok = tokenizer();
    let generator = Generator::new(&model, &tok);
    let mut session = ChatSession::new("")
        .with_template(PromptTemplate::new("User", "Assistant"))
        .with_config(GenerationConfig::new(1, 0.4, 1));

    session.submit("hi");
    session.reply(&generator, StdRng::seed_from_u64(0)).unwrap();
    assert_eq!(decode(&model.contexts()[0]), "\n\nUser: hi\nAssistant:");
}

#[test]
fn failed_reply_drops_placeholder() {
    let model = FailingModel::new(1);
    let tok = tokenizer();
    let generator = Generator::new(&model, &tok);
    let mut session = ChatSession::new("sys");

    session.submit("hello");
    let err = session.reply(&generator, StdRng::seed_from_u64(0)).unwrap_err();
    assert!(matches!(err, GenerateError::Model(_)));
    assert_eq!(session.history(), &[ChatMessage::user("hello")]);
}

#[test]
fn reply_without_submit_is_rejected() {
    let tok = tokenizer();
    let generator = Generator::new(&SuccessorModel, &tok);
    let mut session = ChatSession::default();
    let err = session.reply(&generator, StdRng::seed_from_u64(0)).unwrap_err();
    assert!(matches!(err, GenerateError::Config(_)));
}
