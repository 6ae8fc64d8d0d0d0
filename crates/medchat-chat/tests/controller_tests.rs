mod fixtures;

use std::collections::VecDeque;
use std::fs;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use medchat_chat::{
    ChatController, CompletionClient, Draft, SessionView, SubmissionState, SubmitOutcome,
};
use medchat_documents::Attachment;
use medchat_llm_api::{LlmClient, LlmResponse};
use medchat_models::Message;
use medchat_types::{
    ModelType, Role, Turn, CONNECTION_ERROR_REPLY, DOCUMENT_ERROR_REPLY, EMPTY_REPLY,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tokio::sync::Notify;

use fixtures::build_pdf;

/// Answers from a script and remembers every request it saw
#[derive(Default)]
struct ScriptedClient {
    replies: Mutex<VecDeque<Result<Option<String>>>>,
    requests: Mutex<Vec<(String, Vec<Message>)>>,
}

impl ScriptedClient {
    fn new(replies: Vec<Result<Option<String>>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<(String, Vec<Message>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn chat(&self, model: &str, messages: Vec<Message>) -> Result<LlmResponse> {
        self.requests.lock().unwrap().push((model.to_string(), messages));
        let next = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Some("default reply".to_string())));
        next.map(|content| LlmResponse { content, usage: None })
    }
}

/// Blocks inside the request until released
struct GatedClient {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl LlmClient for GatedClient {
    async fn chat(&self, _model: &str, _messages: Vec<Message>) -> Result<LlmResponse> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(LlmResponse {
            content: Some("done".to_string()),
            usage: None,
        })
    }
}

#[derive(Default)]
struct RecordingView {
    sizes: Mutex<Vec<usize>>,
}

impl SessionView for RecordingView {
    fn render(&self, turns: &[Turn]) {
        self.sizes.lock().unwrap().push(turns.len());
    }
}

fn mount(client: Arc<dyn LlmClient>) -> ChatController {
    ChatController::mount(CompletionClient::new(client), ModelType::Versatile, None)
}

fn roles_and_contents(turns: &[Turn]) -> Vec<(Role, String)> {
    turns.iter().map(|t| (t.role(), t.content().to_string())).collect()
}

#[tokio::test]
async fn test_hypertension_example() {
    let client = ScriptedClient::new(vec![Ok(Some("Hypertension is...".to_string()))]);
    let controller = mount(client.clone());

    let outcome = controller.submit(Draft::text("What is hypertension?")).await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Answered(ref turn) if turn.content() == "Hypertension is..."
    ));
    assert_eq!(
        roles_and_contents(&controller.turns()),
        vec![
            (Role::User, "What is hypertension?".to_string()),
            (Role::Assistant, "Hypertension is...".to_string()),
        ]
    );
    assert_eq!(controller.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn test_n_submissions_give_2n_turns_in_order() {
    let client = ScriptedClient::new(vec![
        Ok(Some("a1".to_string())),
        Ok(Some("a2".to_string())),
        Ok(Some("a3".to_string())),
    ]);
    let controller = mount(client.clone());

    for question in ["q1", "q2", "q3"] {
        controller.submit(Draft::text(question)).await;
    }

    let turns = controller.turns();
    assert_eq!(turns.len(), 6);
    let contents: Vec<&str> = turns.iter().map(|t| t.content()).collect();
    assert_eq!(contents, vec!["q1", "a1", "q2", "a2", "q3", "a3"]);
}

#[tokio::test]
async fn test_request_carries_full_history_ending_with_current_turn() {
    let client = ScriptedClient::new(vec![
        Ok(Some("Hypertension is...".to_string())),
        Ok(Some("Lifestyle changes and medication.".to_string())),
    ]);
    let controller = mount(client.clone());

    controller.submit(Draft::text("What is hypertension?")).await;
    controller.submit(Draft::text("How is it treated?")).await;

    let requests = client.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].0, "llama-3.3-70b-versatile");
    assert_eq!(requests[0].1, vec![Message::user("What is hypertension?")]);
    assert_eq!(
        requests[1].1,
        vec![
            Message::user("What is hypertension?"),
            Message::assistant("Hypertension is..."),
            Message::user("How is it treated?"),
        ]
    );
}

#[tokio::test]
async fn test_system_prompt_is_sent_but_not_stored() {
    let client = ScriptedClient::new(vec![Ok(Some("ok".to_string()))]);
    let completion = CompletionClient::new(client.clone())
        .with_system_prompt(Some("You are a medical study assistant.".to_string()));
    let controller = ChatController::mount(completion, ModelType::Instant, None);

    controller.submit(Draft::text("Hi")).await;

    let requests = client.requests();
    assert_eq!(requests[0].0, "llama-3.1-8b-instant");
    assert_eq!(
        requests[0].1,
        vec![Message::system("You are a medical study assistant."), Message::user("Hi")]
    );
    assert_eq!(controller.turns().len(), 2);
    assert_eq!(controller.turns()[0].role(), Role::User);
}

#[tokio::test]
async fn test_empty_submission_is_ignored() {
    let client = ScriptedClient::new(vec![]);
    let controller = mount(client.clone());

    assert_eq!(controller.submit(Draft::text("   \n\t")).await, SubmitOutcome::Ignored);
    assert_eq!(controller.submit(Draft::default()).await, SubmitOutcome::Ignored);

    assert!(controller.turns().is_empty());
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn test_no_content_uses_fallback_reply() {
    let client = ScriptedClient::new(vec![Ok(None)]);
    let controller = mount(client);

    let outcome = controller.submit(Draft::text("Hello")).await;

    assert!(matches!(outcome, SubmitOutcome::Answered(_)));
    assert_eq!(controller.last_turn().unwrap().content(), EMPTY_REPLY);
    assert_eq!(EMPTY_REPLY, "Sorry, I couldn't process that.");
}

#[tokio::test]
async fn test_provider_failure_uses_error_reply() {
    let client = ScriptedClient::new(vec![Err(anyhow::anyhow!("401 Invalid API Key"))]);
    let controller = mount(client);

    let outcome = controller.submit(Draft::text("Hello")).await;

    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    let turns = controller.turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].role(), Role::Assistant);
    assert_eq!(turns[1].content(), CONNECTION_ERROR_REPLY);
    assert_eq!(CONNECTION_ERROR_REPLY, "Error: Unable to connect to the AI model.");
    assert_eq!(controller.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn test_session_usable_after_failure() {
    let client = ScriptedClient::new(vec![
        Err(anyhow::anyhow!("connection refused")),
        Ok(Some("Back online".to_string())),
    ]);
    let controller = mount(client);

    controller.submit(Draft::text("first")).await;
    let outcome = controller.submit(Draft::text("second")).await;

    assert!(matches!(outcome, SubmitOutcome::Answered(_)));
    assert_eq!(controller.turns().len(), 4);
}

#[tokio::test]
async fn test_second_submission_while_pending_is_busy() {
    let gate = Arc::new(GatedClient {
        entered: Notify::new(),
        release: Notify::new(),
    });
    let controller = Arc::new(mount(gate.clone()));

    let first = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.submit(Draft::text("first")).await })
    };

    gate.entered.notified().await;
    assert_eq!(controller.state(), SubmissionState::Submitting);

    let second = controller.submit(Draft::text("second")).await;
    assert_eq!(second, SubmitOutcome::Busy);
    assert_eq!(controller.turns().len(), 1);

    gate.release.notify_one();
    let first = first.await.unwrap();
    assert!(matches!(first, SubmitOutcome::Answered(_)));

    let contents: Vec<String> = controller
        .turns()
        .iter()
        .map(|t| t.content().to_string())
        .collect();
    assert_eq!(contents, vec!["first".to_string(), "done".to_string()]);
    assert_eq!(controller.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn test_unmount_clears_session() {
    let client = ScriptedClient::new(vec![]);
    let controller = mount(client);

    controller.submit(Draft::text("q1")).await;
    controller.submit(Draft::text("q2")).await;
    assert_eq!(controller.turns().len(), 4);

    controller.unmount();
    assert!(controller.turns().is_empty());
}

#[tokio::test]
async fn test_view_rerenders_after_each_append() {
    let view = Arc::new(RecordingView::default());
    let client = ScriptedClient::new(vec![]);
    let controller = ChatController::mount(
        CompletionClient::new(client),
        ModelType::Versatile,
        Some(view.clone() as Arc<dyn SessionView>),
    );

    controller.submit(Draft::text("q")).await;
    controller.unmount();

    assert_eq!(*view.sizes.lock().unwrap(), vec![1, 2, 0]);
}

#[tokio::test]
async fn test_model_switch_applies_to_next_request() {
    let client = ScriptedClient::new(vec![]);
    let controller = mount(client.clone());

    controller.set_model(ModelType::Instant);
    controller.submit(Draft::text("q")).await;

    assert_eq!(controller.model(), ModelType::Instant);
    assert_eq!(client.requests()[0].0, "llama-3.1-8b-instant");
}

#[tokio::test]
async fn test_metadata_attachment_without_text_is_submitted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("case-notes.docx");
    fs::write(&path, vec![0u8; 512]).unwrap();
    let attachment = Attachment::from_path(&path).await.unwrap();

    let client = ScriptedClient::new(vec![Ok(Some("Noted.".to_string()))]);
    let controller = mount(client.clone());

    let outcome = controller.submit(Draft::default().with_attachment(attachment)).await;
    assert!(matches!(outcome, SubmitOutcome::Answered(_)));

    let turns = controller.turns();
    assert_eq!(turns[0].attachments().len(), 1);
    assert_eq!(turns[0].attachments()[0].name, "case-notes.docx");
    assert_eq!(
        turns[0].content(),
        "[Attached file: case-notes.docx (512 B, application/vnd.openxmlformats-officedocument.wordprocessingml.document)]"
    );
    assert_eq!(client.requests()[0].1.last().unwrap().content, turns[0].content());
}

#[tokio::test]
async fn test_pdf_text_reaches_the_request() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cardio.pdf");
    fs::write(&path, build_pdf(&["Beta blockers lower heart rate"])).unwrap();
    let attachment = Attachment::from_path(&path).await.unwrap();

    let client = ScriptedClient::new(vec![Ok(Some("They block beta-1 receptors.".to_string()))]);
    let controller = mount(client.clone());

    let outcome = controller
        .submit(Draft::text("Summarise this").with_attachment(attachment))
        .await;
    assert!(matches!(outcome, SubmitOutcome::Answered(_)));

    let expected = "Summarise this\n\n[PDF Content: cardio.pdf]\nBeta blockers lower heart rate";
    assert_eq!(controller.turns()[0].content(), expected);
    assert_eq!(controller.turns()[0].attachments()[0].name, "cardio.pdf");
    assert_eq!(client.requests()[0].1, vec![Message::user(expected)]);
}

#[tokio::test]
async fn test_document_parse_failure_appends_error_turn_without_request() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("corrupt.pdf");
    fs::write(&path, b"not really a pdf").unwrap();
    let attachment = Attachment::from_path(&path).await.unwrap();

    let client = ScriptedClient::new(vec![]);
    let controller = mount(client.clone());

    let outcome = controller
        .submit(Draft::text("Summarise this").with_attachment(attachment))
        .await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Failed(ref turn) if turn.content() == DOCUMENT_ERROR_REPLY
    ));
    let turns = controller.turns();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].role(), Role::User);
    assert!(turns[0].content().starts_with("Summarise this"));
    assert_eq!(turns[1].content(), DOCUMENT_ERROR_REPLY);
    assert!(client.requests().is_empty());
    assert_eq!(controller.state(), SubmissionState::Idle);
}

#[test]
fn test_transcript_replaces_draft_text() {
    let mut draft = Draft::text("typed");
    draft.set_transcript("  what causes anemia  ");
    assert_eq!(draft.text, "what causes anemia");
    assert!(!draft.is_empty());
    draft.clear();
    assert!(draft.is_empty());
}
