use std::sync::{Arc, Mutex, MutexGuard};

use medchat_documents::{compose_message, extract_attachment, Attachment};
use medchat_types::{AttachmentRef, ModelType, Turn, DOCUMENT_ERROR_REPLY};

use crate::completion::{CompletionClient, ReplyStatus};
use crate::session::{Session, SessionView};

/// Where the current submission stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// What a call to [`ChatController::submit`] did
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Nothing to send; the session is unchanged
    Ignored,
    /// Another submission is still running; the session is unchanged
    Busy,
    /// The provider answered; carries the appended assistant turn
    Answered(Turn),
    /// Extraction or the request failed; carries the appended assistant turn
    Failed(Turn),
}

/// Text and files waiting to be submitted
#[derive(Debug, Clone, Default)]
pub struct Draft {
    pub text: String,
    pub attachments: Vec<Attachment>,
}

impl Draft {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachments: Vec::new(),
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Replace the typed text with a speech transcript
    pub fn set_transcript(&mut self, transcript: &str) {
        self.text = transcript.trim().to_string();
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.attachments.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.attachments.clear();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Holds the state at `Submitting` (or its terminal value) and puts it back
/// to `Idle` when dropped, including when the submission future is dropped.
struct SubmissionGuard<'a> {
    state: &'a Mutex<SubmissionState>,
}

impl<'a> SubmissionGuard<'a> {
    fn begin(state: &'a Mutex<SubmissionState>) -> Option<Self> {
        let mut current = lock(state);
        if *current != SubmissionState::Idle {
            return None;
        }
        *current = SubmissionState::Submitting;
        Some(Self { state })
    }

    fn finish(&self, status: ReplyStatus) {
        *lock(self.state) = match status {
            ReplyStatus::Succeeded => SubmissionState::Succeeded,
            ReplyStatus::Failed => SubmissionState::Failed,
        };
    }
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        *lock(self.state) = SubmissionState::Idle;
    }
}

/// Request handling for one mounted chat view.
///
/// The controller owns the session: it is created empty on mount and
/// cleared on unmount. One submission runs at a time.
pub struct ChatController {
    session: Mutex<Session>,
    state: Mutex<SubmissionState>,
    model: Mutex<ModelType>,
    completion: CompletionClient,
}

impl ChatController {
    pub fn mount(
        completion: CompletionClient,
        model: ModelType,
        view: Option<Arc<dyn SessionView>>,
    ) -> Self {
        let session = match view {
            Some(view) => Session::with_view(view),
            None => Session::new(),
        };
        log::debug!("chat view mounted with model {}", model);
        Self {
            session: Mutex::new(session),
            state: Mutex::new(SubmissionState::Idle),
            model: Mutex::new(model),
            completion,
        }
    }

    /// Clear the conversation when the view goes away
    pub fn unmount(&self) {
        lock(&self.session).reset();
        log::debug!("chat view unmounted, session cleared");
    }

    pub fn state(&self) -> SubmissionState {
        *lock(&self.state)
    }

    pub fn model(&self) -> ModelType {
        *lock(&self.model)
    }

    /// Model used by the next submission
    pub fn set_model(&self, model: ModelType) {
        *lock(&self.model) = model;
    }

    pub fn turns(&self) -> Vec<Turn> {
        lock(&self.session).turns().to_vec()
    }

    pub fn last_turn(&self) -> Option<Turn> {
        lock(&self.session).last().cloned()
    }

    /// Run one submission: extract attachments, append the user turn, ask
    /// the provider, append the assistant turn.
    ///
    /// Always leaves the session with either zero or two new turns.
    pub async fn submit(&self, draft: Draft) -> SubmitOutcome {
        if draft.is_empty() {
            return SubmitOutcome::Ignored;
        }

        let guard = match SubmissionGuard::begin(&self.state) {
            Some(guard) => guard,
            None => {
                log::warn!("submission rejected: another one is still running");
                return SubmitOutcome::Busy;
            }
        };

        let references: Vec<AttachmentRef> = draft
            .attachments
            .iter()
            .map(|a| a.reference.clone())
            .collect();

        // Extraction finishes before anything is appended or sent
        let mut extracted = Vec::with_capacity(draft.attachments.len());
        for attachment in &draft.attachments {
            match extract_attachment(attachment).await {
                Ok(text) => extracted.push((attachment, text)),
                Err(e) => {
                    log::error!("could not extract {}: {}", attachment.name(), e);
                    let announced: Vec<(&Attachment, Option<String>)> =
                        draft.attachments.iter().map(|a| (a, None)).collect();
                    self.append(Turn::user(compose_message(&draft.text, &announced), references));

                    guard.finish(ReplyStatus::Failed);
                    let reply = Turn::assistant(DOCUMENT_ERROR_REPLY);
                    self.append(reply.clone());
                    return SubmitOutcome::Failed(reply);
                }
            }
        }

        let content = compose_message(&draft.text, &extracted);
        let history = {
            let mut session = lock(&self.session);
            session.append(Turn::user(content, references));
            session.history()
        };

        let model = self.model();
        let reply = self.completion.complete(model, history).await;

        guard.finish(reply.status);
        let turn = Turn::assistant(reply.content);
        self.append(turn.clone());

        match reply.status {
            ReplyStatus::Succeeded => SubmitOutcome::Answered(turn),
            ReplyStatus::Failed => SubmitOutcome::Failed(turn),
        }
    }

    fn append(&self, turn: Turn) {
        lock(&self.session).append(turn);
    }
}

impl Drop for ChatController {
    fn drop(&mut self) {
        self.unmount();
    }
}
