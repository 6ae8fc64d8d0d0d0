use std::sync::Arc;

use medchat_models::Message;
use medchat_types::Turn;

/// Anything that shows the conversation and must refresh when it changes
pub trait SessionView: Send + Sync {
    fn render(&self, turns: &[Turn]);
}

/// Ordered turns of one conversation, alive for as long as its view is mounted
#[derive(Default)]
pub struct Session {
    turns: Vec<Turn>,
    view: Option<Arc<dyn SessionView>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view(view: Arc<dyn SessionView>) -> Self {
        Self {
            turns: Vec::new(),
            view: Some(view),
        }
    }

    /// Add a turn at the end and refresh the view
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
        self.notify();
    }

    /// Drop every turn
    pub fn reset(&mut self) {
        self.turns.clear();
        self.notify();
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Turns reduced to `{role, content}` pairs for the provider
    pub fn history(&self) -> Vec<Message> {
        self.turns.iter().map(Message::from).collect()
    }

    fn notify(&self) {
        if let Some(view) = &self.view {
            view.render(&self.turns);
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("turns", &self.turns)
            .field("has_view", &self.view.is_some())
            .finish()
    }
}
