use colored::Colorize;
use std::sync::Mutex;

use medchat_chat::SessionView;
use medchat_types::{Role, Turn};

/// Prints turns as they are appended to the session
#[derive(Debug, Default)]
pub struct TerminalView {
    shown: Mutex<usize>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Lines printed for a single turn
pub fn format_turn(turn: &Turn) -> Vec<String> {
    let mut lines = Vec::new();
    match turn.role() {
        Role::User => {
            for attachment in turn.attachments() {
                lines.push(format!(
                    "{} {} ({})",
                    "📎".bright_cyan(),
                    attachment.name,
                    attachment.size_label
                ));
            }
        }
        Role::Assistant => {
            let stamp = turn.timestamp().format("%H:%M").to_string().bright_black();
            lines.push(format!(
                "\n{} {} {}\n",
                stamp,
                "Assistant:".bright_blue().bold(),
                turn.content()
            ));
        }
    }
    lines
}

impl SessionView for TerminalView {
    fn render(&self, turns: &[Turn]) {
        let mut shown = self.shown.lock().unwrap_or_else(|p| p.into_inner());

        if turns.len() < *shown {
            if turns.is_empty() {
                println!("{}", "Conversation cleared.".bright_black());
            }
            *shown = turns.len();
            return;
        }

        for turn in &turns[*shown..] {
            for line in format_turn(turn) {
                println!("{}", line);
            }
        }
        *shown = turns.len();
    }
}
