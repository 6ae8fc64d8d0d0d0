//! Core types and structures for medchat
//!
//! This crate provides the conversation data model shared by all medchat crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Reply used when the provider answers without any content
pub const EMPTY_REPLY: &str = "Sorry, I couldn't process that.";

/// Reply used when the completion request fails for any reason
pub const CONNECTION_ERROR_REPLY: &str = "Error: Unable to connect to the AI model.";

/// Reply used when an attached document cannot be read
pub const DOCUMENT_ERROR_REPLY: &str = "Error: Unable to read the attached document.";

// ============================================================================
// Model Types
// ============================================================================

/// Models offered for selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    #[default]
    Versatile,
    Instant,
}

impl ModelType {
    /// Every model presented to the user, in display order
    pub const ALL: [ModelType; 2] = [ModelType::Versatile, ModelType::Instant];

    /// Model identifier sent to the provider
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Versatile => "llama-3.3-70b-versatile",
            ModelType::Instant => "llama-3.1-8b-instant",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ModelType::Versatile => "Llama-3.3-70B-Versatile",
            ModelType::Instant => "Llama-3.1-8B-Instant",
        }
    }

    /// Select a model by short name or full identifier.
    ///
    /// Returns `None` for anything outside the presented set.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "versatile" | "llama-3.3-70b-versatile" | "70b" => Some(ModelType::Versatile),
            "instant" | "llama-3.1-8b-instant" | "8b" => Some(ModelType::Instant),
            _ => None,
        }
    }
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Conversation Types
// ============================================================================

/// Speaker of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display-only projection of an attached file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub name: String,
    pub size_label: String,
    pub mime_type: String,
}

impl AttachmentRef {
    pub fn new(name: impl Into<String>, size_bytes: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_label: format_size(size_bytes),
            mime_type: mime_type.into(),
        }
    }
}

/// How an attachment contributes to the outgoing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    /// Portable document; its text is extracted and sent
    Pdf,
    /// Only name, size and type are sent
    Metadata,
}

/// One message unit in a conversation.
///
/// Fields are private so a turn cannot change after it is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
    timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<AttachmentRef>,
}

impl Turn {
    pub fn user(content: impl Into<String>, attachments: Vec<AttachmentRef>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            attachments,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            attachments: Vec::new(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn attachments(&self) -> &[AttachmentRef] {
        &self.attachments
    }
}

/// Human readable file size ("512 B", "1.5 KB", "2.3 MB")
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{:.1} MB", b / MB)
    }
}
