use std::path::{Path, PathBuf};

use medchat_types::{AttachmentKind, AttachmentRef};

use crate::error::AttachmentError;

/// File extensions accepted at the input boundary
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["pdf", "doc", "docx", "txt"];

const ACCEPTED_MIME_TYPES: [&str; 4] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];

/// A file picked for the next submission.
///
/// Only the path is kept; the bytes are read while the submission runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub path: PathBuf,
    pub reference: AttachmentRef,
    pub kind: AttachmentKind,
}

impl Attachment {
    /// Build an attachment from filesystem metadata without reading the file
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, AttachmentError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AttachmentError::NotFound(display));
            }
            Err(e) => return Err(AttachmentError::Io(e)),
        };
        if !metadata.is_file() {
            return Err(AttachmentError::NotAFile(display));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or(display);
        let mime_type = guess_mime_type(&name);

        if !is_accepted(&name, &mime_type) {
            return Err(AttachmentError::Unsupported(name));
        }

        Ok(Self::new(path.to_path_buf(), name, metadata.len(), mime_type))
    }

    pub fn new(path: PathBuf, name: String, size_bytes: u64, mime_type: String) -> Self {
        let kind = classify(&mime_type, &name);
        Self {
            path,
            reference: AttachmentRef::new(name, size_bytes, mime_type),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.reference.name
    }
}

fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// MIME type for a file name, based on its extension
pub fn guess_mime_type(name: &str) -> String {
    match extension_of(name).as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// Accepted when either the extension or the declared MIME type is on the list
pub fn is_accepted(name: &str, mime_type: &str) -> bool {
    let extension = extension_of(name);
    ACCEPTED_EXTENSIONS.contains(&extension.as_str())
        || ACCEPTED_MIME_TYPES.contains(&mime_type.to_lowercase().as_str())
}

/// Extraction strategy for a file: the declared MIME type decides, the
/// extension is consulted only when the MIME type is generic.
pub fn classify(mime_type: &str, name: &str) -> AttachmentKind {
    match mime_type.to_lowercase().as_str() {
        "application/pdf" => AttachmentKind::Pdf,
        "" | "application/octet-stream" if extension_of(name) == "pdf" => AttachmentKind::Pdf,
        _ => AttachmentKind::Metadata,
    }
}
