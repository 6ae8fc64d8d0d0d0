use thiserror::Error;

/// A document could not be turned into text
#[derive(Debug, Error)]
pub enum DocumentParseError {
    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {name}: {reason}")]
    Malformed { name: String, reason: String },
    #[error("extraction of {name} did not complete")]
    Interrupted { name: String },
}

/// A file was refused at the input boundary
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("not a regular file: {0}")]
    NotAFile(String),
    #[error("unsupported file type: {0} (accepted: .pdf, .doc, .docx, .txt)")]
    Unsupported(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
