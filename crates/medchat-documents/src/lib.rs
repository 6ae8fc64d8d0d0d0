//! Attachment handling for medchat
//!
//! Classifies user-supplied files and turns portable documents into plain
//! text that can travel inside a user message. Files of any other accepted
//! type contribute their metadata only.

pub mod attachment;
pub mod error;
pub mod extract;
mod text_device;

pub use attachment::{Attachment, ACCEPTED_EXTENSIONS, classify, guess_mime_type, is_accepted};
pub use error::{AttachmentError, DocumentParseError};
pub use extract::{
    compose_message, extract_attachment, extract_pdf, extract_pdf_bytes, format_pages, pdf_label,
};
