use std::path::Path;
use std::sync::Arc;

use hayro_interpret::hayro_syntax::Pdf;
use hayro_interpret::util::PageExt;
use hayro_interpret::{Context, InterpreterSettings, interpret_page};
use kurbo::Rect;

use medchat_types::AttachmentKind;

use crate::attachment::Attachment;
use crate::error::DocumentParseError;
use crate::text_device::PageTextDevice;

/// Header placed before every page of text taken from `name`
pub fn pdf_label(name: &str) -> String {
    format!("[PDF Content: {}]", name)
}

/// Run the extraction strategy for the attachment's kind.
///
/// `Pdf` attachments are read and parsed; `Metadata` attachments are never
/// opened and yield `None`.
pub async fn extract_attachment(
    attachment: &Attachment,
) -> Result<Option<String>, DocumentParseError> {
    match attachment.kind {
        AttachmentKind::Pdf => extract_pdf(&attachment.path, attachment.name()).await.map(Some),
        AttachmentKind::Metadata => Ok(None),
    }
}

/// Read a PDF from disk and extract its text.
///
/// Parsing runs on the blocking pool; the caller is suspended until it finishes.
pub async fn extract_pdf(path: &Path, name: &str) -> Result<String, DocumentParseError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| DocumentParseError::Read {
            name: name.to_string(),
            source,
        })?;

    log::debug!("extracting text from {} ({} bytes)", name, bytes.len());

    let owned_name = name.to_string();
    tokio::task::spawn_blocking(move || extract_pdf_bytes(&owned_name, bytes))
        .await
        .map_err(|e| {
            log::error!("PDF extraction task for {} failed: {}", name, e);
            DocumentParseError::Interrupted {
                name: name.to_string(),
            }
        })?
}

/// Extract the text of every page, first to last, from an in-memory PDF
pub fn extract_pdf_bytes(name: &str, bytes: Vec<u8>) -> Result<String, DocumentParseError> {
    let pdf = Pdf::new(Arc::new(bytes)).map_err(|e| DocumentParseError::Malformed {
        name: name.to_string(),
        reason: format!("{:?}", e),
    })?;

    let settings = InterpreterSettings::default();
    let mut pages = Vec::new();

    for page in pdf.pages().iter() {
        let (w, h) = page.render_dimensions();
        let bbox = Rect::new(0.0, 0.0, w as f64, h as f64);

        let mut ctx = Context::new(
            page.initial_transform(true),
            bbox,
            page.xref(),
            settings.clone(),
        );
        let mut device = PageTextDevice::default();

        interpret_page(page, &mut ctx, &mut device);
        pages.push(device.tokens());
    }

    log::debug!("extracted {} page(s) from {}", pages.len(), name);
    Ok(format_pages(name, &pages))
}

/// Flatten per-page tokens into one string.
///
/// Tokens of a page are joined by single spaces, each page with text gets
/// the file label on the line before it, and pages are separated by a blank
/// line. Pages without text are skipped; no text at all gives `""`.
pub fn format_pages(name: &str, pages: &[Vec<String>]) -> String {
    let label = pdf_label(name);
    pages
        .iter()
        .filter(|tokens| !tokens.is_empty())
        .map(|tokens| format!("{}\n{}", label, tokens.join(" ")))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build the outgoing user message from typed text and attachments.
///
/// Extracted document text follows the typed text after a blank line.
/// Metadata-only attachments, and documents that yielded no text, are
/// announced by name, size and type.
pub fn compose_message(text: &str, attachments: &[(&Attachment, Option<String>)]) -> String {
    let mut parts: Vec<String> = Vec::new();

    let text = text.trim();
    if !text.is_empty() {
        parts.push(text.to_string());
    }

    for (attachment, extracted) in attachments {
        match extracted {
            Some(content) if !content.trim().is_empty() => parts.push(content.clone()),
            // Metadata-only files and documents without a text layer
            _ => {
                let reference = &attachment.reference;
                parts.push(format!(
                    "[Attached file: {} ({}, {})]",
                    reference.name, reference.size_label, reference.mime_type
                ));
            }
        }
    }

    parts.join("\n\n")
}
