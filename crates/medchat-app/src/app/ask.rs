use anyhow::{bail, Result};
use std::path::PathBuf;

use medchat_chat::{Draft, SubmitOutcome};
use medchat_documents::Attachment;

use crate::app::setup::build_runtime;
use crate::config::AppConfig;

/// Build a draft from typed text and file paths, refusing unsupported files
pub async fn build_draft(text: &str, paths: &[PathBuf]) -> Result<Draft> {
    let mut draft = Draft::text(text);
    for path in paths {
        draft = draft.with_attachment(Attachment::from_path(path).await?);
    }
    Ok(draft)
}

/// Submit one question, print the reply and exit
pub async fn run_ask_mode(config: &AppConfig, question: String, attach: &[PathBuf]) -> Result<()> {
    let runtime = build_runtime(config, None)?;
    let draft = build_draft(&question, attach).await?;

    match runtime.controller.submit(draft).await {
        SubmitOutcome::Answered(turn) => {
            println!("{}", turn.content());
            if let Some(narrator) = &runtime.narrator {
                // Playback failures are already logged
                let _ = narrator.speak(turn.content()).await;
            }
            Ok(())
        }
        SubmitOutcome::Failed(turn) => bail!("{}", turn.content()),
        SubmitOutcome::Ignored => bail!("Nothing to ask: give a question or attach a file"),
        SubmitOutcome::Busy => bail!("Another request is still running"),
    }
}
