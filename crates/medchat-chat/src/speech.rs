use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

/// Speech-to-text source; yields the transcript that fills the draft
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn listen(&self) -> Result<String>;
}

/// Text-to-speech sink; resolves once playback has finished
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn speak(&self, text: &str) -> Result<()>;
}

/// Reads text aloud and reports whether it is currently speaking
pub struct Narrator {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    speaking: AtomicBool,
}

struct SpeakingFlag<'a>(&'a AtomicBool);

impl Drop for SpeakingFlag<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Narrator {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            synthesizer,
            speaking: AtomicBool::new(false),
        }
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }

    /// Speak `text`; the flag stays raised until playback ends or fails
    pub async fn speak(&self, text: &str) -> Result<()> {
        self.speaking.store(true, Ordering::SeqCst);
        let _flag = SpeakingFlag(&self.speaking);

        let result = self.synthesizer.speak(text).await;
        if let Err(e) = &result {
            log::warn!("speech playback failed: {:#}", e);
        }
        result
    }
}
