use anyhow::{Context, Result};
use std::env;
use std::sync::Arc;

use medchat_chat::{ChatController, CompletionClient, Narrator, SessionView, SpeechRecognizer};
use medchat_llm_api::ClientFactory;

use crate::cli::Cli;
use crate::config::{AppConfig, EnvConfig, FileConfig};
use crate::speech::{CommandRecognizer, CommandSynthesizer};

/// Everything a chat view needs while it is mounted
pub struct ChatRuntime {
    pub controller: ChatController,
    pub narrator: Option<Narrator>,
    pub recognizer: Option<Arc<dyn SpeechRecognizer>>,
}

/// Layer CLI flags, MEDCHAT_* variables and the config file
pub fn setup_from_cli(cli: &Cli) -> Result<AppConfig> {
    let work_dir = env::current_dir().context("Failed to determine the working directory")?;
    let file = FileConfig::discover(cli.config.as_deref(), &work_dir)?;
    AppConfig::resolve(cli, &EnvConfig::from_env(), file)
}

/// Build the provider client, mount a controller and wire up speech
pub fn build_runtime(
    config: &AppConfig,
    view: Option<Arc<dyn SessionView>>,
) -> Result<ChatRuntime> {
    let client = ClientFactory::create(
        config.backend,
        config.api_key.clone(),
        config.api_url.clone(),
        config.verbose,
    );
    let completion = CompletionClient::new(client).with_system_prompt(config.system_prompt.clone());
    let controller = ChatController::mount(completion, config.model, view);

    let narrator = match &config.tts_command {
        Some(command) => Some(Narrator::new(Arc::new(CommandSynthesizer::new(command)?))),
        None => None,
    };

    let recognizer: Option<Arc<dyn SpeechRecognizer>> = match &config.stt_command {
        Some(command) => Some(Arc::new(CommandRecognizer::new(command)?)),
        None => None,
    };

    log::info!(
        "using {} via {} (speech out: {}, speech in: {})",
        config.model,
        config.backend.as_str(),
        narrator.is_some(),
        recognizer.is_some()
    );

    Ok(ChatRuntime {
        controller,
        narrator,
        recognizer,
    })
}
