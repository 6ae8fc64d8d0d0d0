pub mod helpers;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use medchat_llm_api::BackendType;
use medchat_types::ModelType;

use crate::cli::Cli;
pub use helpers::EnvConfig;

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "medchat.toml";

/// Contents of `medchat.toml`; every key is optional
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub model: Option<String>,
    pub backend: Option<String>,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub system_prompt: Option<String>,
    pub signed_in: Option<bool>,
    pub tts_command: Option<String>,
    pub stt_command: Option<String>,
    pub verbose: Option<bool>,
}

impl FileConfig {
    /// Load config from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load the explicit file, or `medchat.toml` in `work_dir` when it exists.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file just means no file settings.
    pub fn discover(explicit: Option<&Path>, work_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        let default_path: PathBuf = work_dir.join(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            log::debug!("loading config from {}", default_path.display());
            Self::load_from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Settings for one run, after layering every source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub model: ModelType,
    pub backend: BackendType,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub system_prompt: Option<String>,
    pub signed_in: bool,
    pub tts_command: Option<String>,
    pub stt_command: Option<String>,
    pub verbose: bool,
}

impl AppConfig {
    /// Merge sources with precedence: CLI flags > MEDCHAT_* env > config file > defaults
    pub fn resolve(cli: &Cli, env: &EnvConfig, file: FileConfig) -> Result<Self> {
        let model = match cli.model.clone().or_else(|| env.model.clone()).or(file.model) {
            Some(name) => parse_model(&name)?,
            None => ModelType::default(),
        };

        let backend = match cli.backend.clone().or_else(|| env.backend.clone()).or(file.backend) {
            Some(name) => match BackendType::from_str(&name) {
                Some(backend) => backend,
                None => bail!("Unknown backend '{}'. Available: groq, openai", name),
            },
            None => BackendType::default(),
        };

        let signed_in = if cli.signed_in {
            true
        } else {
            env.signed_in.or(file.signed_in).unwrap_or(false)
        };

        let verbose = if cli.verbose {
            true
        } else {
            env.verbose.or(file.verbose).unwrap_or(false)
        };

        Ok(Self {
            model,
            backend,
            api_url: cli.api_url.clone().or_else(|| env.api_url.clone()).or(file.api_url),
            api_key: cli.api_key.clone().or_else(|| env.api_key.clone()).or(file.api_key),
            system_prompt: cli
                .system_prompt
                .clone()
                .or_else(|| env.system_prompt.clone())
                .or(file.system_prompt),
            signed_in,
            tts_command: cli
                .tts_command
                .clone()
                .or_else(|| env.tts_command.clone())
                .or(file.tts_command),
            stt_command: cli
                .stt_command
                .clone()
                .or_else(|| env.stt_command.clone())
                .or(file.stt_command),
            verbose,
        })
    }
}

/// Map a user-supplied model name onto the presented set
pub fn parse_model(name: &str) -> Result<ModelType> {
    match ModelType::from_str(name) {
        Some(model) => Ok(model),
        None => {
            let available: Vec<&str> = ModelType::ALL.iter().map(|m| m.as_str()).collect();
            bail!("Unknown model '{}'. Available: {}", name, available.join(", "))
        }
    }
}
