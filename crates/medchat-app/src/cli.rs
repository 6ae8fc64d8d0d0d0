use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for medchat
#[derive(Parser, Debug, Default)]
#[command(name = "medchat")]
#[command(about = "MedChat - medical study assistant in the terminal")]
#[command(version)]
pub struct Cli {
    /// Model to use (versatile, instant, or the full model identifier)
    #[arg(long, short = 'm', value_name = "MODEL")]
    pub model: Option<String>,

    /// Backend type (groq, openai)
    #[arg(long, value_name = "BACKEND")]
    pub backend: Option<String>,

    /// API URL of an OpenAI-compatible chat-completion endpoint
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// API key; defaults to GROQ_API_KEY or OPENAI_API_KEY for the backend
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Path to the config file (default: medchat.toml in the working directory)
    #[arg(long, value_name = "PATH", env = "MEDCHAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// System prompt sent ahead of the conversation
    #[arg(long, value_name = "TEXT")]
    pub system_prompt: Option<String>,

    /// Attach a file to the first message (repeatable)
    #[arg(long, short = 'a', value_name = "PATH")]
    pub attach: Vec<PathBuf>,

    /// Ask a single question, print the answer and exit
    #[arg(long, value_name = "TEXT")]
    pub ask: Option<String>,

    /// Treat the user as signed in
    #[arg(long)]
    pub signed_in: bool,

    /// Command used to read replies aloud; the text is passed as the last argument
    #[arg(long, value_name = "COMMAND")]
    pub tts_command: Option<String>,

    /// Command that records speech and prints the transcript on stdout
    #[arg(long, value_name = "COMMAND")]
    pub stt_command: Option<String>,

    /// Enable verbose debug output (shows HTTP requests and responses)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
