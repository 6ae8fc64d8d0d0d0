//! Speech backed by external programs.
//!
//! Commands are split on whitespace; no shell quoting is applied.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tokio::process::Command;

use medchat_chat::{SpeechRecognizer, SpeechSynthesizer};

fn split_command(command: &str) -> Result<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(str::to_string);
    match parts.next() {
        Some(program) => Ok((program, parts.collect())),
        None => bail!("speech command is empty"),
    }
}

/// Speaks by running `<command> <text>` and waiting for it to exit
#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    program: String,
    args: Vec<String>,
}

impl CommandSynthesizer {
    pub fn new(command: &str) -> Result<Self> {
        let (program, args) = split_command(command)?;
        Ok(Self { program, args })
    }
}

#[async_trait]
impl SpeechSynthesizer for CommandSynthesizer {
    async fn speak(&self, text: &str) -> Result<()> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .status()
            .await
            .with_context(|| format!("Failed to run speech command '{}'", self.program))?;

        if !status.success() {
            bail!("speech command '{}' exited with {}", self.program, status);
        }
        Ok(())
    }
}

/// Listens by running `<command>` and taking its trimmed stdout as the transcript
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    pub fn new(command: &str) -> Result<Self> {
        let (program, args) = split_command(command)?;
        Ok(Self { program, args })
    }
}

#[async_trait]
impl SpeechRecognizer for CommandRecognizer {
    async fn listen(&self) -> Result<String> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .await
            .with_context(|| format!("Failed to run recognition command '{}'", self.program))?;

        if !output.status.success() {
            bail!(
                "recognition command '{}' exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if transcript.is_empty() {
            bail!("no speech recognised");
        }
        Ok(transcript)
    }
}
