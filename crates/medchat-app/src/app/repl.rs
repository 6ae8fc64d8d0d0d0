use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::sync::Arc;

use medchat_chat::{Draft, SessionView, SubmitOutcome};
use medchat_documents::{Attachment, ACCEPTED_EXTENSIONS};
use medchat_types::{ModelType, Role};

use crate::app::ask::build_draft;
use crate::app::setup::{build_runtime, ChatRuntime};
use crate::app::view::TerminalView;
use crate::config::{parse_model, AppConfig};

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Exit,
    Help,
    Attach(String),
    Detach,
    Model(Option<String>),
    Listen,
    Speak,
    Reset,
    /// Empty line: send whatever the draft holds
    Send,
    Message(String),
    Unknown(String),
}

pub fn parse_line(line: &str) -> ReplCommand {
    let line = line.trim();

    if line.is_empty() {
        return ReplCommand::Send;
    }
    if line == "exit" || line == "quit" {
        return ReplCommand::Exit;
    }
    if !line.starts_with('/') {
        return ReplCommand::Message(line.to_string());
    }

    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };

    match command {
        "/help" => ReplCommand::Help,
        "/attach" if !arg.is_empty() => ReplCommand::Attach(arg.to_string()),
        "/detach" => ReplCommand::Detach,
        "/model" if arg.is_empty() => ReplCommand::Model(None),
        "/model" => ReplCommand::Model(Some(arg.to_string())),
        "/listen" => ReplCommand::Listen,
        "/speak" => ReplCommand::Speak,
        "/new" | "/reset" => ReplCommand::Reset,
        _ => ReplCommand::Unknown(line.to_string()),
    }
}

fn print_help() {
    println!("{} Commands:", "💡".bright_yellow());
    let extensions = ACCEPTED_EXTENSIONS.map(|e| format!(".{}", e)).join(", ");
    println!("  /attach <path>     - Attach a file ({})", extensions);
    println!("  /detach            - Drop pending attachments");
    println!("  /model [name]      - Show or switch the model");
    println!("  /listen            - Fill the message from speech");
    println!("  /speak             - Read the last answer aloud");
    println!("  /new, /reset       - Start a new conversation");
    println!("  /help              - Show this help");
    println!("  exit, quit         - Leave");
    println!("  <empty line>       - Send the pending message");
}

fn print_models(current: ModelType) {
    println!("{} Models:", "🤖".bright_cyan());
    for model in ModelType::ALL {
        let marker = if model == current { "*" } else { " " };
        println!("  {} {} ({})", marker, model.display_name(), model.as_str());
    }
}

async fn submit(runtime: &ChatRuntime, draft: &mut Draft) {
    if draft.is_empty() {
        return;
    }

    println!("{}", "Thinking...".bright_black());
    let outcome = runtime.controller.submit(std::mem::take(draft)).await;

    if let SubmitOutcome::Busy = outcome {
        eprintln!("{} Still waiting for the previous answer", "⏳".bright_yellow());
    }
}

/// Run interactive REPL mode
pub async fn run_repl_mode(config: &AppConfig, attach: &[PathBuf]) -> Result<()> {
    println!("{}", "🩺 MedChat - medical study assistant".bright_cyan().bold());
    println!("{}", "Ask about medical topics, cases, or study strategies...".bright_black());
    println!("{}", "Type '/help' for commands, 'exit' or 'quit' to leave\n".bright_black());

    let view: Arc<dyn SessionView> = Arc::new(TerminalView::new());
    let runtime = build_runtime(config, Some(view))?;
    let mut draft = build_draft("", attach).await?;
    for attachment in &draft.attachments {
        println!("{} Attached {}", "📎".bright_cyan(), attachment.name());
    }

    let mut rl = DefaultEditor::new()?;

    loop {
        let model_indicator =
            format!("[{}]", runtime.controller.model().display_name()).bright_magenta();
        let pending = if draft.attachments.is_empty() {
            String::new()
        } else {
            format!(" (+{} file)", draft.attachments.len())
        };
        let prompt = format!("{}{} {} ", model_indicator, pending, "You:".bright_green().bold());
        let readline = rl.readline(&prompt);

        match readline {
            Ok(line) => match parse_line(&line) {
                ReplCommand::Exit => {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }
                ReplCommand::Help => print_help(),
                ReplCommand::Attach(path) => match Attachment::from_path(&path).await {
                    Ok(attachment) => {
                        println!(
                            "{} Attached {} ({}, {})",
                            "📎".bright_cyan(),
                            attachment.name(),
                            attachment.reference.size_label,
                            attachment.reference.mime_type
                        );
                        draft.attachments.push(attachment);
                    }
                    Err(e) => eprintln!("{} {}", "❌".bright_red(), e),
                },
                ReplCommand::Detach => {
                    draft.attachments.clear();
                    println!("{} Attachments cleared", "✓".bright_green());
                }
                ReplCommand::Model(None) => print_models(runtime.controller.model()),
                ReplCommand::Model(Some(name)) => match parse_model(&name) {
                    Ok(model) => {
                        runtime.controller.set_model(model);
                        println!("{} Switched to {}", "✓".bright_green(), model.display_name());
                    }
                    Err(e) => eprintln!("{} {}", "❌".bright_red(), e),
                },
                ReplCommand::Listen => match &runtime.recognizer {
                    Some(recognizer) => {
                        println!("{}", "🎤 Listening...".bright_cyan());
                        match recognizer.listen().await {
                            Ok(transcript) => {
                                draft.set_transcript(&transcript);
                                println!("{} {}", "Heard:".bright_cyan(), draft.text);
                                let hint = "Press Enter to send, or type a new message.";
                                println!("{}", hint.bright_black());
                            }
                            Err(e) => {
                                let icon = "❌".bright_red();
                                eprintln!("{} Speech recognition failed: {:#}", icon, e)
                            }
                        }
                    }
                    None => eprintln!(
                        "{} No speech recognizer configured (set stt_command)",
                        "❌".bright_red()
                    ),
                },
                ReplCommand::Speak => match (&runtime.narrator, runtime.controller.last_turn()) {
                    (None, _) => eprintln!(
                        "{} No speech output configured (set tts_command)",
                        "❌".bright_red()
                    ),
                    (Some(narrator), Some(turn)) if turn.role() == Role::Assistant => {
                        println!("{}", "🔊 Speaking...".bright_cyan());
                        if let Err(e) = narrator.speak(turn.content()).await {
                            eprintln!("{} Speech output failed: {:#}", "❌".bright_red(), e);
                        }
                    }
                    (Some(_), _) => println!("{}", "Nothing to read aloud yet.".bright_black()),
                },
                ReplCommand::Reset => {
                    runtime.controller.unmount();
                    draft.clear();
                }
                ReplCommand::Send => submit(&runtime, &mut draft).await,
                ReplCommand::Message(text) => {
                    rl.add_history_entry(text.as_str())?;
                    draft.text = text;
                    submit(&runtime, &mut draft).await;
                }
                ReplCommand::Unknown(line) => {
                    eprintln!("{} Unknown command '{}'. Type /help", "❌".bright_red(), line);
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".bright_black());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red().bold(), err);
                break;
            }
        }
    }

    runtime.controller.unmount();
    Ok(())
}
