use colored::Colorize;

/// Which screen the user lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Chat,
    SignIn,
}

/// Signed-in users go straight to the chat; everyone else is sent to sign in
pub fn route(signed_in: bool) -> View {
    if signed_in {
        View::Chat
    } else {
        View::SignIn
    }
}

/// The sign-in screen: explains how to get past the gate
pub fn show_sign_in() {
    println!("{}", "🩺 MedChat".bright_cyan().bold());
    println!("{}", "Please sign in to continue.".bright_yellow());
    println!();
    println!("Sign in by doing one of the following:");
    println!("  • pass {}", "--signed-in".bright_green());
    println!("  • set {}", "MEDCHAT_SIGNED_IN=1".bright_green());
    println!("  • add {} to medchat.toml", "signed_in = true".bright_green());
}
