use anyhow::Result;
use clap::Parser;

use medchat::app::{run_ask_mode, run_repl_mode, setup_from_cli};
use medchat::gate::{route, show_sign_in, View};
use medchat::Cli;
use medchat_logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = setup_from_cli(&cli)?;

    init_logging(config.verbose);
    log::debug!(
        "resolved configuration: model={}, backend={}",
        config.model,
        config.backend.as_str()
    );

    match route(config.signed_in) {
        View::SignIn => {
            show_sign_in();
            Ok(())
        }
        View::Chat => match cli.ask.clone() {
            Some(question) => run_ask_mode(&config, question, &cli.attach).await,
            None => run_repl_mode(&config, &cli.attach).await,
        },
    }
}
