pub mod ask;
pub mod repl;
pub mod setup;
pub mod view;

pub use ask::run_ask_mode;
pub use repl::run_repl_mode;
pub use setup::{build_runtime, setup_from_cli, ChatRuntime};
pub use view::TerminalView;
