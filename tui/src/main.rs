mod args;
mod cli;
#[cfg(feature = "tui")]
mod tui;

use args::Args;
use env_logger::Env;
use std::{error::Error, process};

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let world = args.world()?;
    #[cfg(feature = "tui")]
    if args.uses_tui() {
        return tui::run(args, world);
    }
    cli::run(args, world)
}

fn main() {
    let args = Args::parse().unwrap_or_else(|e| e.exit());

    // Anything below `warn` would scribble over the TUI.
    let level = if args.uses_tui() { "warn" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
