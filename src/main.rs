//! jinjagen CLI entry point
//!
//! Parses command-line arguments, runs the rendering pipeline, and displays
//! failures as user-friendly errors with suggestions.

use anyhow::Result;
use clap::Parser;
use jinjagen::cli::Cli;
use jinjagen::core::user_friendly_error;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
