mod cli;
mod commands;
mod config;
mod error;
mod exec;
mod interact;
mod sync;
#[cfg(test)]
mod test_utils;
mod vcs;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Pull => commands::pull::handle_pull(),
        Commands::Push => commands::push::handle_push(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
