use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tfgit")]
#[command(about = "Synchronize a Git branch with a TFS workspace")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Bring the latest TFS changes into git and rebase the working branch
    Pull,
    /// Replay the working branch into TFS as a single change-set
    Push,
}
