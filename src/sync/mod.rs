//! The synchronization orchestrator
//!
//! `Syncer` sequences the two protocols across the client adapters:
//!
//! - `pull`: bring upstream centralized changes into the Git history
//! - `push`: replay the working branch into the centralized system as one
//!   change-set
//! - `guard`: refuse to mutate a dirty working tree without consent
//! - `validate`: all-or-nothing binding checks before anything is
//!   registered upstream

mod guard;
mod pull;
mod push;
mod validate;

pub use validate::validate_bindings;

use crate::config::SyncConfig;
use crate::error::Result;
use crate::interact::{ConsoleInteraction, Interaction};
use crate::vcs::{Git, Tfs};

/// Message shown when a guard refusal unwinds an operation.
pub(crate) const ABORT_MESSAGE: &str = "TFS operation aborted, no changes made";

/// Drives the pull and push protocols across the two version-control
/// clients.
///
/// Every step blocks on its external process or prompt; the step order
/// within each protocol is load-bearing and must not change. Both clients
/// share one workspace and a single operator is assumed; running two
/// instances against the same workspace concurrently is unsupported.
pub struct Syncer<I> {
    git: Git,
    tfs: Tfs,
    config: SyncConfig,
    interaction: I,
}

impl Syncer<ConsoleInteraction> {
    /// Build a syncer for the repository enclosing the current directory.
    pub fn from_workspace() -> Result<Self> {
        let mut bootstrap = Git::new("git");
        let root = bootstrap.find_root()?;
        let config = SyncConfig::load(&root)?;
        let interaction = ConsoleInteraction::new(&config, &root);
        Ok(Self {
            git: Git::at(&config.git_program, &root),
            tfs: Tfs::new(&config.tf_program, &root),
            config,
            interaction,
        })
    }
}

impl<I: Interaction> Syncer<I> {
    pub fn new(git: Git, tfs: Tfs, config: SyncConfig, interaction: I) -> Self {
        Self {
            git,
            tfs,
            config,
            interaction,
        }
    }
}
