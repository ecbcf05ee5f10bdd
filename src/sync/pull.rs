use console::style;

use crate::error::{Result, SyncError};
use crate::interact::Interaction;
use crate::sync::{Syncer, ABORT_MESSAGE};

impl<I: Interaction> Syncer<I> {
    /// Bring upstream centralized changes into the Git history.
    ///
    /// The fetch always lands on the integration branch; when the
    /// operation starts on a working branch, that branch is restored
    /// afterwards and rebased onto the updated integration branch.
    pub fn pull(&self) -> Result<()> {
        let branch = self.git.branch_name()?;
        let integration = &self.config.integration_branch;
        let on_integration = branch == *integration;

        if !self.ensure_clean(&branch)? {
            return Err(SyncError::Aborted(ABORT_MESSAGE.to_string()));
        }

        if !on_integration {
            self.git.checkout(integration, true)?;
        }
        self.git.reset_and_clean()?;

        if !self.tfs.get_latest()? {
            println!(
                "{} No files fetched from TFS, nothing to merge",
                style("ℹ").blue()
            );
        } else {
            self.git.add_all()?;
            if self.git.status()?.is_empty() {
                println!(
                    "{} TFS changes are already in git, nothing to merge",
                    style("ℹ").blue()
                );
            } else {
                self.git.commit("Merged from TFS")?;
            }
        }

        if !on_integration {
            self.git.checkout(&branch, false)?;
            self.git.rebase(integration)?;
        }

        println!(
            "{} Branch {} is up to date with TFS",
            style("✓").green().bold(),
            style(&branch).cyan()
        );
        Ok(())
    }
}
