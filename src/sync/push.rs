use console::style;

use crate::error::{Result, SyncError};
use crate::interact::Interaction;
use crate::sync::{Syncer, ABORT_MESSAGE};

impl<I: Interaction> Syncer<I> {
    /// Replay the current working branch into the centralized system as a
    /// single registered change-set.
    ///
    /// Neither system offers a transaction spanning both, so the step
    /// order carries the rollback guarantee: nothing is registered
    /// upstream before validation passes, additive registrations run while
    /// the squash-merged content is present, and destructive ones run
    /// against the restored original tree.
    pub fn push(&self) -> Result<()> {
        let branch = self.git.branch_name()?;
        let integration = self.config.integration_branch.clone();
        if branch == integration {
            return Err(SyncError::Aborted(format!(
                "Current Git branch is {integration}, nothing to push"
            )));
        }

        if !self.ensure_clean(&branch)? {
            return Err(SyncError::Aborted(ABORT_MESSAGE.to_string()));
        }

        // Discard anything untracked before rebasing.
        self.git.reset_and_clean()?;

        // The branch must be based on the current integration branch; the
        // rebase can leave the tree dirty again, so guard once more.
        self.git.rebase(&integration)?;
        if !self.ensure_clean(&branch)? {
            return Err(SyncError::Aborted(ABORT_MESSAGE.to_string()));
        }

        self.git.checkout(&integration, true)?;

        // Revert centralized-workspace state not tracked by git; the tree
        // afterwards matches what the centralized system last saw.
        self.tfs.undo(["."], true)?;
        self.git.reset_and_clean()?;

        // Squash-merge so the status below reads the branch's net diff.
        self.git.merge(&branch, true)?;

        let status = self.git.status()?;
        if status.is_empty() {
            println!("No changes detected, switching back to working branch");
            self.git.checkout(&branch, false)?;
            self.git.reset_and_clean()?;
            return Ok(());
        }

        println!("Validating changes");
        if !self.validate(&status) {
            eprintln!(
                "{} Validation failed, neither {} nor TFS have been modified. \
                 Fix the errors and try again.",
                style("✗").red().bold(),
                integration
            );
            self.git.checkout(&branch, true)?;
            self.git.reset_and_clean()?;
            return Err(SyncError::Validation);
        }

        println!("Registering changes in TFS");

        // Additive registrations first, while the squash-merged content is
        // still in the working tree.
        if !status.added().is_empty() {
            self.tfs.add(status.added())?;
        }
        if !status.copied().is_empty() {
            self.tfs.copy(status.copied())?;
        }
        if !status.modified().is_empty() {
            self.tfs.checkout(status.modified())?;
        }

        // Bring the original filenames back so the centralized client can
        // rename and delete against the names it tracks.
        self.git.reset_and_clean()?;

        if !status.renamed().is_empty() {
            self.tfs.rename(status.renamed())?;
        }
        if !status.deleted().is_empty() {
            self.tfs.delete(status.deleted())?;
        }

        // Drop whatever the centralized client left in the working tree.
        self.git.reset_and_clean()?;

        println!(
            "Merging changes from {} into {}",
            style(&branch).cyan(),
            style(&integration).cyan()
        );
        self.git.merge(&branch, false)?;

        println!("Checking into TFS");
        match self.tfs.checkin()? {
            0 => {
                println!("{} Changes pushed successfully.", style("✓").green().bold());
                self.git.checkout(&branch, false)?;
                Ok(())
            }
            1 => {
                println!("No TFS-related changes");
                self.git.checkout(&branch, false)?;
                Ok(())
            }
            code => Err(SyncError::AmbiguousCheckin {
                code,
                branch: integration,
            }),
        }
    }
}
