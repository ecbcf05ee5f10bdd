use console::style;

use crate::error::Result;
use crate::interact::Interaction;
use crate::sync::Syncer;

impl<I: Interaction> Syncer<I> {
    /// Ensure the working tree is clean before a protocol mutates it.
    ///
    /// A dirty tree first goes to the operator's commit tool; whatever is
    /// still dirty afterwards may be discarded, but only with explicit
    /// consent. Returns false when the operator declines, which aborts the
    /// whole calling operation.
    pub(crate) fn ensure_clean(&self, branch: &str) -> Result<bool> {
        if self.git.status()?.is_empty() {
            return Ok(true);
        }

        println!(
            "{} There are uncommitted changes in branch {}.",
            style("⚠").yellow().bold(),
            style(branch).cyan()
        );
        self.interaction.request_manual_resolution()?;

        if self.git.status()?.is_empty() {
            return Ok(true);
        }

        self.interaction.confirm(&format!(
            "There are uncommitted changes in branch {branch}. \
             Do you want to lose these changes and proceed with the operation?"
        ))
    }
}
