//! Subprocess adapter for the `git` client.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::exec::{ExternalCommand, Launch, RunOptions};
use crate::vcs::status::ChangeStatus;

/// The distributed side of the bridge: exactly the primitives the pull and
/// push protocols consume, each one `git` invocation.
pub struct Git {
    command: ExternalCommand,
}

impl Git {
    pub fn new(program: &str) -> Self {
        Self {
            command: ExternalCommand::new(program, Launch::resolve(program)),
        }
    }

    /// Adapter pinned to a known workspace root.
    pub fn at(program: &str, root: impl Into<PathBuf>) -> Self {
        let mut git = Self::new(program);
        git.command.set_working_directory(root);
        git
    }

    /// Locate the repository toplevel and pin all further invocations to
    /// it.
    pub fn find_root(&mut self) -> Result<PathBuf> {
        let output = self
            .command
            .run_checked(&["rev-parse", "--show-toplevel"], &RunOptions::default())?;
        let root = PathBuf::from(output.trim());
        self.command.set_working_directory(&root);
        Ok(root)
    }

    pub fn workspace_root(&self) -> Option<&Path> {
        self.command.working_directory()
    }

    /// Name of the branch HEAD points at.
    pub fn branch_name(&self) -> Result<String> {
        let output = self
            .command
            .run_checked(&["symbolic-ref", "HEAD"], &RunOptions::default())?;
        let reference = output.trim();
        let name = reference.rsplit('/').next().unwrap_or(reference);
        Ok(name.to_string())
    }

    /// Working-tree status as a [`ChangeStatus`] snapshot.
    pub fn status(&self) -> Result<ChangeStatus> {
        let output = self
            .command
            .run_checked(&["status", "--porcelain"], &RunOptions::default())?;
        let base = self
            .command
            .working_directory()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(ChangeStatus::parse(base, &output))
    }

    pub fn reset(&self, hard: bool) -> Result<()> {
        let mut args = vec!["reset"];
        if hard {
            args.push("--hard");
        }
        self.command.run_checked(&args, &RunOptions::default())?;
        Ok(())
    }

    pub fn clean(&self) -> Result<()> {
        self.command
            .run_checked(&["clean", "-df"], &RunOptions::default())?;
        Ok(())
    }

    /// Drop staged and unstaged edits, then remove untracked files.
    pub fn reset_and_clean(&self) -> Result<()> {
        self.reset(true)?;
        self.clean()
    }

    pub fn checkout(&self, branch: &str, force: bool) -> Result<()> {
        let mut args = vec!["checkout", branch];
        if force {
            args.push("-f");
        }
        self.command.run_checked(&args, &RunOptions::echoed())?;
        Ok(())
    }

    pub fn rebase(&self, branch: &str) -> Result<()> {
        self.command
            .run_checked(&["rebase", branch], &RunOptions::echoed())?;
        Ok(())
    }

    pub fn add_all(&self) -> Result<()> {
        self.command
            .run_checked(&["add", "-A"], &RunOptions::echoed())?;
        Ok(())
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        self.command
            .run_checked(&["commit", "-m", message], &RunOptions::echoed())?;
        Ok(())
    }

    /// Merge `branch` into the current branch; a squash merge applies the
    /// branch's cumulative diff without recording merge history.
    pub fn merge(&self, branch: &str, squash: bool) -> Result<()> {
        let mut args = vec!["merge"];
        if squash {
            args.push("--squash");
        }
        args.push(branch);
        self.command.run_checked(&args, &RunOptions::default())?;
        Ok(())
    }
}
