//! Subprocess adapter for the centralized `tf` client.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::error::Result;
use crate::exec::{ExternalCommand, Launch, RunOptions};

/// Exit code the `tf get` client uses for "all files are up to date".
const UP_TO_DATE_CODE: i32 = 100;

/// Environment override that keeps `tf checkin` from blocking on its own
/// output redirection; applied to that single invocation only.
const IGNORE_REDIRECT_VAR: &str = "TFS_IGNORESTDOUTREDIRECT";

/// The centralized side of the bridge. Pending operations accumulate in the
/// client's own workspace state until [`checkin`](Self::checkin) registers
/// them as one change-set.
///
/// Apart from `get`, the client's exit codes are not treated as fatal here:
/// several subcommands report nonzero for benign conditions (an undo with
/// nothing pending, for one), and the final check-in code is what the push
/// protocol classifies.
pub struct Tfs {
    command: ExternalCommand,
}

impl Tfs {
    pub fn new(program: &str, workspace_root: impl Into<PathBuf>) -> Self {
        let mut command = ExternalCommand::new(program, Launch::resolve(program));
        command.set_working_directory(workspace_root);
        Self { command }
    }

    /// Fetch the latest upstream state into the workspace, overwriting
    /// local files. Returns false when the workspace was already current,
    /// which is not a failure.
    pub fn get_latest(&self) -> Result<bool> {
        let result = self.command.run(
            &["get", ".", "/recursive", "/overwrite", "/noprompt"],
            &RunOptions::echoed(),
        )?;
        let up_to_date = result.code == UP_TO_DATE_CODE
            || result.output.to_lowercase().contains("up to date");
        Ok(!up_to_date)
    }

    /// Check files out for editing.
    pub fn checkout<I, S>(&self, paths: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_batched(&["checkout"], paths)
    }

    /// Register new files.
    pub fn add<I, S>(&self, paths: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_batched(&["add", "/noprompt"], paths)
    }

    pub fn delete<I, S>(&self, paths: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_batched(&["delete"], paths)
    }

    /// Revert pending workspace changes the client is tracking.
    pub fn undo<I, S>(&self, paths: I, recursive: bool) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = vec!["undo", "/noprompt"];
        if recursive {
            args.push("/recursive");
        }
        self.run_batched(&args, paths)
    }

    /// Rename tracked files. Sources are checked out first so the client
    /// accepts the rename, then each pair is renamed individually.
    pub fn rename(&self, pairs: &BTreeSet<(String, String)>) -> Result<()> {
        self.checkout(pairs.iter().map(|(source, _)| source))?;
        for (source, destination) in pairs {
            self.command
                .run(&["rename", source, destination], &RunOptions::echoed())?;
        }
        Ok(())
    }

    /// The client has no native copy; destinations are registered as
    /// additions.
    pub fn copy(&self, pairs: &BTreeSet<(String, String)>) -> Result<()> {
        self.add(pairs.iter().map(|(_, destination)| destination))
    }

    /// Register all pending operations as one change-set. Returns the raw
    /// exit code for the caller to classify.
    pub fn checkin(&self) -> Result<i32> {
        let opts = RunOptions {
            env: vec![(IGNORE_REDIRECT_VAR.to_string(), "1".to_string())],
            ..RunOptions::default()
        };
        let result = self.command.run(&["checkin"], &opts)?;
        Ok(result.code)
    }

    fn run_batched<I, S>(&self, args: &[&str], paths: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let opts = RunOptions {
            echo: true,
            variables: paths
                .into_iter()
                .map(|path| path.as_ref().to_string())
                .collect(),
            ..RunOptions::default()
        };
        self.command.run(args, &opts)?;
        Ok(())
    }
}
