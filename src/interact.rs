use std::path::{Path, PathBuf};

use console::style;
use inquire::Confirm;

use crate::config::SyncConfig;
use crate::error::Result;
use crate::exec::{ExternalCommand, Launch, RunOptions};

/// Interactive capabilities the orchestrator needs from its operator.
///
/// The protocols depend only on this trait, never on a concrete UI, so
/// tests can script the answers.
pub trait Interaction {
    /// Hand control to the operator so they can commit or stash whatever
    /// the guard found, typically through an external commit tool.
    fn request_manual_resolution(&self) -> Result<()>;

    /// Ask a yes/no question; `false` aborts the calling operation.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Terminal implementation: inquire prompts plus the configured commit
/// tool, launched in the workspace.
pub struct ConsoleInteraction {
    commit_tool: Vec<String>,
    workspace_root: PathBuf,
}

impl ConsoleInteraction {
    pub fn new(config: &SyncConfig, workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            commit_tool: config.commit_tool.clone(),
            workspace_root: workspace_root.into(),
        }
    }
}

impl Interaction for ConsoleInteraction {
    fn request_manual_resolution(&self) -> Result<()> {
        let Some((program, args)) = self.commit_tool.split_first() else {
            return Ok(());
        };
        let mut command = ExternalCommand::new(program.as_str(), Launch::resolve(program));
        command.set_working_directory(Path::new(&self.workspace_root));
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        // The tool is interactive; a nonzero exit only means the operator
        // closed it without committing, which the caller re-checks anyway.
        command.run(&args, &RunOptions::echoed())?;
        Ok(())
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        match Confirm::new(prompt).with_default(false).prompt() {
            Ok(answer) => Ok(answer),
            Err(err) => {
                eprintln!(
                    "{} Prompt cancelled: {}",
                    style("⚠").yellow().bold(),
                    style(err).yellow()
                );
                Ok(false)
            }
        }
    }
}
