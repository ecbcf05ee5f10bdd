use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::error::Result;

/// Name of the optional per-workspace configuration file.
const CONFIG_FILE: &str = ".tfgit.json";

/// Workspace-level settings.
///
/// Every field defaults to a stock Visual Studio / TFS setup; a
/// `.tfgit.json` at the repository toplevel overrides individual fields.
/// The binding markers live here rather than in the validation gate: which
/// exact strings identify a file as bound to the centralized system is
/// site configuration, not protocol logic.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncConfig {
    /// Program driving the distributed system.
    pub git_program: String,
    /// Program driving the centralized system.
    pub tf_program: String,
    /// Command line that opens the interactive commit tool.
    pub commit_tool: Vec<String>,
    /// Branch kept mirrored with the centralized system.
    pub integration_branch: String,
    pub solution_extension: String,
    pub solution_marker: String,
    pub project_extension: String,
    pub project_marker: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            git_program: "git".to_string(),
            tf_program: "tf".to_string(),
            commit_tool: vec!["git".to_string(), "gui".to_string(), "citool".to_string()],
            integration_branch: "master".to_string(),
            solution_extension: ".sln".to_string(),
            solution_marker: "GlobalSection(TeamFoundationVersionControl) = preSolution"
                .to_string(),
            project_extension: ".csproj".to_string(),
            project_marker: "<SccProjectName>SAK</SccProjectName>".to_string(),
        }
    }
}

impl SyncConfig {
    /// Load the workspace configuration, falling back to defaults when no
    /// config file exists.
    pub fn load(workspace_root: &Path) -> Result<Self> {
        let path = workspace_root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }
}
