use std::fs;
use std::path::Path;

use console::style;

use crate::config::SyncConfig;
use crate::interact::Interaction;
use crate::sync::Syncer;
use crate::vcs::ChangeStatus;

impl<I: Interaction> Syncer<I> {
    /// Gate the push: every solution and project file about to be
    /// registered must carry its centralized binding marker.
    pub(crate) fn validate(&self, status: &ChangeStatus) -> bool {
        validate_bindings(status, &self.config)
    }
}

/// Check centralized-system bindings for every file the status would
/// register. Violations are collected and reported together rather than
/// short-circuited; any single violation fails the whole batch, so nothing
/// gets registered upstream until the entire change-set is sound.
pub fn validate_bindings(status: &ChangeStatus, config: &SyncConfig) -> bool {
    let mut valid = true;
    for path in status.paths_to_register() {
        let marker = if ends_with_ignore_case(&path, &config.solution_extension) {
            &config.solution_marker
        } else if ends_with_ignore_case(&path, &config.project_extension) {
            &config.project_marker
        } else {
            continue;
        };

        let absolute = status.base_path().join(&path);
        if !file_contains(&absolute, marker) {
            eprintln!(
                "{} {} does not have TFS bindings",
                style("ERROR:").red().bold(),
                absolute.display()
            );
            valid = false;
        }
    }
    valid
}

fn ends_with_ignore_case(path: &str, extension: &str) -> bool {
    path.to_lowercase().ends_with(&extension.to_lowercase())
}

/// An unreadable file counts as missing its marker.
fn file_contains(path: &Path, marker: &str) -> bool {
    fs::read_to_string(path)
        .map(|text| text.contains(marker))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SyncConfig;
    use crate::vcs::ChangeStatus;

    fn fixture_status(temp: &assert_fs::TempDir) -> ChangeStatus {
        ChangeStatus::new(temp.path())
    }

    fn write(temp: &assert_fs::TempDir, name: &str, content: &str) {
        std::fs::write(temp.path().join(name), content).unwrap();
    }

    #[test]
    fn bound_solution_and_project_files_pass() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = SyncConfig::default();
        write(
            &temp,
            "App.sln",
            "GlobalSection(TeamFoundationVersionControl) = preSolution\n",
        );
        write(&temp, "App.csproj", "<SccProjectName>SAK</SccProjectName>\n");
        let mut status = fixture_status(&temp);
        status.add('A', "App.sln");
        status.add('M', "App.csproj");

        assert!(validate_bindings(&status, &config));
    }

    #[test]
    fn one_unbound_solution_fails_the_whole_batch() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = SyncConfig::default();
        write(
            &temp,
            "Good.sln",
            "GlobalSection(TeamFoundationVersionControl) = preSolution\n",
        );
        write(&temp, "Bad.sln", "no bindings here\n");
        let mut status = fixture_status(&temp);
        status.add('A', "Good.sln");
        status.add('A', "Bad.sln");

        assert!(!validate_bindings(&status, &config));
    }

    #[test]
    fn project_marker_is_distinct_from_solution_marker() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = SyncConfig::default();
        // The solution marker in a project file does not count.
        write(
            &temp,
            "App.csproj",
            "GlobalSection(TeamFoundationVersionControl) = preSolution\n",
        );
        let mut status = fixture_status(&temp);
        status.add('A', "App.csproj");

        assert!(!validate_bindings(&status, &config));
    }

    #[test]
    fn rename_destinations_are_validated() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = SyncConfig::default();
        write(&temp, "New.sln", "unbound\n");
        let mut status = fixture_status(&temp);
        status.add('R', "Old.sln -> New.sln");

        assert!(!validate_bindings(&status, &config));
    }

    #[test]
    fn extension_matching_ignores_case() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = SyncConfig::default();
        write(&temp, "App.SLN", "unbound\n");
        let mut status = fixture_status(&temp);
        status.add('A', "App.SLN");

        assert!(!validate_bindings(&status, &config));
    }

    #[test]
    fn unreadable_solution_counts_as_unbound() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = SyncConfig::default();
        let mut status = fixture_status(&temp);
        status.add('A', "Missing.sln");

        assert!(!validate_bindings(&status, &config));
    }

    #[test]
    fn files_of_other_kinds_are_not_inspected() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = SyncConfig::default();
        // Never written to disk; it would fail if it were inspected.
        let mut status = fixture_status(&temp);
        status.add('A', "readme.txt");
        status.add('M', "src/main.cs");

        assert!(validate_bindings(&status, &config));
    }
}
