use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::SyncConfig;
use crate::error::Result;
use crate::interact::Interaction;
use crate::sync::Syncer;
use crate::vcs::{Git, Tfs};

/// Interaction stub with scripted answers for protocol tests.
pub struct ScriptedInteraction {
    confirm_answer: Option<bool>,
    pub on_resolution: Option<Box<dyn Fn()>>,
}

impl ScriptedInteraction {
    /// Answer every confirmation with yes.
    pub fn allow() -> Self {
        Self {
            confirm_answer: Some(true),
            on_resolution: None,
        }
    }

    /// Answer every confirmation with no.
    pub fn deny() -> Self {
        Self {
            confirm_answer: Some(false),
            on_resolution: None,
        }
    }

    /// For tests where no interaction may happen at all.
    pub fn unreachable() -> Self {
        Self {
            confirm_answer: None,
            on_resolution: None,
        }
    }
}

impl Interaction for ScriptedInteraction {
    fn request_manual_resolution(&self) -> Result<()> {
        if self.confirm_answer.is_none() && self.on_resolution.is_none() {
            panic!("request_manual_resolution was not expected in this test");
        }
        if let Some(hook) = &self.on_resolution {
            hook();
        }
        Ok(())
    }

    fn confirm(&self, _prompt: &str) -> Result<bool> {
        match self.confirm_answer {
            Some(answer) => Ok(answer),
            None => panic!("confirm was not expected in this test"),
        }
    }
}

/// Temporary workspace: a real git repository plus a scripted `tf`
/// stand-in. The stand-in and its call log live outside the repository so
/// clean/status never see them.
pub struct SyncFixture {
    _temp: assert_fs::TempDir,
    repo: PathBuf,
    tf_program: PathBuf,
    tf_log: PathBuf,
}

impl SyncFixture {
    pub fn new() -> Self {
        let temp = assert_fs::TempDir::new().unwrap();
        let base = temp.path().canonicalize().unwrap();
        let repo = base.join("workspace");
        fs::create_dir(&repo).unwrap();
        let fixture = Self {
            tf_program: base.join("tf"),
            tf_log: base.join("tf.log"),
            repo,
            _temp: temp,
        };
        fixture.git(&["init", "--initial-branch=master"]);
        fixture.git(&["config", "user.name", "Test User"]);
        fixture.git(&["config", "user.email", "test@example.com"]);
        fixture.set_tf_script("");
        fixture
    }

    pub fn root(&self) -> &Path {
        &self.repo
    }

    /// Rewrite the `tf` stand-in. Every invocation logs its arguments
    /// first; `tail` can then branch on the subcommand, and anything that
    /// falls through exits 0.
    pub fn set_tf_script(&self, tail: &str) {
        let script = format!(
            "#!/bin/sh\necho \"$@\" >> '{log}'\n{tail}\nexit 0\n",
            log = self.tf_log.display()
        );
        fs::write(&self.tf_program, script).unwrap();
        let mut permissions = fs::metadata(&self.tf_program).unwrap().permissions();
        permissions.set_mode(0o755);
        fs::set_permissions(&self.tf_program, permissions).unwrap();
    }

    /// Every `tf` invocation so far, one argv line per call.
    pub fn tf_calls(&self) -> Vec<String> {
        match fs::read_to_string(&self.tf_log) {
            Ok(text) => text.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn syncer(&self, interaction: ScriptedInteraction) -> Syncer<ScriptedInteraction> {
        let config = self.config();
        Syncer::new(
            Git::at(&config.git_program, &self.repo),
            self.tfs(),
            config,
            interaction,
        )
    }

    pub fn tfs(&self) -> Tfs {
        Tfs::new(self.tf_program.to_str().unwrap(), &self.repo)
    }

    fn config(&self) -> SyncConfig {
        SyncConfig {
            tf_program: self.tf_program.to_str().unwrap().to_string(),
            commit_tool: Vec::new(),
            ..SyncConfig::default()
        }
    }

    pub fn git(&self, args: &[&str]) {
        run_git(&self.repo, args);
    }

    pub fn write_file(&self, name: &str, content: &str) -> &Self {
        let path = self.repo.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    pub fn commit_all(&self, message: &str) -> &Self {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-m", message]);
        self
    }

    pub fn create_branch(&self, name: &str) -> &Self {
        self.git(&["checkout", "-b", name]);
        self
    }

    pub fn checkout(&self, name: &str) {
        self.git(&["checkout", name]);
    }

    pub fn current_branch(&self) -> String {
        git_output(&self.repo, &["symbolic-ref", "--short", "HEAD"])
    }

    pub fn commit_count(&self) -> usize {
        git_output(&self.repo, &["rev-list", "--count", "HEAD"])
            .parse()
            .unwrap()
    }

    pub fn head_message(&self) -> String {
        git_output(&self.repo, &["log", "-1", "--format=%s"])
    }

    pub fn rev_parse(&self, reference: &str) -> String {
        git_output(&self.repo, &["rev-parse", reference])
    }
}

/// Run git in `root`, panicking on failure; for fixture setup and
/// resolution hooks.
pub fn run_git(root: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn git_output(root: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .unwrap();
    assert!(output.status.success(), "git {args:?} failed");
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
