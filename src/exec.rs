//! External process invocation.
//!
//! Both version-control clients are driven through [`ExternalCommand`],
//! which captures combined output, echoes it for long-running operations,
//! and splits oversized variable-argument lists across several invocations
//! to stay under host command-line length limits.

use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use console::style;

use crate::error::{Result, SyncError};

/// Combined argument length at which a batched call starts a new chunk.
const ARG_LENGTH_LIMIT: usize = 1500;

/// How a configured program is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    /// The program resolves to an executable file and is spawned directly.
    Direct,
    /// The program needs the platform shell (scripts, builtins, `.cmd`
    /// wrappers).
    Shell,
}

impl Launch {
    /// Decide the dispatch mode for `program` once, at configuration time.
    pub fn resolve(program: &str) -> Launch {
        if which::which(program).is_ok() {
            Launch::Direct
        } else {
            Launch::Shell
        }
    }
}

/// Per-invocation options for [`ExternalCommand::run`].
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    /// Stream captured output to the terminal even on success.
    pub echo: bool,
    /// Trailing arguments, batched across invocations when their combined
    /// length would exceed the command-line limit.
    pub variables: Vec<String>,
    /// Environment overrides applied to this invocation only.
    pub env: Vec<(String, String)>,
    /// Directory to run in, overriding the command's pinned one.
    pub working_directory: Option<PathBuf>,
}

impl RunOptions {
    /// Options for operations whose progress should be visible as it
    /// happens, e.g. a long-running remote fetch.
    pub fn echoed() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }
}

/// Aggregated outcome of one logical invocation.
#[derive(Debug, Default)]
pub struct CommandResult {
    /// Exit code, summed across batched sub-invocations.
    pub code: i32,
    /// True when any sub-invocation exited nonzero. Success checks consult
    /// this rather than the sum: codes that happened to cancel out would
    /// otherwise read as success.
    pub failed: bool,
    /// Captured stdout and stderr, concatenated in invocation order.
    pub output: String,
}

/// One external tool, pinned to a dispatch mode and working directory.
pub struct ExternalCommand {
    program: String,
    launch: Launch,
    working_directory: Option<PathBuf>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>, launch: Launch) -> Self {
        Self {
            program: program.into(),
            launch,
            working_directory: None,
        }
    }

    pub fn set_working_directory(&mut self, dir: impl Into<PathBuf>) {
        self.working_directory = Some(dir.into());
    }

    pub fn working_directory(&self) -> Option<&Path> {
        self.working_directory.as_deref()
    }

    /// Run the program with `args`. When `opts.variables` is non-empty the
    /// variables are appended in chunks, one invocation per chunk; exit
    /// codes are summed and outputs concatenated across the chunks.
    pub fn run(&self, args: &[&str], opts: &RunOptions) -> Result<CommandResult> {
        let base: Vec<String> = args.iter().map(|arg| (*arg).to_string()).collect();
        if opts.variables.is_empty() {
            return self.run_once(&base, opts);
        }

        let base_length = self.program.len() + base.iter().map(String::len).sum::<usize>();
        let mut total = CommandResult::default();
        for chunk in chunk_variables(base_length, &opts.variables, ARG_LENGTH_LIMIT) {
            let mut argv = base.clone();
            argv.extend(chunk);
            let result = self.run_once(&argv, opts)?;
            total.code = total.code.saturating_add(result.code);
            total.failed |= result.failed;
            if !total.output.is_empty() && !result.output.is_empty() {
                total.output.push('\n');
            }
            total.output.push_str(&result.output);
        }
        Ok(total)
    }

    /// Like [`run`](Self::run), but any failing sub-invocation becomes a
    /// `Process` error.
    pub fn run_checked(&self, args: &[&str], opts: &RunOptions) -> Result<String> {
        let result = self.run(args, opts)?;
        if result.failed {
            return Err(SyncError::Process {
                command: self.command_line(args),
                code: result.code,
            });
        }
        Ok(result.output)
    }

    fn run_once(&self, argv: &[String], opts: &RunOptions) -> Result<CommandResult> {
        let mut command = self.build_command(argv);
        for (key, value) in &opts.env {
            command.env(key, value);
        }
        if let Some(dir) = opts.working_directory.as_ref().or(self.working_directory.as_ref()) {
            command.current_dir(dir);
        }

        let (code, raw_output) = if opts.echo {
            run_streaming(command)?
        } else {
            let output = command.output()?;
            let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
            text.push_str(&String::from_utf8_lossy(&output.stderr));
            (output.status.code().unwrap_or(-1), text)
        };

        let output = raw_output.trim().to_string();
        if code != 0 {
            eprintln!(
                "{} `{}` exited with code {}",
                style("✗").red().bold(),
                self.command_line(argv),
                style(code).red()
            );
            if !opts.echo && !output.is_empty() {
                eprintln!("{output}");
            }
        }
        Ok(CommandResult {
            code,
            failed: code != 0,
            output,
        })
    }

    fn build_command(&self, argv: &[String]) -> Command {
        match self.launch {
            Launch::Direct => {
                let mut command = Command::new(&self.program);
                command.args(argv);
                command
            }
            Launch::Shell => {
                let (shell, flag) = if cfg!(windows) { ("cmd", "/C") } else { ("sh", "-c") };
                let mut command = Command::new(shell);
                command.arg(flag).arg(self.command_line(argv));
                command
            }
        }
    }

    fn command_line<S: AsRef<str>>(&self, argv: &[S]) -> String {
        let mut line = self.program.clone();
        for arg in argv {
            line.push(' ');
            line.push_str(arg.as_ref());
        }
        line
    }
}

/// Spawn with piped output and tee stdout line by line, so the operator
/// sees progress while the text is still captured for the caller.
fn run_streaming(mut command: Command) -> Result<(i32, String)> {
    command.stdout(Stdio::piped()).stderr(Stdio::piped());
    let mut child = command.spawn()?;

    let mut text = String::new();
    if let Some(stdout) = child.stdout.take() {
        let mut reader = BufReader::new(stdout);
        let mut line = Vec::new();
        while reader.read_until(b'\n', &mut line)? != 0 {
            let chunk = String::from_utf8_lossy(&line);
            print!("{chunk}");
            io::stdout().flush()?;
            text.push_str(&chunk);
            line.clear();
        }
    }

    let output = child.wait_with_output()?;
    let stderr_text = String::from_utf8_lossy(&output.stderr);
    if !stderr_text.is_empty() {
        eprint!("{stderr_text}");
    }
    text.push_str(&stderr_text);
    Ok((output.status.code().unwrap_or(-1), text))
}

/// Split `variables` into ordered chunks whose combined length (on top of
/// the fixed `base_length`) stays near `limit`. A chunk keeps accepting
/// arguments while its running total is below the limit, so only its final
/// element may push it past, and every chunk carries at least one argument.
fn chunk_variables(base_length: usize, variables: &[String], limit: usize) -> Vec<Vec<String>> {
    let mut chunks = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut length = base_length;

    for variable in variables {
        if !current.is_empty() && length >= limit {
            chunks.push(std::mem::take(&mut current));
            length = base_length;
        }
        length += variable.len();
        current.push(variable.clone());
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
