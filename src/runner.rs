//! # External Command Execution
//!
//! All interaction with the VCS tools (`git`, `hg`, `svn`) goes through this
//! module. Commands are spawned directly from an argument vector with a
//! scoped working directory; no shell is involved, so repository names and
//! URLs are never subject to shell interpolation.
//!
//! Both output streams are captured in full. A non-zero exit status is
//! reported as [`Error::ExternalCommand`] carrying the full captured stderr,
//! which is the primary diagnostic when an underlying tool fails.
//!
//! A [`Runner`] may carry an optional per-invocation timeout. When the
//! deadline passes the child process is killed and the invocation fails with
//! [`Error::Timeout`], which is deliberately distinct from
//! `ExternalCommand`: the tool did not report failure, vcsync gave up on it.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Interval between liveness checks while waiting on a deadline.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured result of one external command invocation.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Everything the process wrote to stdout.
    pub stdout: String,
    /// Everything the process wrote to stderr.
    pub stderr: String,
    /// Exit code, or `None` if the process died from a signal.
    pub exit_code: Option<i32>,
}

impl RunOutput {
    /// Whether the command exited with status zero.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Executes external commands with an optional per-invocation timeout.
///
/// Cheap to copy; every repository operation carries one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Runner {
    timeout: Option<Duration>,
}

impl Runner {
    /// A runner with no timeout: commands may take as long as they need.
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner that kills any invocation exceeding `timeout`.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Run a command and require a zero exit status.
    ///
    /// Fails with [`Error::ExternalCommand`] on non-zero exit, carrying the
    /// captured stderr.
    pub fn run(&self, argv: &[&str], cwd: &Path) -> Result<RunOutput> {
        let output = self.try_run(argv, cwd)?;
        if output.success() {
            Ok(output)
        } else {
            Err(Error::ExternalCommand {
                command: argv.join(" "),
                cwd: cwd.to_path_buf(),
                exit_code: output.exit_code,
                stderr: output.stderr,
            })
        }
    }

    /// Run a command and return its captured output regardless of exit
    /// status.
    ///
    /// Backends use this when a non-zero exit is an answer rather than a
    /// failure (e.g. probing whether a named remote exists).
    pub fn try_run(&self, argv: &[&str], cwd: &Path) -> Result<RunOutput> {
        // An empty argv is a caller bug, not a configuration problem; report
        // it in the command family so it never masquerades as a config error.
        let (program, args) = argv.split_first().ok_or_else(|| Error::ExternalCommand {
            command: String::new(),
            cwd: cwd.to_path_buf(),
            exit_code: None,
            stderr: "empty command line".to_string(),
        })?;

        let child = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::ExternalCommand {
                command: argv.join(" "),
                cwd: cwd.to_path_buf(),
                exit_code: None,
                stderr: format!("failed to spawn '{}': {}", program, e),
            })?;

        match self.timeout {
            None => wait_unbounded(child),
            Some(timeout) => wait_with_deadline(child, timeout, argv, cwd),
        }
    }
}

fn wait_unbounded(child: Child) -> Result<RunOutput> {
    let output = child.wait_with_output()?;
    Ok(RunOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code(),
    })
}

/// Wait for `child` to exit, killing it once `timeout` elapses.
///
/// Output pipes are drained on dedicated threads while waiting so a chatty
/// child can never deadlock against a full pipe buffer.
fn wait_with_deadline(
    mut child: Child,
    timeout: Duration,
    argv: &[&str],
    cwd: &Path,
) -> Result<RunOutput> {
    let stdout_reader = spawn_pipe_reader(child.stdout.take());
    let stderr_reader = spawn_pipe_reader(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status: Option<ExitStatus> = loop {
        if let Some(status) = child.try_wait()? {
            break Some(status);
        }
        if Instant::now() >= deadline {
            break None;
        }
        thread::sleep(WAIT_POLL_INTERVAL);
    };

    let status = match status {
        Some(status) => status,
        None => {
            // Deadline passed. Kill the child and reap it; the readers
            // terminate once the pipes close.
            let _ = child.kill();
            let _ = child.wait();
            let _ = join_pipe_reader(stdout_reader);
            let _ = join_pipe_reader(stderr_reader);
            return Err(Error::Timeout {
                command: argv.join(" "),
                secs: timeout.as_secs(),
            });
        }
    };

    Ok(RunOutput {
        stdout: join_pipe_reader(stdout_reader),
        stderr: join_pipe_reader(stderr_reader),
        exit_code: status.code(),
    })
}

fn spawn_pipe_reader<R: Read + Send + 'static>(
    pipe: Option<R>,
) -> Option<thread::JoinHandle<String>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).into_owned()
        })
    })
}

fn join_pipe_reader(handle: Option<thread::JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
