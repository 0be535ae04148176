//! Thin wrapper for running an external CLI binary.
//!
//! The surrounding system shells out to a platform CLI to run test
//! scenarios. This module spawns the process, captures stdout/stderr, and
//! enforces an optional timeout; a non-zero exit status is reported, not
//! treated as an error.

use anyhow::{bail, Context, Result};
use log::debug;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Options for a single command invocation.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Working directory for the child process
    pub cwd: Option<PathBuf>,
    /// Extra environment variables
    pub envs: Vec<(String, String)>,
    /// Kill the child and fail if it runs longer than this
    pub timeout: Option<Duration>,
}

/// Captured result of a finished command.
#[derive(Debug)]
pub struct CommandOutput {
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
}

/// Runs `program` with `args`, capturing output until it exits.
///
/// # Errors
///
/// Returns an error if the program cannot be spawned or the timeout elapses;
/// the child is killed on timeout.
pub fn run_command(program: &str, args: &[String], options: &RunOptions) -> Result<CommandOutput> {
    debug!("Running command: {} {:?}", program, args);

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(cwd) = &options.cwd {
        command.current_dir(cwd);
    }
    for (key, value) in &options.envs {
        command.env(key, value);
    }

    let mut child = command
        .spawn()
        .with_context(|| format!("Failed to spawn command: {}", program))?;

    // Drain both pipes off-thread so a chatty child cannot deadlock on a
    // full pipe buffer while we wait for it.
    let stdout_pipe = child.stdout.take().context("child stdout was not piped")?;
    let stderr_pipe = child.stderr.take().context("child stderr was not piped")?;
    let stdout_reader = std::thread::spawn(move || read_lossy(stdout_pipe));
    let stderr_reader = std::thread::spawn(move || read_lossy(stderr_pipe));

    let status = match options.timeout {
        None => child.wait().context("Failed to wait for command")?,
        Some(timeout) => {
            let deadline = Instant::now() + timeout;
            loop {
                if let Some(status) = child.try_wait().context("Failed to poll command")? {
                    break status;
                }
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    bail!("命令超时 ({}ms): {}", timeout.as_millis(), program);
                }
                std::thread::sleep(Duration::from_millis(20));
            }
        }
    };

    let stdout = stdout_reader.join().unwrap_or_default();
    let stderr = stderr_reader.join().unwrap_or_default();

    debug!("Command exited with status {:?}", status.code());

    Ok(CommandOutput {
        stdout,
        stderr,
        code: status.code(),
    })
}

fn read_lossy(mut pipe: impl Read) -> String {
    let mut buffer = Vec::new();
    let _ = pipe.read_to_end(&mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}
