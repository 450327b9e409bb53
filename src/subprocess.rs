//! External command execution with a timeout.
//!
//! A hung mixer query would otherwise stall the whole loop, so the child is
//! polled until [`COMMAND_TIMEOUT`](crate::config::COMMAND_TIMEOUT) and then
//! killed together with everything it started.

use crate::error::{Result, StatusError};
use std::io::Read;
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Result of a subprocess execution with timeout.
#[derive(Debug)]
pub enum SubprocessResult {
    /// Command exited successfully; holds its standard output.
    Success(Vec<u8>),
    /// Command did not finish in time and was killed.
    Timeout,
    /// Command failed to spawn.
    SpawnError,
    /// Command exited with a non-zero status.
    Failed(ExitStatus),
}

/// Kills the child's process group and reaps the child.
#[allow(unsafe_code)]
fn kill_group(child: &mut Child) {
    if let Ok(pgid) = libc::pid_t::try_from(child.id()) {
        // SAFETY: kill(2) takes no pointers; the group was created for this child.
        unsafe {
            libc::kill(-pgid, libc::SIGKILL);
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}

/// Runs a command with a timeout.
///
/// The command runs in its own process group. On timeout the whole group is
/// killed, so shell pipelines leave nothing behind.
pub fn run_with_timeout(cmd: &str, args: &[String], timeout: Duration) -> SubprocessResult {
    let deadline = Instant::now() + timeout;

    let mut child = match Command::new(cmd)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .process_group(0)
        .spawn()
    {
        Ok(child) => child,
        Err(_) => return SubprocessResult::SpawnError,
    };

    // Drained on a helper thread so a chatty child never blocks on a full pipe.
    let stdout = child.stdout.take();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut out) = stdout {
            let _ = out.read_to_end(&mut buf);
        }
        let _ = tx.send(buf);
    });

    loop {
        match child.try_wait() {
            Ok(Some(status)) if !status.success() => {
                kill_group(&mut child);
                return SubprocessResult::Failed(status);
            }
            Ok(Some(_)) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                return match rx.recv_timeout(remaining.max(POLL_INTERVAL)) {
                    Ok(stdout) => SubprocessResult::Success(stdout),
                    // A background job of the command still holds the pipe open.
                    Err(_) => {
                        kill_group(&mut child);
                        SubprocessResult::Timeout
                    }
                };
            }
            Ok(None) if Instant::now() >= deadline => {
                kill_group(&mut child);
                return SubprocessResult::Timeout;
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(_) => {
                kill_group(&mut child);
                return SubprocessResult::SpawnError;
            }
        }
    }
}

/// Runs `command` (program followed by its arguments) and returns the first
/// line of its standard output without the trailing newline.
pub fn first_line(command: &[String], timeout: Duration) -> Result<String> {
    let Some((program, args)) = command.split_first() else {
        return Err(StatusError::CommandFailed {
            command: String::new(),
            reason: "empty command".to_string(),
        });
    };
    let failed = |reason: String| StatusError::CommandFailed { command: program.clone(), reason };

    let stdout = match run_with_timeout(program, args, timeout) {
        SubprocessResult::Success(stdout) => stdout,
        SubprocessResult::Failed(status) => return Err(failed(format!("exited with {status}"))),
        SubprocessResult::Timeout => return Err(failed("timed out".to_string())),
        SubprocessResult::SpawnError => return Err(failed("could not spawn".to_string())),
    };

    String::from_utf8_lossy(&stdout)
        .lines()
        .next()
        .map(|line| line.trim_end_matches('\r').to_string())
        .ok_or_else(|| failed("no output".to_string()))
}
