//! Subprocess execution shared by the backend adapters.
//!
//! Backends are external executables on `PATH`; stdout, stderr and the exit
//! status are the only channel. A non-zero exit is always a failure.

use crate::error::{PpmError, Result};
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Upper bound for `--version` probes so a wedged tool reads as unavailable.
const PROBE_TIMEOUT: Duration = Duration::from_secs(15);

/// One backend executable plus the execution policy for its calls.
#[derive(Debug, Clone)]
pub struct BackendCommand {
    binary: &'static str,
    timeout: Option<Duration>,
}

impl BackendCommand {
    pub fn new(binary: &'static str, timeout: Option<Duration>) -> Self {
        Self { binary, timeout }
    }

    fn resolve(&self) -> Result<PathBuf> {
        which::which(self.binary).map_err(|e| PpmError::SystemCommandFailed {
            command: self.binary.to_string(),
            reason: e.to_string(),
        })
    }

    /// `true` only when the binary resolves and `<binary> --version` exits 0.
    pub fn probe(&self) -> bool {
        let Ok(path) = self.resolve() else {
            return false;
        };
        let mut cmd = Command::new(path);
        cmd.arg("--version");
        match run_command(&mut cmd, Some(PROBE_TIMEOUT)) {
            Ok(output) => output.status.success(),
            Err(_) => false,
        }
    }

    /// Run the binary with `args`, capturing both output streams.
    pub fn run(&self, args: &[&str]) -> Result<Output> {
        let path = self.resolve()?;
        let mut cmd = Command::new(path);
        cmd.args(args);
        crate::ui::verbose(&format!("Running: {} {}", self.binary, args.join(" ")));
        run_command(&mut cmd, self.timeout)
    }

    /// Run and require a zero exit status. `failure` receives the combined
    /// stdout and stderr text of the failed call.
    pub fn run_checked<F>(&self, args: &[&str], failure: F) -> Result<Output>
    where
        F: FnOnce(String) -> PpmError,
    {
        match self.run(args) {
            Ok(output) if output.status.success() => Ok(output),
            Ok(output) => Err(failure(combined_output(&output))),
            Err(e) => Err(failure(e.to_string())),
        }
    }
}

pub fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// stdout followed by stderr, trimmed. This is the diagnostic surfaced to the
/// operator when a backend reports failure.
pub fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout)
        .trim_end()
        .to_string();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        if !text.trim().is_empty() {
            text.push('\n');
        }
        text.push_str(stderr.trim_start());
    }
    let text = text.trim().to_string();
    if text.is_empty() {
        match output.status.code() {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        }
    } else {
        text
    }
}

fn run_command(cmd: &mut Command, timeout: Option<Duration>) -> Result<Output> {
    let cmd_debug = format!("{:?}", cmd);

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let Some(timeout) = timeout else {
        return cmd.output().map_err(|e| PpmError::SystemCommandFailed {
            command: cmd_debug,
            reason: e.to_string(),
        });
    };

    let mut child = cmd
        .spawn()
        .map_err(|e| PpmError::SystemCommandFailed {
            command: cmd_debug.clone(),
            reason: e.to_string(),
        })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| PpmError::SystemCommandFailed {
            command: cmd_debug.clone(),
            reason: "Failed to capture stdout".to_string(),
        })?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| PpmError::SystemCommandFailed {
            command: cmd_debug.clone(),
            reason: "Failed to capture stderr".to_string(),
        })?;

    let stdout_thread = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = std::io::BufReader::new(stdout).read_to_end(&mut buf);
        buf
    });
    let stderr_thread = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = std::io::BufReader::new(stderr).read_to_end(&mut buf);
        buf
    });

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    // Grandchildren (shims, wrapper scripts) may still hold
                    // the pipes; the readers are left to finish on their own.
                    drop(stdout_thread);
                    drop(stderr_thread);
                    return Err(PpmError::SystemCommandFailed {
                        command: cmd_debug,
                        reason: format!("Command timed out after {:?}", timeout),
                    });
                }
                thread::sleep(Duration::from_millis(50));
            }
            Err(e) => {
                return Err(PpmError::SystemCommandFailed {
                    command: cmd_debug,
                    reason: e.to_string(),
                });
            }
        }
    };

    let stdout = stdout_thread.join().unwrap_or_default();
    let stderr = stderr_thread.join().unwrap_or_default();

    Ok(Output {
        status,
        stdout,
        stderr,
    })
}
