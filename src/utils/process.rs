use std::ffi::OsStr;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::debug;
use crate::error::{Error, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Captured output of a finished tool
#[derive(Debug, Default)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Locate an external tool on PATH
pub fn resolve_tool(tool: &str) -> Result<PathBuf> {
    which::which(tool).map_err(|_| Error::MissingTool(tool.to_string()))
}

/// Run `tool` to completion, killing it once `limit` has elapsed.
///
/// A non-zero exit status is reported as [`Error::Tool`] with the tool's stderr.
pub fn run_tool<I, S>(tool: &str, args: I, working_dir: Option<&Path>, limit: Duration) -> Result<ToolOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(tool);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = working_dir {
        command.current_dir(dir);
    }
    debug!("Running {:?}", command);

    let mut child = command.spawn().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::MissingTool(tool.to_string()),
        _ => Error::Io(e),
    })?;

    // Drain pipes on their own threads so a chatty tool cannot stall on a full buffer
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let deadline = Instant::now() + limit;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(Error::Timeout {
                tool: tool.to_string(),
                limit,
            });
        }
        thread::sleep(POLL_INTERVAL);
    };

    let output = ToolOutput {
        stdout: collect(stdout),
        stderr: collect(stderr),
    };

    if !status.success() {
        let detail = output.stderr.trim();
        return Err(Error::Tool {
            tool: tool.to_string(),
            message: if detail.is_empty() {
                format!("exited with {}", status)
            } else {
                format!("exited with {}: {}", status, detail)
            },
        });
    }
    Ok(output)
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        buf
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}
