//! Validator subprocess runner.
//!
//! Runs one external validator with a timeout, capturing its exit code and
//! its stdout and stderr interleaved in a single text.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use super::scratch::ScratchFile;
use crate::config::ToolConfig;
use crate::error::{GatewayError, Result};

/// Reported when the validator was terminated by a signal.
pub const SIGNALLED_EXIT_CODE: i32 = -1;

/// Exit code and combined output of one validator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub exit_code: i32,
    pub output: String,
}

/// Run `tool` with its configured leading arguments followed by `args`.
///
/// Both output streams are redirected into one scratch file named
/// `<output_prefix><uuid>` inside `scratch_dir`, which is read back once the
/// process exits and removed afterwards. A run longer than `timeout` kills the
/// process and fails with [`GatewayError::Timeout`].
pub async fn run_tool(
    tool: &ToolConfig,
    args: &[OsString],
    scratch_dir: &Path,
    output_prefix: &str,
    timeout: Duration,
) -> Result<ToolOutput> {
    let (capture, stdout) = ScratchFile::empty(scratch_dir, output_prefix)?;
    let stderr = stdout.try_clone()?;

    let mut command = Command::new(&tool.program);
    command
        .args(&tool.args)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr))
        .kill_on_drop(true);
    log::debug!("running {}: {:?}", tool.name, command);

    let mut child = command.spawn().map_err(|source| GatewayError::Spawn {
        tool: tool.name.clone(),
        source,
    })?;
    // Release our copies of the capture handles.
    drop(command);

    let waited = tokio::time::timeout(timeout, child.wait()).await;
    let status = match waited {
        Ok(status) => status?,
        Err(_) => {
            if let Err(e) = child.kill().await {
                log::warn!("failed to kill {} after timeout: {}", tool.name, e);
            }
            return Err(GatewayError::Timeout {
                tool: tool.name.clone(),
                timeout,
            });
        }
    };

    let raw = tokio::fs::read(capture.path()).await?;
    let exit_code = status.code().unwrap_or(SIGNALLED_EXIT_CODE);
    log::debug!("{} exited with {} ({} bytes of output)", tool.name, exit_code, raw.len());

    Ok(ToolOutput {
        exit_code,
        output: String::from_utf8_lossy(&raw).into_owned(),
    })
}
