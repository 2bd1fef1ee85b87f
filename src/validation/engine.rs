//! Validation Engine
//!
//! The two validator operations. Each one writes the request to a scratch
//! file, runs its validator on that file and maps the outcome to a response.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::runner::{run_tool, ToolOutput};
use super::scratch::ScratchFile;
use crate::config::{Config, ToolConfig};
use crate::core::{ValidationRequest, W3cResponse, YangreResponse};
use crate::error::Result;

pub const W3C_INPUT_PREFIX: &str = "w3c_input";
pub const W3C_OUTPUT_PREFIX: &str = "w3c_output";
pub const YANGRE_INPUT_PREFIX: &str = "yangre_input";
pub const YANGRE_OUTPUT_PREFIX: &str = "yangre_output";

/// `w3cgrep_result` values
pub const W3C_MATCH: i32 = 0;
pub const W3C_NO_MATCH: i32 = 1;
pub const W3C_ERROR: i32 = -1;

/// Exit code with which w3cgrep signals an error
const W3CGREP_FAILURE_EXIT: i32 = 1;

/// Forwards validation requests to the configured validators.
///
/// Holds configuration only, so one instance is shared by all requests.
#[derive(Debug, Clone)]
pub struct Gateway {
    w3cgrep: ToolConfig,
    yangre: ToolConfig,
    scratch_dir: PathBuf,
    timeout: Duration,
}

impl Gateway {
    pub fn new(config: &Config) -> Self {
        Self {
            w3cgrep: config.w3cgrep.clone(),
            yangre: config.yangre.clone(),
            scratch_dir: config.tmp_dir.clone(),
            timeout: config.timeout,
        }
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Match `content` against `pattern` with w3cgrep
    pub async fn validate_w3c(&self, request: ValidationRequest) -> Result<W3cResponse> {
        let input = ScratchFile::with_contents(
            &self.scratch_dir,
            W3C_INPUT_PREFIX,
            w3c_input(&request.content).as_bytes(),
        )
        .await?;

        let args = [
            OsString::from(&request.pattern),
            input.path().as_os_str().to_owned(),
        ];
        let output = run_tool(
            &self.w3cgrep,
            &args,
            &self.scratch_dir,
            W3C_OUTPUT_PREFIX,
            self.timeout,
        )
        .await?;
        drop(input);

        let result = classify_w3c(&output, request.inverted);
        log::info!(
            "w3c pattern_nb={} exit={} result={}",
            request.pattern_nb,
            output.exit_code,
            result
        );

        Ok(W3cResponse {
            pattern_nb: request.pattern_nb,
            w3cgrep_result: result,
            w3cgrep_output: output.output,
        })
    }

    /// Match `content` against `pattern` with yangre, passing its exit code through
    pub async fn validate_yangre(&self, request: ValidationRequest) -> Result<YangreResponse> {
        let input = ScratchFile::with_contents(
            &self.scratch_dir,
            YANGRE_INPUT_PREFIX,
            yangre_input(&request.pattern, &request.content).as_bytes(),
        )
        .await?;

        let mut args = vec![OsString::from("-f"), input.path().as_os_str().to_owned()];
        if request.inverted {
            args.push(OsString::from("-i"));
        }
        let output = run_tool(
            &self.yangre,
            &args,
            &self.scratch_dir,
            YANGRE_OUTPUT_PREFIX,
            self.timeout,
        )
        .await?;
        drop(input);

        log::info!(
            "yangre pattern_nb={} inverted={} exit={}",
            request.pattern_nb,
            request.inverted,
            output.exit_code
        );

        Ok(YangreResponse {
            pattern_nb: request.pattern_nb,
            yangre_result: output.exit_code,
            yangre_output: output.output,
        })
    }
}

/// w3cgrep reads the content to match from a file, one line
pub fn w3c_input(content: &str) -> String {
    format!("{}\n", content)
}

/// yangre reads the pattern, a blank line, then the content
pub fn yangre_input(pattern: &str, content: &str) -> String {
    format!("{}\n\n{}", pattern, content)
}

/// Turn a w3cgrep run into `w3cgrep_result`.
///
/// Any output means a match. Inversion swaps match and no match. Exit code 1
/// overrides both with [`W3C_ERROR`].
pub fn classify_w3c(output: &ToolOutput, inverted: bool) -> i32 {
    let mut result = if output.output.is_empty() {
        W3C_NO_MATCH
    } else {
        W3C_MATCH
    };

    if inverted {
        result = 1 - result;
    }

    if output.exit_code == W3CGREP_FAILURE_EXIT {
        result = W3C_ERROR;
    }

    result
}
