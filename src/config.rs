//! Configuration management for the validation gateway.
//!
//! Handles:
//! - Command-line argument parsing (with environment variable fallbacks)
//! - The optional TOML configuration file
//! - Validator executable locations

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BIND: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(127, 0, 0, 1), 5000));
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Command-line arguments for the gateway
#[derive(Debug, Default, Parser)]
#[command(name = "yangre-gw")]
#[command(about = "HTTP gateway for the w3cgrep and yangre regular-expression validators")]
#[command(version)]
pub struct Args {
    /// TOML configuration file
    #[arg(long, env = "YANGRE_GW_CONFIG", help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "YANGRE_GW_BIND", help = "Address to listen on (e.g. 0.0.0.0:5000)")]
    pub bind: Option<SocketAddr>,

    #[arg(long, env = "YANGRE_GW_W3CGREP", help = "Path to the w3cgrep executable")]
    pub w3cgrep: Option<PathBuf>,

    #[arg(long, env = "YANGRE_GW_YANGRE", help = "Path to the yangre executable")]
    pub yangre: Option<PathBuf>,

    #[arg(
        long,
        env = "YANGRE_GW_TMP_DIR",
        help = "Directory for validator input files (defaults to the system temp dir)"
    )]
    pub tmp_dir: Option<PathBuf>,

    #[arg(
        long,
        env = "YANGRE_GW_TIMEOUT_SECS",
        help = "Seconds a validator may run before it is killed"
    )]
    pub timeout_secs: Option<u64>,

    #[arg(
        long,
        env = "YANGRE_GW_LOG_LEVEL",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: Option<String>,
}

/// Contents of the TOML configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub bind: Option<SocketAddr>,
    pub tmp_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
    pub w3cgrep: Option<ToolSection>,
    pub yangre: Option<ToolSection>,
}

/// `[w3cgrep]` / `[yangre]` table of the configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolSection {
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub args: Vec<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

/// How to launch one external validator.
///
/// `args` are placed before the arguments the gateway adds for each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    pub name: String,
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl ToolConfig {
    pub fn new(name: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    fn resolve(name: &str, cli_path: Option<PathBuf>, section: Option<ToolSection>) -> Self {
        let section = section.unwrap_or_default();
        let program = cli_path
            .or(section.path)
            .unwrap_or_else(|| PathBuf::from(name));
        Self::new(name, program).with_args(section.args)
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub w3cgrep: ToolConfig,
    pub yangre: ToolConfig,
    /// Directory holding per-request scratch files
    pub tmp_dir: PathBuf,
    /// Upper bound on a single validator run
    pub timeout: Duration,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::merge(Args::default(), FileConfig::default())
    }
}

impl Config {
    /// Create configuration from the command line, the environment and the
    /// config file (explicit or `<config_dir>/yangre-gateway/config.toml`)
    pub fn from_args_and_env() -> Result<Self> {
        let mut args = Args::parse();
        if args.config.is_none() {
            args.config = default_config_file();
        }
        Self::from_args(args)
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        let config = Self::merge(args, file);

        if config.timeout.is_zero() {
            bail!("timeout must be at least one second");
        }

        Ok(config)
    }

    /// Command-line values win over file values, which win over defaults
    fn merge(args: Args, file: FileConfig) -> Self {
        let bind = args.bind.or(file.bind).unwrap_or(DEFAULT_BIND);
        let timeout_secs = args
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Config {
            bind,
            w3cgrep: ToolConfig::resolve("w3cgrep", args.w3cgrep, file.w3cgrep),
            yangre: ToolConfig::resolve("yangre", args.yangre, file.yangre),
            tmp_dir: args
                .tmp_dir
                .or(file.tmp_dir)
                .unwrap_or_else(std::env::temp_dir),
            timeout: Duration::from_secs(timeout_secs),
            log_level: args
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

/// The per-user config file, if one exists
fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("yangre-gateway").join("config.toml"))
        .filter(|path| path.is_file())
}
