//! Configuration for the extraction strategies.
//! All values are passed explicitly, there is no global state.

use std::{path::PathBuf, time::Duration};

use tracing::debug;
use which::which;

use crate::{
    consts::{
        DEFAULT_PROBE_PROGRAM,
        DEFAULT_PROBE_TIMEOUT_SECS,
        DEFAULT_TOKEN_INDEX,
        DEFAULT_WINDOW_SIZE,
        ENV_PROBE_PROGRAM,
        ENV_PROBE_TIMEOUT,
    },
    errors::ProcessFailure,
    FourCC,
};

/// Which source `Resolver::resolve()` reads
/// creation time and duration from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Parse the text report of an external probe tool (`ffprobe`).
    #[default]
    Probe,
    /// Read the movie header atom (`moov/mvhd`) directly.
    MovieHeader,
}

/// Atom scan settings.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkerConfig {
    /// Top-level atom to locate before reading the token window.
    pub target: FourCC,
    /// Maximum number of bytes to scan. `None` scans the whole file.
    pub max_scan_len: Option<u64>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            target: FourCC::Moov,
            max_scan_len: None,
        }
    }
}

impl WalkerConfig {
    pub fn with_target(self, target: FourCC) -> Self {
        Self { target, ..self }
    }

    pub fn with_max_scan_len(self, max_scan_len: Option<u64>) -> Self {
        Self { max_scan_len, ..self }
    }
}

/// Token window settings.
///
/// The defaults (320 bytes, token 47) match the `moov` layout of one
/// specific camera model and were found by inspecting its files.
/// Other devices place the date elsewhere, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenConfig {
    /// Number of bytes read after the atom header.
    pub window_size: usize,
    /// Position of the date among non-empty tokens.
    pub token_index: usize,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            token_index: DEFAULT_TOKEN_INDEX,
        }
    }
}

impl TokenConfig {
    pub fn with_window_size(self, window_size: usize) -> Self {
        Self { window_size, ..self }
    }

    pub fn with_token_index(self, token_index: usize) -> Self {
        Self { token_index, ..self }
    }
}

/// External probe settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Program name, looked up in `PATH`.
    pub program: String,
    /// Explicit path to the program. Preferred over
    /// `PATH` lookup if it exists.
    pub tool_path: Option<PathBuf>,
    /// Arguments placed before the video path.
    pub args: Vec<String>,
    /// Kill the probe if it runs longer than this.
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROBE_PROGRAM.to_owned(),
            tool_path: None,
            args: Vec::new(),
            timeout: Some(Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS)),
        }
    }
}

impl ProbeConfig {
    /// Defaults, overridden by `MOVIETIME_PROBE` (path to probe program)
    /// and `MOVIETIME_PROBE_TIMEOUT_SECS` if set.
    /// Unparsable timeout values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = std::env::var(ENV_PROBE_PROGRAM) {
            if !path.is_empty() {
                config.tool_path = Some(PathBuf::from(path));
            }
        }
        if let Some(secs) = std::env::var(ENV_PROBE_TIMEOUT).ok().and_then(|s| s.parse::<u64>().ok()) {
            config.timeout = Some(Duration::from_secs(secs));
        }
        config
    }

    pub fn with_program(self, program: &str) -> Self {
        Self { program: program.to_owned(), ..self }
    }

    pub fn with_tool_path(self, tool_path: Option<PathBuf>) -> Self {
        Self { tool_path, ..self }
    }

    pub fn with_args(self, args: &[&str]) -> Self {
        Self { args: args.iter().map(|s| s.to_string()).collect(), ..self }
    }

    pub fn with_timeout(self, timeout: Option<Duration>) -> Self {
        Self { timeout, ..self }
    }

    /// Path to the probe program, preferring `tool_path`
    /// over `PATH` lookup.
    pub fn resolve_program(&self) -> Result<PathBuf, ProcessFailure> {
        if let Some(path) = &self.tool_path {
            if path.exists() {
                return Ok(path.to_owned());
            }
            debug!("probe tool path {} does not exist, looking up '{}' in PATH", path.display(), self.program);
        }
        which(&self.program).map_err(|_| ProcessFailure::ToolNotFound{tool: self.program.to_owned()})
    }
}

/// Settings for `Resolver`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolverConfig {
    pub strategy: Strategy,
    pub walker: WalkerConfig,
    pub token: TokenConfig,
    pub probe: ProbeConfig,
}

impl ResolverConfig {
    pub fn with_strategy(self, strategy: Strategy) -> Self {
        Self { strategy, ..self }
    }

    pub fn with_walker(self, walker: WalkerConfig) -> Self {
        Self { walker, ..self }
    }

    pub fn with_token(self, token: TokenConfig) -> Self {
        Self { token, ..self }
    }

    pub fn with_probe(self, probe: ProbeConfig) -> Self {
        Self { probe, ..self }
    }
}
