//! Creation time and duration from the text report of an external
//! probe tool (`ffprobe <VIDEO>`).
//!
//! The relevant lines look like:
//! ```text
//!   Duration: 00:00:04.80, start: 0.000000, bitrate: 17803 kb/s
//!     creation_time   : 2016-07-02 20:24:59
//! ```

use std::{
    io::Read,
    path::Path,
    process::{Child, Command, ExitStatus, Stdio},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use tracing::debug;

use crate::{
    config::ProbeConfig,
    consts::{CREATION_MARKER, DURATION_MARKER},
    datetime::{parse_datetime, parse_duration, Timestamp},
    errors::{FormatError, ProbeError, ProcessFailure},
    support::tail_lines,
    VideoTimeInfo,
};

/// How often a running probe is checked for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Number of stderr lines kept for `ProcessFailure::Exit`.
const STDERR_TAIL: usize = 5;

/// Runs the default probe tool (`ffprobe`) on `path`.
pub fn probe(path: &Path) -> Result<VideoTimeInfo, ProbeError> {
    probe_with(&ProbeConfig::default(), path)
}

/// Runs the configured probe tool on `path` and parses its output.
pub fn probe_with(config: &ProbeConfig, path: &Path) -> Result<VideoTimeInfo, ProbeError> {
    let output = run_probe(config, path)?;
    parse_probe_output(&output)
}

/// Parses probe output.
///
/// Both a `creation_time` line and a `Duration` line are required.
/// If a marker occurs on several lines the last one is used.
pub fn parse_probe_output(output: &str) -> Result<VideoTimeInfo, ProbeError> {
    let mut creation: Option<Timestamp> = None;
    let mut duration: Option<time::Duration> = None;

    for line in output.lines() {
        if line.contains(CREATION_MARKER) {
            creation = Some(creation_from_line(line)?);
        } else if line.contains(DURATION_MARKER) {
            duration = Some(duration_from_line(line)?);
        }
    }

    let creation = creation.ok_or(ProbeError::MissingField(CREATION_MARKER))?;
    let duration = duration.ok_or(ProbeError::MissingField(DURATION_MARKER))?;

    Ok(VideoTimeInfo::new(creation, duration))
}

/// `      creation_time   : 2016-07-02 20:24:59`
///
/// The last two whitespace separated tokens are date and time.
fn creation_from_line(line: &str) -> Result<Timestamp, FormatError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [.., date, clock] => parse_datetime(&format!("{date} {clock}")),
        _ => parse_datetime(line.trim()),
    }
}

/// `  Duration: 00:00:04.80, start: 0.000000, bitrate: 17803 kb/s`
///
/// The duration is the token following the `Duration:` marker,
/// with its trailing comma removed.
fn duration_from_line(line: &str) -> Result<time::Duration, FormatError> {
    let token = line.split_whitespace()
        .skip_while(|t| !t.contains(DURATION_MARKER))
        .nth(1)
        .unwrap_or_default();
    parse_duration(token.strip_suffix(',').unwrap_or(token))
}

/// Reads `pipe` to end on a separate thread, so that neither
/// stdout nor stderr can fill up and block the child.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut p) = pipe {
            // Partial output is still useful on read errors
            let _ = p.read_to_end(&mut buf);
        }
        buf
    })
}

/// Waits for `child` to exit. Kills and reaps it
/// if `timeout` passes first.
fn wait_with_timeout(child: &mut Child, timeout: Option<Duration>) -> Result<ExitStatus, ProcessFailure> {
    let Some(limit) = timeout else {
        return child.wait().map_err(ProcessFailure::Spawn)
    };

    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait().map_err(ProcessFailure::Spawn)? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            // Process may have exited between try_wait and kill
            let _ = child.kill();
            let _ = child.wait();
            return Err(ProcessFailure::Timeout(limit));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Runs the probe tool on `path` and returns stdout followed by stderr.
/// `ffprobe` writes its report to stderr.
pub fn run_probe(config: &ProbeConfig, path: &Path) -> Result<String, ProcessFailure> {
    let program = config.resolve_program()?;
    debug!("probing {} with {}", path.display(), program.display());

    let mut child = Command::new(&program)
        .args(&config.args)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(ProcessFailure::Spawn)?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    // On timeout the reader threads are left to finish on their own,
    // a grandchild may still hold the pipes open.
    let status = wait_with_timeout(&mut child, config.timeout)?;

    let stdout = stdout.join().unwrap_or_default();
    let stderr = stderr.join().unwrap_or_default();
    debug!("probe exited with {status}, {} + {} bytes output", stdout.len(), stderr.len());

    let stdout = String::from_utf8_lossy(&stdout);
    let stderr = String::from_utf8_lossy(&stderr);

    if !status.success() {
        return Err(ProcessFailure::Exit{
            code: status.code(),
            stderr: tail_lines(&stderr, STDERR_TAIL),
        });
    }

    let merged = format!("{stdout}\n{stderr}");
    if merged.trim().is_empty() {
        return Err(ProcessFailure::EmptyOutput);
    }

    Ok(merged)
}
