use time::{macros::datetime, PrimitiveDateTime};

/// Atom header size in bytes (32-bit size + FourCC).
pub const ATOM_HEADER_SIZE: u64 = 8;

/// Number of bytes read after the `moov` header
/// when looking for the embedded date string.
pub const DEFAULT_WINDOW_SIZE: usize = 320;

/// Position of the date string among the null-delimited
/// tokens in the window after the `moov` header.
///
/// Found empirically for a specific camera model.
/// This is not something the container format guarantees,
/// other devices will need a different value.
pub const DEFAULT_TOKEN_INDEX: usize = 47;

/// Default external probe program.
pub const DEFAULT_PROBE_PROGRAM: &str = "ffprobe";

/// Default time limit for the external probe, in seconds.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the probe program.
pub const ENV_PROBE_PROGRAM: &str = "MOVIETIME_PROBE";

/// Environment variable overriding the probe timeout in seconds.
pub const ENV_PROBE_TIMEOUT: &str = "MOVIETIME_PROBE_TIMEOUT_SECS";

/// Marker for creation time lines in probe output.
pub const CREATION_MARKER: &str = "creation_time";

/// Marker for duration lines in probe output.
pub const DURATION_MARKER: &str = "Duration";

/// Seconds between the QuickTime epoch (1904-01-01)
/// and the Unix epoch (1970-01-01).
pub const EPOCH_ADJUSTER: i64 = 2_082_844_800;

/// Time zero for MP4 containers. Midnight January 1, 1904.
pub fn mp4_time_zero() -> PrimitiveDateTime {
    datetime!(1904-01-01 0:00)
}
