//! Recording window of a video.

use time::Duration;

use crate::datetime::Timestamp;

/// When a video was recorded and how long it runs.
///
/// The recording window `[creation, creation + duration]`
/// is what track points are aligned against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoTimeInfo {
    /// Creation time with the literal digits from the source,
    /// no timezone conversion.
    pub creation: Timestamp,
    pub duration: Duration,
}

impl VideoTimeInfo {
    pub fn new(creation: Timestamp, duration: Duration) -> Self {
        Self {
            creation,
            duration,
        }
    }

    /// End of the recording window.
    /// `None` if `creation + duration` overflows the calendar range.
    pub fn end(&self) -> Option<Timestamp> {
        self.creation.checked_add(self.duration)
    }

    /// Returns `true` if `timestamp` is within the
    /// recording window, bounds inclusive.
    pub fn contains(&self, timestamp: &Timestamp) -> bool {
        match self.end() {
            Some(end) => (self.creation ..= end).contains(timestamp),
            None => false,
        }
    }
}
