//! Movie header atom (`mvhd`).
//!
//! Location: `moov/mvhd`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/movie_header_atom>

use std::io::{Cursor, Read, Seek};

use binrw::{BinRead, BinReaderExt};
use time::Duration;

use crate::{
    errors::AtomError,
    mp4_time_zero,
    reader::AtomWalker,
    consts::EPOCH_ADJUSTER,
    datetime::Timestamp,
    FourCC,
    VideoTimeInfo,
};

/// Timing fields of the movie header.
/// Version 1 headers store times and duration as 64-bit values.
#[derive(Debug, BinRead)]
#[br(big, import(version: u8))]
enum MvhdTiming {
    #[br(pre_assert(version == 0))]
    V0 {
        creation_time: u32,
        modification_time: u32,
        time_scale: u32,
        duration: u32,
    },
    #[br(pre_assert(version == 1))]
    V1 {
        creation_time: u64,
        modification_time: u64,
        time_scale: u32,
        duration: u64,
    },
}

/// Movie header atom (`mvhd`), timing fields only.
///
/// Location: `moov/mvhd`
#[derive(Debug, BinRead)]
#[br(big)]
pub struct Mvhd {
    version: u8,
    _flags: [u8; 3],
    #[br(args(version))]
    timing: MvhdTiming,
}

impl Mvhd {
    /// Finds `moov/mvhd`, scanning `stream` from its current position,
    /// and reads the timing fields.
    ///
    /// Only the data load of `mvhd` is decoded. A data load too short
    /// for the timing fields returns an error rather than reading
    /// into the atom that follows.
    pub fn find<R: Read + Seek>(stream: &mut R, max_scan_len: Option<u64>) -> Result<Self, AtomError> {
        let mut walker = AtomWalker::new(stream)?.with_max_scan_len(max_scan_len);
        let moov = walker.find(&FourCC::Moov)?;
        let mut children = walker.children(&moov)?;
        let header = children.find(&FourCC::Mvhd)?;

        let len = header.data_size();
        let mut data = Vec::new();
        children.into_inner().take(len).read_to_end(&mut data)?;
        if (data.len() as u64) < len {
            return Err(AtomError::Eof)
        }

        Ok(Cursor::new(data).read_be::<Self>()?)
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// Seconds since midnight, 1904-01-01 UTC.
    pub fn creation_time_raw(&self) -> u64 {
        match self.timing {
            MvhdTiming::V0 { creation_time, .. } => creation_time as u64,
            MvhdTiming::V1 { creation_time, .. } => creation_time,
        }
    }

    /// Seconds since midnight, 1904-01-01 UTC.
    pub fn modification_time_raw(&self) -> u64 {
        match self.timing {
            MvhdTiming::V0 { modification_time, .. } => modification_time as u64,
            MvhdTiming::V1 { modification_time, .. } => modification_time,
        }
    }

    /// Number of time units that pass in one second
    pub fn time_scale(&self) -> u32 {
        match self.timing {
            MvhdTiming::V0 { time_scale, .. } | MvhdTiming::V1 { time_scale, .. } => time_scale,
        }
    }

    /// Unscaled duration of the longest track.
    pub fn duration_raw(&self) -> u64 {
        match self.timing {
            MvhdTiming::V0 { duration, .. } => duration as u64,
            MvhdTiming::V1 { duration, .. } => duration,
        }
    }

    /// Creation time as seconds since the Unix epoch.
    pub fn creation_time_unix(&self) -> Option<i64> {
        i64::try_from(self.creation_time_raw()).ok()?
            .checked_sub(EPOCH_ADJUSTER)
    }

    /// Creation time as a naive datetime.
    /// Devices are supposed to write UTC, but many write local time.
    /// May default to MP4 time zero `1904-01-01 00:00:00`
    /// depending on device and settings.
    pub fn creation_time(&self) -> Result<Timestamp, AtomError> {
        let invalid = || AtomError::InvalidField{name: FourCC::Mvhd, field: "creation_time"};
        let seconds = i64::try_from(self.creation_time_raw()).map_err(|_| invalid())?;
        mp4_time_zero()
            .checked_add(Duration::seconds(seconds))
            .ok_or_else(invalid)
    }

    /// Duration of the longest track.
    /// Whole seconds are exact, the remainder is
    /// truncated to nanoseconds.
    pub fn duration(&self) -> Result<Duration, AtomError> {
        let invalid = |field| AtomError::InvalidField{name: FourCC::Mvhd, field};
        let scale = self.time_scale() as u64;
        if scale == 0 {
            return Err(invalid("time_scale"))
        }
        let units = self.duration_raw();
        let seconds = i64::try_from(units / scale).map_err(|_| invalid("duration"))?;
        let nanos = ((units % scale) as u128 * 1_000_000_000 / scale as u128) as i32;

        Ok(Duration::new(seconds, nanos))
    }

    /// Creation time and duration.
    pub fn time_info(&self) -> Result<VideoTimeInfo, AtomError> {
        Ok(VideoTimeInfo::new(self.creation_time()?, self.duration()?))
    }
}
