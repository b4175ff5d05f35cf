//! MP4/QuickTime atom FourCC.
//! See https://developer.apple.com/library/archive/documentation/QuickTime/QTFF/QTFFChap2/qtff2.html#//apple_ref/doc/uid/TP40000939-CH204-56313.
//! Only the top-level atoms commonly written by consumer cameras are named,
//! everything else is `Custom`.

use std::fmt;

/// Atom FourCC.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FourCC {
    /// File type
    Ftyp,
    /// Free space
    Free,
    /// Free space
    Skip,
    /// Reserved space, precedes `mdat` in QuickTime files
    Wide,
    /// Media data
    Mdat,
    /// Movie atom. Holds movie-wide metadata,
    /// including creation time.
    Moov,
    /// Movie header atom (`moov/mvhd`)
    Mvhd,
    /// User data
    Udta,

    Custom(String)
}

impl FourCC {
    /// Byte values outside ASCII are mapped as ISO8859-1,
    /// so that vendor specific FourCC never fail to decode.
    pub fn from_slice(fourcc: &[u8]) -> Self {
        match fourcc {
            b"ftyp" => Self::Ftyp,
            b"free" => Self::Free,
            b"skip" => Self::Skip,
            b"wide" => Self::Wide,
            b"mdat" => Self::Mdat,
            b"moov" => Self::Moov,
            b"mvhd" => Self::Mvhd,
            b"udta" => Self::Udta,
            _ => Self::Custom(fourcc.iter().map(|b| *b as char).collect()),
        }
    }

    pub fn from_bytes(fourcc: [u8; 4]) -> Self {
        Self::from_slice(&fourcc)
    }

    pub fn from_str(fourcc: &str) -> Self {
        match fourcc {
            "ftyp" => Self::Ftyp,
            "free" => Self::Free,
            "skip" => Self::Skip,
            "wide" => Self::Wide,
            "mdat" => Self::Mdat,
            "moov" => Self::Moov,
            "mvhd" => Self::Mvhd,
            "udta" => Self::Udta,
            _ => Self::Custom(fourcc.to_owned()),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            Self::Ftyp => "ftyp",
            Self::Free => "free",
            Self::Skip => "skip",
            Self::Wide => "wide",
            Self::Mdat => "mdat",
            Self::Moov => "moov",
            Self::Mvhd => "mvhd",
            Self::Udta => "udta",
            Self::Custom(s) => s.as_str()
        }
    }
}

impl Default for FourCC {
    fn default() -> Self {
        Self::Moov
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
