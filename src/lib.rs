//! Determine when a video was recorded and for how long,
//! for aligning video files with GPS tracks.
//!
//! Three sources are supported:
//! - The text report of `ffprobe` (default, see `probe`).
//! - A date string embedded at a fixed token position after
//!   the `moov` atom header. Creation time only. The token position
//!   is device specific, see `TokenConfig`.
//! - The movie header atom (`moov/mvhd`).
//!
//! Only top-level atom headers (and `mvhd` inside `moov`) are read,
//! this is not a general MP4 parser.
//!
//! ```rs
//! use movietime::{resolve, Resolver, ResolverConfig, Strategy};
//! use std::path::Path;
//!
//! fn main() -> Result<(), movietime::ResolveError> {
//!     // Runs `ffprobe VIDEO.MP4`
//!     let info = resolve(Path::new("VIDEO.MP4"))?;
//!     println!("{} + {}", info.creation, info.duration);
//!
//!     // No external tools
//!     let resolver = Resolver::new(ResolverConfig::default().with_strategy(Strategy::MovieHeader));
//!     println!("{:?}", resolver.resolve(Path::new("VIDEO.MP4"))?);
//!
//!     Ok(())
//! }
//! ```

pub mod atom;
pub mod atom_types;
pub mod config;
pub mod consts;
pub mod datetime;
pub mod errors;
pub mod fourcc;
pub mod probe;
pub mod reader;
pub mod resolver;
pub mod time_info;
pub mod tokenizer;
pub(crate) mod support;

pub use atom::AtomHeader;
pub use atom_types::Mvhd;
pub use config::{ProbeConfig, ResolverConfig, Strategy, TokenConfig, WalkerConfig};
pub use consts::mp4_time_zero;
pub use datetime::{format_datetime, format_duration, parse_datetime, parse_duration, Timestamp};
pub use errors::{AtomError, FormatError, ProbeError, ProcessFailure, ResolveError, TokenError};
pub use fourcc::FourCC;
pub use probe::{parse_probe_output, probe, probe_with};
pub use reader::{find_atom, AtomWalker};
pub use resolver::{resolve, Resolver};
pub use time_info::VideoTimeInfo;
pub use tokenizer::{extract_token, tokens};
