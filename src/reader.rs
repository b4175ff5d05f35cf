//! Sequential scan over top-level atoms.
//!
//! Reads 8 byte headers (32-bit big endian size + FourCC)
//! and skips the payload of every atom that does not match
//! the target FourCC. Atom payloads are never interpreted.

use std::io::{Read, Seek, SeekFrom};

use binrw::BinReaderExt;
use tracing::{debug, trace};

use crate::{consts::ATOM_HEADER_SIZE, errors::AtomError, AtomHeader, FourCC};

/// Walks the atoms of a seekable stream, starting at the
/// stream's position when the walker is created.
///
/// The scan is bounded by the stream length,
/// and optionally by a maximum number of bytes to scan.
#[derive(Debug)]
pub struct AtomWalker<R> {
    reader: R,
    /// Absolute position the scan started at.
    start: u64,
    /// Absolute position the scan must not pass.
    end: u64,
    /// Maximum number of bytes to scan,
    /// counting from `start`.
    max_scan_len: Option<u64>,
    /// Number of headers read so far.
    visited: usize,
}

impl<R: Read + Seek> AtomWalker<R> {
    /// Creates a walker starting at the current position of `reader`.
    /// The stream length is determined by seeking to the end,
    /// after which the position is restored.
    pub fn new(mut reader: R) -> Result<Self, AtomError> {
        let start = reader.stream_position()?;
        let end = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(start))?;

        Ok(Self {
            reader,
            start,
            end,
            max_scan_len: None,
            visited: 0,
        })
    }

    /// Limit the scan to `max_scan_len` bytes from the start position.
    /// `None` scans until the end of the stream.
    pub fn with_max_scan_len(self, max_scan_len: Option<u64>) -> Self {
        Self {
            max_scan_len,
            ..self
        }
    }

    /// Number of atom headers read so far.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Absolute position the walk will not read past.
    pub fn limit(&self) -> u64 {
        match self.max_scan_len {
            Some(max) => self.end.min(self.start.saturating_add(max)),
            None => self.end,
        }
    }

    /// Walker over the child atoms of `parent`.
    ///
    /// Assumes the current position is at the start
    /// of the data load for `parent`, e.g. directly after
    /// `find()` returned `parent`.
    pub fn children(&mut self, parent: &AtomHeader) -> Result<AtomWalker<&mut R>, AtomError> {
        let start = self.reader.stream_position()?;
        Ok(AtomWalker {
            start,
            end: parent.end().min(self.end),
            max_scan_len: None,
            visited: 0,
            reader: &mut self.reader,
        })
    }

    /// Returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Returns atom header at current position.
    ///
    /// Does not verify that current position
    /// is at atom boundary.
    pub fn next_header(&mut self) -> Result<AtomHeader, AtomError> {
        let offset = self.reader.stream_position()?;

        // Read 32bit total atom size
        let size = self.reader.read_be::<u32>()? as u64;
        // Can not read fourcc name as utf-8 since some
        // manufacturers use single-byte extended ascii/ISO8859-1
        let name = FourCC::from_bytes(self.reader.read_be::<[u8; 4]>()?);

        self.visited += 1;
        trace!("atom '{name}' @ {offset}, {size} bytes");

        match size {
            1 => Err(AtomError::UnsupportedExtendedSize{name, offset}),
            s if s < ATOM_HEADER_SIZE => Err(AtomError::MalformedAtom{name, size, offset}),
            _ => Ok(AtomHeader::new(size, name, offset)),
        }
    }

    /// Finds the first atom with FourCC `target`.
    ///
    /// If found, the header is returned with reader
    /// position at the start of the atom's data load.
    ///
    /// Running out of stream (or scan bound) returns
    /// `AtomError::AtomNotFound`.
    pub fn find(&mut self, target: &FourCC) -> Result<AtomHeader, AtomError> {
        let limit = self.limit();

        loop {
            let pos = self.reader.stream_position()?;
            if pos >= limit {
                break;
            }

            let header = match self.next_header() {
                Ok(hdr) => hdr,
                // partial header at end of stream
                Err(AtomError::Eof) => break,
                Err(err) => return Err(err),
            };

            if &header.name == target {
                debug!("found '{target}' @ {} after {} atoms", header.offset, self.visited);
                return Ok(header);
            }

            // Atoms declaring a size beyond the stream end
            // are truncated, nothing valid can follow them.
            let next = header.offset_next_abs();
            if next > self.end {
                break;
            }
            self.reader.seek(SeekFrom::Start(next))?;
        }

        debug!("no '{target}' atom after {} atoms", self.visited);
        Err(AtomError::AtomNotFound(target.to_owned()))
    }
}

/// Finds the first top-level atom with FourCC `target` in `stream`,
/// scanning from its current position.
///
/// On success `stream` is positioned at the first data load byte
/// of the returned atom.
pub fn find_atom<R: Read + Seek>(stream: &mut R, target: &FourCC) -> Result<AtomHeader, AtomError> {
    AtomWalker::new(stream)?.find(target)
}
