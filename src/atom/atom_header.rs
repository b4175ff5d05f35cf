use crate::{consts::ATOM_HEADER_SIZE, FourCC};

/// Atom header. Always 8 bytes, since 64-bit sized
/// atoms are rejected while scanning.
///
/// ```ignore
/// | [X X X X] [Y Y Y Y] |
///    |         |
///    |         FourCC
///    32bit size
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomHeader {
    /// Total atom size in bytes including the 8 byte header.
    pub(crate) atom_size: u64,
    /// FourCC
    pub(crate) name: FourCC,
    /// Absolute byte offset for start of atom in the stream,
    /// i.e. byte offset for its header,
    /// starting with 32-bit size.
    pub(crate) offset: u64,
}

impl AtomHeader {
    pub fn new(atom_size: u64, name: FourCC, offset: u64) -> Self {
        Self {
            atom_size,
            name,
            offset,
        }
    }

    pub fn start(&self) -> u64 {
        self.offset
    }

    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.atom_size)
    }

    pub fn atom_size(&self) -> u64 {
        self.atom_size
    }

    pub fn name(&self) -> &FourCC {
        &self.name
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Header size in bytes.
    pub fn header_size(&self) -> u64 {
        ATOM_HEADER_SIZE
    }

    /// Data load absolute offset,
    /// i.e. position directly after header.
    pub fn data_offset(&self) -> u64 {
        self.offset + self.header_size()
    }

    /// Size of data load (excludes header size).
    pub fn data_size(&self) -> u64 {
        self.atom_size.saturating_sub(self.header_size())
    }

    /// Absolute offset to next atom.
    pub fn offset_next_abs(&self) -> u64 {
        self.end()
    }
}
