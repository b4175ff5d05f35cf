//! Atom header as read from the container stream.

mod atom_header;

pub use atom_header::AtomHeader;
