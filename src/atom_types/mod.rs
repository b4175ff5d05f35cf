//! Atoms decoded beyond their header.

mod mvhd;

pub use mvhd::Mvhd;
