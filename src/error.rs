use thiserror::Error;

use crate::format::tiff::IfdKind;

/// Structural errors that abort decoding.
///
/// None of these come with a partial document: if the JPEG framing, the
/// TIFF header or the IFD0 table is unusable there is nothing to return.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExifError {
    /// Buffer does not start with the JPEG SOI marker
    #[error("Not a JPEG: missing SOI marker 0xFFD8")]
    NotAJpeg,

    /// No APP1 segment carrying an Exif payload before the image data
    #[error("No EXIF segment found before start of scan")]
    NoExifSegment,

    /// Byte order marker or magic number mismatch in the TIFF header
    #[error("Invalid TIFF header: {reason} (found 0x{found:04X})")]
    InvalidTiffHeader { reason: &'static str, found: u16 },

    /// A read would go past the end of the buffer
    #[error("Truncated data: requested {requested} bytes at offset {offset}, size is {size}")]
    TruncatedData {
        offset: usize,
        requested: usize,
        size: usize,
    },

    /// Input exceeds the configured size cap
    #[error("Input too large: {size} bytes exceeds limit of {limit} bytes")]
    InputTooLarge { size: u64, limit: u64 },

    /// File could not be read
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ExifError {
    fn from(err: std::io::Error) -> Self {
        ExifError::Io(err.to_string())
    }
}

/// Soft errors for a single IFD entry or sub-directory.
///
/// These are collected on the document; the rest of the decode carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// Out-of-line value points outside the EXIF payload
    #[error("{group} tag 0x{tag:04X}: value of {length} bytes at offset {offset} is out of bounds")]
    ValueOutOfBounds {
        group: IfdKind,
        tag: u16,
        offset: u32,
        length: u64,
    },

    /// Value length does not fit in addressable memory
    #[error("{group} tag 0x{tag:04X}: count {count} overflows value length")]
    LengthOverflow { group: IfdKind, tag: u16, count: u32 },

    /// Tag appears more than once in the same directory
    #[error("{group} tag 0x{tag:04X}: duplicate entry ignored")]
    DuplicateTag { group: IfdKind, tag: u16 },

    /// Sub-IFD pointer is not a single unsigned offset
    #[error("{group} tag 0x{tag:04X}: not a valid directory pointer")]
    InvalidPointer { group: IfdKind, tag: u16 },

    /// Sub-IFD pointer refers to a directory that was already decoded
    #[error("{group} directory at offset {offset} was already visited")]
    PointerCycle { group: IfdKind, offset: u32 },

    /// Fixed 12-byte entry could not be read
    #[error("{group} entry at offset {offset} is truncated")]
    TruncatedEntry { group: IfdKind, offset: usize },

    /// Sub-IFD could not be decoded at all
    #[error("{group} directory skipped: {source}")]
    SubIfd {
        group: IfdKind,
        #[source]
        source: ExifError,
    },
}

impl EntryError {
    /// Directory the error was recorded against.
    pub fn group(&self) -> IfdKind {
        match self {
            EntryError::ValueOutOfBounds { group, .. }
            | EntryError::LengthOverflow { group, .. }
            | EntryError::DuplicateTag { group, .. }
            | EntryError::InvalidPointer { group, .. }
            | EntryError::PointerCycle { group, .. }
            | EntryError::TruncatedEntry { group, .. }
            | EntryError::SubIfd { group, .. } => *group,
        }
    }
}
