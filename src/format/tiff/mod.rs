//! TIFF structure parsing for the EXIF payload.
//!
//! The EXIF payload inside a JPEG APP1 segment is laid out as a miniature
//! TIFF file: a header, then a chain of Image File Directories.
//!
//! # Key Concepts
//!
//! - **Byte order**: the payload declares its endianness (II = little-endian,
//!   MM = big-endian) in the header. All multi-byte values must be read
//!   respecting this order.
//!
//! - **IFD (Image File Directory)**: a table of 12-byte entries. IFD0 holds the
//!   primary image tags and pointers to the EXIF and GPS directories.
//!
//! - **Inline vs offset values**: values of at most 4 bytes are stored inline
//!   in the entry, larger values are stored at an offset from the start of the
//!   payload.

mod ifd;
mod parser;
mod tags;
mod values;

pub use ifd::{DecodedIfds, IfdDecoder, IfdEntry, IfdGroup, IFD_ENTRY_SIZE};
pub use parser::{ByteOrder, TiffHeader, TIFF_HEADER_SIZE};
pub use tags::{tag_name, ExifTag, FieldType, GpsTag, IfdKind};
pub use values::{decode_value, Rational, RawTagValue};
