//! Binary format parsers.
//!
//! EXIF data in a JPEG is two formats nested inside each other:
//!
//! - **JPEG framing** ([`jpeg`]): marker segments, one of which (APP1) carries
//!   the EXIF payload
//! - **TIFF structure** ([`tiff`]): the payload itself, a header followed by
//!   Image File Directories

pub mod jpeg;
pub mod tiff;

pub use jpeg::{find_exif_payload, segments, Segment, Segments};
