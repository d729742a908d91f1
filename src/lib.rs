//! # jpeg-exif
//!
//! A from-scratch EXIF decoder for JPEG files.
//!
//! The library walks the JPEG marker segments to the EXIF APP1 payload,
//! parses its TIFF header and decodes IFD0 plus the EXIF, GPS and
//! Interoperability directories into typed values. Rationals are kept as
//! exact numerator/denominator pairs; derived views (GPS position, capture
//! time, human-readable strings) are computed on demand.
//!
//! ## Architecture
//!
//! - [`io`] - Bounds-checked, byte-order-aware reads over a borrowed buffer
//! - [`mod@format`] - JPEG segment scanning and TIFF/IFD decoding
//! - [`document`] - The decoded [`ExifDocument`] and its accessors
//! - [`reader`] - The [`ExifReader`] facade
//! - [`display`] - Formatting of common tags for people
//! - [`config`] - Reader settings and CLI arguments
//!
//! Malformed input never panics. Structural failures return an
//! [`ExifError`]; problems confined to a single entry or sub-directory are
//! collected as [`EntryError`]s on the document.
//!
//! ## Example
//!
//! ```rust,no_run
//! use jpeg_exif::{ExifReader, ExifTag, IfdKind};
//!
//! let doc = ExifReader::new().read_path("photo.jpg")?;
//! if let Some(model) = doc.get(IfdKind::Ifd0, ExifTag::Model.as_u16()) {
//!     println!("Camera: {}", model);
//! }
//! if let Some(location) = doc.geolocation() {
//!     println!("Taken at {}, {}", location.latitude, location.longitude);
//! }
//! # Ok::<(), jpeg_exif::ExifError>(())
//! ```

pub mod config;
pub mod display;
pub mod document;
pub mod error;
pub mod format;
pub mod io;
pub mod reader;

// Re-export commonly used types
pub use config::{Cli, OutputFormat, ReaderConfig, DEFAULT_MAX_INPUT_SIZE};
pub use document::{rational_to_float, ExifDocument, GeoCoordinate};
pub use error::{EntryError, ExifError};
pub use format::tiff::{
    ByteOrder, ExifTag, FieldType, GpsTag, IfdEntry, IfdGroup, IfdKind, Rational, RawTagValue,
};
pub use reader::{decode, ExifReader};
