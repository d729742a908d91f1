//! Entry point for decoding EXIF metadata from JPEG bytes.
//!
//! The reader chains the format layers:
//!
//! 1. Scan JPEG markers for the EXIF APP1 payload
//! 2. Parse the TIFF header at the start of the payload
//! 3. Decode IFD0 and the sub-directories it points to
//! 4. Wrap the result in an [`ExifDocument`]

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::ReaderConfig;
use crate::document::ExifDocument;
use crate::error::ExifError;
use crate::format::find_exif_payload;
use crate::format::tiff::{IfdDecoder, TiffHeader};
use crate::io::ByteCursor;

/// Stateless EXIF decoder.
///
/// Holds only configuration, so one reader can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ExifReader {
    config: ReaderConfig,
}

impl ExifReader {
    /// Create a reader with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Decode the EXIF metadata of a JPEG held in memory.
    ///
    /// # Errors
    /// - `InputTooLarge` if `data` is over the configured cap
    /// - `NotAJpeg`, `NoExifSegment` from the marker scan
    /// - `InvalidTiffHeader`, `TruncatedData` from the header or IFD0
    ///
    /// Problems in individual entries or sub-directories do not fail the
    /// decode; they are listed by [`ExifDocument::entry_errors`].
    pub fn decode(&self, data: &[u8]) -> Result<ExifDocument, ExifError> {
        self.check_size(data.len() as u64)?;

        let payload = find_exif_payload(data)?;
        let header = TiffHeader::parse(payload)?;
        debug!(
            byte_order = ?header.byte_order,
            ifd0_offset = header.ifd0_offset,
            "Parsed TIFF header"
        );

        let decoded = IfdDecoder::new(ByteCursor::new(payload, header.byte_order))
            .with_interop(self.config.follow_interop)
            .decode(header.ifd0_offset)?;

        Ok(ExifDocument::new(header.byte_order, decoded))
    }

    /// Read a file and decode its EXIF metadata.
    ///
    /// The size cap is checked against file metadata before reading.
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<ExifDocument, ExifError> {
        let path = path.as_ref();
        let size = fs::metadata(path)?.len();
        self.check_size(size)?;

        debug!(path = %path.display(), size, "Reading file");
        let data = fs::read(path)?;
        self.decode(&data)
    }

    fn check_size(&self, size: u64) -> Result<(), ExifError> {
        let limit = self.config.max_input_size as u64;
        if size > limit {
            return Err(ExifError::InputTooLarge { size, limit });
        }
        Ok(())
    }
}

/// Decode with default settings.
pub fn decode(data: &[u8]) -> Result<ExifDocument, ExifError> {
    ExifReader::new().decode(data)
}

// =============================================================================
// Tests
// =============================================================================
