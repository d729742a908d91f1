//! JPEG marker segment scanning.
//!
//! A JPEG file is a sequence of marker segments ahead of the entropy-coded
//! image data:
//!
//! ```text
//! FF D8                      SOI, no length
//! FF Ex  LL LL  payload...   APPn, length is big-endian and counts itself
//! ...
//! FF DA  LL LL  header...    SOS, entropy-coded data follows
//! ```
//!
//! EXIF lives in an APP1 segment whose payload starts with `"Exif\0\0"`. The
//! scanner stops at SOS: past that point `0xFF` bytes belong to the compressed
//! data and are not markers.

use tracing::debug;

use crate::error::ExifError;
use crate::format::tiff::ByteOrder;
use crate::io::ByteCursor;

// =============================================================================
// JPEG Markers
// =============================================================================

/// Marker prefix byte
pub const MARKER_PREFIX: u8 = 0xFF;

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// End Of Image
pub const EOI: u8 = 0xD9;

/// Start Of Scan
pub const SOS: u8 = 0xDA;

/// Application segment 1 (EXIF, XMP)
pub const APP1: u8 = 0xE1;

/// Temporary marker, no payload
const TEM: u8 = 0x01;

/// Restart markers RST0..RST7, no payload
const RST0: u8 = 0xD0;
const RST7: u8 = 0xD7;

/// Signature that opens an EXIF APP1 payload
pub const EXIF_SIGNATURE: &[u8] = b"Exif\0\0";

// =============================================================================
// Segment Iteration
// =============================================================================

/// One marker segment of a JPEG header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Marker code (the byte after `0xFF`)
    pub marker: u8,
    /// Offset of the `0xFF` that opens the marker
    pub offset: usize,
    /// Payload after the length field; empty for standalone markers
    pub payload: &'a [u8],
}

/// Iterator over the marker segments between SOI and SOS.
///
/// Ends quietly at SOS, EOI, end of buffer, or a position where a marker was
/// expected but none is present. Yields one error and then ends if a segment
/// length is malformed.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    cursor: ByteCursor<'a>,
    pos: usize,
    done: bool,
}

/// Start iterating the segments of `data`.
///
/// # Errors
/// `NotAJpeg` if `data` does not start with SOI.
pub fn segments(data: &[u8]) -> Result<Segments<'_>, ExifError> {
    if !data.starts_with(&SOI) {
        return Err(ExifError::NotAJpeg);
    }

    Ok(Segments {
        // Segment lengths are always big-endian
        cursor: ByteCursor::new(data, ByteOrder::BigEndian),
        pos: SOI.len(),
        done: false,
    })
}

impl<'a> Segments<'a> {
    fn finish(&mut self) -> Option<Result<Segment<'a>, ExifError>> {
        self.done = true;
        None
    }

    fn fail(&mut self, err: ExifError) -> Option<Result<Segment<'a>, ExifError>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Result<Segment<'a>, ExifError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.cursor.read_u8(self.pos) {
            Ok(MARKER_PREFIX) => {}
            Ok(other) => {
                debug!(offset = self.pos, byte = other, "Expected JPEG marker, stopping scan");
                return self.finish();
            }
            Err(_) => return self.finish(),
        }

        // Any number of 0xFF fill bytes may precede the marker code
        let mut code_pos = self.pos + 1;
        let marker = loop {
            match self.cursor.read_u8(code_pos) {
                Ok(MARKER_PREFIX) => code_pos += 1,
                Ok(code) => break code,
                Err(_) => return self.finish(),
            }
        };
        let offset = code_pos - 1;

        match marker {
            SOS | EOI | 0x00 => self.finish(),
            TEM | RST0..=RST7 | 0xD8 => {
                self.pos = code_pos + 1;
                Some(Ok(Segment {
                    marker,
                    offset,
                    payload: &[],
                }))
            }
            _ => {
                let length_pos = code_pos + 1;
                let length = match self.cursor.read_u16(length_pos) {
                    Ok(length) => length as usize,
                    Err(err) => return self.fail(err),
                };
                if length < 2 {
                    return self.fail(ExifError::TruncatedData {
                        offset: length_pos,
                        requested: 2,
                        size: length,
                    });
                }

                let payload = match self.cursor.bytes(length_pos + 2, length - 2) {
                    Ok(payload) => payload,
                    Err(err) => return self.fail(err),
                };
                self.pos = length_pos + length;

                Some(Ok(Segment {
                    marker,
                    offset,
                    payload,
                }))
            }
        }
    }
}

// =============================================================================
// EXIF Lookup
// =============================================================================

/// Find the EXIF payload of a JPEG file.
///
/// Returns the bytes following `"Exif\0\0"` in the first matching APP1
/// segment; these start with the TIFF header.
///
/// # Errors
/// - `NotAJpeg` if the buffer does not start with SOI
/// - `NoExifSegment` if no EXIF APP1 segment precedes SOS
/// - `TruncatedData` if a segment length is malformed or runs past the buffer
pub fn find_exif_payload(data: &[u8]) -> Result<&[u8], ExifError> {
    for segment in segments(data)? {
        let segment = segment?;
        if segment.marker != APP1 {
            continue;
        }
        if let Some(payload) = segment.payload.strip_prefix(EXIF_SIGNATURE) {
            debug!(
                offset = segment.offset,
                length = payload.len(),
                "Found EXIF APP1 segment"
            );
            return Ok(payload);
        }
    }

    Err(ExifError::NoExifSegment)
}

// =============================================================================
// Tests
// =============================================================================
