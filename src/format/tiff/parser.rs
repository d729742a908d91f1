//! TIFF header parsing for the EXIF payload.
//!
//! The EXIF payload of an APP1 segment is a small TIFF file. Its header
//! fixes the byte order for everything after it and points at IFD0.
//!
//! # TIFF Header Structure
//!
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Magic number (42 = 0x002A) in that byte order
//! Bytes 4-7: Offset to IFD0, relative to byte 0 of the header
//! ```

use serde::Serialize;

use crate::error::ExifError;
use crate::io::ByteCursor;

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// TIFF magic number
const TIFF_MAGIC: u16 = 42;

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of an EXIF payload.
///
/// Discovered per file from the first two bytes of the TIFF header, so it is
/// a runtime value rather than a type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    #[inline]
    pub fn u16_from(self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(bytes),
            ByteOrder::BigEndian => u16::from_be_bytes(bytes),
        }
    }

    #[inline]
    pub fn u32_from(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::LittleEndian => u32::from_le_bytes(bytes),
            ByteOrder::BigEndian => u32::from_be_bytes(bytes),
        }
    }

    /// The two-letter marker used in the header.
    pub const fn marker(self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "II",
            ByteOrder::BigEndian => "MM",
        }
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header of an EXIF payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the payload
    pub byte_order: ByteOrder,

    /// Offset of IFD0 from the start of the payload
    pub ifd0_offset: u32,
}

impl TiffHeader {
    /// Parse a TIFF header from the start of an EXIF payload.
    ///
    /// `payload` is the whole EXIF payload (everything after `"Exif\0\0"`), so
    /// the IFD0 offset can be checked against its length.
    ///
    /// # Errors
    /// - `TruncatedData` if fewer than 8 bytes are available, or IFD0 lies
    ///   outside the payload
    /// - `InvalidTiffHeader` if the byte order marker is not II/MM or the magic
    ///   number is not 42
    pub fn parse(payload: &[u8]) -> Result<Self, ExifError> {
        if payload.len() < TIFF_HEADER_SIZE {
            return Err(ExifError::TruncatedData {
                offset: 0,
                requested: TIFF_HEADER_SIZE,
                size: payload.len(),
            });
        }

        // The marker reads the same in both orders, so any order will do here
        let marker = ByteCursor::new(payload, ByteOrder::BigEndian).read_u16(0)?;
        let byte_order = match marker {
            BYTE_ORDER_LITTLE_ENDIAN => ByteOrder::LittleEndian,
            BYTE_ORDER_BIG_ENDIAN => ByteOrder::BigEndian,
            _ => {
                return Err(ExifError::InvalidTiffHeader {
                    reason: "unknown byte order marker",
                    found: marker,
                })
            }
        };

        let cursor = ByteCursor::new(payload, byte_order);
        let magic = cursor.read_u16(2)?;
        if magic != TIFF_MAGIC {
            return Err(ExifError::InvalidTiffHeader {
                reason: "magic number is not 42",
                found: magic,
            });
        }

        let ifd0_offset = cursor.read_u32(4)?;
        if ifd0_offset as usize >= payload.len() {
            return Err(ExifError::TruncatedData {
                offset: ifd0_offset as usize,
                requested: 2,
                size: payload.len(),
            });
        }

        Ok(TiffHeader {
            byte_order,
            ifd0_offset,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
