//! Bounds-checked primitive reads over a borrowed byte buffer.
//!
//! Every EXIF structure is addressed by offsets read out of the file itself,
//! so none of them can be trusted. [`ByteCursor`] is the only place where the
//! parser touches raw bytes: each read checks `offset + width <= len` and
//! reports [`ExifError::TruncatedData`] instead of panicking.

use crate::error::ExifError;
use crate::format::tiff::{ByteOrder, Rational};

/// Read-only view over a byte buffer with a runtime byte order.
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    byte_order: ByteOrder,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor over `data`.
    pub fn new(data: &'a [u8], byte_order: ByteOrder) -> Self {
        Self { data, byte_order }
    }

    /// Byte order used for multi-byte reads.
    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Total length of the underlying buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow `len` bytes starting at `offset`.
    pub fn bytes(&self, offset: usize, len: usize) -> Result<&'a [u8], ExifError> {
        offset
            .checked_add(len)
            .and_then(|end| self.data.get(offset..end))
            .ok_or(ExifError::TruncatedData {
                offset,
                requested: len,
                size: self.data.len(),
            })
    }

    /// Borrow exactly `N` bytes starting at `offset`.
    fn array<const N: usize>(&self, offset: usize) -> Result<[u8; N], ExifError> {
        let slice = self.bytes(offset, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, ExifError> {
        Ok(self.array::<1>(offset)?[0])
    }

    pub fn read_u16(&self, offset: usize) -> Result<u16, ExifError> {
        Ok(self.byte_order.u16_from(self.array(offset)?))
    }

    pub fn read_u32(&self, offset: usize) -> Result<u32, ExifError> {
        Ok(self.byte_order.u32_from(self.array(offset)?))
    }

    pub fn read_i8(&self, offset: usize) -> Result<i8, ExifError> {
        Ok(self.read_u8(offset)? as i8)
    }

    pub fn read_i16(&self, offset: usize) -> Result<i16, ExifError> {
        Ok(self.read_u16(offset)? as i16)
    }

    pub fn read_i32(&self, offset: usize) -> Result<i32, ExifError> {
        Ok(self.read_u32(offset)? as i32)
    }

    /// Read an unsigned RATIONAL: two u32 values, numerator first.
    pub fn read_rational(&self, offset: usize) -> Result<Rational, ExifError> {
        // Check the full 8 bytes up front so a half-readable pair reports the whole width.
        self.bytes(offset, 8)?;
        let numerator = self.read_u32(offset)?;
        let denominator = self.read_u32(offset + 4)?;
        Ok(Rational::new(numerator as i64, denominator as i64))
    }

    /// Read a signed SRATIONAL: two i32 values, numerator first.
    pub fn read_srational(&self, offset: usize) -> Result<Rational, ExifError> {
        self.bytes(offset, 8)?;
        let numerator = self.read_i32(offset)?;
        let denominator = self.read_i32(offset + 4)?;
        Ok(Rational::new(numerator as i64, denominator as i64))
    }
}
