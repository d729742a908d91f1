//! EXIF tag value decoding.
//!
//! An entry's value arrives as a span of raw bytes whose meaning depends on
//! the field type, the element count and the payload's byte order. This module
//! turns that span into a [`RawTagValue`]. Nothing here formats values for
//! people; see [`crate::display`] for that.

use std::fmt;

use serde::Serialize;

use crate::io::ByteCursor;

use super::parser::ByteOrder;
use super::tags::FieldType;

// =============================================================================
// Rational
// =============================================================================

/// A numerator/denominator pair, EXIF's encoding for measured quantities.
///
/// Signed so SRATIONAL fits. A zero denominator is kept as-is and means
/// "undefined"; callers must never divide by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rational {
    pub numerator: i64,
    pub denominator: i64,
}

impl Rational {
    pub const fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// True when the denominator is zero.
    #[inline]
    pub const fn is_undefined(&self) -> bool {
        self.denominator == 0
    }

    /// Value as a float; `0.0` for a zero denominator.
    pub fn to_f64(self) -> f64 {
        if self.is_undefined() {
            0.0
        } else {
            self.numerator as f64 / self.denominator as f64
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

// =============================================================================
// RawTagValue
// =============================================================================

/// A decoded but unformatted tag value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum RawTagValue {
    /// Single BYTE, SHORT or LONG
    UnsignedInt(u32),
    /// Single SBYTE, SSHORT or SLONG
    SignedInt(i32),
    /// Single RATIONAL or SRATIONAL
    Rational(Rational),
    /// ASCII text
    Ascii(String),
    /// Multiple BYTEs, UNDEFINED data, or an unknown type's raw bytes
    ByteSequence(Vec<u8>),
    /// Multiple RATIONALs or SRATIONALs
    RationalSequence(Vec<Rational>),
    /// Multiple SHORTs or LONGs
    UnsignedSequence(Vec<u32>),
    /// Multiple SBYTEs, SSHORTs or SLONGs
    SignedSequence(Vec<i32>),
}

impl RawTagValue {
    /// Single unsigned value, widened from any unsigned scalar.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            RawTagValue::UnsignedInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Single rational value.
    pub fn as_rational(&self) -> Option<Rational> {
        match self {
            RawTagValue::Rational(r) => Some(*r),
            _ => None,
        }
    }

    /// Rational elements, for triples such as GPS coordinates.
    pub fn as_rationals(&self) -> Option<&[Rational]> {
        match self {
            RawTagValue::RationalSequence(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_ascii(&self) -> Option<&str> {
        match self {
            RawTagValue::Ascii(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RawTagValue::ByteSequence(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for RawTagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawTagValue::UnsignedInt(v) => write!(f, "{}", v),
            RawTagValue::SignedInt(v) => write!(f, "{}", v),
            RawTagValue::Rational(r) => write!(f, "{}", r),
            RawTagValue::Ascii(s) => f.write_str(s),
            RawTagValue::ByteSequence(b) => f.write_str(&hex::encode(b)),
            RawTagValue::RationalSequence(v) => write_joined(f, v),
            RawTagValue::UnsignedSequence(v) => write_joined(f, v),
            RawTagValue::SignedSequence(v) => write_joined(f, v),
        }
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode the raw bytes of an entry into a typed value.
///
/// `raw` is the value span already resolved by the IFD decoder (inline or
/// out-of-line). It is expected to hold `count` elements of `field_type`; if
/// it does not, the bytes are returned untouched as a `ByteSequence`.
pub fn decode_value(
    field_type: FieldType,
    count: u32,
    raw: &[u8],
    byte_order: ByteOrder,
) -> RawTagValue {
    let cursor = ByteCursor::new(raw, byte_order);
    let count = count as usize;

    let decoded = match field_type {
        FieldType::Ascii => Some(RawTagValue::Ascii(decode_ascii(raw))),
        FieldType::Undefined | FieldType::Unknown(_) => None,
        FieldType::Byte => {
            if count == 1 {
                cursor.read_u8(0).ok().map(|v| RawTagValue::UnsignedInt(v as u32))
            } else {
                raw.get(..count).map(|b| RawTagValue::ByteSequence(b.to_vec()))
            }
        }
        FieldType::Short => read_elements(count, 2, |off| cursor.read_u16(off).ok())
            .map(|v| unsigned(v.into_iter().map(u32::from).collect())),
        FieldType::Long => {
            read_elements(count, 4, |off| cursor.read_u32(off).ok()).map(unsigned)
        }
        FieldType::SByte => read_elements(count, 1, |off| cursor.read_i8(off).ok())
            .map(|v| signed(v.into_iter().map(i32::from).collect())),
        FieldType::SShort => read_elements(count, 2, |off| cursor.read_i16(off).ok())
            .map(|v| signed(v.into_iter().map(i32::from).collect())),
        FieldType::SLong => {
            read_elements(count, 4, |off| cursor.read_i32(off).ok()).map(signed)
        }
        FieldType::Rational => {
            read_elements(count, 8, |off| cursor.read_rational(off).ok()).map(rationals)
        }
        FieldType::SRational => {
            read_elements(count, 8, |off| cursor.read_srational(off).ok()).map(rationals)
        }
    };

    decoded.unwrap_or_else(|| RawTagValue::ByteSequence(raw.to_vec()))
}

/// Read `count` fixed-width elements, or nothing if any read falls short.
fn read_elements<T>(
    count: usize,
    width: usize,
    read: impl Fn(usize) -> Option<T>,
) -> Option<Vec<T>> {
    (0..count).map(|i| read(i * width)).collect()
}

fn unsigned(mut values: Vec<u32>) -> RawTagValue {
    if values.len() == 1 {
        RawTagValue::UnsignedInt(values.remove(0))
    } else {
        RawTagValue::UnsignedSequence(values)
    }
}

fn signed(mut values: Vec<i32>) -> RawTagValue {
    if values.len() == 1 {
        RawTagValue::SignedInt(values.remove(0))
    } else {
        RawTagValue::SignedSequence(values)
    }
}

fn rationals(mut values: Vec<Rational>) -> RawTagValue {
    if values.len() == 1 {
        RawTagValue::Rational(values.remove(0))
    } else {
        RawTagValue::RationalSequence(values)
    }
}

/// Decode ASCII text, dropping one trailing NUL.
///
/// Cameras routinely write UTF-8 or Latin-1 here. Valid UTF-8 is kept as is;
/// anything else is read byte-for-byte as Latin-1 so no text is lost.
fn decode_ascii(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(&[0]).unwrap_or(raw);
    match std::str::from_utf8(raw) {
        Ok(s) => s.to_owned(),
        Err(_) => raw.iter().map(|&b| b as char).collect(),
    }
}

// =============================================================================
// Tests
// =============================================================================
