//! Human-readable rendering of common tag values.
//!
//! The decoder keeps exact rationals; rounding happens only here. Each
//! formatter returns `None` when the value does not have the expected shape.

use crate::format::tiff::{self, ExifTag, IfdKind, Rational, RawTagValue};

/// Focal length in millimetres, e.g. `280/10` as `"28 mm"`.
pub fn focal_length(value: &RawTagValue) -> Option<String> {
    let r = value.as_rational()?;
    Some(format!("{} mm", one_decimal(r.to_f64())))
}

/// F-number, e.g. `46/10` as `"f/4.6"`.
pub fn aperture(value: &RawTagValue) -> Option<String> {
    let r = value.as_rational()?;
    Some(format!("f/{}", one_decimal(r.to_f64())))
}

/// Exposure time in seconds.
///
/// Times under a second are shown as a reciprocal (`10/1250` as `"1/125 s"`).
/// A zero denominator or non-positive time renders as `"0 s"`.
pub fn exposure_time(value: &RawTagValue) -> Option<String> {
    let r = value.as_rational()?;
    Some(exposure_seconds(r))
}

fn exposure_seconds(r: Rational) -> String {
    let t = r.to_f64();
    if r.is_undefined() || t <= 0.0 {
        "0 s".to_string()
    } else if t >= 1.0 {
        format!("{} s", one_decimal(t))
    } else {
        format!("1/{} s", (1.0 / t).round())
    }
}

/// ISO speed, from a scalar or the first element of a sequence.
pub fn iso(value: &RawTagValue) -> Option<String> {
    let speed = match value {
        RawTagValue::UnsignedSequence(values) => values.first().copied()?,
        other => other.as_u32()?,
    };
    Some(format!("ISO {}", speed))
}

/// Decimal degrees to six places.
pub fn coordinate(degrees: f64) -> String {
    format!("{:.6}", degrees)
}

/// Well-known name of a tag, or its ID as `0xNNNN`.
pub fn tag_name(kind: IfdKind, tag: u16) -> String {
    tiff::tag_name(kind, tag)
        .map(str::to_string)
        .unwrap_or_else(|| format!("0x{:04X}", tag))
}

/// Render a value, using a dedicated formatter when the tag has one.
pub fn format_value(kind: IfdKind, tag: u16, value: &RawTagValue) -> String {
    let formatted = match (kind, ExifTag::from_u16(tag)) {
        (IfdKind::Gps, _) => None,
        (_, Some(ExifTag::FocalLength)) => focal_length(value),
        (_, Some(ExifTag::FNumber)) => aperture(value),
        (_, Some(ExifTag::ExposureTime)) => exposure_time(value),
        (_, Some(ExifTag::IsoSpeedRatings)) => iso(value),
        _ => None,
    };
    formatted.unwrap_or_else(|| value.to_string())
}

fn one_decimal(value: f64) -> String {
    let text = format!("{:.1}", value);
    match text.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => text,
    }
}
