//! The decoded EXIF document and its derived views.
//!
//! An [`ExifDocument`] is built once by [`crate::ExifReader`] and never
//! mutated. It owns copies of every decoded value, so it does not borrow the
//! input buffer. Derived values (coordinates, timestamps) are computed on
//! demand and return `None` on any inconsistency instead of failing.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use crate::error::EntryError;
use crate::format::tiff::{
    ByteOrder, DecodedIfds, ExifTag, GpsTag, IfdEntry, IfdGroup, IfdKind, Rational, RawTagValue,
};

/// EXIF date format after the date colons are replaced with hyphens.
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Tags tried in order by [`ExifDocument::created_at`].
const CREATED_AT_CANDIDATES: [(IfdKind, ExifTag); 3] = [
    (IfdKind::Exif, ExifTag::DateTimeOriginal),
    (IfdKind::Exif, ExifTag::DateTimeDigitized),
    (IfdKind::Ifd0, ExifTag::DateTime),
];

// =============================================================================
// GeoCoordinate
// =============================================================================

/// A position in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Convert a rational to a float, with `0.0` for a zero denominator.
pub fn rational_to_float(r: Rational) -> f64 {
    r.to_f64()
}

// =============================================================================
// ExifDocument
// =============================================================================

/// Decoded EXIF metadata of one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExifDocument {
    byte_order: ByteOrder,
    groups: BTreeMap<IfdKind, IfdGroup>,
    entry_errors: Vec<EntryError>,
}

impl ExifDocument {
    pub(crate) fn new(byte_order: ByteOrder, decoded: DecodedIfds) -> Self {
        let groups = decoded
            .groups
            .into_iter()
            .map(|group| (group.kind(), group))
            .collect();

        Self {
            byte_order,
            groups,
            entry_errors: decoded.errors,
        }
    }

    /// Byte order of the EXIF payload.
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Decoded value of `tag_id` in directory `kind`.
    pub fn get(&self, kind: IfdKind, tag_id: u16) -> Option<&RawTagValue> {
        self.entry(kind, tag_id).map(|entry| &entry.value)
    }

    /// Full entry (type and count included) of `tag_id` in directory `kind`.
    pub fn entry(&self, kind: IfdKind, tag_id: u16) -> Option<&IfdEntry> {
        self.group(kind)?.get(tag_id)
    }

    pub fn group(&self, kind: IfdKind) -> Option<&IfdGroup> {
        self.groups.get(&kind)
    }

    /// Decoded directories in IFD0, EXIF, GPS, Interop order.
    pub fn groups(&self) -> impl Iterator<Item = &IfdGroup> {
        self.groups.values()
    }

    /// Entries that were skipped during decoding.
    pub fn entry_errors(&self) -> &[EntryError] {
        &self.entry_errors
    }

    /// True when no directory holds any entry.
    pub fn is_empty(&self) -> bool {
        self.groups.values().all(IfdGroup::is_empty)
    }

    /// Same as [`rational_to_float`].
    pub fn rational_to_float(r: Rational) -> f64 {
        rational_to_float(r)
    }

    /// GPS position from `GPSLatitude`/`GPSLongitude` and their references.
    ///
    /// Both coordinates must be exactly three rationals (degrees, minutes,
    /// seconds). A missing reference tag leaves the value positive.
    pub fn geolocation(&self) -> Option<GeoCoordinate> {
        let gps = self.group(IfdKind::Gps)?;
        let latitude = coordinate(gps, GpsTag::GpsLatitude, GpsTag::GpsLatitudeRef, "S")?;
        let longitude = coordinate(gps, GpsTag::GpsLongitude, GpsTag::GpsLongitudeRef, "W")?;

        Some(GeoCoordinate {
            latitude,
            longitude,
        })
    }

    /// Capture time from the first valid of `DateTimeOriginal`,
    /// `DateTimeDigitized` (EXIF) and `DateTime` (IFD0).
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        CREATED_AT_CANDIDATES.iter().find_map(|&(kind, tag)| {
            let text = self.get(kind, tag.as_u16())?.as_ascii()?;
            let parsed = parse_exif_datetime(text);
            if parsed.is_none() {
                debug!(group = %kind, tag = tag.name(), value = text, "Ignoring invalid date");
            }
            parsed
        })
    }
}

/// Degrees + minutes/60 + seconds/3600, negated for the `negative` reference.
fn coordinate(gps: &IfdGroup, value_tag: GpsTag, ref_tag: GpsTag, negative: &str) -> Option<f64> {
    let parts = gps.get(value_tag.as_u16())?.value.as_rationals()?;
    let [degrees, minutes, seconds] = parts else {
        return None;
    };

    let value = degrees.to_f64() + minutes.to_f64() / 60.0 + seconds.to_f64() / 3600.0;

    let is_negative = gps
        .get(ref_tag.as_u16())
        .and_then(|entry| entry.value.as_ascii())
        .map(trim_text)
        .is_some_and(|reference| reference.eq_ignore_ascii_case(negative));

    Some(if is_negative { -value } else { value })
}

/// Parse `YYYY:MM:DD HH:MM:SS` by turning the date colons into hyphens.
///
/// Only the part before the first space is rewritten, so the time keeps its
/// colons even when the date already uses hyphens.
fn parse_exif_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = trim_text(text);
    let normalized = match text.split_once(' ') {
        Some((date, time)) => format!("{} {}", date.replacen(':', "-", 2), time),
        None => text.replacen(':', "-", 2),
    };
    NaiveDateTime::parse_from_str(&normalized, DATE_TIME_FORMAT).ok()
}

fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c == '\0' || c.is_whitespace())
}

// =============================================================================
// Tests
// =============================================================================
