//! Test utilities for integration tests.
//!
//! Builders for EXIF payloads (TIFF header plus IFD0, EXIF, GPS and Interop
//! directories) and helpers that wrap them into JPEG files.

use image::codecs::jpeg::JpegEncoder;
use image::{GrayImage, Luma};

/// Start Of Image marker.
pub const SOI: [u8; 2] = [0xFF, 0xD8];

// =============================================================================
// JPEG Helpers
// =============================================================================

/// Create a real grayscale baseline JPEG.
pub fn create_test_jpeg(width: u32, height: u32, quality: u8) -> Vec<u8> {
    let img = GrayImage::from_fn(width, height, |x, y| {
        let val = ((x * 7 + y * 3) % 256) as u8;
        Luma([val])
    });

    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.encode_image(&img).unwrap();
    buf
}

/// Build an APP1 segment carrying `tiff` as its EXIF payload.
pub fn exif_segment(tiff: &[u8]) -> Vec<u8> {
    let mut segment = vec![0xFF, 0xE1];
    segment.extend(((tiff.len() + 8) as u16).to_be_bytes());
    segment.extend(b"Exif\0\0");
    segment.extend(tiff);
    segment
}

/// Wrap an EXIF payload in a minimal JPEG: SOI, APP0, APP1, SOS, EOI.
pub fn wrap_in_jpeg(tiff: &[u8]) -> Vec<u8> {
    let mut data = SOI.to_vec();
    data.extend([0xFF, 0xE0, 0x00, 0x07]);
    data.extend(b"JFIF\0");
    data.extend(exif_segment(tiff));
    data.extend([0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00]);
    data.extend([0x12, 0x34, 0xFF, 0x00, 0x56]);
    data.extend([0xFF, 0xD9]);
    data
}

/// Insert an EXIF APP1 segment right after the SOI of a real JPEG.
pub fn splice_exif(jpeg: &[u8], tiff: &[u8]) -> Vec<u8> {
    assert!(is_valid_jpeg(jpeg));
    let mut data = SOI.to_vec();
    data.extend(exif_segment(tiff));
    data.extend(&jpeg[SOI.len()..]);
    data
}

/// Check that data starts with SOI and ends with EOI.
pub fn is_valid_jpeg(data: &[u8]) -> bool {
    data.starts_with(&SOI) && data.ends_with(&[0xFF, 0xD9])
}

// =============================================================================
// EXIF Payload Builders
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrderType {
    LittleEndian,
    BigEndian,
}

impl ByteOrderType {
    fn marker(self) -> &'static [u8; 2] {
        match self {
            ByteOrderType::LittleEndian => b"II",
            ByteOrderType::BigEndian => b"MM",
        }
    }

    fn u16(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrderType::LittleEndian => value.to_le_bytes(),
            ByteOrderType::BigEndian => value.to_be_bytes(),
        }
    }

    fn u32(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrderType::LittleEndian => value.to_le_bytes(),
            ByteOrderType::BigEndian => value.to_be_bytes(),
        }
    }
}

/// Builder for an EXIF payload (everything after `"Exif\0\0"`).
///
/// Layout: header, IFD0 table and data, then the EXIF, Interop and GPS
/// directories in that order. Pointer entries are added automatically.
pub struct ExifBuilder {
    byte_order: ByteOrderType,
    ifd0: IfdBuilder,
    exif: Option<IfdBuilder>,
    interop: Option<IfdBuilder>,
    gps: Option<IfdBuilder>,
}

impl ExifBuilder {
    pub fn new() -> Self {
        Self {
            byte_order: ByteOrderType::LittleEndian,
            ifd0: IfdBuilder::new(),
            exif: None,
            interop: None,
            gps: None,
        }
    }

    pub fn with_byte_order(mut self, order: ByteOrderType) -> Self {
        self.byte_order = order;
        self
    }

    pub fn ifd0(mut self, ifd: IfdBuilder) -> Self {
        self.ifd0 = ifd;
        self
    }

    pub fn exif(mut self, ifd: IfdBuilder) -> Self {
        self.exif = Some(ifd);
        self
    }

    /// Interop directory; only linked when an EXIF directory is present.
    pub fn interop(mut self, ifd: IfdBuilder) -> Self {
        self.interop = Some(ifd);
        self
    }

    pub fn gps(mut self, ifd: IfdBuilder) -> Self {
        self.gps = Some(ifd);
        self
    }

    /// Build the EXIF payload.
    pub fn build(self) -> Vec<u8> {
        let order = self.byte_order;
        let mut ifd0 = self.ifd0;
        let mut exif = self.exif;
        let interop = if exif.is_some() { self.interop } else { None };
        let gps = self.gps;

        // Pointer entries first (placeholder offsets) so sizes are final
        if exif.is_some() {
            ifd0 = ifd0.long(0x8769, 0);
        }
        if gps.is_some() {
            ifd0 = ifd0.long(0x8825, 0);
        }
        if interop.is_some() {
            exif = exif.map(|ifd| ifd.long(0xA005, 0));
        }

        let ifd0_offset = 8u32;
        let mut next = ifd0_offset + ifd0.size() as u32;
        let mut place = |ifd: &Option<IfdBuilder>| {
            ifd.as_ref().map(|ifd| {
                let offset = next;
                next += ifd.size() as u32;
                offset
            })
        };
        let exif_offset = place(&exif);
        let interop_offset = place(&interop);
        let gps_offset = place(&gps);

        if let Some(offset) = exif_offset {
            ifd0.set_long(0x8769, offset);
        }
        if let Some(offset) = gps_offset {
            ifd0.set_long(0x8825, offset);
        }
        if let (Some(exif), Some(offset)) = (exif.as_mut(), interop_offset) {
            exif.set_long(0xA005, offset);
        }

        let mut data = Vec::new();
        data.extend(order.marker());
        data.extend(order.u16(42));
        data.extend(order.u32(ifd0_offset));

        ifd0.write_to(&mut data, order);
        for ifd in [exif, interop, gps].into_iter().flatten() {
            ifd.write_to(&mut data, order);
        }

        data
    }
}

impl Default for ExifBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one directory.
#[derive(Clone, Default)]
pub struct IfdBuilder {
    entries: Vec<EntryBuilder>,
}

#[derive(Clone)]
struct EntryBuilder {
    tag: u16,
    field_type: u16,
    count: u32,
    value: EntryValue,
}

#[derive(Clone)]
enum EntryValue {
    Bytes(Vec<u8>),
    Shorts(Vec<u16>),
    Longs(Vec<u32>),
    Rationals(Vec<(u32, u32)>),
    SRationals(Vec<(i32, i32)>),
    /// Value field written verbatim, nothing stored out of line
    Field(u32),
}

impl IfdBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, tag: u16, field_type: u16, count: u32, value: EntryValue) -> Self {
        self.entries.push(EntryBuilder {
            tag,
            field_type,
            count,
            value,
        });
        self
    }

    /// ASCII value with its terminating NUL.
    pub fn ascii(self, tag: u16, text: &str) -> Self {
        let mut bytes = text.as_bytes().to_vec();
        bytes.push(0);
        let count = bytes.len() as u32;
        self.push(tag, 2, count, EntryValue::Bytes(bytes))
    }

    pub fn short(self, tag: u16, value: u16) -> Self {
        self.push(tag, 3, 1, EntryValue::Shorts(vec![value]))
    }

    pub fn shorts(self, tag: u16, values: &[u16]) -> Self {
        self.push(tag, 3, values.len() as u32, EntryValue::Shorts(values.to_vec()))
    }

    pub fn long(self, tag: u16, value: u32) -> Self {
        self.push(tag, 4, 1, EntryValue::Longs(vec![value]))
    }

    pub fn rational(self, tag: u16, numerator: u32, denominator: u32) -> Self {
        self.rationals(tag, &[(numerator, denominator)])
    }

    pub fn rationals(self, tag: u16, values: &[(u32, u32)]) -> Self {
        self.push(tag, 5, values.len() as u32, EntryValue::Rationals(values.to_vec()))
    }

    pub fn srational(self, tag: u16, numerator: i32, denominator: i32) -> Self {
        self.push(tag, 10, 1, EntryValue::SRationals(vec![(numerator, denominator)]))
    }

    pub fn undefined(self, tag: u16, bytes: &[u8]) -> Self {
        self.push(tag, 7, bytes.len() as u32, EntryValue::Bytes(bytes.to_vec()))
    }

    /// Entry with an arbitrary type, count and value field, for malformed input.
    pub fn raw(self, tag: u16, field_type: u16, count: u32, field: u32) -> Self {
        self.push(tag, field_type, count, EntryValue::Field(field))
    }

    fn set_long(&mut self, tag: u16, value: u32) {
        for entry in self.entries.iter_mut().filter(|e| e.tag == tag) {
            entry.value = EntryValue::Longs(vec![value]);
        }
    }

    /// Table plus out-of-line data, in bytes.
    fn size(&self) -> usize {
        let external: usize = self
            .entries
            .iter()
            .map(|e| e.encode(ByteOrderType::LittleEndian).len())
            .filter(|&len| len > 4)
            .sum();
        2 + self.entries.len() * 12 + 4 + external
    }

    fn write_to(&self, data: &mut Vec<u8>, order: ByteOrderType) {
        let table_start = data.len();
        let mut data_offset = table_start + 2 + self.entries.len() * 12 + 4;
        let mut external = Vec::new();

        data.extend(order.u16(self.entries.len() as u16));

        for entry in &self.entries {
            data.extend(order.u16(entry.tag));
            data.extend(order.u16(entry.field_type));
            data.extend(order.u32(entry.count));

            if let EntryValue::Field(field) = entry.value {
                data.extend(order.u32(field));
                continue;
            }

            let mut bytes = entry.encode(order);
            if bytes.len() <= 4 {
                bytes.resize(4, 0);
                data.extend(bytes);
            } else {
                data.extend(order.u32(data_offset as u32));
                data_offset += bytes.len();
                external.extend(bytes);
            }
        }

        // Next IFD
        data.extend(order.u32(0));
        data.extend(external);
    }
}

impl EntryBuilder {
    fn encode(&self, order: ByteOrderType) -> Vec<u8> {
        match &self.value {
            EntryValue::Bytes(bytes) => bytes.clone(),
            EntryValue::Shorts(values) => values.iter().flat_map(|&v| order.u16(v)).collect(),
            EntryValue::Longs(values) => values.iter().flat_map(|&v| order.u32(v)).collect(),
            EntryValue::Rationals(values) => values
                .iter()
                .flat_map(|&(n, d)| [order.u32(n), order.u32(d)])
                .flatten()
                .collect(),
            EntryValue::SRationals(values) => values
                .iter()
                .flat_map(|&(n, d)| [order.u32(n as u32), order.u32(d as u32)])
                .flatten()
                .collect(),
            EntryValue::Field(field) => order.u32(*field).to_vec(),
        }
    }
}

// =============================================================================
// Sample Payloads
// =============================================================================

/// A camera-like payload with IFD0, EXIF and GPS directories.
pub fn camera_exif(order: ByteOrderType) -> Vec<u8> {
    ExifBuilder::new()
        .with_byte_order(order)
        .ifd0(
            IfdBuilder::new()
                .ascii(0x010F, "Canon")
                .ascii(0x0110, "Canon EOS 5D")
                .short(0x0112, 1)
                .rational(0x920A, 280, 10)
                .ascii(0x0132, "2020:06:01 09:00:00"),
        )
        .exif(
            IfdBuilder::new()
                .rational(0x829A, 10, 1250)
                .rational(0x829D, 46, 10)
                .short(0x8827, 200)
                .ascii(0x9003, "2020:05:26 14:32:18")
                .undefined(0x9000, b"0230"),
        )
        .gps(
            IfdBuilder::new()
                .ascii(0x0001, "N")
                .rationals(0x0002, &[(40, 1), (26, 1), (46, 1)])
                .ascii(0x0003, "W")
                .rationals(0x0004, &[(79, 1), (58, 1), (56, 1)]),
        )
        .build()
}
