//! End-to-end decoding tests.
//!
//! Tests verify:
//! - Tags decode to the expected typed values in each directory
//! - Both byte orders produce identical documents
//! - EXIF spliced into a real JPEG is found ahead of the image data
//! - Reader configuration (Interop toggle, size cap, file input)

use std::fs;

use jpeg_exif::display;
use jpeg_exif::{
    decode, ByteOrder, ExifError, ExifReader, ExifTag, FieldType, IfdKind, Rational, RawTagValue,
    ReaderConfig,
};

use super::test_utils::{
    camera_exif, create_test_jpeg, is_valid_jpeg, splice_exif, wrap_in_jpeg, ByteOrderType,
    ExifBuilder, IfdBuilder,
};

// =============================================================================
// Basic Decoding
// =============================================================================

#[test]
fn test_focal_length_in_ifd0() {
    let data = wrap_in_jpeg(&camera_exif(ByteOrderType::LittleEndian));
    let doc = decode(&data).unwrap();

    let value = doc.get(IfdKind::Ifd0, ExifTag::FocalLength.as_u16()).unwrap();
    assert_eq!(value, &RawTagValue::Rational(Rational::new(280, 10)));
    assert_eq!(display::focal_length(value).as_deref(), Some("28 mm"));
}

#[test]
fn test_exposure_time_in_exif_ifd() {
    let data = wrap_in_jpeg(&camera_exif(ByteOrderType::LittleEndian));
    let doc = decode(&data).unwrap();

    let value = doc.get(IfdKind::Exif, ExifTag::ExposureTime.as_u16()).unwrap();
    assert_eq!(value, &RawTagValue::Rational(Rational::new(10, 1250)));
    assert_eq!(display::exposure_time(value).as_deref(), Some("1/125 s"));

    let fnumber = doc.get(IfdKind::Exif, ExifTag::FNumber.as_u16()).unwrap();
    assert_eq!(display::aperture(fnumber).as_deref(), Some("f/4.6"));

    let iso = doc.get(IfdKind::Exif, ExifTag::IsoSpeedRatings.as_u16()).unwrap();
    assert_eq!(display::iso(iso).as_deref(), Some("ISO 200"));
}

#[test]
fn test_ascii_and_undefined_values() {
    let data = wrap_in_jpeg(&camera_exif(ByteOrderType::LittleEndian));
    let doc = decode(&data).unwrap();

    assert_eq!(
        doc.get(IfdKind::Ifd0, ExifTag::Model.as_u16()),
        Some(&RawTagValue::Ascii("Canon EOS 5D".to_string()))
    );
    assert_eq!(
        doc.get(IfdKind::Exif, ExifTag::ExifVersion.as_u16()),
        Some(&RawTagValue::ByteSequence(b"0230".to_vec()))
    );

    let entry = doc.entry(IfdKind::Ifd0, ExifTag::Model.as_u16()).unwrap();
    assert_eq!(entry.value_type, FieldType::Ascii);
    assert_eq!(entry.count, 13);
}

#[test]
fn test_pointer_tags_are_kept_as_entries() {
    let data = wrap_in_jpeg(&camera_exif(ByteOrderType::LittleEndian));
    let doc = decode(&data).unwrap();

    let ifd0 = doc.group(IfdKind::Ifd0).unwrap();
    assert!(ifd0.contains(ExifTag::ExifIfdPointer.as_u16()));
    assert!(ifd0.contains(ExifTag::GpsIfdPointer.as_u16()));

    let kinds: Vec<IfdKind> = doc.groups().map(|g| g.kind()).collect();
    assert_eq!(kinds, vec![IfdKind::Ifd0, IfdKind::Exif, IfdKind::Gps]);
    assert!(doc.entry_errors().is_empty());
}

#[test]
fn test_sequences() {
    let tiff = ExifBuilder::new()
        .ifd0(
            IfdBuilder::new()
                .shorts(0x0102, &[8, 8, 8])
                .srational(0x9204, -1, 3),
        )
        .build();
    let doc = decode(&wrap_in_jpeg(&tiff)).unwrap();

    assert_eq!(
        doc.get(IfdKind::Ifd0, 0x0102),
        Some(&RawTagValue::UnsignedSequence(vec![8, 8, 8]))
    );
    assert_eq!(
        doc.get(IfdKind::Ifd0, 0x9204),
        Some(&RawTagValue::Rational(Rational::new(-1, 3)))
    );
}

#[test]
fn test_empty_ifd0() {
    let tiff = ExifBuilder::new().build();
    let doc = decode(&wrap_in_jpeg(&tiff)).unwrap();
    assert!(doc.is_empty());
    assert_eq!(doc.created_at(), None);
    assert_eq!(doc.geolocation(), None);
}

// =============================================================================
// Byte Order Tests
// =============================================================================

#[test]
fn test_big_endian_payload() {
    let tiff = camera_exif(ByteOrderType::BigEndian);
    assert_eq!(&tiff[..2], b"MM");

    let doc = decode(&wrap_in_jpeg(&tiff)).unwrap();
    assert_eq!(doc.byte_order(), ByteOrder::BigEndian);
    assert_eq!(
        doc.get(IfdKind::Exif, ExifTag::ExposureTime.as_u16()),
        Some(&RawTagValue::Rational(Rational::new(10, 1250)))
    );
    assert_eq!(
        doc.get(IfdKind::Ifd0, ExifTag::Orientation.as_u16()),
        Some(&RawTagValue::UnsignedInt(1))
    );
}

#[test]
fn test_byte_orders_decode_to_same_groups() {
    let le = decode(&wrap_in_jpeg(&camera_exif(ByteOrderType::LittleEndian))).unwrap();
    let be = decode(&wrap_in_jpeg(&camera_exif(ByteOrderType::BigEndian))).unwrap();

    assert_eq!(le.byte_order(), ByteOrder::LittleEndian);
    assert_eq!(be.byte_order(), ByteOrder::BigEndian);
    for (a, b) in le.groups().zip(be.groups()) {
        assert_eq!(a, b);
    }
    assert_eq!(le.geolocation(), be.geolocation());
    assert_eq!(le.created_at(), be.created_at());
}

#[test]
fn test_decode_is_idempotent() {
    let data = wrap_in_jpeg(&camera_exif(ByteOrderType::BigEndian));
    assert_eq!(decode(&data).unwrap(), decode(&data).unwrap());
}

// =============================================================================
// Real JPEG Tests
// =============================================================================

#[test]
fn test_exif_spliced_into_encoded_jpeg() {
    let jpeg = create_test_jpeg(64, 48, 85);
    assert!(is_valid_jpeg(&jpeg));

    // Encoder output alone carries no EXIF
    assert_eq!(decode(&jpeg), Err(ExifError::NoExifSegment));

    let data = splice_exif(&jpeg, &camera_exif(ByteOrderType::LittleEndian));
    let doc = decode(&data).unwrap();
    assert_eq!(
        doc.get(IfdKind::Ifd0, ExifTag::Make.as_u16()),
        Some(&RawTagValue::Ascii("Canon".to_string()))
    );
    assert!(doc.geolocation().is_some());
}

// =============================================================================
// Reader Configuration Tests
// =============================================================================

fn with_interop() -> Vec<u8> {
    let tiff = ExifBuilder::new()
        .ifd0(IfdBuilder::new().ascii(0x010F, "Nikon"))
        .exif(IfdBuilder::new().rational(0x829A, 1, 60))
        .interop(
            IfdBuilder::new()
                .ascii(0x0001, "R98")
                .undefined(0x0002, b"0100"),
        )
        .build();
    wrap_in_jpeg(&tiff)
}

#[test]
fn test_interop_followed_by_default() {
    let doc = decode(&with_interop()).unwrap();
    assert_eq!(
        doc.get(IfdKind::Interop, 0x0001),
        Some(&RawTagValue::Ascii("R98".to_string()))
    );
    assert_eq!(
        display::tag_name(IfdKind::Interop, 0x0001),
        "InteroperabilityIndex"
    );
}

#[test]
fn test_interop_can_be_disabled() {
    let reader = ExifReader::with_config(ReaderConfig::default().with_follow_interop(false));
    let doc = reader.decode(&with_interop()).unwrap();
    assert!(doc.group(IfdKind::Interop).is_none());
    assert!(doc.group(IfdKind::Exif).is_some());
}

#[test]
fn test_size_cap() {
    let data = with_interop();
    let reader = ExifReader::with_config(ReaderConfig::default().with_max_input_size(32));
    assert!(matches!(
        reader.decode(&data),
        Err(ExifError::InputTooLarge { limit: 32, .. })
    ));
}

#[test]
fn test_read_path() {
    let data = splice_exif(
        &create_test_jpeg(16, 16, 75),
        &camera_exif(ByteOrderType::LittleEndian),
    );
    let path = std::env::temp_dir().join(format!("jpeg-exif-read-{}.jpg", std::process::id()));
    fs::write(&path, &data).unwrap();

    let doc = ExifReader::new().read_path(&path);
    let capped = ExifReader::with_config(ReaderConfig::default().with_max_input_size(16))
        .read_path(&path);
    fs::remove_file(&path).unwrap();

    assert_eq!(doc.unwrap(), decode(&data).unwrap());
    assert!(matches!(capped, Err(ExifError::InputTooLarge { .. })));
}
