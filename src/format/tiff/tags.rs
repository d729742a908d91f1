//! EXIF field types, directory kinds and tag IDs.
//!
//! This module defines the vocabulary for EXIF parsing:
//! - Field types that determine how values are encoded
//! - The directories (IFD0, EXIF, GPS, Interop) a tag can live in
//! - Tag IDs for the fields the document accessors and display layer use
//!
//! Tags not listed here are still decoded; they just have no name.

use std::fmt;

// =============================================================================
// Field Types
// =============================================================================

/// EXIF field types that determine how values are encoded.
///
/// The ten codes defined by EXIF 2.3 are closed variants. Any other code is
/// kept verbatim in [`FieldType::Unknown`] so the entry survives decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Unsigned 8-bit integer
    Byte,
    /// 8-bit character, NUL-terminated
    Ascii,
    /// Unsigned 16-bit integer
    Short,
    /// Unsigned 32-bit integer
    Long,
    /// Two unsigned 32-bit integers (numerator, denominator)
    Rational,
    /// Signed 8-bit integer
    SByte,
    /// Opaque bytes
    Undefined,
    /// Signed 16-bit integer
    SShort,
    /// Signed 32-bit integer
    SLong,
    /// Two signed 32-bit integers (numerator, denominator)
    SRational,
    /// Any type code outside 1..=10
    Unknown(u16),
}

impl FieldType {
    /// Maximum bytes stored inline in the value/offset field of an entry.
    pub const INLINE_THRESHOLD: u64 = 4;

    /// Map a type code to a field type. Total: unknown codes are preserved.
    pub fn from_u16(value: u16) -> Self {
        match value {
            1 => FieldType::Byte,
            2 => FieldType::Ascii,
            3 => FieldType::Short,
            4 => FieldType::Long,
            5 => FieldType::Rational,
            6 => FieldType::SByte,
            7 => FieldType::Undefined,
            8 => FieldType::SShort,
            9 => FieldType::SLong,
            10 => FieldType::SRational,
            other => FieldType::Unknown(other),
        }
    }

    /// Size of a single element in bytes, `None` for unknown types.
    #[inline]
    pub const fn size_in_bytes(self) -> Option<usize> {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::SByte | FieldType::Undefined => {
                Some(1)
            }
            FieldType::Short | FieldType::SShort => Some(2),
            FieldType::Long | FieldType::SLong => Some(4),
            FieldType::Rational | FieldType::SRational => Some(8),
            FieldType::Unknown(_) => None,
        }
    }

    /// Total value length for `count` elements, computed without overflow.
    #[inline]
    pub fn byte_length(self, count: u32) -> Option<u64> {
        self.size_in_bytes().map(|size| size as u64 * count as u64)
    }

    /// Check whether `count` elements fit in the 4-byte inline field.
    #[inline]
    pub fn fits_inline(self, count: u32) -> bool {
        self.byte_length(count)
            .is_some_and(|len| len <= Self::INLINE_THRESHOLD)
    }

    pub const fn name(self) -> &'static str {
        match self {
            FieldType::Byte => "BYTE",
            FieldType::Ascii => "ASCII",
            FieldType::Short => "SHORT",
            FieldType::Long => "LONG",
            FieldType::Rational => "RATIONAL",
            FieldType::SByte => "SBYTE",
            FieldType::Undefined => "UNDEFINED",
            FieldType::SShort => "SSHORT",
            FieldType::SLong => "SLONG",
            FieldType::SRational => "SRATIONAL",
            FieldType::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Unknown(code) => write!(f, "UNKNOWN({})", code),
            known => f.write_str(known.name()),
        }
    }
}

// =============================================================================
// Directories
// =============================================================================

/// The directory a tag was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IfdKind {
    /// Primary image directory
    Ifd0,
    /// EXIF sub-IFD (pointer 0x8769 in IFD0)
    Exif,
    /// GPS IFD (pointer 0x8825 in IFD0)
    Gps,
    /// Interoperability IFD (pointer 0xA005 in the EXIF IFD)
    Interop,
}

impl IfdKind {
    pub const fn name(self) -> &'static str {
        match self {
            IfdKind::Ifd0 => "IFD0",
            IfdKind::Exif => "EXIF",
            IfdKind::Gps => "GPS",
            IfdKind::Interop => "Interop",
        }
    }
}

impl fmt::Display for IfdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// IFD0 / EXIF / Interop Tags
// =============================================================================

/// Tag IDs of IFD0, the EXIF sub-IFD and the Interop IFD.
///
/// These three directories share one ID space. GPS tags live in their own
/// space (see [`GpsTag`]) and overlap these numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ExifTag {
    // -------------------------------------------------------------------------
    // Interop
    // -------------------------------------------------------------------------
    InteroperabilityIndex = 0x0001,
    InteroperabilityVersion = 0x0002,

    // -------------------------------------------------------------------------
    // IFD0
    // -------------------------------------------------------------------------
    ImageWidth = 0x0100,
    ImageLength = 0x0101,
    BitsPerSample = 0x0102,
    ImageDescription = 0x010E,
    Make = 0x010F,
    Model = 0x0110,
    Orientation = 0x0112,
    XResolution = 0x011A,
    YResolution = 0x011B,
    ResolutionUnit = 0x0128,
    Software = 0x0131,
    DateTime = 0x0132,
    Artist = 0x013B,
    YCbCrPositioning = 0x0213,
    Copyright = 0x8298,

    /// Offset of the EXIF sub-IFD
    ExifIfdPointer = 0x8769,

    /// Offset of the GPS IFD
    GpsIfdPointer = 0x8825,

    // -------------------------------------------------------------------------
    // EXIF sub-IFD
    // -------------------------------------------------------------------------
    ExposureTime = 0x829A,
    FNumber = 0x829D,
    ExposureProgram = 0x8822,
    IsoSpeedRatings = 0x8827,
    ExifVersion = 0x9000,
    DateTimeOriginal = 0x9003,
    DateTimeDigitized = 0x9004,
    OffsetTime = 0x9010,
    ShutterSpeedValue = 0x9201,
    ApertureValue = 0x9202,
    BrightnessValue = 0x9203,
    ExposureBiasValue = 0x9204,
    MaxApertureValue = 0x9205,
    MeteringMode = 0x9207,
    Flash = 0x9209,
    FocalLength = 0x920A,
    MakerNote = 0x927C,
    UserComment = 0x9286,
    SubSecTimeOriginal = 0x9291,
    FlashpixVersion = 0xA000,
    ColorSpace = 0xA001,
    PixelXDimension = 0xA002,
    PixelYDimension = 0xA003,

    /// Offset of the Interop IFD
    InteropIfdPointer = 0xA005,

    ExposureMode = 0xA402,
    WhiteBalance = 0xA403,
    DigitalZoomRatio = 0xA404,
    FocalLengthIn35mmFilm = 0xA405,
    SceneCaptureType = 0xA406,
    LensMake = 0xA433,
    LensModel = 0xA434,
}

impl ExifTag {
    const ALL: &'static [ExifTag] = &[
        ExifTag::InteroperabilityIndex,
        ExifTag::InteroperabilityVersion,
        ExifTag::ImageWidth,
        ExifTag::ImageLength,
        ExifTag::BitsPerSample,
        ExifTag::ImageDescription,
        ExifTag::Make,
        ExifTag::Model,
        ExifTag::Orientation,
        ExifTag::XResolution,
        ExifTag::YResolution,
        ExifTag::ResolutionUnit,
        ExifTag::Software,
        ExifTag::DateTime,
        ExifTag::Artist,
        ExifTag::YCbCrPositioning,
        ExifTag::Copyright,
        ExifTag::ExifIfdPointer,
        ExifTag::GpsIfdPointer,
        ExifTag::ExposureTime,
        ExifTag::FNumber,
        ExifTag::ExposureProgram,
        ExifTag::IsoSpeedRatings,
        ExifTag::ExifVersion,
        ExifTag::DateTimeOriginal,
        ExifTag::DateTimeDigitized,
        ExifTag::OffsetTime,
        ExifTag::ShutterSpeedValue,
        ExifTag::ApertureValue,
        ExifTag::BrightnessValue,
        ExifTag::ExposureBiasValue,
        ExifTag::MaxApertureValue,
        ExifTag::MeteringMode,
        ExifTag::Flash,
        ExifTag::FocalLength,
        ExifTag::MakerNote,
        ExifTag::UserComment,
        ExifTag::SubSecTimeOriginal,
        ExifTag::FlashpixVersion,
        ExifTag::ColorSpace,
        ExifTag::PixelXDimension,
        ExifTag::PixelYDimension,
        ExifTag::InteropIfdPointer,
        ExifTag::ExposureMode,
        ExifTag::WhiteBalance,
        ExifTag::DigitalZoomRatio,
        ExifTag::FocalLengthIn35mmFilm,
        ExifTag::SceneCaptureType,
        ExifTag::LensMake,
        ExifTag::LensModel,
    ];

    /// Look up a tag by its numeric ID. Unknown IDs are not an error.
    pub fn from_u16(value: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|tag| tag.as_u16() == value)
    }

    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    pub const fn name(self) -> &'static str {
        match self {
            ExifTag::InteroperabilityIndex => "InteroperabilityIndex",
            ExifTag::InteroperabilityVersion => "InteroperabilityVersion",
            ExifTag::ImageWidth => "ImageWidth",
            ExifTag::ImageLength => "ImageLength",
            ExifTag::BitsPerSample => "BitsPerSample",
            ExifTag::ImageDescription => "ImageDescription",
            ExifTag::Make => "Make",
            ExifTag::Model => "Model",
            ExifTag::Orientation => "Orientation",
            ExifTag::XResolution => "XResolution",
            ExifTag::YResolution => "YResolution",
            ExifTag::ResolutionUnit => "ResolutionUnit",
            ExifTag::Software => "Software",
            ExifTag::DateTime => "DateTime",
            ExifTag::Artist => "Artist",
            ExifTag::YCbCrPositioning => "YCbCrPositioning",
            ExifTag::Copyright => "Copyright",
            ExifTag::ExifIfdPointer => "ExifIfdPointer",
            ExifTag::GpsIfdPointer => "GpsIfdPointer",
            ExifTag::ExposureTime => "ExposureTime",
            ExifTag::FNumber => "FNumber",
            ExifTag::ExposureProgram => "ExposureProgram",
            ExifTag::IsoSpeedRatings => "ISOSpeedRatings",
            ExifTag::ExifVersion => "ExifVersion",
            ExifTag::DateTimeOriginal => "DateTimeOriginal",
            ExifTag::DateTimeDigitized => "DateTimeDigitized",
            ExifTag::OffsetTime => "OffsetTime",
            ExifTag::ShutterSpeedValue => "ShutterSpeedValue",
            ExifTag::ApertureValue => "ApertureValue",
            ExifTag::BrightnessValue => "BrightnessValue",
            ExifTag::ExposureBiasValue => "ExposureBiasValue",
            ExifTag::MaxApertureValue => "MaxApertureValue",
            ExifTag::MeteringMode => "MeteringMode",
            ExifTag::Flash => "Flash",
            ExifTag::FocalLength => "FocalLength",
            ExifTag::MakerNote => "MakerNote",
            ExifTag::UserComment => "UserComment",
            ExifTag::SubSecTimeOriginal => "SubSecTimeOriginal",
            ExifTag::FlashpixVersion => "FlashpixVersion",
            ExifTag::ColorSpace => "ColorSpace",
            ExifTag::PixelXDimension => "PixelXDimension",
            ExifTag::PixelYDimension => "PixelYDimension",
            ExifTag::InteropIfdPointer => "InteropIfdPointer",
            ExifTag::ExposureMode => "ExposureMode",
            ExifTag::WhiteBalance => "WhiteBalance",
            ExifTag::DigitalZoomRatio => "DigitalZoomRatio",
            ExifTag::FocalLengthIn35mmFilm => "FocalLengthIn35mmFilm",
            ExifTag::SceneCaptureType => "SceneCaptureType",
            ExifTag::LensMake => "LensMake",
            ExifTag::LensModel => "LensModel",
        }
    }
}

// =============================================================================
// GPS Tags
// =============================================================================

/// Tag IDs of the GPS IFD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum GpsTag {
    GpsVersionId = 0x0000,
    GpsLatitudeRef = 0x0001,
    GpsLatitude = 0x0002,
    GpsLongitudeRef = 0x0003,
    GpsLongitude = 0x0004,
    GpsAltitudeRef = 0x0005,
    GpsAltitude = 0x0006,
    GpsTimeStamp = 0x0007,
    GpsSatellites = 0x0008,
    GpsStatus = 0x0009,
    GpsMeasureMode = 0x000A,
    GpsDop = 0x000B,
    GpsSpeedRef = 0x000C,
    GpsSpeed = 0x000D,
    GpsTrackRef = 0x000E,
    GpsTrack = 0x000F,
    GpsImgDirectionRef = 0x0010,
    GpsImgDirection = 0x0011,
    GpsMapDatum = 0x0012,
    GpsProcessingMethod = 0x001B,
    GpsDateStamp = 0x001D,
}

impl GpsTag {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0000 => Some(GpsTag::GpsVersionId),
            0x0001 => Some(GpsTag::GpsLatitudeRef),
            0x0002 => Some(GpsTag::GpsLatitude),
            0x0003 => Some(GpsTag::GpsLongitudeRef),
            0x0004 => Some(GpsTag::GpsLongitude),
            0x0005 => Some(GpsTag::GpsAltitudeRef),
            0x0006 => Some(GpsTag::GpsAltitude),
            0x0007 => Some(GpsTag::GpsTimeStamp),
            0x0008 => Some(GpsTag::GpsSatellites),
            0x0009 => Some(GpsTag::GpsStatus),
            0x000A => Some(GpsTag::GpsMeasureMode),
            0x000B => Some(GpsTag::GpsDop),
            0x000C => Some(GpsTag::GpsSpeedRef),
            0x000D => Some(GpsTag::GpsSpeed),
            0x000E => Some(GpsTag::GpsTrackRef),
            0x000F => Some(GpsTag::GpsTrack),
            0x0010 => Some(GpsTag::GpsImgDirectionRef),
            0x0011 => Some(GpsTag::GpsImgDirection),
            0x0012 => Some(GpsTag::GpsMapDatum),
            0x001B => Some(GpsTag::GpsProcessingMethod),
            0x001D => Some(GpsTag::GpsDateStamp),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    pub const fn name(self) -> &'static str {
        match self {
            GpsTag::GpsVersionId => "GPSVersionID",
            GpsTag::GpsLatitudeRef => "GPSLatitudeRef",
            GpsTag::GpsLatitude => "GPSLatitude",
            GpsTag::GpsLongitudeRef => "GPSLongitudeRef",
            GpsTag::GpsLongitude => "GPSLongitude",
            GpsTag::GpsAltitudeRef => "GPSAltitudeRef",
            GpsTag::GpsAltitude => "GPSAltitude",
            GpsTag::GpsTimeStamp => "GPSTimeStamp",
            GpsTag::GpsSatellites => "GPSSatellites",
            GpsTag::GpsStatus => "GPSStatus",
            GpsTag::GpsMeasureMode => "GPSMeasureMode",
            GpsTag::GpsDop => "GPSDOP",
            GpsTag::GpsSpeedRef => "GPSSpeedRef",
            GpsTag::GpsSpeed => "GPSSpeed",
            GpsTag::GpsTrackRef => "GPSTrackRef",
            GpsTag::GpsTrack => "GPSTrack",
            GpsTag::GpsImgDirectionRef => "GPSImgDirectionRef",
            GpsTag::GpsImgDirection => "GPSImgDirection",
            GpsTag::GpsMapDatum => "GPSMapDatum",
            GpsTag::GpsProcessingMethod => "GPSProcessingMethod",
            GpsTag::GpsDateStamp => "GPSDateStamp",
        }
    }
}

/// Name of a tag in the given directory, if it is a well-known one.
pub fn tag_name(kind: IfdKind, tag: u16) -> Option<&'static str> {
    match kind {
        IfdKind::Gps => GpsTag::from_u16(tag).map(GpsTag::name),
        _ => ExifTag::from_u16(tag).map(ExifTag::name),
    }
}

// =============================================================================
// Tests
// =============================================================================
