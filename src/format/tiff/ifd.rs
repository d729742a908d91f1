//! Image File Directory decoding.
//!
//! # IFD Structure
//!
//! ```text
//! Bytes 0-1:   Entry count N
//! Bytes 2-13:  Entry 0
//! ...          Entry N-1
//! Next 4:      Offset of the next IFD (ignored here; IFD1 is the thumbnail)
//! ```
//!
//! Each 12-byte entry is `tag(u16) type(u16) count(u32) value_or_offset(4)`.
//! When the value is at most 4 bytes long it sits in the last field,
//! left-aligned; otherwise that field is an offset from the start of the
//! EXIF payload.
//!
//! # Traversal
//!
//! Only fixed, known pointers are followed: the EXIF and GPS pointers of IFD0,
//! then optionally the Interop pointer of the EXIF IFD. Every directory offset
//! is remembered so a crafted file cannot make two groups share (or loop back
//! into) the same table.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::{EntryError, ExifError};
use crate::io::ByteCursor;

use super::tags::{ExifTag, FieldType, IfdKind};
use super::values::{decode_value, RawTagValue};

/// Size of one directory entry in bytes.
pub const IFD_ENTRY_SIZE: usize = 12;

/// Size of the entry count field.
const IFD_COUNT_SIZE: usize = 2;

// =============================================================================
// IfdEntry / IfdGroup
// =============================================================================

/// One decoded directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfdEntry {
    pub tag_id: u16,
    pub value_type: FieldType,
    pub count: u32,
    pub value: RawTagValue,
}

/// All entries of one directory, keyed by tag ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfdGroup {
    kind: IfdKind,
    entries: BTreeMap<u16, IfdEntry>,
}

impl IfdGroup {
    pub(crate) fn new(kind: IfdKind) -> Self {
        Self {
            kind,
            entries: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> IfdKind {
        self.kind
    }

    pub fn get(&self, tag_id: u16) -> Option<&IfdEntry> {
        self.entries.get(&tag_id)
    }

    pub fn contains(&self, tag_id: u16) -> bool {
        self.entries.contains_key(&tag_id)
    }

    /// Entries in ascending tag order.
    pub fn entries(&self) -> impl Iterator<Item = &IfdEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert an entry unless the tag is already present.
    pub(crate) fn insert_first(&mut self, entry: IfdEntry) -> bool {
        match self.entries.entry(entry.tag_id) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(entry);
                true
            }
        }
    }
}

// =============================================================================
// IfdDecoder
// =============================================================================

/// Result of walking the directory chain of one EXIF payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedIfds {
    pub groups: Vec<IfdGroup>,
    pub errors: Vec<EntryError>,
}

/// Decodes IFD0 and the sub-directories it points to.
///
/// The decoder borrows the EXIF payload for its lifetime; every value it
/// produces is copied out, so the result does not borrow the payload.
pub struct IfdDecoder<'a> {
    cursor: ByteCursor<'a>,
    follow_interop: bool,
    visited: Vec<u32>,
    errors: Vec<EntryError>,
}

impl<'a> IfdDecoder<'a> {
    /// Create a decoder over an EXIF payload (starting at the TIFF header).
    pub fn new(cursor: ByteCursor<'a>) -> Self {
        Self {
            cursor,
            follow_interop: true,
            visited: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Enable or disable following the Interop pointer of the EXIF IFD.
    ///
    /// The Interop directory is a third hop beyond the IFD0/EXIF/GPS set and
    /// is decoded by default; pass `false` to stop at EXIF and GPS.
    pub fn with_interop(mut self, follow: bool) -> Self {
        self.follow_interop = follow;
        self
    }

    /// Decode IFD0 at `ifd0_offset` plus its EXIF, GPS and Interop directories.
    ///
    /// # Errors
    /// Fails only if IFD0's own entry table cannot be read. Problems in
    /// individual entries or in sub-directories are collected in
    /// [`DecodedIfds::errors`].
    pub fn decode(mut self, ifd0_offset: u32) -> Result<DecodedIfds, ExifError> {
        let ifd0 = self.decode_directory(IfdKind::Ifd0, ifd0_offset)?;

        let mut groups = Vec::with_capacity(4);
        let exif = self.follow_pointer(&ifd0, ExifTag::ExifIfdPointer, IfdKind::Exif);
        let gps = self.follow_pointer(&ifd0, ExifTag::GpsIfdPointer, IfdKind::Gps);
        let interop = match (&exif, self.follow_interop) {
            (Some(exif), true) => {
                self.follow_pointer(exif, ExifTag::InteropIfdPointer, IfdKind::Interop)
            }
            _ => None,
        };

        groups.push(ifd0);
        groups.extend(exif);
        groups.extend(gps);
        groups.extend(interop);

        Ok(DecodedIfds {
            groups,
            errors: self.errors,
        })
    }

    /// Decode the sub-directory that `parent`'s `pointer` tag refers to.
    ///
    /// Any failure is recorded and yields `None`.
    fn follow_pointer(
        &mut self,
        parent: &IfdGroup,
        pointer: ExifTag,
        kind: IfdKind,
    ) -> Option<IfdGroup> {
        let entry = parent.get(pointer.as_u16())?;

        let Some(offset) = entry.value.as_u32() else {
            self.record(EntryError::InvalidPointer {
                group: parent.kind(),
                tag: entry.tag_id,
            });
            return None;
        };

        if self.visited.contains(&offset) {
            self.record(EntryError::PointerCycle {
                group: kind,
                offset,
            });
            return None;
        }

        debug!(group = %kind, offset = offset, "Following sub-IFD pointer");

        match self.decode_directory(kind, offset) {
            Ok(group) => Some(group),
            Err(source) => {
                self.record(EntryError::SubIfd {
                    group: kind,
                    source,
                });
                None
            }
        }
    }

    /// Decode one directory table at `offset`.
    fn decode_directory(&mut self, kind: IfdKind, offset: u32) -> Result<IfdGroup, ExifError> {
        self.visited.push(offset);

        let start = offset as usize;
        let count = self.cursor.read_u16(start)? as usize;
        let table_start = start + IFD_COUNT_SIZE;

        // The whole table must be present before any entry is trusted
        self.cursor.bytes(table_start, count * IFD_ENTRY_SIZE)?;

        debug!(group = %kind, offset = offset, entries = count, "Decoding IFD");

        let mut group = IfdGroup::new(kind);
        for index in 0..count {
            let entry_offset = table_start + index * IFD_ENTRY_SIZE;
            match self.decode_entry(kind, entry_offset) {
                Ok(entry) => {
                    let tag = entry.tag_id;
                    if !group.insert_first(entry) {
                        self.record(EntryError::DuplicateTag { group: kind, tag });
                    }
                }
                Err(err) => self.record(err),
            }
        }

        Ok(group)
    }

    /// Decode the 12-byte entry at `entry_offset`.
    ///
    /// The caller has already bounds-checked the entry table; a read of the
    /// entry itself that still fails is reported as
    /// [`EntryError::TruncatedEntry`].
    fn decode_entry(&self, kind: IfdKind, entry_offset: usize) -> Result<IfdEntry, EntryError> {
        let truncated = |_| EntryError::TruncatedEntry {
            group: kind,
            offset: entry_offset,
        };

        let tag_id = self.cursor.read_u16(entry_offset).map_err(truncated)?;
        let type_raw = self.cursor.read_u16(entry_offset + 2).map_err(truncated)?;
        let count = self.cursor.read_u32(entry_offset + 4).map_err(truncated)?;
        let value_field = entry_offset + 8;

        let value_type = FieldType::from_u16(type_raw);

        let raw = match value_type.byte_length(count) {
            None => {
                // Unknown type: element size is unknown, keep the field itself
                debug!(
                    group = %kind,
                    tag = tag_id,
                    field_type = type_raw,
                    "Preserving entry of unknown type as raw bytes"
                );
                self.cursor.bytes(value_field, 4).map_err(truncated)?
            }
            Some(length) if value_type.fits_inline(count) => self
                .cursor
                .bytes(value_field, length as usize)
                .map_err(truncated)?,
            Some(length) => {
                let value_offset = self.cursor.read_u32(value_field).map_err(truncated)?;
                let len = usize::try_from(length).map_err(|_| EntryError::LengthOverflow {
                    group: kind,
                    tag: tag_id,
                    count,
                })?;
                self.cursor
                    .bytes(value_offset as usize, len)
                    .map_err(|_| EntryError::ValueOutOfBounds {
                        group: kind,
                        tag: tag_id,
                        offset: value_offset,
                        length,
                    })?
            }
        };

        Ok(IfdEntry {
            tag_id,
            value_type,
            count,
            value: decode_value(value_type, count, raw, self.cursor.byte_order()),
        })
    }

    fn record(&mut self, error: EntryError) {
        warn!(group = %error.group(), "Skipping malformed EXIF data: {}", error);
        self.errors.push(error);
    }
}

// =============================================================================
// Tests
// =============================================================================
