//! The SFNT table directory.

use crate::read::{Readable, Reader};
use crate::{ByteSource, Error, Result, Tag};

/// What kind of outlines the font announces in its header.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FontKind {
    /// TrueType outlines (`0x00010000` or `true`).
    TrueType,
    /// CFF outlines (`OTTO`).
    Cff,
    /// A font collection (`ttcf`).
    Collection,
}

impl FontKind {
    fn from_version(version: u32) -> Result<Self> {
        match version {
            0x00010000 | 0x74727565 => Ok(FontKind::TrueType),
            0x4F54544F => Ok(FontKind::Cff),
            0x74746366 => Ok(FontKind::Collection),
            _ => Err(Error::UnknownKind),
        }
    }
}

/// Locates a table in the font file.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TableRecord {
    /// The table's tag.
    pub tag: Tag,
    /// The checksum stored in the directory.
    pub checksum: u32,
    /// Offset of the table from the start of the file.
    pub offset: u32,
    /// Length of the table in bytes.
    pub length: u32,
}

impl Readable<'_> for TableRecord {
    const SIZE: usize = 16;

    fn read(r: &mut Reader) -> Option<Self> {
        Some(TableRecord {
            tag: r.read::<Tag>()?,
            checksum: r.read::<u32>()?,
            offset: r.read::<u32>()?,
            length: r.read::<u32>()?,
        })
    }
}

/// The tables of one font face.
#[derive(Debug, Clone)]
pub struct TableDirectory {
    version: Tag,
    kind: FontKind,
    records: Vec<TableRecord>,
}

impl TableDirectory {
    /// Read the directory of face `index`.
    ///
    /// The `index` is only relevant if the source holds a font collection.
    /// Otherwise, it should be 0.
    pub fn parse<S: ByteSource + ?Sized>(source: &S, index: u32) -> Result<Self> {
        let mut base = 0;
        let mut version = u32::read_at(&source.read_range(0, 4)?, 0).ok_or(Error::MissingData)?;
        let mut kind = FontKind::from_version(version)?;

        // Parse font collection header if necessary.
        if kind == FontKind::Collection {
            let header = source.read_range(8, 4)?;
            let num_fonts = u32::read_at(&header, 0).ok_or(Error::MissingData)?;
            if index >= num_fonts {
                return Err(Error::InvalidOffset);
            }

            let at = 12 + 4 * index as usize;
            let offset = source.read_range(at, 4)?;
            base = u32::read_at(&offset, 0).ok_or(Error::MissingData)? as usize;

            version = u32::read_at(&source.read_range(base, 4)?, 0).ok_or(Error::MissingData)?;
            kind = FontKind::from_version(version)?;
            if kind == FontKind::Collection {
                return Err(Error::UnknownKind);
            }
        }

        let header = source.read_range(base, 12)?;
        let mut r = Reader::new_at(&header, 4);
        let count = r.read::<u16>().ok_or(Error::MissingData)?;
        // searchRange, entrySelector and rangeShift are derived values.

        let data = source.read_range(base + 12, usize::from(count) * TableRecord::SIZE)?;
        let mut r = Reader::new(&data);
        let mut records = r.read_vector::<TableRecord>(count.into()).ok_or(Error::MissingData)?;

        // Directories are supposed to be sorted, but lookups must not depend on it.
        records.sort_by_key(|record| record.tag);

        log::debug!("found {} tables in {:?} face {}", records.len(), kind, index);

        Ok(Self { version: Tag(version.to_be_bytes()), kind, records })
    }

    /// The sfnt version tag of the face.
    pub fn version(&self) -> Tag {
        self.version
    }

    /// What kind of outlines the face announces.
    pub fn kind(&self) -> FontKind {
        self.kind
    }

    /// All table records, sorted by tag.
    pub fn records(&self) -> &[TableRecord] {
        &self.records
    }

    /// Find the record of a table.
    pub fn find(&self, tag: Tag) -> Option<&TableRecord> {
        let i = self.records.binary_search_by(|record| record.tag.cmp(&tag)).ok()?;
        self.records.get(i)
    }

    /// Read the bytes of a table, failing if it is absent.
    pub fn read_table<S: ByteSource + ?Sized>(&self, source: &S, tag: Tag) -> Result<Vec<u8>> {
        let record = self.find(tag).ok_or(Error::MissingTable(tag))?;
        log::debug!("reading {} table: {} bytes at {}", tag, record.length, record.offset);
        source.read_range(record.offset as usize, record.length as usize)
    }

    /// Check a table's bytes against the checksum stored in its record.
    pub fn verify(&self, tag: Tag, data: &[u8]) -> Result<()> {
        let record = self.find(tag).ok_or(Error::MissingTable(tag))?;
        let mut sum = checksum(data);
        if tag == Tag::HEAD {
            // The checksum of head is computed with checkSumAdjustment zeroed.
            if let Some(adjustment) = u32::read_at(data, 8) {
                sum = sum.wrapping_sub(adjustment);
            }
        }

        if sum != record.checksum {
            log::warn!("{} checksum is {:#010x}, expected {:#010x}", tag, sum, record.checksum);
            return Err(Error::ChecksumMismatch(tag));
        }

        Ok(())
    }
}

/// Calculate a checksum over the sliced data as a sum of u32s. If the data
/// length is not a multiple of four, it is treated as if padded with zero to a
/// length that is a multiple of four.
pub fn checksum(data: &[u8]) -> u32 {
    let mut sum = 0u32;
    for chunk in data.chunks(4) {
        let mut bytes = [0; 4];
        bytes[..chunk.len()].copy_from_slice(chunk);
        sum = sum.wrapping_add(u32::from_be_bytes(bytes));
    }
    sum
}
