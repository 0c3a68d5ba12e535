//! The `cmap` table maps characters to glyphs.
//!
//! Only the Windows full-repertoire Unicode subtable (platform 3, encoding 10)
//! is used, and it has to be in format 12.

use rustc_hash::FxHashMap;

use crate::read::{Readable, Reader};
use crate::{Error, Result};

mod subtable12;

#[derive(Debug, Copy, Clone)]
struct EncodingRecord {
    platform_id: u16,
    encoding_id: u16,
    subtable_offset: u32,
}

impl EncodingRecord {
    fn is_full_unicode(&self) -> bool {
        self.platform_id == 3 && self.encoding_id == 10
    }
}

impl Readable<'_> for EncodingRecord {
    const SIZE: usize = 8;

    fn read(r: &mut Reader) -> Option<Self> {
        let platform_id = r.read::<u16>()?;
        let encoding_id = r.read::<u16>()?;
        let subtable_offset = r.read::<u32>()?;

        Some(EncodingRecord { platform_id, encoding_id, subtable_offset })
    }
}

/// A decoded character map.
#[derive(Debug, Clone, Default)]
pub struct Cmap {
    map: FxHashMap<u32, u16>,
}

impl Cmap {
    /// Parse the table and expand its Unicode subtable.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut r = Reader::new(data);
        r.read::<u16>().ok_or(Error::MissingData)?; // version
        let num_tables = r.read::<u16>().ok_or(Error::MissingData)?;

        let mut selected = None;
        for _ in 0..num_tables {
            let record = r.read::<EncodingRecord>().ok_or(Error::MissingData)?;
            if record.is_full_unicode() {
                selected = Some(record);
                break;
            }
        }

        let record = selected.ok_or(Error::UnsupportedEncoding)?;
        let subtable = data
            .get(record.subtable_offset as usize..)
            .ok_or(Error::InvalidOffset)?;
        let map = subtable12::parse(subtable)?;
        log::debug!("cmap maps {} code points", map.len());

        Ok(Self { map })
    }

    /// Look up the glyph for a code point.
    pub fn get(&self, code_point: u32) -> Option<u16> {
        self.map.get(&code_point).copied()
    }

    /// The number of mapped code points.
    pub fn len(&self) -> usize {
        self.map.len()
    }
}
