use rustc_hash::FxHashMap;

use crate::read::{Readable, Reader};
use crate::{Error, Result};

#[derive(Debug, Copy, Clone)]
struct SequentialMapGroupRecord {
    start_char_code: u32,
    end_char_code: u32,
    start_glyph_id: u32,
}

impl Readable<'_> for SequentialMapGroupRecord {
    const SIZE: usize = 12;

    fn read(r: &mut Reader<'_>) -> Option<Self> {
        let start_char_code = r.read::<u32>()?;
        let end_char_code = r.read::<u32>()?;
        let start_glyph_id = r.read::<u32>()?;

        Some(Self { start_char_code, end_char_code, start_glyph_id })
    }
}

/// Expand a format 12 (segmented coverage) subtable into a direct map.
pub fn parse(data: &[u8]) -> Result<FxHashMap<u32, u16>> {
    let mut r = Reader::new(data);
    let format = r.read::<u16>().ok_or(Error::MissingData)?;
    if format != 12 {
        return Err(Error::UnknownFormat { structure: "cmap subtable", format });
    }

    r.read::<u16>().ok_or(Error::MissingData)?; // reserved
    r.read::<u32>().ok_or(Error::MissingData)?; // length
    r.read::<u32>().ok_or(Error::MissingData)?; // language
    let num_groups = r.read::<u32>().ok_or(Error::MissingData)?;

    let groups = r
        .read_vector::<SequentialMapGroupRecord>(num_groups as usize)
        .ok_or(Error::MissingData)?;

    let mut map = FxHashMap::default();
    for group in groups {
        if group.end_char_code < group.start_char_code {
            return Err(Error::InvalidOffset);
        }

        for code_point in group.start_char_code..=group.end_char_code {
            let id = group
                .start_glyph_id
                .checked_add(code_point - group.start_char_code)
                .and_then(|id| u16::try_from(id).ok());
            match id {
                Some(id) => {
                    map.insert(code_point, id);
                }
                // Glyph ids beyond 16 bits cannot exist in the font.
                None => break,
            }
        }
    }

    Ok(map)
}
