use rustc_hash::FxHashMap;

use crate::read::Reader;
use crate::{Error, Result};

/// Enumerates Charset IDs defined in the Adobe Technical Note #5176, Table 22
pub mod charset_id {
    pub const ISO_ADOBE: usize = 0;
    pub const EXPERT: usize = 1;
    pub const EXPERT_SUBSET: usize = 2;
}

/// The highest SID of the ISOAdobe charset.
const ISO_ADOBE_LAST_SID: u16 = 228;

/// Maps glyph ids to string ids. Glyph 0 is always `.notdef` and never part
/// of the map.
#[derive(Clone, Debug, PartialEq)]
pub enum Charset {
    /// The predefined charset where glyph `n` has SID `n`.
    IsoAdobe,
    /// A charset stored in the font.
    Custom(FxHashMap<u16, u16>),
}

impl Charset {
    /// The SID of a glyph.
    pub fn sid(&self, gid: u16) -> Option<u16> {
        match self {
            _ if gid == 0 => Some(0),
            Charset::IsoAdobe => (gid <= ISO_ADOBE_LAST_SID).then_some(gid),
            Charset::Custom(map) => map.get(&gid).copied(),
        }
    }
}

/// Parse the charset the Top DICT points to for a font with `num_glyphs`
/// glyphs.
pub fn parse_charset(table: &[u8], offset: usize, num_glyphs: u16) -> Result<Charset> {
    match offset {
        charset_id::ISO_ADOBE => return Ok(Charset::IsoAdobe),
        charset_id::EXPERT | charset_id::EXPERT_SUBSET => {
            return Err(Error::Unimplemented("expert charsets"))
        }
        _ => {}
    }

    let mut r = Reader::new_at(table, offset);
    let format = r.read::<u8>().ok_or(Error::MissingData)?;
    let mut map = FxHashMap::default();

    match format {
        0 => {
            for gid in 1..num_glyphs {
                map.insert(gid, r.read::<u16>().ok_or(Error::MissingData)?);
            }
        }
        1 | 2 => {
            let mut gid = 1;
            while gid < num_glyphs {
                let first = r.read::<u16>().ok_or(Error::MissingData)?;
                let n_left = if format == 1 {
                    r.read::<u8>().map(u16::from)
                } else {
                    r.read::<u16>()
                }
                .ok_or(Error::MissingData)?;

                for sid in first..=first.saturating_add(n_left) {
                    if gid == num_glyphs {
                        break;
                    }
                    map.insert(gid, sid);
                    gid += 1;
                }
            }
        }
        _ => return Err(Error::UnknownFormat { structure: "charset", format: format.into() }),
    }

    Ok(Charset::Custom(map))
}
