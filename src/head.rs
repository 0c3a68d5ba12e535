//! The `head` table holds global information about the font.

use crate::read::{Fixed, Reader};
use crate::{Error, Result, Tag};

const MAGIC_NUMBER: u32 = 0x5F0F3CF5;

/// The font header.
#[derive(Debug, Clone, PartialEq)]
pub struct Head {
    /// The font revision set by the manufacturer.
    pub font_revision: f32,
    /// The checksum adjustment that makes the whole file sum to `0xB1B0AFBA`.
    pub checksum_adjustment: u32,
    /// Header flags.
    pub flags: u16,
    /// Design units per em, between 16 and 16384.
    pub units_per_em: u16,
    /// Seconds since 1904-01-01 at creation.
    pub created: i64,
    /// Seconds since 1904-01-01 at the last modification.
    pub modified: i64,
    /// Minimum x of all glyph bounding boxes.
    pub x_min: i16,
    /// Minimum y of all glyph bounding boxes.
    pub y_min: i16,
    /// Maximum x of all glyph bounding boxes.
    pub x_max: i16,
    /// Maximum y of all glyph bounding boxes.
    pub y_max: i16,
    /// Bold, italic and similar style bits.
    pub mac_style: u16,
    /// Smallest readable size in pixels.
    pub lowest_rec_ppem: u16,
    /// 0 for short `loca` offsets, 1 for long ones.
    pub index_to_loc_format: i16,
}

impl Head {
    /// Parse the table.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut r = Reader::new(data);
        let major = r.read::<u16>().ok_or(Error::MissingData)?;
        r.read::<u16>().ok_or(Error::MissingData)?; // minor version
        if major != 1 {
            return Err(Error::UnknownFormat { structure: "head", format: major });
        }

        let font_revision = r.read::<Fixed>().ok_or(Error::MissingData)?.0;
        let checksum_adjustment = r.read::<u32>().ok_or(Error::MissingData)?;
        let magic = r.read::<u32>().ok_or(Error::MissingData)?;
        if magic != MAGIC_NUMBER {
            log::warn!("head magic number is {magic:#010x}");
            return Err(Error::BadMagic(Tag::HEAD));
        }

        let head = (|| {
            Some(Head {
                font_revision,
                checksum_adjustment,
                flags: r.read()?,
                units_per_em: r.read()?,
                created: r.read()?,
                modified: r.read()?,
                x_min: r.read()?,
                y_min: r.read()?,
                x_max: r.read()?,
                y_max: r.read()?,
                mac_style: r.read()?,
                lowest_rec_ppem: r.read()?,
                // fontDirectionHint is deprecated.
                index_to_loc_format: {
                    r.read::<i16>()?;
                    r.read()?
                },
            })
        })();

        head.ok_or(Error::MissingData)
    }
}
