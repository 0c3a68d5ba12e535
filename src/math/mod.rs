//! The `MATH` table: layout constants, extended shapes and glyph constructions.

mod constants;
mod coverage;
mod glyph_info;
mod variants;

use std::sync::Arc;

pub use self::constants::{MathConstants, MathValueRecord};
pub use self::coverage::{Coverage, RangeRecord};
pub use self::glyph_info::MathGlyphInfo;
pub use self::variants::{
    GlyphAssembly, GlyphConstruction, GlyphConstructionTable, GlyphPartRecord,
    GlyphVariantRecord, MathVariants,
};

use crate::read::Reader;
use crate::{Error, Result};

/// A parsed MATH table.
#[derive(Debug)]
pub struct MathTable {
    /// Global layout constants.
    pub constants: MathConstants,
    /// Per-glyph information.
    pub glyph_info: MathGlyphInfo,
    /// Variants and assemblies of stretchy glyphs.
    pub variants: MathVariants,
}

impl MathTable {
    /// Parse the table. Glyph constructions are decoded later, on demand.
    pub fn parse(data: Arc<[u8]>) -> Result<Self> {
        let mut r = Reader::new(&data);
        let major = r.read::<u16>().ok_or(Error::MissingData)?;
        if major != 1 {
            return Err(Error::UnknownFormat { structure: "MATH", format: major });
        }

        r.skip_bytes(2).ok_or(Error::MissingData)?;
        let constants = usize::from(r.read::<u16>().ok_or(Error::MissingData)?);
        let glyph_info = usize::from(r.read::<u16>().ok_or(Error::MissingData)?);
        let variants = usize::from(r.read::<u16>().ok_or(Error::MissingData)?);

        Ok(Self {
            constants: MathConstants::parse(&data, constants)?,
            glyph_info: MathGlyphInfo::parse(&data, glyph_info)?,
            variants: MathVariants::parse(data.clone(), variants)?,
        })
    }
}
