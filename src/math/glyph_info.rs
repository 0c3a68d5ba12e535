use super::coverage::Coverage;
use crate::read::Reader;
use crate::{Error, Result};

/// Per-glyph math information.
///
/// Only the extended shape coverage is decoded. Italics corrections, top
/// accent attachments and kerning are skipped.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct MathGlyphInfo {
    extended_shapes: Option<Coverage>,
}

impl MathGlyphInfo {
    /// Parse the glyph info at `offset` in the MATH table.
    pub fn parse(data: &[u8], offset: usize) -> Result<Self> {
        let mut r = Reader::new_at(data, offset);
        // Italics correction and top accent attachment.
        r.skip_bytes(4).ok_or(Error::MissingData)?;
        let extended = r.read::<u16>().ok_or(Error::MissingData)?;

        let extended_shapes = match extended {
            0 => None,
            n => Some(Coverage::parse(data, offset + usize::from(n))?),
        };

        Ok(Self { extended_shapes })
    }

    /// Whether a glyph is an extended shape, such as a tall delimiter.
    pub fn is_extended_shape(&self, glyph_id: u16) -> bool {
        self.extended_shapes.as_ref().is_some_and(|c| c.contains(glyph_id))
    }

    /// The coverage listing all extended shapes.
    pub fn extended_shape_coverage(&self) -> Option<&Coverage> {
        self.extended_shapes.as_ref()
    }
}
