use crate::read::{Readable, Reader};
use crate::{Error, Result};

/// A run of consecutive glyphs in a format 2 coverage table.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RangeRecord {
    /// First glyph of the range.
    pub start: u16,
    /// Last glyph of the range, inclusive.
    pub end: u16,
    /// Coverage index of `start`.
    pub start_coverage_index: u16,
}

impl Readable<'_> for RangeRecord {
    const SIZE: usize = 6;

    fn read(r: &mut Reader) -> Option<Self> {
        Some(Self { start: r.read()?, end: r.read()?, start_coverage_index: r.read()? })
    }
}

/// The set of glyphs a table applies to, each with a coverage index.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Coverage {
    /// Format 1: the glyphs in coverage index order.
    Glyphs(Vec<u16>),
    /// Format 2: ranges of glyphs.
    Ranges(Vec<RangeRecord>),
}

impl Coverage {
    /// Parse the coverage table at `offset`.
    pub fn parse(data: &[u8], offset: usize) -> Result<Self> {
        let mut r = Reader::new_at(data, offset);
        let format = r.read::<u16>().ok_or(Error::MissingData)?;
        let count = usize::from(r.read::<u16>().ok_or(Error::MissingData)?);
        match format {
            1 => Ok(Self::Glyphs(r.read_vector(count).ok_or(Error::MissingData)?)),
            2 => Ok(Self::Ranges(r.read_vector(count).ok_or(Error::MissingData)?)),
            _ => Err(Error::UnknownFormat { structure: "coverage", format }),
        }
    }

    /// The coverage index of a glyph, `None` if the glyph is not covered.
    pub fn index_of(&self, glyph_id: u16) -> Option<u16> {
        match self {
            Self::Glyphs(glyphs) => {
                glyphs.iter().position(|&g| g == glyph_id).and_then(|i| u16::try_from(i).ok())
            }
            Self::Ranges(ranges) => ranges
                .iter()
                .find(|range| (range.start..=range.end).contains(&glyph_id))
                .and_then(|range| {
                    range.start_coverage_index.checked_add(glyph_id - range.start)
                }),
        }
    }

    /// Whether the glyph is covered.
    pub fn contains(&self, glyph_id: u16) -> bool {
        self.index_of(glyph_id).is_some()
    }

    /// The covered glyphs in coverage index order.
    pub fn glyphs(&self) -> Vec<u16> {
        match self {
            Self::Glyphs(glyphs) => glyphs.clone(),
            Self::Ranges(ranges) => {
                let mut ranges = ranges.clone();
                ranges.sort_by_key(|range| range.start_coverage_index);
                ranges.iter().flat_map(|range| range.start..=range.end).collect()
            }
        }
    }
}

impl Default for Coverage {
    fn default() -> Self {
        Self::Glyphs(vec![])
    }
}
