use std::fmt::{self, Debug, Formatter};
use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use super::constants::MathValueRecord;
use super::coverage::Coverage;
use crate::read::{Readable, Reader};
use crate::{Error, Result};

/// Variants and assemblies for glyphs that grow vertically or horizontally.
#[derive(Debug)]
pub struct MathVariants {
    /// Minimum overlap of connecting parts in an assembly.
    pub min_connector_overlap: u16,
    /// Constructions of glyphs that grow vertically, like parentheses.
    pub vertical: GlyphConstructionTable,
    /// Constructions of glyphs that grow horizontally, like wide accents.
    pub horizontal: GlyphConstructionTable,
}

impl MathVariants {
    /// Parse the variants at `offset` in the MATH table `data`.
    ///
    /// Only the coverage tables and offset arrays are read here, the
    /// constructions themselves are decoded on first lookup.
    pub fn parse(data: Arc<[u8]>, offset: usize) -> Result<Self> {
        let mut r = Reader::new_at(&data, offset);
        let min_connector_overlap = r.read::<u16>().ok_or(Error::MissingData)?;
        let vertical_coverage = r.read::<u16>().ok_or(Error::MissingData)?;
        let horizontal_coverage = r.read::<u16>().ok_or(Error::MissingData)?;
        let vertical_count = r.read::<u16>().ok_or(Error::MissingData)?;
        let horizontal_count = r.read::<u16>().ok_or(Error::MissingData)?;
        let vertical_offsets: Vec<u16> =
            r.read_vector(usize::from(vertical_count)).ok_or(Error::MissingData)?;
        let horizontal_offsets: Vec<u16> =
            r.read_vector(usize::from(horizontal_count)).ok_or(Error::MissingData)?;

        let coverage = |at: u16| match at {
            0 => Ok(Coverage::default()),
            at => Coverage::parse(&data, offset + usize::from(at)),
        };

        let vertical = GlyphConstructionTable {
            coverage: coverage(vertical_coverage)?,
            offsets: vertical_offsets,
            data: data.clone(),
            base: offset,
            cache: RwLock::default(),
        };

        let horizontal = GlyphConstructionTable {
            coverage: coverage(horizontal_coverage)?,
            offsets: horizontal_offsets,
            data: data.clone(),
            base: offset,
            cache: RwLock::default(),
        };

        log::debug!(
            "math variants with {vertical_count} vertical and {horizontal_count} horizontal constructions"
        );

        Ok(Self { min_connector_overlap, vertical, horizontal })
    }
}

/// The constructions for one direction, decoded lazily and memoized per glyph.
pub struct GlyphConstructionTable {
    coverage: Coverage,
    /// Construction offsets in coverage index order, relative to `base`.
    offsets: Vec<u16>,
    data: Arc<[u8]>,
    /// Start of the MathVariants table in `data`.
    base: usize,
    cache: RwLock<FxHashMap<u16, Arc<GlyphConstruction>>>,
}

impl GlyphConstructionTable {
    /// The glyphs that have a construction.
    pub fn coverage(&self) -> &Coverage {
        &self.coverage
    }

    /// The construction of a glyph, or `None` if the glyph has none.
    ///
    /// Repeated lookups of the same glyph return the same allocation.
    pub fn construction(&self, glyph_id: u16) -> Result<Option<Arc<GlyphConstruction>>> {
        let Some(index) = self.coverage.index_of(glyph_id) else {
            return Ok(None);
        };

        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(construction) = cache.get(&glyph_id) {
            return Ok(Some(construction.clone()));
        }
        drop(cache);

        let offset = *self.offsets.get(usize::from(index)).ok_or(Error::InvalidOffset)?;
        let construction =
            Arc::new(GlyphConstruction::parse(&self.data, self.base + usize::from(offset))?);
        log::trace!(
            "decoded construction of glyph {glyph_id} with {} variants",
            construction.variants.len()
        );

        // Another thread may have decoded the same glyph meanwhile. Both
        // results are equal, keep the first.
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Some(cache.entry(glyph_id).or_insert(construction).clone()))
    }
}

impl Debug for GlyphConstructionTable {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("GlyphConstructionTable")
            .field("coverage", &self.coverage)
            .field("offsets", &self.offsets)
            .finish_non_exhaustive()
    }
}

/// How to draw a glyph at larger sizes.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GlyphConstruction {
    /// Parts to assemble the glyph at arbitrary sizes.
    pub assembly: Option<GlyphAssembly>,
    /// Predrawn larger variants, growing in size.
    pub variants: Vec<GlyphVariantRecord>,
}

impl GlyphConstruction {
    fn parse(data: &[u8], offset: usize) -> Result<Self> {
        let mut r = Reader::new_at(data, offset);
        let assembly_offset = r.read::<u16>().ok_or(Error::MissingData)?;
        let count = r.read::<u16>().ok_or(Error::MissingData)?;
        let variants = r.read_vector(usize::from(count)).ok_or(Error::MissingData)?;

        // The assembly offset is relative to the construction.
        let assembly = match assembly_offset {
            0 => None,
            n => Some(GlyphAssembly::parse(data, offset + usize::from(n))?),
        };

        Ok(Self { assembly, variants })
    }
}

/// A predrawn variant of a glyph.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GlyphVariantRecord {
    /// The variant glyph.
    pub variant_glyph: u16,
    /// Its size in the growing direction.
    pub advance_measurement: u16,
}

impl Readable<'_> for GlyphVariantRecord {
    const SIZE: usize = 4;

    fn read(r: &mut Reader) -> Option<Self> {
        Some(Self { variant_glyph: r.read()?, advance_measurement: r.read()? })
    }
}

/// Parts that are tiled to build a glyph of arbitrary size.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GlyphAssembly {
    /// Italics correction of the assembled glyph.
    pub italics_correction: MathValueRecord,
    /// The parts from bottom to top or left to right.
    pub parts: Vec<GlyphPartRecord>,
}

impl GlyphAssembly {
    fn parse(data: &[u8], offset: usize) -> Result<Self> {
        let mut r = Reader::new_at(data, offset);
        let italics_correction = r.read().ok_or(Error::MissingData)?;
        let count = r.read::<u16>().ok_or(Error::MissingData)?;
        let parts = r.read_vector(usize::from(count)).ok_or(Error::MissingData)?;
        Ok(Self { italics_correction, parts })
    }
}

/// One part of an assembly.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GlyphPartRecord {
    /// The glyph drawing this part.
    pub glyph_id: u16,
    /// Length of the connector at the start.
    pub start_connector_length: u16,
    /// Length of the connector at the end.
    pub end_connector_length: u16,
    /// Full advance of the part.
    pub full_advance: u16,
    /// Part flags, bit 0 marks an extender.
    pub part_flags: u16,
}

impl GlyphPartRecord {
    /// Whether the part may be repeated to fill additional length.
    pub fn is_extender(&self) -> bool {
        self.part_flags & 1 != 0
    }
}

impl Readable<'_> for GlyphPartRecord {
    const SIZE: usize = 10;

    fn read(r: &mut Reader) -> Option<Self> {
        Some(Self {
            glyph_id: r.read()?,
            start_connector_length: r.read()?,
            end_connector_length: r.read()?,
            full_advance: r.read()?,
            part_flags: r.read()?,
        })
    }
}
