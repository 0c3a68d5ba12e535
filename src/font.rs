use std::fmt::{self, Debug, Formatter};
use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use crate::cff::Cff;
use crate::cmap::Cmap;
use crate::directory::TableDirectory;
use crate::glyph::{Glyph, GlyphMetrics, Metrics};
use crate::head::Head;
use crate::math::MathTable;
use crate::source::ByteSource;
use crate::{Error, Result, Tag};

/// The tables every math font must have.
const REQUIRED_TABLES: [Tag; 4] = [Tag::CMAP, Tag::HEAD, Tag::CFF, Tag::MATH];

/// How to open a font.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Options {
    /// The face to open inside a font collection. Ignored for single fonts.
    pub index: u32,
    /// Whether to check every required table against its directory checksum.
    pub verify_checksums: bool,
}

/// An OpenType math font with CFF outlines.
///
/// The `cmap`, `head`, `CFF ` and `MATH` tables are read and parsed when the
/// font is opened. Glyphs are decoded on first request and kept for the
/// lifetime of the font.
pub struct Font {
    directory: TableDirectory,
    head: Head,
    cmap: Cmap,
    cff: Cff,
    math: MathTable,
    glyphs: RwLock<FxHashMap<u16, Arc<Glyph>>>,
}

impl Font {
    /// Parse the first font in `source` with default options.
    pub fn parse<S: ByteSource + ?Sized>(source: &S) -> Result<Self> {
        Self::parse_with(source, &Options::default())
    }

    /// Parse a font with the given options.
    pub fn parse_with<S: ByteSource + ?Sized>(source: &S, options: &Options) -> Result<Self> {
        let directory = TableDirectory::parse(source, options.index)?;

        // A font lacking a required table is rejected before any table is
        // parsed, so the error names the table and not a later symptom.
        for tag in REQUIRED_TABLES {
            directory.find(tag).ok_or(Error::MissingTable(tag))?;
        }

        let read = |tag: Tag| -> Result<Vec<u8>> {
            let data = directory.read_table(source, tag)?;
            if options.verify_checksums {
                directory.verify(tag, &data)?;
            }
            Ok(data)
        };

        let cmap = Cmap::parse(&read(Tag::CMAP)?)?;
        let head = Head::parse(&read(Tag::HEAD)?)?;
        let cff = Cff::parse(&read(Tag::CFF)?)?;
        let math = MathTable::parse(read(Tag::MATH)?.into())?;

        log::debug!(
            "opened font {:?}: {} glyphs, {} mapped code points",
            cff.name(),
            cff.num_glyphs(),
            cmap.len(),
        );

        Ok(Self { directory, head, cmap, cff, math, glyphs: RwLock::default() })
    }

    /// The glyph a character maps to.
    pub fn glyph_id(&self, c: char) -> Option<u16> {
        self.cmap.get(u32::from(c))
    }

    /// The glyph the first character of `text` maps to.
    pub fn glyph_id_for_str(&self, text: &str) -> Option<u16> {
        self.glyph_id(text.chars().next()?)
    }

    /// Decode a glyph.
    ///
    /// The result is memoized, asking for the same glyph twice returns the same
    /// allocation. A glyph that fails to decode is not cached and fails again
    /// on the next request.
    pub fn glyph(&self, glyph_id: u16) -> Result<Arc<Glyph>> {
        let cache = self.glyphs.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(glyph) = cache.get(&glyph_id) {
            return Ok(glyph.clone());
        }
        drop(cache);

        let outline = self.cff.outline(glyph_id)?;
        let name = self.cff.glyph_name(glyph_id).map(str::to_string);
        if name.is_none() {
            log::warn!("glyph {glyph_id} has no name in the charset");
        }

        log::trace!(
            "decoded glyph {glyph_id} ({name:?}) with {} commands",
            outline.path.len()
        );

        let glyph = Arc::new(Glyph {
            name,
            path: outline.path,
            metrics: Metrics { advance: outline.advance },
        });

        let mut cache = self.glyphs.write().unwrap_or_else(PoisonError::into_inner);
        Ok(cache.entry(glyph_id).or_insert(glyph).clone())
    }

    /// The advance and bounding box of a glyph.
    pub fn glyph_metrics(&self, glyph_id: u16) -> Result<GlyphMetrics> {
        Ok(self.glyph(glyph_id)?.glyph_metrics())
    }

    /// The PostScript name of a glyph without decoding its outline.
    pub fn glyph_name(&self, glyph_id: u16) -> Option<&str> {
        self.cff.glyph_name(glyph_id)
    }

    /// The number of glyphs in the font.
    pub fn num_glyphs(&self) -> u16 {
        self.cff.num_glyphs()
    }

    /// Font design units per em.
    pub fn units_per_em(&self) -> u16 {
        self.head.units_per_em
    }

    /// The `head` table.
    pub fn head(&self) -> &Head {
        &self.head
    }

    /// The table directory.
    pub fn directory(&self) -> &TableDirectory {
        &self.directory
    }

    /// The `CFF ` table.
    pub fn cff(&self) -> &Cff {
        &self.cff
    }

    /// The `MATH` table.
    pub fn math(&self) -> &MathTable {
        &self.math
    }
}

impl Debug for Font {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.cff.name())
            .field("num_glyphs", &self.num_glyphs())
            .field("units_per_em", &self.units_per_em())
            .finish_non_exhaustive()
    }
}
