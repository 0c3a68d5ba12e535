/*!
Decodes OpenType math fonts with CFF outlines.

A [`Font`] exposes three things on top of the raw font bytes:
- glyph outlines and advance widths, interpreted from Type 2 charstrings,
- the Unicode `cmap` mapping from characters to glyph ids,
- the `MATH` table: layout constants, extended shapes and the variants and
  assemblies used to build stretchy delimiters.

Tables are located through the SFNT directory and parsed when the font is
opened, while glyph outlines and glyph constructions are only decoded on first
request and memoized afterwards.

# Example
```no_run
use mathfont::Font;

# fn main() -> Result<(), Box<dyn std::error::Error>> {
let data = std::fs::read("fonts/STIX2Math.otf")?;
let font = Font::parse(&data)?;

let paren = font.glyph_id('(').expect("font maps '('");
let glyph = font.glyph(paren)?;
println!("{:?} advances by {}", glyph.name, glyph.metrics.advance);

if let Some(construction) = font.math().variants.vertical.construction(paren)? {
    for variant in &construction.variants {
        println!("variant {} measures {}", variant.variant_glyph, variant.advance_measurement);
    }
}
# Ok(())
# }
```

The bytes can come from anything implementing [`ByteSource`]: a slice, a
vector, a shared `Arc<[u8]>` or a [`FileSource`] doing positioned reads.
*/

#![deny(unsafe_code)]
#![deny(missing_docs)]

pub mod cff;
mod cmap;
mod directory;
mod font;
mod glyph;
mod head;
pub mod math;
mod read;
mod source;
#[cfg(test)]
mod write;

pub use crate::cff::CharStringError;
pub use crate::directory::{checksum, FontKind, TableDirectory, TableRecord};
pub use crate::font::{Font, Options};
pub use crate::glyph::{Command, Glyph, GlyphMetrics, Metrics, Point};
pub use crate::head::Head;
pub use crate::source::{ByteSource, FileSource};

use crate::read::{Readable, Reader};
use std::fmt::{self, Debug, Display, Formatter};

/// A 4-byte OpenType tag.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    /// The character to glyph mapping table.
    pub const CMAP: Self = Self(*b"cmap");
    /// The font header table.
    pub const HEAD: Self = Self(*b"head");
    /// The Compact Font Format outlines.
    pub const CFF: Self = Self(*b"CFF ");
    /// The mathematical typesetting table.
    pub const MATH: Self = Self(*b"MATH");
}

impl Readable<'_> for Tag {
    const SIZE: usize = 4;

    fn read(r: &mut Reader) -> Option<Self> {
        r.read::<[u8; 4]>().map(Self)
    }
}

impl Debug for Tag {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Tag({self})")
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad(std::str::from_utf8(&self.0).unwrap_or("..."))
    }
}

/// The result type for everything.
pub type Result<T> = std::result::Result<T, Error>;

/// Decoding failed because the font is malformed or uses unsupported features.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Error {
    /// Parsing expected more data.
    MissingData,
    /// An offset or length pointed outside of the data or was inconsistent.
    InvalidOffset,
    /// The file contains an unknown kind of font.
    UnknownKind,
    /// A structure announced a format this decoder does not know.
    UnknownFormat {
        /// The kind of structure, e.g. `"charset"`.
        structure: &'static str,
        /// The format number that was found.
        format: u16,
    },
    /// A table's magic number is wrong.
    BadMagic(Tag),
    /// A required table is missing.
    MissingTable(Tag),
    /// The `cmap` table has no Windows full-repertoire Unicode subtable.
    UnsupportedEncoding,
    /// A glyph's charstring could not be interpreted.
    MalformedBytecode {
        /// The glyph whose program failed.
        glyph_id: u16,
        /// What went wrong.
        error: CharStringError,
    },
    /// A table's stored checksum does not match its contents.
    ChecksumMismatch(Tag),
    /// The font relies on a feature this decoder does not support.
    Unimplemented(&'static str),
    /// Reading from the byte source failed.
    Io(std::io::ErrorKind),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::MissingData => f.pad("missing more data"),
            Self::InvalidOffset => f.pad("invalid offset"),
            Self::UnknownKind => f.pad("unknown font kind"),
            Self::UnknownFormat { structure, format } => {
                write!(f, "unknown {structure} format {format}")
            }
            Self::BadMagic(tag) => write!(f, "bad magic number in {tag} table"),
            Self::MissingTable(tag) => write!(f, "missing {tag} table"),
            Self::UnsupportedEncoding => {
                f.pad("cmap has no platform 3 encoding 10 subtable")
            }
            Self::MalformedBytecode { glyph_id, error } => {
                write!(f, "malformed charstring for glyph {glyph_id}: {error}")
            }
            Self::ChecksumMismatch(tag) => write!(f, "checksum mismatch in {tag} table"),
            Self::Unimplemented(feature) => write!(f, "unimplemented feature: {feature}"),
            Self::Io(kind) => write!(f, "failed to read font: {kind}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => Self::MissingData,
            kind => Self::Io(kind),
        }
    }
}
