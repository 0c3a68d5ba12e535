//! The `CFF ` table: font name, DICTs, charset and glyph outlines.

mod argstack;
mod charset;
mod charstring;
mod dict;
mod index;
mod number;
mod std_strings;
mod strings;
mod subroutines;

pub use self::charset::Charset;
pub use self::charstring::CharStringError;
pub use self::dict::{Dict, Key, Value};

use self::charset::parse_charset;
use self::charstring::Context;
use self::dict::parse_top_dict;
use self::index::Index;
use self::strings::Strings;
use crate::glyph::Command;
use crate::read::Reader;
use crate::{Error, Result};

pub(crate) use self::charstring::Outline;

/// A parsed non-CID CFF table.
///
/// Parsing reads the header, the four INDEXes following it, both DICTs, the
/// charstrings INDEX and the charset. Charstrings themselves are only
/// interpreted by [`Cff::path`].
#[derive(Debug, Clone)]
pub struct Cff {
    name: String,
    dict: Dict,
    strings: Strings,
    global_subrs: Index,
    char_strings: Index,
    local_subrs: Index,
    charset: Charset,
}

impl Cff {
    /// Parse the table.
    pub fn parse(table: &[u8]) -> Result<Self> {
        let mut r = Reader::new(table);
        let major = r.read::<u8>().ok_or(Error::MissingData)?;
        if major != 1 {
            return Err(Error::UnknownFormat { structure: "CFF", format: major.into() });
        }

        r.skip_bytes(1).ok_or(Error::MissingData)?;
        let header_size = usize::from(r.read::<u8>().ok_or(Error::MissingData)?);

        // Four indices at fixed positions.
        let mut offset = header_size;
        let mut next = || -> Result<Index> {
            let (index, len) = Index::parse(table, offset)?;
            offset += len;
            Ok(index)
        };

        let names = next()?;
        let top_dicts = next()?;
        let strings = Strings::new(next()?);
        let global_subrs = next()?;

        let name = names
            .get(0)
            .map(|name| String::from_utf8_lossy(name).into_owned())
            .unwrap_or_default();

        let top_dict = top_dicts.get(0).ok_or(Error::MissingData)?;
        let top = parse_top_dict(top_dict, &strings)?;

        if top.contains(Key::Ros) {
            return Err(Error::Unimplemented("CID-keyed CFF"));
        }

        let char_strings = {
            let offset = top.offset(Key::CharStrings).ok_or(Error::MissingData)?;
            Index::parse(table, offset)?.0
        };

        // Every font has at least `.notdef`.
        if char_strings.is_empty() {
            return Err(Error::MissingData);
        }

        let num_glyphs = char_strings.count;

        let dict = top.merge_private(table, &strings)?;
        let local_subrs = match dict.local_subrs_offset() {
            Some(offset) => Index::parse(table, offset)?.0,
            None => Index::default(),
        };

        let charset = parse_charset(table, dict.offset(Key::Charset).unwrap_or(0), num_glyphs)?;

        log::debug!(
            "parsed CFF font {name:?} with {num_glyphs} glyphs, {} global and {} local subrs",
            global_subrs.len(),
            local_subrs.len(),
        );

        Ok(Self { name, dict, strings, global_subrs, char_strings, local_subrs, charset })
    }

    /// The font name from the Name INDEX.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The Top DICT merged with the Private DICT.
    pub fn dict(&self) -> &Dict {
        &self.dict
    }

    /// The charset mapping glyph ids to string ids.
    pub fn charset(&self) -> &Charset {
        &self.charset
    }

    /// The number of glyphs, that is the number of charstrings.
    pub fn num_glyphs(&self) -> u16 {
        self.char_strings.count
    }

    /// The string for a string id, standard or custom.
    pub fn string(&self, sid: u16) -> Option<&str> {
        self.strings.get(sid)
    }

    /// The PostScript name of a glyph, if the charset covers it.
    pub fn glyph_name(&self, glyph_id: u16) -> Option<&str> {
        if glyph_id >= self.num_glyphs() {
            return None;
        }

        self.strings.get(self.charset.sid(glyph_id)?)
    }

    /// Interpret the charstring of a glyph.
    pub(crate) fn outline(&self, glyph_id: u16) -> Result<Outline> {
        let program =
            self.char_strings.get(usize::from(glyph_id)).ok_or(Error::InvalidOffset)?;

        let ctx = Context {
            global_subrs: &self.global_subrs,
            local_subrs: &self.local_subrs,
            default_width: self.dict.number(Key::DefaultWidthX).unwrap_or(0.0) as f32,
            nominal_width: self.dict.number(Key::NominalWidthX).unwrap_or(0.0) as f32,
        };

        charstring::interpret(&ctx, program)
            .map_err(|error| Error::MalformedBytecode { glyph_id, error })
    }

    /// The outline of a glyph as drawing commands.
    pub fn path(&self, glyph_id: u16) -> Result<Vec<Command>> {
        self.outline(glyph_id).map(|outline| outline.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::write::Writer;

    /// Emit a DICT integer in the 5-byte encoding so offsets can be patched
    /// without changing the DICT length.
    fn int(w: &mut Writer, n: i32) {
        w.write::<u8>(29);
        w.write(n);
    }

    /// A CFF table with three glyphs. Glyph 2 calls a local subroutine that
    /// draws a line, glyph 1 has a custom name.
    fn table(ros: bool) -> Vec<u8> {
        let notdef: &[u8] = &[14];
        let glyph1: &[u8] = &[139, 139, 21, 14];
        let glyph2: &[u8] = &[139, 139, 21, 32, 10, 14];
        let subr: &[u8] = &[149, 139, 5, 11];

        // Private DICT: defaultWidthX 500, nominalWidthX 300, Subrs after it.
        let private_len = 14;
        let mut private = Writer::new();
        int(&mut private, 500);
        private.write::<u8>(20);
        int(&mut private, 300);
        private.write::<u8>(21);
        private.write::<[u8; 2]>([139 + private_len, 19]);
        let private = private.finish();
        assert_eq!(private.len(), usize::from(private_len));

        let top_len = 4 * 5 + 3 + if ros { 3 * 5 + 2 } else { 0 };

        // Header, Name INDEX, Top DICT INDEX (one item), String INDEX, Global
        // Subr INDEX.
        let name_index = {
            let mut w = Writer::new();
            w.index(&[&b"TestMath"[..]]);
            w.finish()
        };
        let string_index = {
            let mut w = Writer::new();
            w.index(&[&b"custom"[..]]);
            w.finish()
        };

        let top_index_len = 2 + 1 + 2 * 4 + top_len;
        let after_header = 4 + name_index.len() + top_index_len + string_index.len() + 2;

        let charset_offset = after_header;
        let charset = {
            let mut w = Writer::new();
            w.write::<u8>(0);
            w.write::<[u16; 2]>([391, 12]);
            w.finish()
        };

        let char_strings_offset = charset_offset + charset.len();
        let char_strings = {
            let mut w = Writer::new();
            w.index(&[notdef, glyph1, glyph2]);
            w.finish()
        };

        let private_offset = char_strings_offset + char_strings.len();

        let mut top = Writer::new();
        if ros {
            int(&mut top, 391);
            int(&mut top, 391);
            int(&mut top, 0);
            top.write::<[u8; 2]>([12, 30]);
        }
        int(&mut top, charset_offset as i32);
        top.write::<u8>(15);
        int(&mut top, char_strings_offset as i32);
        top.write::<u8>(17);
        int(&mut top, private.len() as i32);
        int(&mut top, private_offset as i32);
        top.write::<u8>(18);
        let top = top.finish();
        assert_eq!(top.len(), top_len);

        let mut w = Writer::new();
        w.write::<[u8; 4]>([1, 0, 4, 4]);
        w.extend(&name_index);
        w.index(&[top.as_slice()]);
        w.extend(&string_index);
        w.write::<u16>(0);
        assert_eq!(w.len(), after_header);
        w.extend(&charset);
        w.extend(&char_strings);
        w.extend(&private);
        w.index(&[subr]);
        w.finish()
    }

    #[test]
    fn parse_table() {
        let cff = Cff::parse(&table(false)).unwrap();
        assert_eq!(cff.name(), "TestMath");
        assert_eq!(cff.num_glyphs(), 3);
        assert_eq!(cff.glyph_name(0), Some(".notdef"));
        assert_eq!(cff.glyph_name(1), Some("custom"));
        assert_eq!(cff.glyph_name(2), Some("plus"));
        assert_eq!(cff.glyph_name(3), None);
        assert_eq!(cff.dict().number(Key::DefaultWidthX), Some(500.0));
        assert_eq!(cff.dict().number(Key::BlueScale), Some(0.039625));
    }

    #[test]
    fn outlines_use_local_subrs() {
        let cff = Cff::parse(&table(false)).unwrap();
        let outline = cff.outline(2).unwrap();
        assert_eq!(outline.advance, 500.0);
        assert_eq!(outline.path, vec![
            Command::MoveTo(crate::Point::new(0.0, 0.0)),
            Command::LineTo(crate::Point::new(10.0, 0.0)),
            Command::ClosePath,
        ]);

        assert_eq!(cff.outline(0).unwrap().path, vec![]);
        assert_eq!(cff.outline(7), Err(Error::InvalidOffset));
    }

    #[test]
    fn rejects_unsupported_tables() {
        assert_eq!(Cff::parse(&table(true)).unwrap_err(), Error::Unimplemented("CID-keyed CFF"));
        assert_eq!(
            Cff::parse(&[2, 0, 4, 4]).unwrap_err(),
            Error::UnknownFormat { structure: "CFF", format: 2 }
        );
        assert_eq!(Cff::parse(&[1, 0]).unwrap_err(), Error::MissingData);
    }
}
