//! A small OpenType math font assembled from scratch, so the tests do not need
//! binary fixtures.
//!
//! Glyphs:
//! - 0: `.notdef`, empty
//! - 1: `parenleft`, mapped from `(`, extended shape with a vertical construction
//! - 2: `plus`, mapped from `+`, draws its vertical bar in a local subroutine
//! - 3: `parenleft.size1`, extended shape
//! - 4: `parenleft.ext`, drawn by a global subroutine
//! - 5: `seac`, an accented composite that cannot be decoded
//! - 6: an empty glyph whose charset entry names no string

#![allow(dead_code)]

use mathfont::{checksum, Tag};

pub const PARENLEFT: u16 = 1;
pub const PLUS: u16 = 2;
pub const SIZE1: u16 = 3;
pub const EXTENDER: u16 = 4;
pub const BROKEN: u16 = 5;
pub const UNNAMED: u16 = 6;
pub const NUM_GLYPHS: u16 = 7;

/// The charstring of `(`.
pub const PARENLEFT_PROGRAM: &str = "57 45 270 rmoveto \
    0 250 105 160 177 56 rrcurveto -36 vlineto \
    -127 -100 -60 -150 0 -180 rrcurveto \
    0 -180 60 -150 127 -100 rrcurveto -36 vlineto \
    -177 56 -105 140 0 270 rrcurveto endchar";

/// Let `RUST_LOG` control the library's log output.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The complete font file.
pub fn font() -> Vec<u8> {
    assemble(&tables(), 0)
}

/// All tables of the font, sorted by tag.
pub fn tables() -> Vec<(Tag, Vec<u8>)> {
    vec![
        (Tag::CFF, cff()),
        (Tag::MATH, math()),
        (Tag::CMAP, cmap()),
        (Tag::HEAD, head()),
        (Tag(*b"hhea"), hhea()),
        (Tag(*b"maxp"), maxp()),
    ]
}

/// A font collection holding the same face twice.
pub fn collection() -> Vec<u8> {
    let header_len = 12 + 2 * 4;
    let mut w = Writer::default();
    w.bytes(b"ttcf");
    w.u32(0x00010000);
    w.u32(2);
    w.u32(header_len as u32);
    w.u32(header_len as u32);
    w.bytes(&assemble(&tables(), header_len));
    w.0
}

/// Lay out an `OTTO` face whose table offsets are relative to a file in which
/// the face starts at `base`.
pub fn assemble(tables: &[(Tag, Vec<u8>)], base: usize) -> Vec<u8> {
    let mut w = Writer::default();
    w.bytes(b"OTTO");
    w.u16(tables.len() as u16);
    w.u16(0);
    w.u16(0);
    w.u16(0);

    let mut offset = base + 12 + 16 * tables.len();
    for (tag, data) in tables {
        w.bytes(&tag.0);
        w.u32(checksum(data));
        w.u32(offset as u32);
        w.u32(data.len() as u32);
        offset += data.len().next_multiple_of(4);
    }

    for (_, data) in tables {
        w.bytes(data);
        w.pad_to_multiple_of(4);
    }

    w.0
}

#[derive(Default)]
struct Writer(Vec<u8>);

impl Writer {
    fn bytes(&mut self, bytes: &[u8]) {
        self.0.extend_from_slice(bytes);
    }

    fn u8(&mut self, v: u8) {
        self.0.push(v);
    }

    fn u16(&mut self, v: u16) {
        self.bytes(&v.to_be_bytes());
    }

    fn i16(&mut self, v: i16) {
        self.bytes(&v.to_be_bytes());
    }

    fn u32(&mut self, v: u32) {
        self.bytes(&v.to_be_bytes());
    }

    fn i64(&mut self, v: i64) {
        self.bytes(&v.to_be_bytes());
    }

    fn u16s(&mut self, vs: &[u16]) {
        for &v in vs {
            self.u16(v);
        }
    }

    /// A DICT integer in its 5-byte encoding.
    fn dict_int(&mut self, v: i32) {
        self.u8(29);
        self.bytes(&v.to_be_bytes());
    }

    /// A CFF INDEX with 4-byte offsets.
    fn index(&mut self, items: &[&[u8]]) {
        self.u16(items.len() as u16);
        if items.is_empty() {
            return;
        }

        self.u8(4);
        let mut offset = 1;
        self.u32(offset);
        for item in items {
            offset += item.len() as u32;
            self.u32(offset);
        }

        for item in items {
            self.bytes(item);
        }
    }

    fn pad_to_multiple_of(&mut self, n: usize) {
        while self.0.len() % n != 0 {
            self.0.push(0);
        }
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// A `cmap` with only a Windows BMP (3, 1) subtable, as text fonts often
/// have.
pub fn bmp_cmap() -> Vec<u8> {
    let mut w = Writer::default();
    w.u16s(&[0, 1, 3, 1]);
    w.u32(12);
    // Format 4 with just the final 0xFFFF segment.
    w.u16s(&[4, 24, 0, 2, 2, 0, 0]);
    w.u16s(&[0xFFFF, 0, 0xFFFF, 1, 0]);
    w.0
}

/// Compile a charstring from numbers and operator names.
pub fn charstring(program: &str) -> Vec<u8> {
    let mut w = Writer::default();
    for token in program.split_whitespace() {
        if let Ok(v) = token.parse::<i32>() {
            match v {
                -107..=107 => w.u8((v + 139) as u8),
                108..=1131 => {
                    let v = v - 108;
                    w.u8((v / 256 + 247) as u8);
                    w.u8((v % 256) as u8);
                }
                -1131..=-108 => {
                    let v = -v - 108;
                    w.u8((v / 256 + 251) as u8);
                    w.u8((v % 256) as u8);
                }
                _ => {
                    w.u8(28);
                    w.i16(v as i16);
                }
            }
            continue;
        }

        let op = match token {
            "hstem" => 1,
            "vmoveto" => 4,
            "rlineto" => 5,
            "hlineto" => 6,
            "vlineto" => 7,
            "rrcurveto" => 8,
            "callsubr" => 10,
            "return" => 11,
            "endchar" => 14,
            "rmoveto" => 21,
            "hmoveto" => 22,
            "callgsubr" => 29,
            _ => panic!("unknown operator {token}"),
        };
        w.u8(op);
    }
    w.0
}

fn cff() -> Vec<u8> {
    let glyphs = [
        charstring("endchar"),
        charstring(PARENLEFT_PROGRAM),
        charstring("50 200 rmoveto 400 hlineto 100 vlineto -400 hlineto 150 -150 rmoveto -107 callsubr endchar"),
        charstring("40 -200 rmoveto 100 hlineto 1400 vlineto -100 hlineto endchar"),
        charstring("100 0 rmoveto -107 callgsubr endchar"),
        charstring("0 0 100 65 endchar"),
        charstring("endchar"),
    ];
    let local_subrs = [charstring("100 hlineto 400 vlineto -100 hlineto return")];
    let global_subrs = [charstring("80 hlineto 500 vlineto -80 hlineto return")];

    let mut name = Writer::default();
    name.index(&[&b"MathTest"[..]]);
    let mut strings = Writer::default();
    strings.index(&[&b"parenleft.size1"[..], &b"parenleft.ext"[..], &b"seac"[..]]);
    let mut gsubrs = Writer::default();
    gsubrs.index(&global_subrs.iter().map(Vec::as_slice).collect::<Vec<_>>());

    // charset 15, CharStrings 17 and Private 18 with 5-byte operands.
    let top_len = 23;
    let top_index_len = 3 + 2 * 4 + top_len;
    let charset_offset = 4 + name.len() + top_index_len + strings.len() + gsubrs.len();

    let mut charset = Writer::default();
    charset.u8(0);
    // SID 394 is past the String INDEX.
    charset.u16s(&[9, 12, 391, 392, 393, 394]);

    let char_strings_offset = charset_offset + charset.len();
    let mut char_strings = Writer::default();
    char_strings.index(&glyphs.iter().map(Vec::as_slice).collect::<Vec<_>>());

    // defaultWidthX 500, nominalWidthX 300 and the local subrs right after.
    let mut private = Writer::default();
    private.dict_int(500);
    private.u8(20);
    private.dict_int(300);
    private.u8(21);
    private.u8(139 + 14);
    private.u8(19);
    assert_eq!(private.len(), 14);

    let private_offset = char_strings_offset + char_strings.len();

    let mut top = Writer::default();
    top.dict_int(charset_offset as i32);
    top.u8(15);
    top.dict_int(char_strings_offset as i32);
    top.u8(17);
    top.dict_int(private.len() as i32);
    top.dict_int(private_offset as i32);
    top.u8(18);
    assert_eq!(top.len(), top_len);

    let mut w = Writer::default();
    w.bytes(&[1, 0, 4, 4]);
    w.bytes(&name.0);
    w.index(&[top.0.as_slice()]);
    w.bytes(&strings.0);
    w.bytes(&gsubrs.0);
    assert_eq!(w.len(), charset_offset);
    w.bytes(&charset.0);
    w.bytes(&char_strings.0);
    w.bytes(&private.0);
    w.index(&local_subrs.iter().map(Vec::as_slice).collect::<Vec<_>>());
    w.0
}

pub const AXIS_HEIGHT: i16 = 250;
pub const FRACTION_RULE_THICKNESS: i16 = 68;

fn math() -> Vec<u8> {
    let constants = 10;
    let glyph_info = constants + 214;
    let variants = glyph_info + 16;

    let mut w = Writer::default();
    w.u16s(&[1, 0, constants as u16, glyph_info as u16, variants as u16]);

    // MathConstants
    w.i16(80);
    w.i16(60);
    w.u16s(&[1500, 2000]);
    for i in 0..51 {
        let value = match i {
            1 => AXIS_HEIGHT,
            34 => FRACTION_RULE_THICKNESS,
            _ => 0,
        };
        w.i16(value);
        w.u16(0);
    }
    w.i16(65);
    assert_eq!(w.len(), glyph_info);

    // MathGlyphInfo with only the extended shape coverage.
    w.u16s(&[0, 0, 8, 0]);
    w.u16s(&[1, 2, PARENLEFT, SIZE1]);
    assert_eq!(w.len(), variants);

    // MathVariants: one vertical construction for `(`.
    w.u16s(&[10, 12, 0, 1, 0, 18]);
    w.u16s(&[1, 1, PARENLEFT]);
    w.u16s(&[12, 2, PARENLEFT, 932, SIZE1, 1600]);
    w.u16s(&[0, 0, 3]);
    w.u16s(&[SIZE1, 0, 150, 700, 0]);
    w.u16s(&[EXTENDER, 150, 150, 500, 1]);
    w.u16s(&[SIZE1, 150, 0, 700, 0]);
    w.0
}

fn cmap() -> Vec<u8> {
    let groups = [('(', PARENLEFT), ('+', PLUS)];

    let mut w = Writer::default();
    w.u16s(&[0, 1, 3, 10]);
    w.u32(12);
    w.u16s(&[12, 0]);
    w.u32(16 + 12 * groups.len() as u32);
    w.u32(0);
    w.u32(groups.len() as u32);
    for (c, glyph) in groups {
        w.u32(c as u32);
        w.u32(c as u32);
        w.u32(u32::from(glyph));
    }
    w.0
}

pub const UNITS_PER_EM: u16 = 1000;

fn head() -> Vec<u8> {
    let mut w = Writer::default();
    w.u32(0x00010000);
    w.u32(0x00010000);
    // checkSumAdjustment, left at zero.
    w.u32(0);
    w.u32(0x5F0F3CF5);
    w.u16(0);
    w.u16(UNITS_PER_EM);
    w.i64(0);
    w.i64(0);
    for v in [0, -200, 500, 1200] {
        w.i16(v);
    }
    w.u16s(&[0, 8]);
    w.i16(2);
    w.i16(0);
    w.i16(0);
    assert_eq!(w.len(), 54);
    w.0
}

fn hhea() -> Vec<u8> {
    let mut w = Writer::default();
    w.u32(0x00010000);
    for v in [800, -200, 0] {
        w.i16(v);
    }
    w.u16(500);
    for _ in 0..11 {
        w.i16(0);
    }
    w.u16(0);
    assert_eq!(w.len(), 36);
    w.0
}

fn maxp() -> Vec<u8> {
    let mut w = Writer::default();
    w.u32(0x00005000);
    w.u16(NUM_GLYPHS);
    w.0
}
