use super::{Dict, Key};
use crate::cff::strings::Strings;
use crate::Result;

/// The keys that may appear in a Top DICT.
pub const TOP_DICT_KEYS: &[Key] = &[
    Key::Version,
    Key::Notice,
    Key::Copyright,
    Key::FullName,
    Key::FamilyName,
    Key::Weight,
    Key::IsFixedPitch,
    Key::ItalicAngle,
    Key::UnderlinePosition,
    Key::UnderlineThickness,
    Key::PaintType,
    Key::CharstringType,
    Key::FontMatrix,
    Key::UniqueId,
    Key::FontBBox,
    Key::StrokeWidth,
    Key::Xuid,
    Key::Charset,
    Key::Encoding,
    Key::CharStrings,
    Key::Private,
    Key::SyntheticBase,
    Key::PostScript,
    Key::BaseFontName,
    Key::BaseFontBlend,
    Key::Ros,
    Key::CidFontVersion,
    Key::CidFontRevision,
    Key::CidFontType,
    Key::CidCount,
    Key::UidBase,
    Key::FdArray,
    Key::FdSelect,
    Key::FontName,
];

/// Parse the Top DICT, the first phase of building a font's dictionary.
pub fn parse_top_dict(data: &[u8], strings: &Strings) -> Result<Dict> {
    let mut dict = Dict::default();
    dict.parse_into(data, TOP_DICT_KEYS, strings)?;
    Ok(dict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cff::dict::Value;

    #[test]
    fn empty_dict_has_defaults() {
        let dict = parse_top_dict(&[], &Strings::default()).unwrap();
        assert_eq!(dict.number(Key::UnderlinePosition), Some(-100.0));
        assert_eq!(dict.number(Key::CharstringType), Some(2.0));
        assert_eq!(dict.number(Key::CidCount), Some(8720.0));
        assert_eq!(dict.bool(Key::IsFixedPitch), Some(false));
        assert_eq!(dict.array(Key::FontMatrix), Some(vec![0.001, 0.0, 0.0, 0.001, 0.0, 0.0]));
        assert_eq!(dict.number(Key::CharStrings), None);
        assert!(!dict.contains(Key::Charset));
        assert_eq!(dict.offset(Key::Charset), Some(0));
    }

    #[test]
    fn strings_and_offsets() {
        // version, FullName, FontBBox and CharStrings.
        let data = [
            148, 0, //
            28, 1, 134, 2, //
            139, 28, 0xff, 0x06, 248, 0x74, 249, 0x18, 5, //
            247, 192, 17,
        ];
        let dict = parse_top_dict(&data, &Strings::default()).unwrap();
        assert_eq!(dict.string(Key::Version), Some("parenleft"));
        assert_eq!(dict.get(Key::FullName), Some(Value::String(390, "Semibold".into())));
        assert_eq!(dict.array(Key::FontBBox), Some(vec![0.0, -250.0, 480.0, 644.0]));
        assert_eq!(dict.offset(Key::CharStrings), Some(300));
        assert!(!dict.contains(Key::Ros));
    }

    #[test]
    fn unknown_sid() {
        let data = [28, 3, 0, 0];
        assert_eq!(parse_top_dict(&data, &Strings::default()), Err(crate::Error::InvalidOffset));
    }
}
