//! Top and Private DICTs.
//!
//! A DICT is a sequence of operands followed by an operator that names the key
//! they belong to. Parsing happens in two phases: [`parse_top_dict`] builds the
//! Top DICT, then [`Dict::merge_private`] produces a new dictionary that also
//! holds the Private DICT the Top DICT points to.

mod private_dict;
mod top_dict;

pub use self::private_dict::PRIVATE_DICT_KEYS;
pub use self::top_dict::{parse_top_dict, TOP_DICT_KEYS};

use rustc_hash::FxHashMap;

use super::number::Number;
use super::strings::Strings;
use crate::read::Reader;
use crate::{Error, Result};

/// Escape byte introducing a two-byte operator.
pub const TWO_BYTE_OPERATOR_MARK: u8 = 12;

/// A DICT operator. Two-byte operators use a 1200 'prefix' to make them more
/// readable: `12 3` is `Operator(1203)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Operator(pub u16);

impl Operator {
    pub const fn one_byte(b: u8) -> Self {
        Self(b as u16)
    }

    pub const fn two_byte(b: u8) -> Self {
        Self(1200 + b as u16)
    }
}

pub struct DictionaryParser<'a> {
    r: Reader<'a>,
    // Operands of the operator that was parsed last.
    operands: Vec<Number>,
}

impl<'a> DictionaryParser<'a> {
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        DictionaryParser { r: Reader::new(data), operands: Vec::new() }
    }

    /// Parse up to and including the next operator. Its operands are available
    /// through [`operands`](Self::operands) afterwards.
    pub fn parse_next(&mut self) -> Result<Option<Operator>> {
        self.operands.clear();
        while !self.r.at_end() {
            let b = self.r.peak::<u8>().ok_or(Error::MissingData)?;
            if is_dict_one_byte_op(b) {
                self.r.read::<u8>();
                let operator = if b == TWO_BYTE_OPERATOR_MARK {
                    Operator::two_byte(self.r.read::<u8>().ok_or(Error::MissingData)?)
                } else {
                    Operator::one_byte(b)
                };
                return Ok(Some(operator));
            }

            let number = Number::parse_cff_number(&mut self.r).ok_or(Error::MissingData)?;
            self.operands.push(number);
        }

        if !self.operands.is_empty() {
            log::warn!("DICT ends with {} dangling operands", self.operands.len());
        }

        Ok(None)
    }

    #[inline]
    pub fn operands(&self) -> &[Number] {
        &self.operands
    }
}

// One-byte CFF DICT Operators according to the
// Adobe Technical Note #5176, Appendix H CFF DICT Encoding.
fn is_dict_one_byte_op(b: u8) -> bool {
    match b {
        0..=27 => true,
        28..=30 => false,  // numbers
        31 => true,        // Reserved
        32..=254 => false, // numbers
        255 => true,       // Reserved
    }
}

/// The keys of Top and Private DICTs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    // Top DICT.
    /// `version`, a SID.
    Version,
    /// `Notice`, a SID.
    Notice,
    /// `Copyright`, a SID.
    Copyright,
    /// `FullName`, a SID.
    FullName,
    /// `FamilyName`, a SID.
    FamilyName,
    /// `Weight`, a SID.
    Weight,
    /// `isFixedPitch`.
    IsFixedPitch,
    /// `ItalicAngle`.
    ItalicAngle,
    /// `UnderlinePosition`.
    UnderlinePosition,
    /// `UnderlineThickness`.
    UnderlineThickness,
    /// `PaintType`.
    PaintType,
    /// `CharstringType`, always 2 here.
    CharstringType,
    /// `FontMatrix`.
    FontMatrix,
    /// `UniqueID`.
    UniqueId,
    /// `FontBBox`.
    FontBBox,
    /// `StrokeWidth`.
    StrokeWidth,
    /// `XUID`.
    Xuid,
    /// `charset`, an offset or a predefined charset id.
    Charset,
    /// `Encoding`.
    Encoding,
    /// `CharStrings`, the offset of the charstrings INDEX.
    CharStrings,
    /// `Private`, size and offset of the Private DICT.
    Private,
    /// `SyntheticBase`.
    SyntheticBase,
    /// `PostScript`, a SID.
    PostScript,
    /// `BaseFontName`, a SID.
    BaseFontName,
    /// `BaseFontBlend`.
    BaseFontBlend,
    /// `ROS`, only present in CID-keyed fonts.
    Ros,
    /// `CIDFontVersion`.
    CidFontVersion,
    /// `CIDFontRevision`.
    CidFontRevision,
    /// `CIDFontType`.
    CidFontType,
    /// `CIDCount`.
    CidCount,
    /// `UIDBase`.
    UidBase,
    /// `FDArray`.
    FdArray,
    /// `FDSelect`.
    FdSelect,
    /// `FontName`, a SID.
    FontName,
    // Private DICT.
    /// `BlueValues`, delta encoded.
    BlueValues,
    /// `OtherBlues`, delta encoded.
    OtherBlues,
    /// `FamilyBlues`, delta encoded.
    FamilyBlues,
    /// `FamilyOtherBlues`, delta encoded.
    FamilyOtherBlues,
    /// `BlueScale`.
    BlueScale,
    /// `BlueShift`.
    BlueShift,
    /// `BlueFuzz`.
    BlueFuzz,
    /// `StdHW`.
    StdHw,
    /// `StdVW`.
    StdVw,
    /// `StemSnapH`, delta encoded.
    StemSnapH,
    /// `StemSnapV`, delta encoded.
    StemSnapV,
    /// `ForceBold`.
    ForceBold,
    /// `LanguageGroup`.
    LanguageGroup,
    /// `ExpansionFactor`.
    ExpansionFactor,
    /// `initialRandomSeed`.
    InitialRandomSeed,
    /// `Subrs`, relative to the Private DICT.
    Subrs,
    /// `defaultWidthX`.
    DefaultWidthX,
    /// `nominalWidthX`.
    NominalWidthX,
}

/// How the operands of a key are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Number,
    Bool,
    Sid,
    /// Consumes the whole operand stack. Delta encoded arrays stay encoded.
    Array,
}

impl Key {
    pub(crate) fn operator(self) -> Operator {
        use Operator as Op;
        match self {
            Key::Version => Op::one_byte(0),
            Key::Notice => Op::one_byte(1),
            Key::Copyright => Op::two_byte(0),
            Key::FullName => Op::one_byte(2),
            Key::FamilyName => Op::one_byte(3),
            Key::Weight => Op::one_byte(4),
            Key::IsFixedPitch => Op::two_byte(1),
            Key::ItalicAngle => Op::two_byte(2),
            Key::UnderlinePosition => Op::two_byte(3),
            Key::UnderlineThickness => Op::two_byte(4),
            Key::PaintType => Op::two_byte(5),
            Key::CharstringType => Op::two_byte(6),
            Key::FontMatrix => Op::two_byte(7),
            Key::UniqueId => Op::one_byte(13),
            Key::FontBBox => Op::one_byte(5),
            Key::StrokeWidth => Op::two_byte(8),
            Key::Xuid => Op::one_byte(14),
            Key::Charset => Op::one_byte(15),
            Key::Encoding => Op::one_byte(16),
            Key::CharStrings => Op::one_byte(17),
            Key::Private => Op::one_byte(18),
            Key::SyntheticBase => Op::two_byte(20),
            Key::PostScript => Op::two_byte(21),
            Key::BaseFontName => Op::two_byte(22),
            Key::BaseFontBlend => Op::two_byte(23),
            Key::Ros => Op::two_byte(30),
            Key::CidFontVersion => Op::two_byte(31),
            Key::CidFontRevision => Op::two_byte(32),
            Key::CidFontType => Op::two_byte(33),
            Key::CidCount => Op::two_byte(34),
            Key::UidBase => Op::two_byte(35),
            Key::FdArray => Op::two_byte(36),
            Key::FdSelect => Op::two_byte(37),
            Key::FontName => Op::two_byte(38),
            Key::BlueValues => Op::one_byte(6),
            Key::OtherBlues => Op::one_byte(7),
            Key::FamilyBlues => Op::one_byte(8),
            Key::FamilyOtherBlues => Op::one_byte(9),
            Key::BlueScale => Op::two_byte(9),
            Key::BlueShift => Op::two_byte(10),
            Key::BlueFuzz => Op::two_byte(11),
            Key::StdHw => Op::one_byte(10),
            Key::StdVw => Op::one_byte(11),
            Key::StemSnapH => Op::two_byte(12),
            Key::StemSnapV => Op::two_byte(13),
            Key::ForceBold => Op::two_byte(14),
            Key::LanguageGroup => Op::two_byte(17),
            Key::ExpansionFactor => Op::two_byte(18),
            Key::InitialRandomSeed => Op::two_byte(19),
            Key::Subrs => Op::one_byte(19),
            Key::DefaultWidthX => Op::one_byte(20),
            Key::NominalWidthX => Op::one_byte(21),
        }
    }

    fn kind(self) -> Kind {
        match self {
            Key::Version
            | Key::Notice
            | Key::Copyright
            | Key::FullName
            | Key::FamilyName
            | Key::Weight
            | Key::PostScript
            | Key::BaseFontName
            | Key::FontName => Kind::Sid,
            Key::IsFixedPitch | Key::ForceBold => Kind::Bool,
            Key::FontMatrix
            | Key::FontBBox
            | Key::Xuid
            | Key::Private
            | Key::BaseFontBlend
            | Key::Ros
            | Key::BlueValues
            | Key::OtherBlues
            | Key::FamilyBlues
            | Key::FamilyOtherBlues
            | Key::StemSnapH
            | Key::StemSnapV => Kind::Array,
            _ => Kind::Number,
        }
    }

    /// The value a DICT implies for this key when it does not store one.
    pub fn default_value(self) -> Option<Value> {
        let value = match self {
            Key::IsFixedPitch | Key::ForceBold => Value::Bool(false),
            Key::ItalicAngle
            | Key::PaintType
            | Key::StrokeWidth
            | Key::Charset
            | Key::Encoding
            | Key::CidFontVersion
            | Key::CidFontRevision
            | Key::CidFontType
            | Key::LanguageGroup
            | Key::InitialRandomSeed
            | Key::DefaultWidthX
            | Key::NominalWidthX => Value::Number(0.0),
            Key::UnderlinePosition => Value::Number(-100.0),
            Key::UnderlineThickness => Value::Number(50.0),
            Key::CharstringType => Value::Number(2.0),
            Key::FontMatrix => Value::Array(vec![0.001, 0.0, 0.0, 0.001, 0.0, 0.0]),
            Key::FontBBox => Value::Array(vec![0.0; 4]),
            Key::CidCount => Value::Number(8720.0),
            Key::BlueScale => Value::Number(0.039625),
            Key::BlueShift => Value::Number(7.0),
            Key::BlueFuzz => Value::Number(1.0),
            Key::ExpansionFactor => Value::Number(0.06),
            _ => return None,
        };
        Some(value)
    }

    fn find(keys: &[Key], operator: Operator) -> Option<Key> {
        keys.iter().copied().find(|key| key.operator() == operator)
    }
}

/// The value stored for a key.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// An integer or real operand.
    Number(f64),
    /// A number operand that is either 0 or 1.
    Bool(bool),
    /// A string id together with the string it resolved to.
    String(u16, String),
    /// All operands of the key, delta encoded arrays are not decoded.
    Array(Vec<f64>),
}

/// A parsed DICT. Lookups fall back to the documented defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dict {
    entries: FxHashMap<Key, Value>,
    private_offset: Option<usize>,
    local_subrs_offset: Option<usize>,
}

impl Dict {
    /// The value for `key`, either stored in the font or the default.
    pub fn get(&self, key: Key) -> Option<Value> {
        self.entries.get(&key).cloned().or_else(|| key.default_value())
    }

    /// Whether the font stores a value for `key`.
    pub fn contains(&self, key: Key) -> bool {
        self.entries.contains_key(&key)
    }

    /// A numeric value. Booleans read as 0 or 1.
    pub fn number(&self, key: Key) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => Some(n),
            Value::Bool(b) => Some(f64::from(u8::from(b))),
            _ => None,
        }
    }

    /// A boolean value.
    pub fn bool(&self, key: Key) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// The resolved string of a SID value. Has no defaults.
    pub fn string(&self, key: Key) -> Option<&str> {
        match self.entries.get(&key)? {
            Value::String(_, s) => Some(s),
            _ => None,
        }
    }

    /// An array value.
    pub fn array(&self, key: Key) -> Option<Vec<f64>> {
        match self.get(key)? {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// A stored value interpreted as an offset into the CFF table.
    pub fn offset(&self, key: Key) -> Option<usize> {
        let n = self.number(key)?;
        (n >= 0.0 && n.fract() == 0.0).then_some(n as usize)
    }

    /// Where the Private DICT starts in the CFF table, once merged.
    pub fn private_offset(&self) -> Option<usize> {
        self.private_offset
    }

    /// Where the local subroutines INDEX starts in the CFF table.
    ///
    /// The stored `Subrs` operand is relative to the Private DICT, this is the
    /// resolved absolute offset.
    pub fn local_subrs_offset(&self) -> Option<usize> {
        self.local_subrs_offset
    }

    /// Read the operator/operand pairs of `data` into `self`, keeping only the
    /// given keys. Later entries overwrite earlier ones.
    fn parse_into(&mut self, data: &[u8], keys: &[Key], strings: &Strings) -> Result<()> {
        let mut parser = DictionaryParser::new(data);
        while let Some(operator) = parser.parse_next()? {
            let Some(key) = Key::find(keys, operator) else {
                log::trace!("skipping unknown DICT operator {}", operator.0);
                continue;
            };

            let operands = parser.operands();
            let value = match key.kind() {
                Kind::Array => Value::Array(operands.iter().map(Number::as_f64).collect()),
                kind => {
                    let Some(first) = operands.first() else {
                        log::warn!("DICT key {key:?} has no operand");
                        continue;
                    };

                    match kind {
                        Kind::Bool => Value::Bool(first.as_f64() != 0.0),
                        Kind::Sid => {
                            let sid = first
                                .as_i32()
                                .and_then(|n| u16::try_from(n).ok())
                                .ok_or(Error::InvalidOffset)?;
                            let string = strings.get(sid).ok_or(Error::InvalidOffset)?;
                            Value::String(sid, string.to_string())
                        }
                        _ => Value::Number(first.as_f64()),
                    }
                }
            };

            self.entries.insert(key, value);
        }

        Ok(())
    }
}
