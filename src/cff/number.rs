use crate::read::{Fixed, Reader};
use std::fmt::{Debug, Formatter};

const FLOAT_STACK_LEN: usize = 64;
const END_OF_FLOAT_FLAG: u8 = 0xf;

/// An operand of a DICT or charstring.
#[derive(Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i32),
    Real(f64),
    Fixed(f32),
}

impl Debug for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_f64())
    }
}

impl Number {
    /// Parse a number inside a DICT.
    pub fn parse_cff_number(r: &mut Reader) -> Option<Number> {
        Self::parse_number(r, false)
    }

    /// Parse a number inside a charstring.
    pub fn parse_char_string_number(r: &mut Reader) -> Option<Number> {
        Self::parse_number(r, true)
    }

    fn parse_number(r: &mut Reader, charstring_num: bool) -> Option<Number> {
        match r.peak::<u8>()? {
            // Real numbers only exist in DICTs.
            30 if !charstring_num => parse_real(r).map(Number::Real),
            // FIXED only exists in charstrings.
            255 if charstring_num => {
                r.read::<u8>()?;
                r.read::<Fixed>().map(|n| Number::Fixed(n.0))
            }
            29 if !charstring_num => {
                r.read::<u8>()?;
                r.read::<i32>().map(Number::Integer)
            }
            _ => parse_integer(r).map(Number::Integer),
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Integer(int) => int as f64,
            Number::Real(real) => real,
            Number::Fixed(fixed) => fixed as f64,
        }
    }

    pub fn as_f32(&self) -> f32 {
        self.as_f64() as f32
    }

    /// The number as an integer, if it has no fractional part.
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            Number::Integer(int) => Some(int),
            _ => {
                let num = self.as_f64();
                if num.fract() == 0.0 && num >= i32::MIN as f64 && num <= i32::MAX as f64 {
                    Some(num as i32)
                } else {
                    None
                }
            }
        }
    }
}

/// Parse the integer encodings shared by DICTs and charstrings.
fn parse_integer(r: &mut Reader) -> Option<i32> {
    let b0 = r.read::<u8>()?;
    match b0 {
        28 => Some(i32::from(r.read::<i16>()?)),
        32..=246 => Some(i32::from(b0) - 139),
        247..=250 => {
            let b1 = i32::from(r.read::<u8>()?);
            Some((i32::from(b0) - 247) * 256 + b1 + 108)
        }
        251..=254 => {
            let b1 = i32::from(r.read::<u8>()?);
            Some(-(i32::from(b0) - 251) * 256 - b1 - 108)
        }
        _ => None,
    }
}

// The parsing logic was taken from ttf-parser.
fn parse_real(r: &mut Reader) -> Option<f64> {
    let mut data = [0u8; FLOAT_STACK_LEN];
    let mut idx = 0;

    let b0 = r.read::<u8>()?;
    if b0 != 30 {
        return None;
    }

    loop {
        let b1: u8 = r.read()?;
        let nibble1 = b1 >> 4;
        let nibble2 = b1 & 15;

        if nibble1 == END_OF_FLOAT_FLAG {
            break;
        }

        idx = parse_float_nibble(nibble1, idx, &mut data)?;

        if nibble2 == END_OF_FLOAT_FLAG {
            break;
        }

        idx = parse_float_nibble(nibble2, idx, &mut data)?;
    }

    let s = core::str::from_utf8(&data[..idx]).ok()?;
    s.parse().ok()
}

fn parse_float_nibble(nibble: u8, mut idx: usize, data: &mut [u8]) -> Option<usize> {
    if idx == FLOAT_STACK_LEN {
        return None;
    }

    match nibble {
        0..=9 => data[idx] = b'0' + nibble,
        10 => data[idx] = b'.',
        11 => data[idx] = b'E',
        12 => {
            if idx + 1 == FLOAT_STACK_LEN {
                return None;
            }

            data[idx] = b'E';
            idx += 1;
            data[idx] = b'-';
        }
        14 => data[idx] = b'-',
        // 13 is reserved.
        _ => return None,
    }

    idx += 1;
    Some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict_number(bytes: &[u8]) -> Option<Number> {
        let mut r = Reader::new(bytes);
        let n = Number::parse_cff_number(&mut r)?;
        assert!(r.at_end());
        Some(n)
    }

    #[test]
    fn integers() {
        assert_eq!(dict_number(&[139]), Some(Number::Integer(0)));
        assert_eq!(dict_number(&[32]), Some(Number::Integer(-107)));
        assert_eq!(dict_number(&[246]), Some(Number::Integer(107)));
        assert_eq!(dict_number(&[247, 0]), Some(Number::Integer(108)));
        assert_eq!(dict_number(&[250, 255]), Some(Number::Integer(1131)));
        assert_eq!(dict_number(&[251, 0]), Some(Number::Integer(-108)));
        assert_eq!(dict_number(&[254, 255]), Some(Number::Integer(-1131)));
        assert_eq!(dict_number(&[28, 0x80, 0x00]), Some(Number::Integer(-32768)));
        assert_eq!(dict_number(&[29, 0, 1, 0, 0]), Some(Number::Integer(65536)));
    }

    #[test]
    fn truncated() {
        assert_eq!(dict_number(&[247]), None);
        assert_eq!(dict_number(&[28, 1]), None);
        assert_eq!(dict_number(&[30, 0x12]), None);
    }

    #[test]
    fn parse_float() {
        let num = [0x1E, 0xE2, 0x49, 0x32, 0xA1, 0x2C, 0x2F];
        assert_eq!(dict_number(&num), Some(Number::Real(-249.3212)));

        // 0.039625
        let num = [0x1E, 0x0A, 0x03, 0x96, 0x25, 0xFF];
        assert_eq!(dict_number(&num), Some(Number::Real(0.039625)));

        // 1E-2
        let num = [0x1E, 0x1C, 0x2F];
        assert_eq!(dict_number(&num), Some(Number::Real(0.01)));
    }

    #[test]
    fn charstring_numbers() {
        let mut r = Reader::new(&[255, 0, 1, 0x80, 0]);
        assert_eq!(Number::parse_char_string_number(&mut r), Some(Number::Fixed(1.5)));

        // 29 is callgsubr inside charstrings, not a number.
        let mut r = Reader::new(&[29, 0, 0, 0, 0]);
        assert_eq!(Number::parse_char_string_number(&mut r), None);
        assert_eq!(Number::Real(3.0).as_i32(), Some(3));
        assert_eq!(Number::Real(3.5).as_i32(), None);
    }
}
