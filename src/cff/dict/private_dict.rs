use super::{Dict, Key};
use crate::cff::strings::Strings;
use crate::{Error, Result};

/// The keys that may appear in a Private DICT.
pub const PRIVATE_DICT_KEYS: &[Key] = &[
    Key::BlueValues,
    Key::OtherBlues,
    Key::FamilyBlues,
    Key::FamilyOtherBlues,
    Key::BlueScale,
    Key::BlueShift,
    Key::BlueFuzz,
    Key::StdHw,
    Key::StdVw,
    Key::StemSnapH,
    Key::StemSnapV,
    Key::ForceBold,
    Key::LanguageGroup,
    Key::ExpansionFactor,
    Key::InitialRandomSeed,
    Key::Subrs,
    Key::DefaultWidthX,
    Key::NominalWidthX,
];

impl Dict {
    /// The second phase: read the Private DICT referenced by this Top DICT
    /// from `table` and return a dictionary holding both.
    ///
    /// Without a `Private` entry the result equals `self`.
    pub fn merge_private(&self, table: &[u8], strings: &Strings) -> Result<Dict> {
        let mut merged = self.clone();
        let Some(operands) = self.array(Key::Private) else {
            return Ok(merged);
        };

        let &[size, offset] = operands.as_slice() else {
            return Err(Error::InvalidOffset);
        };

        let size = to_offset(size)?;
        let offset = to_offset(offset)?;
        let end = offset.checked_add(size).ok_or(Error::InvalidOffset)?;
        let data = table.get(offset..end).ok_or(Error::InvalidOffset)?;
        merged.parse_into(data, PRIVATE_DICT_KEYS, strings)?;
        merged.private_offset = Some(offset);

        // The Subrs offset is relative to the start of the Private DICT.
        if merged.contains(Key::Subrs) {
            let subrs = merged.offset(Key::Subrs).ok_or(Error::InvalidOffset)?;
            merged.local_subrs_offset =
                Some(offset.checked_add(subrs).ok_or(Error::InvalidOffset)?);
        }

        log::debug!(
            "private DICT at {offset} with {size} bytes, local subrs at {:?}",
            merged.local_subrs_offset
        );

        Ok(merged)
    }
}

fn to_offset(n: f64) -> Result<usize> {
    if n >= 0.0 && n.fract() == 0.0 {
        Ok(n as usize)
    } else {
        Err(Error::InvalidOffset)
    }
}
