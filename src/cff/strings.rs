use super::index::Index;
use super::std_strings::STANDARD_STRINGS;

/// Number of strings predefined by the CFF format.
pub const STANDARD_STRING_LEN: u16 = 391;

/// Resolves string ids against the standard strings and the String INDEX.
#[derive(Clone, Debug, Default)]
pub struct Strings {
    index: Index,
}

impl Strings {
    pub fn new(index: Index) -> Self {
        Self { index }
    }

    /// The string for a SID. Custom strings that are not valid UTF-8 resolve to
    /// `None`.
    pub fn get(&self, sid: u16) -> Option<&str> {
        match sid.checked_sub(STANDARD_STRING_LEN) {
            None => STANDARD_STRINGS.get(usize::from(sid)).copied(),
            Some(i) => std::str::from_utf8(self.index.get(usize::from(i))?).ok(),
        }
    }
}
