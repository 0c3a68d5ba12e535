use crate::read::{Reader, U24};
use crate::{Error, Result};

/// A CFF INDEX: a count-prefixed array of variable length byte records.
#[derive(Clone, Debug, PartialEq)]
pub struct Index {
    pub count: u16,
    /// `count + 1` offsets, 1-based and relative to the byte before `data`.
    pub offsets: Vec<u32>,
    pub data: Vec<u8>,
}

impl Default for Index {
    fn default() -> Self {
        Index { count: 0, offsets: vec![1], data: vec![] }
    }
}

impl Index {
    /// Parse an INDEX starting at `offset` and return it together with the
    /// number of bytes it occupies.
    ///
    /// An empty INDEX is only the 2-byte count.
    pub fn parse(data: &[u8], offset: usize) -> Result<(Index, usize)> {
        let mut r = Reader::new_at(data, offset);
        let count = r.read::<u16>().ok_or(Error::MissingData)?;
        if count == 0 {
            return Ok((Index::default(), 2));
        }

        let off_size = r.read::<u8>().ok_or(Error::MissingData)?;
        if !(1..=4).contains(&off_size) {
            return Err(Error::UnknownFormat {
                structure: "INDEX offset size",
                format: off_size.into(),
            });
        }

        let mut offsets = Vec::with_capacity(usize::from(count) + 1);
        for _ in 0..=count {
            offsets.push(read_offset(&mut r, off_size).ok_or(Error::MissingData)?);
        }

        if offsets[0] != 1 || offsets.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::InvalidOffset);
        }

        // Last offset indicates the size of the object data.
        let len = offsets[usize::from(count)] as usize - 1;
        let payload = r.read_bytes(len).ok_or(Error::MissingData)?.to_vec();
        let consumed = r.offset() - offset;

        Ok((Index { count, offsets, data: payload }, consumed))
    }

    /// The number of records.
    #[inline]
    pub fn len(&self) -> usize {
        usize::from(self.count)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The record at `index`.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        let start = *self.offsets.get(index)? as usize - 1;
        let end = *self.offsets.get(index.checked_add(1)?)? as usize - 1;
        self.data.get(start..end)
    }
}

fn read_offset(r: &mut Reader, off_size: u8) -> Option<u32> {
    match off_size {
        1 => r.read::<u8>().map(u32::from),
        2 => r.read::<u16>().map(u32::from),
        3 => r.read::<U24>().map(|n| n.0),
        _ => r.read::<u32>(),
    }
}
