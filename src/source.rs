//! Where font bytes come from.
//!
//! Every table is fetched through [`ByteSource::read_range`], so a font does not
//! need to be fully loaded before it can be opened.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::{Error, Result};

/// An immutable, randomly accessible run of font bytes.
///
/// Reads block until the requested range is available. A range that extends
/// past the end of the source is [`Error::MissingData`].
pub trait ByteSource {
    /// The total number of bytes in the source.
    fn len(&self) -> usize;

    /// Whether the source holds no bytes at all.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read exactly `len` bytes starting at `start`.
    fn read_range(&self, start: usize, len: usize) -> Result<Vec<u8>>;
}

fn copy_range(data: &[u8], start: usize, len: usize) -> Result<Vec<u8>> {
    let end = start.checked_add(len).ok_or(Error::MissingData)?;
    data.get(start..end).map(<[u8]>::to_vec).ok_or(Error::MissingData)
}

impl ByteSource for [u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn read_range(&self, start: usize, len: usize) -> Result<Vec<u8>> {
        copy_range(self, start, len)
    }
}

impl ByteSource for Vec<u8> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn read_range(&self, start: usize, len: usize) -> Result<Vec<u8>> {
        copy_range(self, start, len)
    }
}

impl ByteSource for Arc<[u8]> {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn read_range(&self, start: usize, len: usize) -> Result<Vec<u8>> {
        copy_range(self, start, len)
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &T {
    fn len(&self) -> usize {
        T::len(self)
    }

    fn read_range(&self, start: usize, len: usize) -> Result<Vec<u8>> {
        T::read_range(self, start, len)
    }
}

/// A font file on disk, read with positioned reads.
#[derive(Debug)]
pub struct FileSource {
    file: Mutex<File>,
    len: usize,
}

impl FileSource {
    /// Open the font file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(File::open(path)?)
    }

    /// Wrap an already opened file.
    pub fn new(file: File) -> Result<Self> {
        let len = usize::try_from(file.metadata()?.len()).map_err(|_| Error::InvalidOffset)?;
        Ok(Self { file: Mutex::new(file), len })
    }
}

impl ByteSource for FileSource {
    fn len(&self) -> usize {
        self.len
    }

    fn read_range(&self, start: usize, len: usize) -> Result<Vec<u8>> {
        let end = start.checked_add(len).ok_or(Error::MissingData)?;
        if end > self.len {
            return Err(Error::MissingData);
        }

        // A panic while holding the lock cannot leave the file in a state we
        // rely on, since every read seeks first.
        let mut file = self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        file.seek(SeekFrom::Start(start as u64))?;
        let mut buf = vec![0; len];
        file.read_exact(&mut buf)?;
        Ok(buf)
    }
}
