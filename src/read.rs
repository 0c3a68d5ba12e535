#[derive(Clone, Debug)]
/// A readable stream of big-endian binary data.
pub struct Reader<'a> {
    /// The underlying data of the reader.
    data: &'a [u8],
    /// The current offset in bytes. Is not guaranteed to be in range.
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Create a new readable stream of binary data.
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Create a new readable stream of binary data at a specific position.
    #[inline]
    pub fn new_at(data: &'a [u8], offset: usize) -> Self {
        Self { data, offset }
    }

    /// The remaining data from the current offset.
    #[inline]
    pub fn tail(&self) -> Option<&'a [u8]> {
        self.data.get(self.offset..)
    }

    /// Returns the current offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Try to read `T` from the data.
    #[inline]
    pub fn read<T: Readable<'a>>(&mut self) -> Option<T> {
        T::read(self)
    }

    /// Try to read `T` from the data without advancing.
    #[inline]
    pub fn peak<T: Readable<'a>>(&self) -> Option<T> {
        let mut r = self.clone();
        T::read(&mut r)
    }

    /// Read a certain number of bytes.
    #[inline]
    pub fn read_bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.offset.checked_add(len)?;
        let v = self.data.get(self.offset..end)?;
        self.offset = end;
        Some(v)
    }

    pub fn read_vector<T: Readable<'a>>(&mut self, count: usize) -> Option<Vec<T>> {
        // Don't trust the count for preallocation, the data might be truncated.
        let capacity = count.min(self.tail().map_or(0, |t| t.len() / T::SIZE.max(1)));
        let mut res = Vec::with_capacity(capacity);

        for _ in 0..count {
            res.push(self.read::<T>()?);
        }

        Some(res)
    }

    /// Check whether the reader is at the end of the buffer.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Skip the next `n` bytes from the stream. Fails if fewer are left.
    #[inline]
    pub fn skip_bytes(&mut self, n: usize) -> Option<()> {
        self.read_bytes(n).map(|_| ())
    }
}

/// Trait for an object that can be read from a byte stream with a fixed size.
pub trait Readable<'a>: Sized {
    const SIZE: usize;

    fn read(r: &mut Reader<'a>) -> Option<Self>;

    /// Read `Self` at a byte offset of `data`.
    fn read_at(data: &'a [u8], offset: usize) -> Option<Self> {
        Self::read(&mut Reader::new_at(data, offset))
    }
}

impl<const N: usize> Readable<'_> for [u8; N] {
    const SIZE: usize = N;

    fn read(r: &mut Reader) -> Option<Self> {
        r.read_bytes(N)?.try_into().ok()
    }
}

/// Big-endian primitives, sized by their byte representation.
macro_rules! readable_int {
    ($($ty:ty),*) => {$(
        impl Readable<'_> for $ty {
            const SIZE: usize = std::mem::size_of::<$ty>();

            fn read(r: &mut Reader) -> Option<Self> {
                r.read::<[u8; std::mem::size_of::<$ty>()]>().map(<$ty>::from_be_bytes)
            }
        }
    )*};
}

readable_int!(u8, u16, i16, u32, i32, i64);

/// A 24-bit unsigned integer, used by 3-byte INDEX offsets.
#[derive(Clone, Copy, Debug)]
pub struct U24(pub u32);

impl Readable<'_> for U24 {
    const SIZE: usize = 3;

    fn read(r: &mut Reader<'_>) -> Option<Self> {
        let data = r.read::<[u8; 3]>()?;
        Some(U24(u32::from_be_bytes([0, data[0], data[1], data[2]])))
    }
}

/// A 32-bit signed fixed-point number (16.16).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fixed(pub f32);

impl Readable<'_> for Fixed {
    const SIZE: usize = 4;

    #[inline]
    fn read(r: &mut Reader<'_>) -> Option<Self> {
        i32::read(r).map(|n| Fixed(n as f32 / 65536.0))
    }
}
