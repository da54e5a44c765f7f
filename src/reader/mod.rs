#![doc = r#"
Byte-level decoding of Standard MIDI Files

The [`Reader`] is a position-tracking cursor over a borrowed byte buffer.
Every primitive either succeeds and advances, or fails and leaves the
position where it was.

Most users want [`MidiFile::parse`](crate::file::MidiFile::parse) instead.
"#]

mod error;
pub use error::*;

mod policy;
pub use policy::*;

mod chunk;
pub use chunk::*;

mod meta;
mod track;

/// The largest value a MIDI variable-length quantity may hold
pub const MAX_VLQ: u32 = 0x0FFF_FFFF;

#[doc = r#"
A cursor over MIDI bytes

# Example
```rust
# use smfseq::reader::Reader;
let mut reader = Reader::from_byte_slice(&[0x81, 0x80, 0x00, 0x12, 0x34]);

assert_eq!(reader.read_vlq().unwrap(), (0x4000, 3));
assert_eq!(reader.read_u16().unwrap(), 0x1234);
assert!(reader.read_u8().unwrap_err().is_unexpected_eof());
```
"#]
#[derive(Debug, Clone)]
pub struct Reader<'slc> {
    data: &'slc [u8],
    position: usize,
}

impl<'slc> Reader<'slc> {
    /// Create a reader over a byte slice
    pub const fn from_byte_slice(data: &'slc [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// The current offset into the data
    #[inline]
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Bytes left to read
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// True if every byte has been read
    #[inline]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Look at the next byte without consuming it
    pub fn peek_u8(&self) -> ReadResult<u8> {
        self.data
            .get(self.position)
            .copied()
            .ok_or(ReaderError::eof(self.position))
    }

    /// Read one byte
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let byte = self.peek_u8()?;
        self.position += 1;
        Ok(byte)
    }

    /// Read `len` bytes as a slice of the underlying data
    pub fn read_slice(&mut self, len: usize) -> ReadResult<&'slc [u8]> {
        let end = self
            .position
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(ReaderError::eof(self.position))?;
        let slice = &self.data[self.position..end];
        self.position = end;
        Ok(slice)
    }

    /// Read exactly `N` bytes
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let slice = self.read_slice(N)?;
        let mut out = [0; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Read a big-endian 16-bit word
    pub fn read_u16(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_be_bytes)
    }

    /// Read a big-endian 24-bit integer
    pub fn read_u24(&mut self) -> ReadResult<u32> {
        let [a, b, c] = self.read_exact_size()?;
        Ok(u32::from_be_bytes([0, a, b, c]))
    }

    /// Read a big-endian 32-bit word
    pub fn read_u32(&mut self) -> ReadResult<u32> {
        self.read_exact_size().map(u32::from_be_bytes)
    }

    /// Read a variable-length quantity.
    ///
    /// Returns the decoded value and the number of bytes it occupied.
    /// Quantities are at most four bytes long.
    pub fn read_vlq(&mut self) -> ReadResult<(u32, usize)> {
        let data = self.data;
        let mut value: u32 = 0;
        for (i, byte) in data[self.position..].iter().take(4).enumerate() {
            value = (value << 7) | (byte & 0x7F) as u32;
            if byte & 0x80 == 0 {
                self.position += i + 1;
                return Ok((value, i + 1));
            }
        }
        if self.remaining() < 4 {
            Err(ReaderError::eof(self.position))
        } else {
            Err(inv_data(self, crate::TrackError::VariableLengthOverflow))
        }
    }

    /// Skip `len` bytes.
    ///
    /// Unlike the read operations, this fails with
    /// [`ReaderErrorKind::OutOfBounds`]. Check [`Reader::remaining`] first.
    pub fn skip(&mut self, len: usize) -> ReadResult<()> {
        if len > self.remaining() {
            return Err(ReaderError::oob(self.position));
        }
        self.position += len;
        Ok(())
    }

    /// Skip `len` bytes that the data claims to contain.
    ///
    /// Running out here means the file is truncated.
    pub(crate) fn skip_declared(&mut self, len: usize) -> ReadResult<()> {
        if len > self.remaining() {
            return Err(ReaderError::eof(self.position));
        }
        self.skip(len)
    }
}
