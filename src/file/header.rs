use super::{FormatType, Timing};
use crate::{
    HeaderError,
    reader::{ReadResult, Reader, inv_data},
};

/// The tag of the header chunk
pub const HEADER_TAG: [u8; 4] = *b"MThd";

#[doc = r#"
The contents of the `MThd` chunk
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFileHeader {
    format: FormatType,
    track_count: u16,
    timing: Timing,
}

impl MidiFileHeader {
    /// Create a new header
    pub const fn new(format: FormatType, track_count: u16, timing: Timing) -> Self {
        Self {
            format,
            track_count,
            timing,
        }
    }
    /// How the tracks relate to each other
    pub const fn format(&self) -> FormatType {
        self.format
    }
    /// The number of tracks the header declares
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }
    /// Get the timing props
    pub const fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Reads the header chunk, including its tag and length.
    ///
    /// Header bytes beyond the six known ones are skipped.
    pub fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let tag = reader.read_exact_size::<4>()?;
        if tag != HEADER_TAG {
            return Err(inv_data(reader, HeaderError::MissingHeader(tag)));
        }
        let length = reader.read_u32()?;
        if length < 6 {
            return Err(inv_data(reader, HeaderError::InvalidLength(length)));
        }
        let format = reader.read_u16()?;
        let format =
            FormatType::try_from(format).map_err(|_| inv_data(reader, HeaderError::InvalidFormat(format)))?;
        let track_count = reader.read_u16()?;
        let timing = Timing::from_division(reader.read_u16()?).map_err(|e| inv_data(reader, e))?;
        reader.skip_declared(length as usize - 6)?;

        Ok(Self {
            format,
            track_count,
            timing,
        })
    }

    /// The six data bytes of the header chunk
    pub fn to_bytes(&self) -> [u8; 6] {
        let mut bytes = [0; 6];
        bytes[0..2].copy_from_slice(&u16::from(self.format).to_be_bytes());
        bytes[2..4].copy_from_slice(&self.track_count.to_be_bytes());
        bytes[4..6].copy_from_slice(&self.timing.to_division().to_be_bytes());
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParseError, file::SmpteFps};
    use pretty_assertions::assert_eq;

    fn read(bytes: &[u8]) -> ReadResult<MidiFileHeader> {
        MidiFileHeader::read(&mut Reader::from_byte_slice(bytes))
    }

    fn header_error(bytes: &[u8]) -> HeaderError {
        match read(bytes).unwrap_err().parse_error() {
            Some(ParseError::Header(e)) => *e,
            other => panic!("expected a header error, got {other:?}"),
        }
    }

    #[test]
    fn reads_metrical_header() {
        let header = read(&[
            0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x03, 0x00, 0x60,
        ])
        .unwrap();
        assert_eq!(header.format(), FormatType::Simultaneous);
        assert_eq!(header.track_count(), 3);
        assert_eq!(header.timing().ticks_per_quarter_note(), Some(96));
        assert_eq!(header.to_bytes(), [0x00, 0x01, 0x00, 0x03, 0x00, 0x60]);
    }

    #[test]
    fn skips_header_extension() {
        let mut reader = Reader::from_byte_slice(&[
            0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x01, 0xE2, 0x50,
            0xAA, 0xBB, 0x4D,
        ]);
        let header = MidiFileHeader::read(&mut reader).unwrap();
        assert_eq!(*header.timing(), Timing::new_smpte(SmpteFps::Thirty, 80));
        assert_eq!(reader.buffer_position(), 16);
    }

    #[test]
    fn rejects_bad_headers() {
        assert_eq!(
            header_error(b"MTrk\x00\x00\x00\x06\x00\x00\x00\x01\x00\x60"),
            HeaderError::MissingHeader(*b"MTrk")
        );
        assert_eq!(
            header_error(b"MThd\x00\x00\x00\x04\x00\x00\x00\x01\x00\x60"),
            HeaderError::InvalidLength(4)
        );
        assert_eq!(
            header_error(b"MThd\x00\x00\x00\x06\x00\x03\x00\x01\x00\x60"),
            HeaderError::InvalidFormat(3)
        );
        assert_eq!(
            header_error(b"MThd\x00\x00\x00\x06\x00\x00\x00\x01\x00\x00"),
            HeaderError::InvalidTicksPerQuarterNote(0)
        );
    }
}
