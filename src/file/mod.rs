#![doc = r#"
Rusty representation of a [`MidiFile`]
"#]

/// Assembly of chunks into a [`MidiFile`]
pub mod builder;

mod format;
pub use format::*;

mod header;
pub use header::*;

mod meta;
pub use meta::*;

mod timing;
pub use timing::*;

mod track;
pub use track::*;

use crate::{
    FileError,
    file::builder::MidiFileBuilder,
    reader::{ReadResult, Reader, ReaderPolicies},
    writer,
};
use alloc::vec::Vec;

#[doc = r#"
A Standard MIDI File: a header and its tracks.

# Example
```rust
# use smfseq::prelude::*;
let track = Track::new(vec![
    Ticked::new(0, TrackMessage::Meta(MetaMessage::Tempo(Tempo::new(400_000)))),
    Ticked::new(0, TrackMessage::Meta(MetaMessage::EndOfTrack)),
])
.unwrap();
let file = MidiFile::new(
    FormatType::SingleMultiChannel,
    Timing::new_ticks_per_quarter_note(480).unwrap(),
    vec![track],
)
.unwrap();

let bytes = file.to_bytes();
assert_eq!(MidiFile::parse_with(&bytes, ReaderPolicies::strict()).unwrap(), file);
```
"#]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFile {
    header: MidiFileHeader,
    tracks: Vec<Track>,
}

impl MidiFile {
    /// Create a file from its tracks.
    ///
    /// The header's track count is taken from `tracks`. A format 0 file
    /// must hold exactly one track.
    pub fn new(format: FormatType, timing: Timing, tracks: Vec<Track>) -> Result<Self, FileError> {
        if format == FormatType::SingleMultiChannel && tracks.len() != 1 {
            return Err(FileError::SingleMultiChannelTrackCount(tracks.len()));
        }
        let track_count =
            u16::try_from(tracks.len()).map_err(|_| FileError::TooManyTracks(tracks.len()))?;
        Ok(Self {
            header: MidiFileHeader::new(format, track_count, timing),
            tracks,
        })
    }

    /// Parse a set of bytes into a file, using [`ReaderPolicies::lenient`]
    pub fn parse(bytes: impl AsRef<[u8]>) -> ReadResult<Self> {
        Self::parse_with(bytes, ReaderPolicies::lenient())
    }

    /// Parse a set of bytes into a file
    pub fn parse_with(bytes: impl AsRef<[u8]>, policies: ReaderPolicies) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes.as_ref());
        let header = MidiFileHeader::read(&mut reader)?;
        let mut builder = MidiFileBuilder::new(header);

        while builder.wants_chunks() {
            let chunk = reader.read_chunk(&policies)?;
            builder.handle_chunk(chunk);
        }

        Ok(builder.build(&policies))
    }

    /// Encode the file
    pub fn to_bytes(&self) -> Vec<u8> {
        writer::write_file(self)
    }

    /// Encode the file into a writer
    #[cfg(feature = "std")]
    pub fn write_to<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        out.write_all(&self.to_bytes())
    }

    /// The header
    pub fn header(&self) -> &MidiFileHeader {
        &self.header
    }

    /// Returns header info
    pub fn timing(&self) -> &Timing {
        self.header.timing()
    }

    /// Returns the format type for the file.
    pub fn format_type(&self) -> FormatType {
        self.header.format()
    }

    /// Returns the track list
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Take the tracks
    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }
}
