use super::{ReadResult, Reader, ReaderError, ReaderPolicies};
use crate::file::Track;

/// The tag of a track chunk
pub const TRACK_TAG: [u8; 4] = *b"MTrk";

#[doc = r#"
A chunk that is neither a header nor a track.

The reader never interprets these; they are skipped as a whole.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownChunk<'slc> {
    tag: [u8; 4],
    data: &'slc [u8],
}

impl<'slc> UnknownChunk<'slc> {
    /// The four byte type identifier
    pub const fn tag(&self) -> [u8; 4] {
        self.tag
    }
    /// The chunk contents
    pub const fn data(&self) -> &'slc [u8] {
        self.data
    }
}

/// The result of reading one chunk after the header
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkEvent<'slc> {
    /// A fully read `MTrk` chunk
    Track(Track),
    /// An `MTrk` chunk whose data ended mid-event.
    ///
    /// Only produced under [`EndOfFilePolicy::AllowDirty`](super::EndOfFilePolicy::AllowDirty).
    /// Nothing after it should be read.
    TruncatedTrack(Track),
    /// Some other chunk
    Unknown(UnknownChunk<'slc>),
    /// No more data where a chunk would begin
    Eof,
}

impl<'slc> Reader<'slc> {
    /// Read the next chunk following the header.
    pub fn read_chunk(&mut self, policies: &ReaderPolicies) -> ReadResult<ChunkEvent<'slc>> {
        if self.is_exhausted() {
            return if policies.end_of_file.allows_clean() {
                #[cfg(feature = "tracing")]
                tracing::debug!(position = self.buffer_position(), "data ended between chunks");
                Ok(ChunkEvent::Eof)
            } else {
                Err(ReaderError::eof(self.buffer_position()))
            };
        }

        let (tag, length) = match self.read_chunk_header() {
            Ok(v) => v,
            Err(e) => return dirty_eof(e, policies),
        };

        if tag != TRACK_TAG {
            let data = match self.read_slice(length as usize) {
                Ok(data) => data,
                Err(e) => return dirty_eof(e, policies),
            };
            #[cfg(feature = "tracing")]
            tracing::debug!(?tag, length, "skipping unknown chunk");
            return Ok(ChunkEvent::Unknown(UnknownChunk { tag, data }));
        }

        self.read_track(length, policies)
    }

    /// Reads the 4 byte tag and the 32 bit length of a chunk
    pub(crate) fn read_chunk_header(&mut self) -> ReadResult<([u8; 4], u32)> {
        let start = self.buffer_position();
        let tag = self.read_exact_size::<4>()?;
        match self.read_u32() {
            Ok(length) => Ok((tag, length)),
            Err(e) => {
                self.position = start;
                Err(e)
            }
        }
    }
}

fn dirty_eof<'slc>(
    error: ReaderError,
    policies: &ReaderPolicies,
) -> ReadResult<ChunkEvent<'slc>> {
    if error.is_unexpected_eof() && policies.end_of_file.allows_dirty() {
        #[cfg(feature = "tracing")]
        tracing::warn!(position = error.position(), "data ended inside a chunk header");
        Ok(ChunkEvent::Eof)
    } else {
        Err(error)
    }
}
