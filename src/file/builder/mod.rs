use alloc::vec::Vec;

use super::{MidiFile, MidiFileHeader, Track};
use crate::reader::{ChunkEvent, ReaderPolicies};

#[doc = r#"
Collects the chunks of a file as they are read.

The header is read first; the builder then accepts chunks until the
header's track count is reached or the data runs out.
"#]
#[derive(Debug)]
pub struct MidiFileBuilder {
    header: MidiFileHeader,
    tracks: Vec<Track>,
    unknown_chunks: usize,
    finished: bool,
}

impl MidiFileBuilder {
    /// Start a file from its header
    pub fn new(header: MidiFileHeader) -> Self {
        Self {
            header,
            tracks: Vec::with_capacity(header.track_count() as usize),
            unknown_chunks: 0,
            finished: false,
        }
    }

    /// True while more tracks are expected
    pub fn wants_chunks(&self) -> bool {
        !self.finished && self.tracks.len() < self.header.track_count() as usize
    }

    /// Handles a chunk of a midi file.
    pub fn handle_chunk(&mut self, chunk: ChunkEvent<'_>) {
        match chunk {
            ChunkEvent::Track(track) => self.tracks.push(track),
            ChunkEvent::TruncatedTrack(track) => {
                self.tracks.push(track);
                self.finished = true;
            }
            ChunkEvent::Unknown(_) => self.unknown_chunks += 1,
            ChunkEvent::Eof => self.finished = true,
        }
    }

    /// The number of non-track chunks skipped so far
    pub fn unknown_chunks(&self) -> usize {
        self.unknown_chunks
    }

    /// Finish the file, padding with empty tracks if the policies allow it.
    ///
    /// Without padding, the header's track count is set to the number of
    /// tracks actually read.
    pub fn build(mut self, policies: &ReaderPolicies) -> MidiFile {
        let declared = self.header.track_count() as usize;
        if self.tracks.len() < declared && policies.allow_track_count_discrepancy {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                declared,
                read = self.tracks.len(),
                "padding file with empty tracks"
            );
            self.tracks.resize_with(declared, Track::empty);
        }
        if self.tracks.len() != declared {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                declared,
                read = self.tracks.len(),
                "header track count adjusted to tracks read"
            );
            self.header = MidiFileHeader::new(
                self.header.format(),
                self.tracks.len() as u16,
                *self.header.timing(),
            );
        }
        MidiFile {
            header: self.header,
            tracks: self.tracks,
        }
    }
}
