use thiserror::Error;

use crate::file::MetaType;

#[doc = r#"
An error produced while interpreting MIDI data.

These are data errors: the bytes were there, but they didn't describe
something the reader could accept.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The file header was malformed
    #[error("Header: {0}")]
    Header(#[from] HeaderError),
    /// A meta event was malformed
    #[error("Meta event: {0}")]
    Meta(#[from] MetaError),
    /// An SMPTE value was out of range
    #[error("SMPTE: {0}")]
    Smpte(#[from] SmpteError),
    /// A track's event stream was malformed
    #[error("Track: {0}")]
    Track(#[from] TrackError),
    /// A file couldn't be assembled
    #[error("File: {0}")]
    File(#[from] FileError),
    /// A data byte had its leading bit set
    #[error("Invalid data byte {0:#04X} (leading bit set)")]
    DataByte(u8),
}

/// Problems with the `MThd` chunk
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    /// The file did not begin with `MThd`
    #[error("Missing header, found tag {0:?}")]
    MissingHeader([u8; 4]),
    /// The header chunk declared fewer than 6 bytes
    #[error("Invalid header length {0}")]
    InvalidLength(u32),
    /// The format was not 0, 1 or 2
    #[error("Invalid format {0}")]
    InvalidFormat(u16),
    /// Ticks per quarter note must be within `1..=32767`
    #[error("Invalid ticks per quarter note {0}")]
    InvalidTicksPerQuarterNote(u16),
    /// The SMPTE frame rate was not one of -24, -25, -29 or -30
    #[error("Invalid SMPTE frame rate {0}")]
    InvalidFrameRate(i8),
}

/// Problems with an individual meta event
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MetaError {
    /// The declared length is too short for the event type
    #[error("Incomplete {meta_type:?}: needs {expected} bytes, declared {found}")]
    Incomplete {
        /// The event which was short
        meta_type: MetaType,
        /// The minimum length for this event
        expected: u32,
        /// The declared length
        found: u32,
    },
    /// The key or scale of a key signature was out of range
    #[error("Invalid key signature (key {key}, scale {scale})")]
    KeySignature {
        /// Sharps (positive) or flats (negative)
        key: i8,
        /// 0 for major, 1 for minor
        scale: u8,
    },
    /// A channel prefix outside of `0..=15`
    #[error("Invalid channel prefix {0}")]
    ChannelPrefix(u8),
}

/// SMPTE value errors
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SmpteError {
    /// An SMPTE offset must be exactly five bytes
    #[error("SMPTE offset needs 5 bytes, got {0}")]
    Length(usize),
    /// The frame rate bits of an SMPTE offset were not `0..=3`
    #[error("Invalid SMPTE offset frame type {0}")]
    TrackFrame(u8),
    /// Hours above 23
    #[error("Invalid SMPTE hour {0}")]
    HourOffset(u8),
    /// Minutes above 59
    #[error("Invalid SMPTE minute {0}")]
    MinuteOffset(u8),
    /// Seconds above 59
    #[error("Invalid SMPTE second {0}")]
    SecondOffset(u8),
    /// Subframes above 99
    #[error("Invalid SMPTE subframe {0}")]
    Subframe(u8),
}

/// Problems with the event stream of an `MTrk` chunk
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TrackError {
    /// A data byte appeared where no running status was active
    #[error("Data byte {0:#04X} without a running status")]
    MissingRunningStatus(u8),
    /// A status byte this reader cannot decode inside a file
    #[error("Unsupported status byte {0:#04X}")]
    UnsupportedStatus(u8),
    /// A variable-length quantity ran past four bytes
    #[error("Variable-length quantity longer than 4 bytes")]
    VariableLengthOverflow,
    /// A note on velocity above 127 while coercion is disabled
    #[error("Velocity {0} out of range")]
    Velocity(u8),
}

/// Problems assembling a [`MidiFile`](crate::file::MidiFile) or [`Track`](crate::file::Track)
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FileError {
    /// A format 0 file holds exactly one track
    #[error("Format 0 requires exactly one track, found {0}")]
    SingleMultiChannelTrackCount(usize),
    /// The file holds more tracks than a header can declare
    #[error("{0} tracks do not fit in a header")]
    TooManyTracks(usize),
    /// An event sits before its predecessor
    #[error("Event {index} at tick {tick} precedes the previous event")]
    DecreasingTick {
        /// Position of the event in the track
        index: usize,
        /// The offending tick
        tick: u64,
    },
    /// The gap between two events doesn't fit in a delta-time
    #[error("Delta-time before event {index} exceeds 0x0FFFFFFF")]
    DeltaTooLarge {
        /// Position of the event in the track
        index: usize,
    },
}
