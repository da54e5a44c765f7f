#![doc = r#"
Meta events: the non-MIDI information carried inside a track.

Every meta event is encoded as `FF <type> <len> <data>`, where `len` is a
variable-length quantity. Text events share one shape; the rest have a fixed
minimum size.
"#]

mod key_signature;
pub use key_signature::*;

mod smpte_offset;
pub use smpte_offset::*;

mod tempo;
pub use tempo::*;

mod text;
pub use text::*;

mod time_signature;
pub use time_signature::*;

use alloc::vec::Vec;
use num_enum::{FromPrimitive, IntoPrimitive};

use crate::Channel;

/// The type byte following `0xFF`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum MetaType {
    SequenceNumber = 0x00,
    Text = 0x01,
    Copyright = 0x02,
    TrackName = 0x03,
    InstrumentName = 0x04,
    Lyric = 0x05,
    Marker = 0x06,
    CuePoint = 0x07,
    ChannelPrefix = 0x20,
    EndOfTrack = 0x2F,
    Tempo = 0x51,
    SmpteOffset = 0x54,
    TimeSignature = 0x58,
    KeySignature = 0x59,
    SequencerSpecific = 0x7F,
    /// Any type this crate does not interpret
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl MetaType {
    /// The smallest declared length the event can be decoded from.
    ///
    /// `None` for events whose length is entirely variable.
    pub const fn minimum_length(&self) -> Option<usize> {
        match self {
            Self::SequenceNumber => Some(2),
            Self::ChannelPrefix => Some(1),
            Self::Tempo => Some(3),
            Self::SmpteOffset => Some(5),
            Self::TimeSignature => Some(4),
            Self::KeySignature => Some(2),
            _ => None,
        }
    }
}

#[doc = r#"
A decoded meta event
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetaMessage {
    /// `FF 00 02 ssss`
    SequenceNumber(u16),
    /// `FF 01 len text`
    Text(Text),
    /// `FF 02 len text`
    Copyright(Text),
    /// `FF 03 len text`. Sequence name in the first track, track name elsewhere.
    TrackName(Text),
    /// `FF 04 len text`
    InstrumentName(Text),
    /// `FF 05 len text`
    Lyric(Text),
    /// `FF 06 len text`
    Marker(Text),
    /// `FF 07 len text`
    CuePoint(Text),
    /// `FF 20 01 cc`: the channel following meta and sysex events refer to
    ChannelPrefix(Channel),
    /// `FF 2F 00`: the last event of every track
    EndOfTrack,
    /// `FF 51 03 tttttt`
    Tempo(Tempo),
    /// `FF 54 05 hr mn se fr ff`
    SmpteOffset(SmpteOffset),
    /// `FF 58 04 nn dd cc bb`
    TimeSignature(TimeSignature),
    /// `FF 59 02 sf mi`
    KeySignature(KeySignature),
    /// `FF 7F len data`
    SequencerSpecific(Vec<u8>),
    /// A meta event of a type this crate does not interpret
    Unknown {
        /// The type byte
        meta_type: u8,
        /// The raw contents
        data: Vec<u8>,
    },
}

impl MetaMessage {
    /// The type byte of the event
    pub fn meta_type(&self) -> MetaType {
        match self {
            Self::SequenceNumber(_) => MetaType::SequenceNumber,
            Self::Text(_) => MetaType::Text,
            Self::Copyright(_) => MetaType::Copyright,
            Self::TrackName(_) => MetaType::TrackName,
            Self::InstrumentName(_) => MetaType::InstrumentName,
            Self::Lyric(_) => MetaType::Lyric,
            Self::Marker(_) => MetaType::Marker,
            Self::CuePoint(_) => MetaType::CuePoint,
            Self::ChannelPrefix(_) => MetaType::ChannelPrefix,
            Self::EndOfTrack => MetaType::EndOfTrack,
            Self::Tempo(_) => MetaType::Tempo,
            Self::SmpteOffset(_) => MetaType::SmpteOffset,
            Self::TimeSignature(_) => MetaType::TimeSignature,
            Self::KeySignature(_) => MetaType::KeySignature,
            Self::SequencerSpecific(_) => MetaType::SequencerSpecific,
            Self::Unknown { meta_type, .. } => MetaType::from(*meta_type),
        }
    }

    /// Appends the event's data, without type or length, to `out`
    pub(crate) fn write_data(&self, out: &mut Vec<u8>) {
        match self {
            Self::SequenceNumber(n) => out.extend_from_slice(&n.to_be_bytes()),
            Self::Text(t)
            | Self::Copyright(t)
            | Self::TrackName(t)
            | Self::InstrumentName(t)
            | Self::Lyric(t)
            | Self::Marker(t)
            | Self::CuePoint(t) => out.extend_from_slice(t.as_bytes()),
            Self::ChannelPrefix(c) => out.push(c.to_nibble()),
            Self::EndOfTrack => {}
            Self::Tempo(t) => out.extend_from_slice(&t.to_bytes()),
            Self::SmpteOffset(o) => out.extend_from_slice(&o.to_bytes()),
            Self::TimeSignature(t) => out.extend_from_slice(&t.to_bytes()),
            Self::KeySignature(k) => out.extend_from_slice(&k.to_bytes()),
            Self::SequencerSpecific(data) | Self::Unknown { data, .. } => {
                out.extend_from_slice(data)
            }
        }
    }
}

#[test]
fn meta_type_bytes() {
    use pretty_assertions::assert_eq;
    assert_eq!(MetaType::from(0x51), MetaType::Tempo);
    assert_eq!(MetaType::from(0x21), MetaType::Unknown(0x21));
    assert_eq!(u8::from(MetaType::KeySignature), 0x59);
    assert_eq!(u8::from(MetaType::Unknown(0x21)), 0x21);
    assert_eq!(MetaType::SmpteOffset.minimum_length(), Some(5));
    assert_eq!(MetaType::Lyric.minimum_length(), None);
}
