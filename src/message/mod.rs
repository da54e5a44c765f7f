#![doc = r#"
The events that make up a track

A [`TrackEvent`] is a [`TrackMessage`] stamped with the absolute tick it
occurs at. Delta-times only exist on the wire: the reader sums them up and
the writer derives them again.

# Hierarchy
```text
                     |--------------|
                     | TrackMessage |
                     |--------------|
                    /       |        \
|-----------------------| |------| |------------------------|
| Channel Voice Message | | Meta | | System Exclusive       |
|-----------------------| |------| |------------------------|
```
"#]

pub mod channel;
pub use channel::*;

mod sysex;
pub use sysex::*;

use crate::file::MetaMessage;

/// Something with an absolute tick position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ticked<T> {
    accumulated_ticks: u64,
    event: T,
}

impl<T> Ticked<T> {
    /// Stamp an event with a tick
    pub const fn new(accumulated_ticks: u64, event: T) -> Self {
        Self {
            accumulated_ticks,
            event,
        }
    }
    /// Ticks since the start of the track
    #[inline]
    pub const fn accumulated_ticks(&self) -> u64 {
        self.accumulated_ticks
    }
    /// The event
    #[inline]
    pub const fn event(&self) -> &T {
        &self.event
    }
    /// Take the event
    pub fn into_event(self) -> T {
        self.event
    }
}

impl<T: Eq> Eq for Ticked<T> {}

/// An event in a track
pub type TrackEvent = Ticked<TrackMessage>;

#[doc = r#"
Anything a track chunk can carry
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackMessage {
    /// A channel voice message
    ChannelVoice(ChannelVoiceMessage),
    /// A system exclusive message
    SystemExclusive(SystemExclusiveMessage),
    /// A meta event
    Meta(MetaMessage),
}

impl TrackMessage {
    /// The channel voice message, if this is one
    pub const fn as_channel_voice(&self) -> Option<&ChannelVoiceMessage> {
        match self {
            Self::ChannelVoice(m) => Some(m),
            _ => None,
        }
    }
    /// The meta event, if this is one
    pub const fn as_meta(&self) -> Option<&MetaMessage> {
        match self {
            Self::Meta(m) => Some(m),
            _ => None,
        }
    }
}

impl From<ChannelVoiceMessage> for TrackMessage {
    fn from(value: ChannelVoiceMessage) -> Self {
        Self::ChannelVoice(value)
    }
}

impl From<SystemExclusiveMessage> for TrackMessage {
    fn from(value: SystemExclusiveMessage) -> Self {
        Self::SystemExclusive(value)
    }
}

impl From<MetaMessage> for TrackMessage {
    fn from(value: MetaMessage) -> Self {
        Self::Meta(value)
    }
}
