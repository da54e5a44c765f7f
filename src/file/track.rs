use alloc::{borrow::Cow, vec::Vec};

use crate::{
    FileError,
    file::MetaMessage,
    message::{ChannelVoiceMessage, Ticked, TrackEvent, TrackMessage, VoiceEvent},
    reader::MAX_VLQ,
};

#[doc = r#"
An ordered list of events from one `MTrk` chunk.

Ticks never decrease from one event to the next.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    events: Vec<TrackEvent>,
}

impl Track {
    /// Create a track, checking that ticks never decrease and that every
    /// gap between events fits in a delta-time.
    ///
    /// A note on with zero velocity is stored as a note off, the same way
    /// the reader stores it.
    pub fn new(events: Vec<TrackEvent>) -> Result<Self, FileError> {
        let events: Vec<TrackEvent> = events.into_iter().map(silent_note_on_as_off).collect();
        let mut previous = 0;
        for (index, event) in events.iter().enumerate() {
            let tick = event.accumulated_ticks();
            if tick < previous {
                return Err(FileError::DecreasingTick { index, tick });
            }
            if tick - previous > MAX_VLQ as u64 {
                return Err(FileError::DeltaTooLarge { index });
            }
            previous = tick;
        }
        Ok(Self { events })
    }

    /// An empty track
    pub const fn empty() -> Self {
        Self { events: Vec::new() }
    }

    pub(crate) const fn from_events_unchecked(events: Vec<TrackEvent>) -> Self {
        Self { events }
    }

    /// The events of the track
    pub fn events(&self) -> &[TrackEvent] {
        &self.events
    }

    /// Take the events of the track
    pub fn into_events(self) -> Vec<TrackEvent> {
        self.events
    }

    /// The number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if the track holds no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The text of the first track name event, if any
    pub fn name(&self) -> Option<Cow<'_, str>> {
        self.events.iter().find_map(|e| match e.event() {
            TrackMessage::Meta(MetaMessage::TrackName(text)) => Some(text.as_str()),
            _ => None,
        })
    }

    /// The tick of the last event
    pub fn end_tick(&self) -> u64 {
        self.events.last().map(|e| e.accumulated_ticks()).unwrap_or(0)
    }
}

fn silent_note_on_as_off(event: TrackEvent) -> TrackEvent {
    let note_off = match event.event().as_channel_voice() {
        Some(msg) => match *msg.event() {
            VoiceEvent::NoteOn { note, velocity } if velocity.value() == 0 => Some(
                ChannelVoiceMessage::new(msg.channel(), VoiceEvent::note_on(note, velocity)),
            ),
            _ => None,
        },
        None => None,
    };
    match note_off {
        Some(msg) => Ticked::new(event.accumulated_ticks(), TrackMessage::ChannelVoice(msg)),
        None => event,
    }
}
