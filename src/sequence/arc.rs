use alloc::vec::Vec;

use crate::{
    Channel, DataByte,
    message::{TrackEvent, VoiceEvent},
};

/// A sounding note: a note on paired with the note off that ends it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteArc {
    /// Index of the track holding both events
    pub track: usize,
    /// The channel of both events
    pub channel: Channel,
    /// The key
    pub note: DataByte,
    /// The velocity of the note on
    pub velocity: DataByte,
    /// Tick of the note on
    pub start_tick: u64,
    /// Tick of the note off
    pub end_tick: u64,
}

impl NoteArc {
    /// Length of the note in ticks
    pub const fn length_ticks(&self) -> u64 {
        self.end_tick - self.start_tick
    }
}

#[doc = r#"
Pairs the note ons of a track with their note offs.

Each channel has one slot per key. A note on fills an empty slot; a note
on for a key that is already sounding is ignored, and the original note
keeps sounding until a note off arrives. Notes still sounding when the
track ends produce no arc.

Arcs are sorted by start tick, channel and key.
"#]
pub fn note_arcs(track: usize, events: &[TrackEvent]) -> Vec<NoteArc> {
    let mut sounding = [[None::<(u64, DataByte)>; 128]; 16];
    let mut arcs = Vec::new();

    for event in events {
        let Some(msg) = event.event().as_channel_voice() else {
            continue;
        };
        let channel = msg.channel();
        match *msg.event() {
            VoiceEvent::NoteOn { note, velocity } => {
                let slot = &mut sounding[channel.index()][note.value() as usize];
                if slot.is_none() {
                    *slot = Some((event.accumulated_ticks(), velocity));
                }
            }
            VoiceEvent::NoteOff { note, .. } => {
                let slot = &mut sounding[channel.index()][note.value() as usize];
                if let Some((start_tick, velocity)) = slot.take() {
                    arcs.push(NoteArc {
                        track,
                        channel,
                        note,
                        velocity,
                        start_tick,
                        end_tick: event.accumulated_ticks(),
                    });
                }
            }
            _ => {}
        }
    }

    #[cfg(feature = "tracing")]
    {
        let unfinished = sounding.iter().flatten().filter(|s| s.is_some()).count();
        if unfinished > 0 {
            tracing::debug!(track, unfinished, "notes still sounding at end of track");
        }
    }

    arcs.sort_by_key(|arc| (arc.start_tick, arc.channel, arc.note, arc.end_tick));
    arcs.dedup();
    arcs
}

#[doc = r#"
A [`NoteArc`] placed in wall-clock time

# Example
```rust
# use smfseq::prelude::*;
# let arc = NoteArc {
#     track: 0,
#     channel: Channel::One,
#     note: DataByte::new(60).unwrap(),
#     velocity: DataByte::new(100).unwrap(),
#     start_tick: 0,
#     end_tick: 96,
# };
let timed = TimedNoteArc { arc, start: 1.0, end: 2.0 };
assert_eq!(timed.progress(0.5), 0.0);
assert_eq!(timed.progress(1.25), 0.25);
assert_eq!(timed.progress(3.0), 1.0);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedNoteArc {
    /// The note
    pub arc: NoteArc,
    /// Seconds at which the note starts
    pub start: f64,
    /// Seconds at which the note ends
    pub end: f64,
}

impl TimedNoteArc {
    /// Length of the note in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// How far through the note `time` is, from `0.0` to `1.0`
    pub fn progress(&self, time: f64) -> f64 {
        let duration = self.duration();
        if duration <= 0. {
            return if time >= self.start { 1. } else { 0. };
        }
        ((time - self.start) / duration).clamp(0., 1.)
    }

    /// True while the note sounds at `time`
    pub fn is_sounding(&self, time: f64) -> bool {
        self.start <= time && time < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{ChannelVoiceMessage, Ticked, TrackMessage};
    use alloc::vec;
    use pretty_assertions::assert_eq;

    fn voice(tick: u64, event: VoiceEvent) -> TrackEvent {
        Ticked::new(
            tick,
            TrackMessage::ChannelVoice(ChannelVoiceMessage::new(Channel::One, event)),
        )
    }

    fn on(tick: u64, note: u8, velocity: u8) -> TrackEvent {
        voice(tick, VoiceEvent::try_note_on(note, velocity).unwrap())
    }

    fn off(tick: u64, note: u8) -> TrackEvent {
        voice(tick, VoiceEvent::try_note_off(note, 0).unwrap())
    }

    fn spans(arcs: &[NoteArc]) -> Vec<(u8, u64, u64)> {
        arcs.iter()
            .map(|a| (a.note.value(), a.start_tick, a.end_tick))
            .collect()
    }

    #[test]
    fn retriggered_note_keeps_original_start() {
        let arcs = note_arcs(
            0,
            &[on(0, 60, 100), on(10, 60, 50), off(20, 60), off(30, 60)],
        );
        assert_eq!(spans(&arcs), vec![(60, 0, 20)]);
        assert_eq!(arcs[0].velocity.value(), 100);
    }

    #[test]
    fn overlapping_keys_pair_independently() {
        let arcs = note_arcs(
            3,
            &[on(0, 60, 1), on(5, 64, 1), off(10, 60), off(15, 64)],
        );
        assert_eq!(spans(&arcs), vec![(60, 0, 10), (64, 5, 15)]);
        assert!(arcs.iter().all(|a| a.track == 3));
    }

    #[test]
    fn unfinished_notes_are_dropped() {
        let arcs = note_arcs(0, &[on(0, 60, 1), off(4, 61)]);
        assert!(arcs.is_empty());
    }

    #[test]
    fn zero_length_progress() {
        let arc = note_arcs(0, &[on(0, 60, 1), off(0, 60)])[0];
        let timed = TimedNoteArc {
            arc,
            start: 1.,
            end: 1.,
        };
        assert_eq!(timed.progress(0.9), 0.);
        assert_eq!(timed.progress(1.), 1.);
        assert!(!timed.is_sounding(1.));
    }
}
