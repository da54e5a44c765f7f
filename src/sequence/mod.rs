#![doc = r#"
Wall-clock view of a [`MidiFile`]

A [`TimeBasedSequence`] owns a file and its [`TempoMap`], and caches the
time in seconds of every event when it is built. Events derived later,
such as [`VirtualEvent`](crate::derived::VirtualEvent)s, can be added to
the cache with [`TimeBasedSequence::register_events`].
"#]

mod arc;
pub use arc::*;

mod tempo_map;
pub use tempo_map::*;

use alloc::vec::Vec;

use crate::{
    analysis::Polyphony,
    file::{MidiFile, Tempo},
    message::Ticked,
};

/// Names an event whose time is cached by a [`TimeBasedSequence`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventRef {
    /// The event at `index` in track `track` of the file
    Track {
        /// Track index
        track: usize,
        /// Event index within the track
        index: usize,
    },
    /// The nth event passed to [`TimeBasedSequence::register_events`]
    Registered(usize),
}

#[doc = r#"
A [`MidiFile`] with the time of each of its events.

# Example
```rust
# use smfseq::prelude::*;
let on = |tick, note| {
    Ticked::new(
        tick,
        TrackMessage::ChannelVoice(ChannelVoiceMessage::new(
            Channel::One,
            VoiceEvent::try_note_on(note, 100).unwrap(),
        )),
    )
};
let track = Track::new(vec![on(0, 60), on(96, 62)]).unwrap();
let file = MidiFile::new(
    FormatType::SingleMultiChannel,
    Timing::new_ticks_per_quarter_note(96).unwrap(),
    vec![track],
)
.unwrap();

let sequence = TimeBasedSequence::new(file);
assert_eq!(sequence.time_of(EventRef::Track { track: 0, index: 1 }), 0.5);
assert_eq!(sequence.duration(), 0.5);
```
"#]
#[derive(Debug, Clone)]
pub struct TimeBasedSequence {
    file: MidiFile,
    tempo_map: TempoMap,
    track_times: Vec<Vec<f64>>,
    registered_times: Vec<f64>,
}

impl TimeBasedSequence {
    /// Build the tempo map and time every event of `file`
    pub fn new(file: MidiFile) -> Self {
        let tempo_map = TempoMap::new(*file.timing(), file.tracks());
        let track_times = file
            .tracks()
            .iter()
            .map(|track| {
                track
                    .events()
                    .iter()
                    .map(|event| tempo_map.time_at_tick(tick_to_i64(event.accumulated_ticks())))
                    .collect()
            })
            .collect();
        Self {
            file,
            tempo_map,
            track_times,
            registered_times: Vec::new(),
        }
    }

    /// The file
    pub fn file(&self) -> &MidiFile {
        &self.file
    }

    /// Take the file back
    pub fn into_file(self) -> MidiFile {
        self.file
    }

    /// The tempo map
    pub fn tempo_map(&self) -> &TempoMap {
        &self.tempo_map
    }

    /// The tempo changes of the file, ascending and starting at tick 0
    pub fn tempos(&self) -> &[TempoChange] {
        self.tempo_map.changes()
    }

    /// See [`TempoMap::time_at_tick`]
    pub fn time_at_tick(&self, tick: i64) -> f64 {
        self.tempo_map.time_at_tick(tick)
    }

    /// See [`TempoMap::tempo_at_tick`]
    pub fn tempo_at_tick(&self, tick: u64) -> Tempo {
        self.tempo_map.tempo_at_tick(tick)
    }

    /// See [`TempoMap::tempo_before_tick`]
    pub fn tempo_before_tick(&self, tick: u64) -> Option<Tempo> {
        self.tempo_map.tempo_before_tick(tick)
    }

    /// See [`TempoMap::tempo_at_time`]
    pub fn tempo_at_time(&self, seconds: f64) -> Tempo {
        self.tempo_map.tempo_at_time(seconds)
    }

    /// The cached times of a track's events, in event order
    pub fn track_times(&self, track: usize) -> Option<&[f64]> {
        self.track_times.get(track).map(Vec::as_slice)
    }

    /// The time of an event, in seconds.
    ///
    /// # Panics
    /// If `event` names no track event and was never registered.
    pub fn time_of(&self, event: EventRef) -> f64 {
        let time = match event {
            EventRef::Track { track, index } => self
                .track_times
                .get(track)
                .and_then(|times| times.get(index)),
            EventRef::Registered(i) => self.registered_times.get(i),
        };
        match time {
            Some(time) => *time,
            None => panic!("no time cached for {event:?}"),
        }
    }

    /// Cache the times of events that are not part of the file.
    ///
    /// The returned references are in the same order as `events`.
    pub fn register_events<T>(&mut self, events: &[Ticked<T>]) -> Vec<EventRef> {
        let first = self.registered_times.len();
        self.registered_times.extend(
            events
                .iter()
                .map(|event| self.tempo_map.time_at_tick(tick_to_i64(event.accumulated_ticks()))),
        );
        (first..self.registered_times.len())
            .map(EventRef::Registered)
            .collect()
    }

    /// The time of the last event of the file
    pub fn duration(&self) -> f64 {
        self.track_times
            .iter()
            .filter_map(|times| times.last().copied())
            .fold(0., f64::max)
    }

    /// The notes of every track
    pub fn note_arcs(&self) -> Vec<NoteArc> {
        self.file
            .tracks()
            .iter()
            .enumerate()
            .flat_map(|(i, track)| note_arcs(i, track.events()))
            .collect()
    }

    /// The notes of every track, placed in time
    pub fn timed_arcs(&self) -> Vec<TimedNoteArc> {
        self.note_arcs()
            .into_iter()
            .map(|arc| TimedNoteArc {
                arc,
                start: self.time_at_tick(tick_to_i64(arc.start_tick)),
                end: self.time_at_tick(tick_to_i64(arc.end_tick)),
            })
            .collect()
    }

    /// Polyphony of the whole file, weighted in seconds
    pub fn polyphony(&self) -> Polyphony {
        Polyphony::from_timed_arcs(&self.timed_arcs())
    }
}

fn tick_to_i64(tick: u64) -> i64 {
    i64::try_from(tick).unwrap_or(i64::MAX)
}
