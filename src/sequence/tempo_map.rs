use alloc::vec::Vec;

use crate::{
    file::{MetaMessage, Tempo, Timing, Track},
    message::TrackMessage,
};

/// A tempo taking effect at a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TempoChange {
    /// Where the tempo starts
    pub tick: u64,
    /// The tempo
    pub tempo: Tempo,
}

#[doc = r#"
The tempo changes of a file, sorted by tick, with the wall-clock time each
one starts at.

The first change is always at tick 0. Files that set no tempo at tick 0
play at [`Tempo::DEFAULT`] (120 BPM) until their first tempo event.

For files with a timecode division, ticks have a fixed length of
`1 / (fps * ticks_per_frame)` seconds and tempo changes do not move
events in time. 29.97 drop-frame counts as 30 frames per second.
"#]
#[derive(Debug, Clone, PartialEq)]
pub struct TempoMap {
    timing: Timing,
    changes: Vec<TempoChange>,
    starts: Vec<f64>,
}

impl TempoMap {
    /// Collect the tempo events of every track.
    ///
    /// Where several tempos share a tick, the last one read wins, in track
    /// order and then event order.
    pub fn new(timing: Timing, tracks: &[Track]) -> Self {
        let mut found: Vec<TempoChange> = tracks
            .iter()
            .flat_map(|track| track.events())
            .filter_map(|event| match event.event() {
                TrackMessage::Meta(MetaMessage::Tempo(tempo)) => Some(TempoChange {
                    tick: event.accumulated_ticks(),
                    tempo: *tempo,
                }),
                _ => None,
            })
            .collect();
        found.sort_by_key(|change| change.tick);

        let mut changes: Vec<TempoChange> = Vec::with_capacity(found.len() + 1);
        for change in found {
            match changes.last_mut() {
                Some(last) if last.tick == change.tick => *last = change,
                _ => changes.push(change),
            }
        }
        if changes.first().is_none_or(|first| first.tick != 0) {
            changes.insert(
                0,
                TempoChange {
                    tick: 0,
                    tempo: Tempo::DEFAULT,
                },
            );
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(changes = changes.len(), "built tempo map");

        Self::from_changes(timing, changes)
    }

    fn from_changes(timing: Timing, changes: Vec<TempoChange>) -> Self {
        let mut map = Self {
            timing,
            starts: Vec::with_capacity(changes.len()),
            changes,
        };
        let mut elapsed = 0.;
        for i in 0..map.changes.len() {
            if i > 0 {
                let previous = map.changes[i - 1];
                let ticks = (map.changes[i].tick - previous.tick) as f64;
                elapsed += map.ticks_to_seconds(ticks, previous.tempo);
            }
            map.starts.push(elapsed);
        }
        map
    }

    /// The division the map converts with
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// The tempo changes, ascending by tick. Never empty.
    pub fn changes(&self) -> &[TempoChange] {
        &self.changes
    }

    /// Length of `ticks` at `tempo`
    fn ticks_to_seconds(&self, ticks: f64, tempo: Tempo) -> f64 {
        match self.timing {
            Timing::TicksPerQuarterNote(tpqn) => {
                ticks * tempo.seconds_per_beat() / tpqn.ticks_per_quarter_note() as f64
            }
            Timing::Smpte(smpte) => match smpte.ticks_per_second() {
                0 => 0.,
                ticks_per_second => ticks / ticks_per_second as f64,
            },
        }
    }

    /// Index of the last change at or before `tick`
    fn segment_at_tick(&self, tick: u64) -> usize {
        self.changes
            .partition_point(|change| change.tick <= tick)
            .saturating_sub(1)
    }

    #[doc = r#"
The time in seconds at which `tick` plays.

Negative ticks extend the first tempo backwards.

# Example
```rust
# use smfseq::prelude::*;
let map = TempoMap::new(Timing::new_ticks_per_quarter_note(96).unwrap(), &[]);
assert_eq!(map.time_at_tick(192), 1.0);
assert_eq!(map.time_at_tick(-96), -0.5);
```
"#]
    pub fn time_at_tick(&self, tick: i64) -> f64 {
        if tick < 0 || self.changes.len() == 1 {
            return self.ticks_to_seconds(tick as f64, self.changes[0].tempo);
        }
        let tick = tick as u64;
        let i = self.segment_at_tick(tick);
        let change = self.changes[i];
        self.starts[i] + self.ticks_to_seconds((tick - change.tick) as f64, change.tempo)
    }

    /// The tempo in effect at `tick`, including a change exactly at `tick`
    pub fn tempo_at_tick(&self, tick: u64) -> Tempo {
        self.changes[self.segment_at_tick(tick)].tempo
    }

    /// The tempo in effect just before `tick`, ignoring a change exactly at
    /// `tick`. `None` at tick 0.
    pub fn tempo_before_tick(&self, tick: u64) -> Option<Tempo> {
        let count = self.changes.partition_point(|change| change.tick < tick);
        count.checked_sub(1).map(|i| self.changes[i].tempo)
    }

    /// The tempo in effect at `seconds`
    pub fn tempo_at_time(&self, seconds: f64) -> Tempo {
        let count = self.starts.partition_point(|start| *start <= seconds);
        self.changes[count.saturating_sub(1)].tempo
    }
}
