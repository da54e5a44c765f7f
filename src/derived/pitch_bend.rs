use alloc::vec::Vec;

use super::{
    ParameterNumber, RegisteredParameter, parameter_number::indexed_parameter_number_changes,
};
use crate::{
    Channel,
    message::{Ticked, TrackEvent, VoiceEvent},
};

/// Pitch bend range of a channel before any sensitivity change, in semitones
pub const DEFAULT_PITCH_BEND_RANGE: f64 = 2.;

#[doc = r#"
The effective pitch offset of a channel.

Combines the pitch wheel position with the channel's pitch bend
sensitivity, so that `semitones` is the distance the sounding notes are
bent.
"#]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositePitchBend {
    /// The channel being bent
    pub channel: Channel,
    /// `wheel_position * range_semitones`
    pub semitones: f64,
    /// Wheel position in `-1.0..1.0`
    pub wheel_position: f64,
    /// Pitch bend sensitivity in semitones
    pub range_semitones: f64,
}

enum Input {
    Wheel(f64),
    Range(f64),
}

/// Merges pitch wheel events with pitch bend sensitivity changes.
///
/// One composite bend is produced for every wheel event and every
/// sensitivity change, in tick order. Channels start centred with a range
/// of [`DEFAULT_PITCH_BEND_RANGE`].
pub fn composite_pitch_bends(events: &[TrackEvent]) -> Vec<Ticked<CompositePitchBend>> {
    let mut inputs: Vec<(u64, usize, Channel, Input)> = events
        .iter()
        .enumerate()
        .filter_map(|(index, event)| {
            let msg = event.event().as_channel_voice()?;
            match msg.event() {
                VoiceEvent::PitchBend(bend) => Some((
                    event.accumulated_ticks(),
                    index,
                    msg.channel(),
                    Input::Wheel(bend.normalized()),
                )),
                _ => None,
            }
        })
        .collect();

    inputs.extend(
        indexed_parameter_number_changes(events)
            .into_iter()
            .filter(|(_, change)| {
                change.event().parameter
                    == ParameterNumber::Registered(RegisteredParameter::PitchBendSensitivity)
            })
            .map(|(index, change)| {
                let range = change.event().value();
                (
                    change.accumulated_ticks(),
                    index,
                    change.event().channel,
                    Input::Range(range),
                )
            }),
    );
    inputs.sort_by_key(|(tick, index, ..)| (*tick, *index));

    let mut channels = [(0., DEFAULT_PITCH_BEND_RANGE); 16];
    inputs
        .into_iter()
        .map(|(tick, _, channel, input)| {
            let (position, range) = &mut channels[channel.index()];
            match input {
                Input::Wheel(p) => *position = p,
                Input::Range(r) => *range = r,
            }
            Ticked::new(
                tick,
                CompositePitchBend {
                    channel,
                    semitones: *position * *range,
                    wheel_position: *position,
                    range_semitones: *range,
                },
            )
        })
        .collect()
}
