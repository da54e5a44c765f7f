use alloc::vec::Vec;

use super::{ChunkEvent, ReadResult, Reader, ReaderPolicies, inv_data};
use crate::{
    DataByte, TrackError,
    file::Track,
    message::{
        ChannelVoiceMessage, PitchBend, SysexKind, SystemExclusiveMessage, Ticked, TrackEvent,
        TrackMessage, VoiceEvent,
    },
};

/// Mutable state threaded through the decode of one `MTrk` chunk
struct TrackState {
    ticks: u64,
    running_status: Option<u8>,
    start: usize,
    length: usize,
}

impl TrackState {
    fn consumed(&self, reader: &Reader<'_>) -> usize {
        reader.buffer_position() - self.start
    }
}

/// How a single loop iteration ended
enum Step {
    Event(TrackEvent),
    Dropped,
}

impl<'slc> Reader<'slc> {
    /// Decodes the body of a track chunk of `length` bytes.
    pub(super) fn read_track(
        &mut self,
        length: u32,
        policies: &ReaderPolicies,
    ) -> ReadResult<ChunkEvent<'slc>> {
        let mut state = TrackState {
            ticks: 0,
            running_status: None,
            start: self.buffer_position(),
            length: length as usize,
        };
        let mut events = Vec::new();

        while state.consumed(self) < state.length {
            if state.length - state.consumed(self) == 1 && self.peek_u8() == Ok(0x00) {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    position = self.buffer_position(),
                    "skipping trailing zero byte"
                );
                self.read_u8()?;
                break;
            }
            if self.is_exhausted() && policies.end_of_file.allows_clean() {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    declared = state.length,
                    read = state.consumed(self),
                    "data ended before the declared track length"
                );
                break;
            }

            let step = match self.read_track_event(&mut state, policies) {
                Ok(step) => step,
                Err(e) if e.is_unexpected_eof() && policies.end_of_file.allows_dirty() => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        position = e.position(),
                        kept = events.len(),
                        "track truncated mid-event"
                    );
                    return Ok(ChunkEvent::TruncatedTrack(Track::from_events_unchecked(
                        events,
                    )));
                }
                Err(e) => return Err(e),
            };
            // an event running past the declared length is dropped and the
            // next chunk starts where the header said this one ends
            if state.consumed(self) > state.length {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    declared = state.length,
                    read = state.consumed(self),
                    "event overruns the declared track length"
                );
                self.position = state.start + state.length;
                break;
            }
            if let Step::Event(event) = step {
                events.push(event);
            }
        }

        Ok(ChunkEvent::Track(Track::from_events_unchecked(events)))
    }

    fn read_track_event(
        &mut self,
        state: &mut TrackState,
        policies: &ReaderPolicies,
    ) -> ReadResult<Step> {
        let (delta, _) = self.read_vlq()?;
        state.ticks += delta as u64;
        let tick = state.ticks;

        let byte = self.read_u8()?;
        let previous = state.running_status;
        let (status, mut first_data) = if byte & 0x80 != 0 {
            state.running_status = Some(byte);
            (byte, None)
        } else {
            match state.running_status {
                Some(status) => (status, Some(byte)),
                None => return Err(inv_data(self, TrackError::MissingRunningStatus(byte))),
            }
        };

        if status >> 4 == 0xF {
            let message = match status {
                0xF0 | 0xF7 => {
                    let kind = if status == 0xF0 {
                        SysexKind::Normal
                    } else {
                        SysexKind::Escape
                    };
                    let (len, _) = self.read_vlq()?;
                    let data = self.read_slice(len as usize)?;
                    Some(TrackMessage::SystemExclusive(SystemExclusiveMessage::new(
                        kind,
                        data.to_vec(),
                    )))
                }
                0xFF => self.read_meta(policies)?.map(TrackMessage::Meta),
                other => return Err(inv_data(self, TrackError::UnsupportedStatus(other))),
            };
            state.running_status = if policies.allow_running_status_across_non_midi_events {
                previous
            } else {
                None
            };
            return Ok(match message {
                Some(message) => Step::Event(Ticked::new(tick, message)),
                None => Step::Dropped,
            });
        }

        let event = match status >> 4 {
            0x8 => VoiceEvent::NoteOff {
                note: self.data_byte(&mut first_data)?,
                velocity: self.data_byte(&mut first_data)?,
            },
            0x9 => {
                let note = self.data_byte(&mut first_data)?;
                let raw = self.raw_data_byte(&mut first_data)?;
                let velocity = if policies.coerce_velocity_to_range {
                    DataByte::saturating(raw)
                } else {
                    DataByte::new(raw).map_err(|_| inv_data(self, TrackError::Velocity(raw)))?
                };
                VoiceEvent::note_on(note, velocity)
            }
            0xA => VoiceEvent::Aftertouch {
                note: self.data_byte(&mut first_data)?,
                pressure: self.data_byte(&mut first_data)?,
            },
            0xB => VoiceEvent::ControlChange {
                controller: self.data_byte(&mut first_data)?,
                value: self.data_byte(&mut first_data)?,
            },
            0xC => VoiceEvent::ProgramChange {
                program: self.data_byte(&mut first_data)?,
            },
            0xD => VoiceEvent::ChannelPressure {
                pressure: self.data_byte(&mut first_data)?,
            },
            0xE => {
                let lsb = self.data_byte(&mut first_data)?;
                let msb = self.data_byte(&mut first_data)?;
                VoiceEvent::PitchBend(PitchBend::from_data_bytes(lsb, msb))
            }
            _ => return Err(inv_data(self, TrackError::UnsupportedStatus(status))),
        };

        let message = ChannelVoiceMessage::new(crate::Channel::from_status(status), event);
        Ok(Step::Event(Ticked::new(
            tick,
            TrackMessage::ChannelVoice(message),
        )))
    }

    /// Takes the data byte already consumed through running status, or reads one.
    fn raw_data_byte(&mut self, first: &mut Option<u8>) -> ReadResult<u8> {
        match first.take() {
            Some(byte) => Ok(byte),
            None => self.read_u8(),
        }
    }

    fn data_byte(&mut self, first: &mut Option<u8>) -> ReadResult<DataByte> {
        let byte = self.raw_data_byte(first)?;
        DataByte::new(byte).map_err(|e| inv_data(self, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Channel, ParseError,
        file::{MetaMessage, Tempo},
        reader::{EndOfFilePolicy, ReaderError},
    };
    use alloc::vec;
    use pretty_assertions::assert_eq;

    fn track_bytes(body: &[u8]) -> Vec<u8> {
        let mut bytes = b"MTrk".to_vec();
        bytes.extend_from_slice(&(body.len() as u32).to_be_bytes());
        bytes.extend_from_slice(body);
        bytes
    }

    fn read(body: &[u8], policies: ReaderPolicies) -> ReadResult<ChunkEvent<'static>> {
        let bytes = track_bytes(body);
        let mut reader = Reader::from_byte_slice(&bytes);
        // events own their data, so nothing borrows from `bytes`
        reader.read_chunk(&policies).map(|chunk| match chunk {
            ChunkEvent::Track(t) => ChunkEvent::Track(t),
            ChunkEvent::TruncatedTrack(t) => ChunkEvent::TruncatedTrack(t),
            ChunkEvent::Eof => ChunkEvent::Eof,
            ChunkEvent::Unknown(_) => panic!("track expected"),
        })
    }

    fn events(chunk: ChunkEvent<'_>) -> Vec<TrackEvent> {
        match chunk {
            ChunkEvent::Track(t) | ChunkEvent::TruncatedTrack(t) => t.into_events(),
            other => panic!("track expected, got {other:?}"),
        }
    }

    fn voice(tick: u64, channel: Channel, event: VoiceEvent) -> TrackEvent {
        Ticked::new(
            tick,
            TrackMessage::ChannelVoice(ChannelVoiceMessage::new(channel, event)),
        )
    }

    fn db(byte: u8) -> DataByte {
        DataByte::new(byte).unwrap()
    }

    #[test]
    fn running_status_reuses_previous_status() {
        let body = [
            0x00, 0x91, 0x3C, 0x40, // note on, channel 2
            0x10, 0x3E, 0x41, // running status
            0x00, 0xFF, 0x2F, 0x00,
        ];
        let events = events(read(&body, ReaderPolicies::strict()).unwrap());
        assert_eq!(
            &events[..2],
            &[
                voice(0, Channel::Two, VoiceEvent::NoteOn { note: db(0x3C), velocity: db(0x40) }),
                voice(16, Channel::Two, VoiceEvent::NoteOn { note: db(0x3E), velocity: db(0x41) }),
            ]
        );
        assert_eq!(events[2].event(), &TrackMessage::Meta(MetaMessage::EndOfTrack));
    }

    #[test]
    fn zero_velocity_note_on_becomes_note_off() {
        let body = [0x00, 0x90, 0x3C, 0x00, 0x00, 0xFF, 0x2F, 0x00];
        let events = events(read(&body, ReaderPolicies::strict()).unwrap());
        assert_eq!(
            events[0],
            voice(0, Channel::One, VoiceEvent::NoteOff { note: db(0x3C), velocity: db(0) })
        );
    }

    #[test]
    fn pitch_bend_combines_fourteen_bits() {
        let body = [0x00, 0xE3, 0x01, 0x40, 0x00, 0xFF, 0x2F, 0x00];
        let events = events(read(&body, ReaderPolicies::strict()).unwrap());
        let TrackMessage::ChannelVoice(msg) = events[0].event() else {
            panic!();
        };
        assert_eq!(msg.channel(), Channel::Four);
        assert_eq!(
            msg.event(),
            &VoiceEvent::PitchBend(PitchBend::new((0x40 << 7) | 0x01).unwrap())
        );
    }

    #[test]
    fn velocity_coercion() {
        let body = [0x00, 0x90, 0x3C, 0xC8, 0x00, 0xFF, 0x2F, 0x00];
        let events = events(
            read(
                &body,
                ReaderPolicies::strict().with_coerce_velocity_to_range(true),
            )
            .unwrap(),
        );
        assert_eq!(
            events[0],
            voice(0, Channel::One, VoiceEvent::NoteOn { note: db(0x3C), velocity: db(127) })
        );

        let err = read(&body, ReaderPolicies::strict()).unwrap_err();
        assert_eq!(
            err.parse_error(),
            Some(&ParseError::Track(TrackError::Velocity(0xC8)))
        );
    }

    #[test]
    fn sysex_clears_running_status_by_default() {
        let body = [
            0x00, 0x90, 0x3C, 0x40, //
            0x00, 0xF0, 0x02, 0x43, 0xF7, // sysex
            0x00, 0x3E, 0x40, // data byte relying on running status
        ];
        let err = read(&body, ReaderPolicies::strict()).unwrap_err();
        assert_eq!(
            err.parse_error(),
            Some(&ParseError::Track(TrackError::MissingRunningStatus(0x3E)))
        );

        let lenient = ReaderPolicies::strict().with_allow_running_status_across_non_midi_events(true);
        let events = events(read(&body, lenient).unwrap());
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[1].event(),
            &TrackMessage::SystemExclusive(SystemExclusiveMessage::new(
                SysexKind::Normal,
                vec![0x43, 0xF7]
            ))
        );
        assert_eq!(
            events[2],
            voice(0, Channel::One, VoiceEvent::NoteOn { note: db(0x3E), velocity: db(0x40) })
        );
    }

    #[test]
    fn meta_restores_running_status_when_allowed() {
        let body = [
            0x00, 0xC5, 0x10, // program change, channel 6
            0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // tempo
            0x05, 0x11, // program change via running status
        ];
        let policies = ReaderPolicies::strict().with_allow_running_status_across_non_midi_events(true);
        let events = events(read(&body, policies).unwrap());
        assert_eq!(
            events[1].event(),
            &TrackMessage::Meta(MetaMessage::Tempo(Tempo::new(500_000)))
        );
        assert_eq!(
            events[2],
            voice(5, Channel::Six, VoiceEvent::ProgramChange { program: db(0x11) })
        );
    }

    #[test]
    fn trailing_zero_byte_is_tolerated() {
        let body = [0x00, 0xFF, 0x2F, 0x00, 0x00];
        let events = events(read(&body, ReaderPolicies::strict()).unwrap());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn dirty_end_of_file_keeps_complete_events() {
        let mut bytes = track_bytes(&[
            0x00, 0x90, 0x3C, 0x40, //
            0x60, 0x80, 0x3C, 0x40, //
            0x00, 0xFF, 0x2F, 0x00,
        ]);
        bytes.truncate(8 + 6);

        let mut reader = Reader::from_byte_slice(&bytes);
        let chunk = reader.read_chunk(&ReaderPolicies::lenient()).unwrap();
        let ChunkEvent::TruncatedTrack(track) = chunk else {
            panic!("expected truncated track, got {chunk:?}");
        };
        assert_eq!(track.events().len(), 1);

        for policy in [EndOfFilePolicy::Disallow, EndOfFilePolicy::AllowClean] {
            let mut reader = Reader::from_byte_slice(&bytes);
            let err: ReaderError = reader
                .read_chunk(&ReaderPolicies::strict().with_end_of_file(policy))
                .unwrap_err();
            assert!(err.is_unexpected_eof());
        }
    }

    #[test]
    fn clean_end_of_file_stops_at_event_boundary() {
        let mut bytes = track_bytes(&[
            0x00, 0x90, 0x3C, 0x40, //
            0x60, 0x80, 0x3C, 0x40, //
            0x00, 0xFF, 0x2F, 0x00,
        ]);
        bytes.truncate(8 + 8);

        let clean = ReaderPolicies::strict().with_end_of_file(EndOfFilePolicy::AllowClean);
        let mut reader = Reader::from_byte_slice(&bytes);
        let chunk = reader.read_chunk(&clean).unwrap();
        let ChunkEvent::Track(track) = chunk else {
            panic!("expected a complete track, got {chunk:?}");
        };
        assert_eq!(track.events().len(), 2);

        let mut reader = Reader::from_byte_slice(&bytes);
        assert!(
            reader
                .read_chunk(&ReaderPolicies::strict())
                .unwrap_err()
                .is_unexpected_eof()
        );
    }

    #[test]
    fn overrunning_event_resyncs_to_chunk_end() {
        // the note on's velocity would be the `M` of the next chunk tag
        let mut bytes = b"MTrk".to_vec();
        bytes.extend_from_slice(&3u32.to_be_bytes());
        bytes.extend_from_slice(&[0x00, 0x90, 0x3C]);
        bytes.extend_from_slice(&track_bytes(&[0x00, 0x90, 0x3E, 0x40]));

        let mut reader = Reader::from_byte_slice(&bytes);
        let first = events(reader.read_chunk(&ReaderPolicies::strict()).unwrap());
        assert!(first.is_empty());
        assert_eq!(reader.buffer_position(), 8 + 3);

        let second = events(reader.read_chunk(&ReaderPolicies::strict()).unwrap());
        assert_eq!(
            second,
            vec![voice(0, Channel::One, VoiceEvent::NoteOn { note: db(0x3E), velocity: db(0x40) })]
        );
        assert!(reader.is_exhausted());
    }

    #[test]
    fn system_common_status_is_rejected() {
        let body = [0x00, 0xF2, 0x00, 0x00];
        let err = read(&body, ReaderPolicies::lenient()).unwrap_err();
        assert_eq!(
            err.parse_error(),
            Some(&ParseError::Track(TrackError::UnsupportedStatus(0xF2)))
        );
    }
}
