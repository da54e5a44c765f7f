#![doc = r#"
Encoding of [`MidiFile`]s back into bytes

The writer mirrors the reader: ticks become delta-times again, channel
voice messages share status bytes through running status, and every
chunk is prefixed with its tag and length.

Meta and sysex events always reset running status, so a strict reader can
decode the output.
"#]

use alloc::vec::Vec;

use crate::{
    file::{HEADER_TAG, MidiFile, MidiFileHeader, Track},
    message::{TrackEvent, TrackMessage},
    reader::TRACK_TAG,
};

/// Append `value` as a variable-length quantity.
///
/// Returns the number of bytes written.
///
/// # Example
/// ```rust
/// # use smfseq::writer::write_vlq;
/// let mut out = Vec::new();
/// assert_eq!(write_vlq(&mut out, 0x4000), 3);
/// assert_eq!(out, [0x81, 0x80, 0x00]);
/// ```
pub fn write_vlq(out: &mut Vec<u8>, value: u32) -> usize {
    let mut groups = [0u8; 5];
    let mut len = 0;
    let mut rest = value;
    loop {
        groups[len] = (rest & 0x7F) as u8;
        len += 1;
        rest >>= 7;
        if rest == 0 {
            break;
        }
    }
    for i in (0..len).rev() {
        let continuation = if i == 0 { 0x00 } else { 0x80 };
        out.push(groups[i] | continuation);
    }
    len
}

/// Encode a whole file: the header chunk followed by every track chunk.
///
/// The header's track count is taken from the number of tracks.
pub fn write_file(file: &MidiFile) -> Vec<u8> {
    let mut out = Vec::new();
    let header = MidiFileHeader::new(
        file.format_type(),
        file.tracks().len() as u16,
        *file.timing(),
    );
    write_chunk(&mut out, HEADER_TAG, &header.to_bytes());

    let mut body = Vec::new();
    for track in file.tracks() {
        body.clear();
        write_track_events(&mut body, track);
        write_chunk(&mut out, TRACK_TAG, &body);
    }
    out
}

/// Appends `tag`, the big-endian length of `data`, then `data`
pub fn write_chunk(out: &mut Vec<u8>, tag: [u8; 4], data: &[u8]) {
    out.extend_from_slice(&tag);
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(data);
}

/// Encode the events of a track, without the chunk framing
pub fn write_track_events(out: &mut Vec<u8>, track: &Track) {
    let mut writer = TrackWriter::default();
    for event in track.events() {
        writer.write_event(out, event);
    }
}

/// Running state while encoding one track
#[derive(Debug, Default)]
struct TrackWriter {
    running_status: Option<u8>,
    last_tick: u64,
}

impl TrackWriter {
    fn write_event(&mut self, out: &mut Vec<u8>, event: &TrackEvent) {
        let tick = event.accumulated_ticks();
        let delta = tick.saturating_sub(self.last_tick);
        write_vlq(out, delta as u32);
        self.last_tick = tick;

        match event.event() {
            TrackMessage::ChannelVoice(msg) => {
                let status = msg.status();
                if self.running_status != Some(status) {
                    out.push(status);
                    self.running_status = Some(status);
                }
                msg.event().write_data(out);
            }
            TrackMessage::SystemExclusive(sysex) => {
                out.push(sysex.kind().status());
                write_vlq(out, sysex.data().len() as u32);
                out.extend_from_slice(sysex.data());
                self.running_status = None;
            }
            TrackMessage::Meta(meta) => {
                let mut data = Vec::new();
                meta.write_data(&mut data);
                out.push(0xFF);
                out.push(meta.meta_type().into());
                write_vlq(out, data.len() as u32);
                out.extend_from_slice(&data);
                self.running_status = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Channel, DataByte,
        file::{MetaMessage, Tempo},
        message::{ChannelVoiceMessage, SysexKind, SystemExclusiveMessage, Ticked, VoiceEvent},
        reader::MAX_VLQ,
    };
    use alloc::vec;
    use pretty_assertions::assert_eq;

    fn vlq(value: u32) -> Vec<u8> {
        let mut out = Vec::new();
        write_vlq(&mut out, value);
        out
    }

    fn note_on(tick: u64, channel: Channel, note: u8, velocity: u8) -> TrackEvent {
        Ticked::new(
            tick,
            TrackMessage::ChannelVoice(ChannelVoiceMessage::new(
                channel,
                VoiceEvent::try_note_on(note, velocity).unwrap(),
            )),
        )
    }

    fn encode(events: Vec<TrackEvent>) -> Vec<u8> {
        let mut out = Vec::new();
        write_track_events(&mut out, &Track::new(events).unwrap());
        out
    }

    #[test]
    fn vlq_encoding() {
        assert_eq!(vlq(0), [0x00]);
        assert_eq!(vlq(0x7F), [0x7F]);
        assert_eq!(vlq(0x80), [0x81, 0x00]);
        assert_eq!(vlq(0x2000), [0xC0, 0x00]);
        assert_eq!(vlq(0x3FFF), [0xFF, 0x7F]);
        assert_eq!(vlq(0x4000), [0x81, 0x80, 0x00]);
        assert_eq!(vlq(0x1F_FFFF), [0xFF, 0xFF, 0x7F]);
        assert_eq!(vlq(0x20_0000), [0x81, 0x80, 0x80, 0x00]);
        assert_eq!(vlq(MAX_VLQ), [0xFF, 0xFF, 0xFF, 0x7F]);
    }

    #[test]
    fn consecutive_notes_share_a_status_byte() {
        let bytes = encode(vec![
            note_on(0, Channel::One, 0x3C, 0x40),
            note_on(0, Channel::One, 0x40, 0x40),
            note_on(0, Channel::Two, 0x43, 0x40),
        ]);
        assert_eq!(
            bytes,
            [
                0x00, 0x90, 0x3C, 0x40, //
                0x00, 0x40, 0x40, //
                0x00, 0x91, 0x43, 0x40,
            ]
        );
    }

    #[test]
    fn meta_and_sysex_reset_running_status() {
        let bytes = encode(vec![
            note_on(0, Channel::One, 0x3C, 0x40),
            Ticked::new(
                96,
                TrackMessage::Meta(MetaMessage::Tempo(Tempo::new(500_000))),
            ),
            note_on(96, Channel::One, 0x3E, 0x40),
            Ticked::new(
                96,
                TrackMessage::SystemExclusive(SystemExclusiveMessage::new(
                    SysexKind::Escape,
                    vec![0xF3, 0x01],
                )),
            ),
            note_on(192, Channel::One, 0x40, 0x40),
            Ticked::new(192, TrackMessage::Meta(MetaMessage::EndOfTrack)),
        ]);
        assert_eq!(
            bytes,
            [
                0x00, 0x90, 0x3C, 0x40, //
                0x60, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, //
                0x00, 0x90, 0x3E, 0x40, //
                0x00, 0xF7, 0x02, 0xF3, 0x01, //
                0x60, 0x90, 0x40, 0x40, //
                0x00, 0xFF, 0x2F, 0x00,
            ]
        );
    }

    #[test]
    fn pitch_bend_writes_lsb_first() {
        let bytes = encode(vec![Ticked::new(
            0,
            TrackMessage::ChannelVoice(ChannelVoiceMessage::new(
                Channel::Three,
                VoiceEvent::PitchBend(crate::message::PitchBend::from_data_bytes(
                    DataByte::new(0x01).unwrap(),
                    DataByte::new(0x40).unwrap(),
                )),
            )),
        )]);
        assert_eq!(bytes, [0x00, 0xE2, 0x01, 0x40]);
    }

    #[test]
    fn header_chunk_is_always_six_bytes() {
        let file = MidiFile::new(
            crate::file::FormatType::Simultaneous,
            crate::file::Timing::new_ticks_per_quarter_note(96).unwrap(),
            vec![Track::empty(), Track::empty()],
        )
        .unwrap();
        assert_eq!(
            file.to_bytes(),
            [
                b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 2, 0, 0x60, //
                b'M', b'T', b'r', b'k', 0, 0, 0, 0, //
                b'M', b'T', b'r', b'k', 0, 0, 0, 0,
            ]
        );
    }
}
