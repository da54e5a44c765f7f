use pretty_assertions::assert_eq;
use smfseq::prelude::*;

fn voice(tick: u64, channel: Channel, event: VoiceEvent) -> TrackEvent {
    Ticked::new(
        tick,
        TrackMessage::ChannelVoice(ChannelVoiceMessage::new(channel, event)),
    )
}

fn meta(tick: u64, meta: MetaMessage) -> TrackEvent {
    Ticked::new(tick, TrackMessage::Meta(meta))
}

fn every_event_kind() -> MidiFile {
    let conductor = Track::new(vec![
        meta(0, MetaMessage::SequenceNumber(7)),
        meta(0, MetaMessage::TrackName(Text::from("Conductor"))),
        meta(0, MetaMessage::Copyright(Text::from("(c) nobody"))),
        meta(0, MetaMessage::Tempo(Tempo::from_bpm(90.))),
        meta(0, MetaMessage::TimeSignature(TimeSignature::new(6, 3, 36, 8))),
        meta(
            0,
            MetaMessage::KeySignature(KeySignature::new(KeySignatureKey::EFlat, Scale::Minor)),
        ),
        meta(
            0,
            MetaMessage::SmpteOffset(SmpteOffset {
                fps: SmpteFps::TwentyFive,
                hour: 1,
                minute: 2,
                second: 3,
                frame: 4,
                subframe: 5,
            }),
        ),
        meta(480, MetaMessage::Marker(Text::from("B"))),
        meta(960, MetaMessage::Tempo(Tempo::new(400_000))),
        meta(1_000_000, MetaMessage::EndOfTrack),
    ])
    .unwrap();

    let notes = Track::new(vec![
        meta(0, MetaMessage::ChannelPrefix(Channel::Ten)),
        meta(0, MetaMessage::InstrumentName(Text::from("Drums"))),
        voice(0, Channel::Ten, VoiceEvent::ProgramChange { program: DataByte::new(1).unwrap() }),
        voice(0, Channel::Ten, VoiceEvent::try_note_on(36, 100).unwrap()),
        voice(0, Channel::Ten, VoiceEvent::try_note_on(42, 80).unwrap()),
        voice(
            10,
            Channel::Ten,
            VoiceEvent::Aftertouch {
                note: DataByte::new(36).unwrap(),
                pressure: DataByte::new(20).unwrap(),
            },
        ),
        voice(
            20,
            Channel::Ten,
            VoiceEvent::ChannelPressure { pressure: DataByte::new(30).unwrap() },
        ),
        voice(240, Channel::Ten, VoiceEvent::try_note_off(36, 0).unwrap()),
        voice(240, Channel::Ten, VoiceEvent::try_note_off(42, 64).unwrap()),
        voice(240, Channel::One, VoiceEvent::try_control_change(7, 100).unwrap()),
        voice(241, Channel::One, VoiceEvent::PitchBend(PitchBend::new(0x3FFF).unwrap())),
        Ticked::new(
            300,
            TrackMessage::SystemExclusive(SystemExclusiveMessage::new(
                SysexKind::Normal,
                vec![0x7E, 0x7F, 0x09, 0x01, 0xF7],
            )),
        ),
        meta(300, MetaMessage::Lyric(Text::from("la"))),
        meta(300, MetaMessage::CuePoint(Text::from("cue"))),
        meta(300, MetaMessage::Text(Text::from("text"))),
        meta(301, MetaMessage::SequencerSpecific(vec![0x00, 0x00, 0x41])),
        meta(
            301,
            MetaMessage::Unknown {
                meta_type: 0x60,
                data: vec![1, 2, 3],
            },
        ),
        meta(302, MetaMessage::EndOfTrack),
    ])
    .unwrap();

    MidiFile::new(
        FormatType::Simultaneous,
        Timing::new_ticks_per_quarter_note(480).unwrap(),
        vec![conductor, notes],
    )
    .unwrap()
}

#[test]
fn strict_round_trip() {
    let file = every_event_kind();
    let bytes = file.to_bytes();
    assert_eq!(MidiFile::parse_with(&bytes, ReaderPolicies::strict()).unwrap(), file);
    assert_eq!(MidiFile::parse(&bytes).unwrap(), file);
}

#[test]
fn rewriting_is_stable() {
    let bytes = every_event_kind().to_bytes();
    let again = MidiFile::parse(&bytes).unwrap().to_bytes();
    assert_eq!(again, bytes);
}

#[test]
fn timecode_round_trip() {
    let track = Track::new(vec![
        voice(0, Channel::Two, VoiceEvent::try_note_on(60, 1).unwrap()),
        voice(2000, Channel::Two, VoiceEvent::try_note_off(60, 0).unwrap()),
    ])
    .unwrap();
    let file = MidiFile::new(
        FormatType::SingleMultiChannel,
        Timing::new_smpte(SmpteFps::TwentyNine, 100),
        vec![track],
    )
    .unwrap();
    let parsed = MidiFile::parse_with(file.to_bytes(), ReaderPolicies::strict()).unwrap();
    assert_eq!(parsed, file);

    let sequence = TimeBasedSequence::new(parsed);
    assert_eq!(sequence.time_at_tick(3000), 1.0);
    assert_eq!(sequence.timed_arcs()[0].end, 2000. / 3000.);
}

#[test]
fn running_status_is_compressed() {
    let track = Track::new(vec![
        voice(0, Channel::One, VoiceEvent::try_note_on(60, 100).unwrap()),
        voice(0, Channel::One, VoiceEvent::try_note_on(64, 100).unwrap()),
    ])
    .unwrap();
    let file = MidiFile::new(
        FormatType::SingleMultiChannel,
        Timing::new_ticks_per_quarter_note(96).unwrap(),
        vec![track],
    )
    .unwrap();
    let bytes = file.to_bytes();
    assert_eq!(&bytes[14..], &[
        b'M', b'T', b'r', b'k', 0, 0, 0, 7, //
        0x00, 0x90, 60, 100, //
        0x00, 64, 100,
    ]);

    let explicit = [
        &bytes[..14],
        &[b'M', b'T', b'r', b'k', 0, 0, 0, 8],
        &[0x00, 0x90, 60, 100, 0x00, 0x90, 64, 100],
    ]
    .concat();
    assert_eq!(
        MidiFile::parse_with(&explicit, ReaderPolicies::strict()).unwrap(),
        MidiFile::parse_with(&bytes, ReaderPolicies::strict()).unwrap()
    );
}

#[test]
fn silent_note_on_is_stored_as_note_off() {
    let note = DataByte::new(60).unwrap();
    let silent = DataByte::new(0).unwrap();
    let track = Track::new(vec![
        voice(0, Channel::One, VoiceEvent::try_note_on(60, 100).unwrap()),
        voice(48, Channel::One, VoiceEvent::NoteOn { note, velocity: silent }),
    ])
    .unwrap();
    assert_eq!(
        track.events()[1].event().as_channel_voice().map(|m| *m.event()),
        Some(VoiceEvent::NoteOff { note, velocity: silent })
    );

    let file = MidiFile::new(
        FormatType::SingleMultiChannel,
        Timing::new_ticks_per_quarter_note(96).unwrap(),
        vec![track],
    )
    .unwrap();
    let parsed = MidiFile::parse_with(file.to_bytes(), ReaderPolicies::strict()).unwrap();
    assert_eq!(parsed, file);
}

#[test]
fn invalid_files_are_rejected() {
    let two_tracks = MidiFile::new(
        FormatType::SingleMultiChannel,
        Timing::new_ticks_per_quarter_note(96).unwrap(),
        vec![Track::empty(), Track::empty()],
    );
    assert_eq!(two_tracks, Err(FileError::SingleMultiChannelTrackCount(2)));
    assert_eq!(
        Timing::new_ticks_per_quarter_note(0x8000),
        Err(HeaderError::InvalidTicksPerQuarterNote(0x8000))
    );
}

#[cfg(feature = "std")]
#[test]
fn write_to_matches_to_bytes() {
    let file = every_event_kind();
    let mut out = Vec::new();
    file.write_to(&mut out).unwrap();
    assert_eq!(out, file.to_bytes());
}
