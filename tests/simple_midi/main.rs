use pretty_assertions::assert_eq;
use smfseq::prelude::*;

/// The format 0 example from the Standard MIDI File 1.0 document:
/// a C major chord spread over three channels.
const SIMPLE: &[u8] = &[
    0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01, 0x00, 0x60, //
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x3B, //
    0x00, 0xFF, 0x58, 0x04, 0x04, 0x02, 0x18, 0x08, // time signature
    0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // tempo
    0x00, 0xC0, 0x05, //
    0x00, 0xC1, 0x2E, //
    0x00, 0xC2, 0x46, //
    0x00, 0x92, 0x30, 0x60, //
    0x00, 0x3C, 0x60, // running status
    0x60, 0x91, 0x43, 0x40, //
    0x60, 0x90, 0x4C, 0x20, //
    0x81, 0x40, 0x82, 0x30, 0x40, // two-byte delta-time
    0x00, 0x3C, 0x40, // running status
    0x00, 0x81, 0x43, 0x40, //
    0x00, 0x80, 0x4C, 0x40, //
    0x00, 0xFF, 0x2F, 0x00, // end of track
];

fn voice(event: &TrackEvent) -> (u64, Channel, VoiceEvent) {
    let msg = event
        .event()
        .as_channel_voice()
        .unwrap_or_else(|| panic!("not a channel voice event: {event:?}"));
    (event.accumulated_ticks(), msg.channel(), *msg.event())
}

fn note_on(note: u8, velocity: u8) -> VoiceEvent {
    VoiceEvent::try_note_on(note, velocity).unwrap()
}

fn note_off(note: u8) -> VoiceEvent {
    VoiceEvent::try_note_off(note, 0x40).unwrap()
}

#[test]
fn test_parse() {
    let parsed = MidiFile::parse_with(SIMPLE, ReaderPolicies::strict()).unwrap();

    assert_eq!(parsed.format_type(), FormatType::SingleMultiChannel);
    assert_eq!(parsed.timing().ticks_per_quarter_note(), Some(96));
    assert_eq!(parsed.tracks().len(), 1);

    let track = &parsed.tracks()[0];
    assert_eq!(track.len(), 14);
    assert_eq!(
        track.events()[0].event().as_meta(),
        Some(&MetaMessage::TimeSignature(TimeSignature::new(4, 2, 24, 8)))
    );
    assert_eq!(
        track.events()[1].event().as_meta(),
        Some(&MetaMessage::Tempo(Tempo::new(500_000)))
    );

    use Channel::*;
    let notes: Vec<_> = track.events()[5..13].iter().map(voice).collect();
    assert_eq!(
        notes,
        vec![
            (0, Three, note_on(0x30, 0x60)),
            (0, Three, note_on(0x3C, 0x60)),
            (96, Two, note_on(0x43, 0x40)),
            (192, One, note_on(0x4C, 0x20)),
            (384, Three, note_off(0x30)),
            (384, Three, note_off(0x3C)),
            (384, Two, note_off(0x43)),
            (384, One, note_off(0x4C)),
        ]
    );
    assert_eq!(
        track.events()[13].event().as_meta(),
        Some(&MetaMessage::EndOfTrack)
    );
}

#[test]
fn note_on_times() {
    let parsed = MidiFile::parse(SIMPLE).unwrap();
    let sequence = TimeBasedSequence::new(parsed);

    let first_note_on = |channel: Channel| {
        let index = sequence.file().tracks()[0]
            .events()
            .iter()
            .position(|e| {
                e.event().as_channel_voice().is_some_and(|m| {
                    m.channel() == channel && matches!(m.event(), VoiceEvent::NoteOn { .. })
                })
            })
            .unwrap();
        sequence.time_of(EventRef::Track { track: 0, index })
    };

    assert_eq!(first_note_on(Channel::One), 1.0);
    assert_eq!(first_note_on(Channel::Two), 0.5);
    assert_eq!(first_note_on(Channel::Three), 0.0);
    assert_eq!(sequence.duration(), 2.0);
}

#[test]
fn chord_arcs() {
    let sequence = TimeBasedSequence::new(MidiFile::parse(SIMPLE).unwrap());
    let arcs = sequence.timed_arcs();
    let spans: Vec<_> = arcs
        .iter()
        .map(|a| (a.arc.channel, a.arc.note.value(), a.start, a.end))
        .collect();
    assert_eq!(
        spans,
        vec![
            (Channel::Three, 0x30, 0.0, 2.0),
            (Channel::Three, 0x3C, 0.0, 2.0),
            (Channel::Two, 0x43, 0.5, 2.0),
            (Channel::One, 0x4C, 1.0, 2.0),
        ]
    );

    let polyphony = sequence.polyphony();
    assert_eq!(polyphony.max, 4);
    // 2 notes for 0.5s, 3 for 0.5s, 4 for 1s
    assert_eq!(polyphony.average, 6.5 / 2.0);
}

#[test]
fn rewrite_is_byte_identical() {
    let parsed = MidiFile::parse_with(SIMPLE, ReaderPolicies::strict()).unwrap();
    assert_eq!(parsed.to_bytes(), SIMPLE);
}
