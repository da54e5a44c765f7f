#![doc = r#"
Channel voice messages

Status bytes `0x80..=0xEF` carry a message kind in the upper nibble and
a channel in the lower nibble, followed by one or two data bytes.

| Nibble | Message | Data |
|--------|---------|------|
| `8` | Note off | note, velocity |
| `9` | Note on | note, velocity |
| `A` | Polyphonic key pressure | note, pressure |
| `B` | Control change | controller, value |
| `C` | Program change | program |
| `D` | Channel pressure | pressure |
| `E` | Pitch wheel | lsb, msb |
"#]

mod pitch_bend;
pub use pitch_bend::*;

use alloc::vec::Vec;

use crate::{Channel, DataByte, ParseError};

#[doc = r#"
A voice message addressed to a channel
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelVoiceMessage {
    channel: Channel,
    event: VoiceEvent,
}

impl ChannelVoiceMessage {
    /// Create a new channel voice message
    pub const fn new(channel: Channel, event: VoiceEvent) -> Self {
        Self { channel, event }
    }
    /// The channel the message is addressed to
    pub const fn channel(&self) -> Channel {
        self.channel
    }
    /// The voice event
    pub const fn event(&self) -> &VoiceEvent {
        &self.event
    }
    /// The status byte: message nibble and channel nibble
    pub const fn status(&self) -> u8 {
        (self.event.status_nibble() << 4) | self.channel.to_nibble()
    }
}

#[doc = r#"
The content of a channel voice message
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoiceEvent {
    /// A key was released
    NoteOff {
        /// The key
        note: DataByte,
        /// Release velocity
        velocity: DataByte,
    },
    /// A key was pressed. The velocity is never zero in decoded data.
    NoteOn {
        /// The key
        note: DataByte,
        /// Strike velocity
        velocity: DataByte,
    },
    /// Polyphonic key pressure
    Aftertouch {
        /// The key
        note: DataByte,
        /// Pressure on the key
        pressure: DataByte,
    },
    /// A controller moved
    ControlChange {
        /// The controller number
        controller: DataByte,
        /// The new value
        value: DataByte,
    },
    /// Select a program (instrument)
    ProgramChange {
        /// The program number
        program: DataByte,
    },
    /// Pressure applied to the whole channel
    ChannelPressure {
        /// The pressure
        pressure: DataByte,
    },
    /// The pitch wheel moved
    PitchBend(PitchBend),
}

impl VoiceEvent {
    /// A note on, or a note off if `velocity` is zero.
    ///
    /// A zero velocity note on means note off, so it is stored as one.
    pub const fn note_on(note: DataByte, velocity: DataByte) -> Self {
        if velocity.value() == 0 {
            Self::NoteOff { note, velocity }
        } else {
            Self::NoteOn { note, velocity }
        }
    }

    /// Checked [`VoiceEvent::note_on`] from plain bytes
    pub fn try_note_on(note: u8, velocity: u8) -> Result<Self, ParseError> {
        Ok(Self::note_on(DataByte::new(note)?, DataByte::new(velocity)?))
    }

    /// Checked note off from plain bytes
    pub fn try_note_off(note: u8, velocity: u8) -> Result<Self, ParseError> {
        Ok(Self::NoteOff {
            note: DataByte::new(note)?,
            velocity: DataByte::new(velocity)?,
        })
    }

    /// Checked control change from plain bytes
    pub fn try_control_change(controller: u8, value: u8) -> Result<Self, ParseError> {
        Ok(Self::ControlChange {
            controller: DataByte::new(controller)?,
            value: DataByte::new(value)?,
        })
    }

    /// The upper nibble of the status byte
    pub const fn status_nibble(&self) -> u8 {
        match self {
            Self::NoteOff { .. } => 0x8,
            Self::NoteOn { .. } => 0x9,
            Self::Aftertouch { .. } => 0xA,
            Self::ControlChange { .. } => 0xB,
            Self::ProgramChange { .. } => 0xC,
            Self::ChannelPressure { .. } => 0xD,
            Self::PitchBend(_) => 0xE,
        }
    }

    /// The key, for note and key pressure events
    pub const fn note(&self) -> Option<DataByte> {
        match self {
            Self::NoteOff { note, .. } | Self::NoteOn { note, .. } | Self::Aftertouch { note, .. } => {
                Some(*note)
            }
            _ => None,
        }
    }

    /// Appends the data bytes of the event
    pub(crate) fn write_data(&self, out: &mut Vec<u8>) {
        match self {
            Self::NoteOff { note, velocity } | Self::NoteOn { note, velocity } => {
                out.extend_from_slice(&[note.value(), velocity.value()])
            }
            Self::Aftertouch { note, pressure } => {
                out.extend_from_slice(&[note.value(), pressure.value()])
            }
            Self::ControlChange { controller, value } => {
                out.extend_from_slice(&[controller.value(), value.value()])
            }
            Self::ProgramChange { program } => out.push(program.value()),
            Self::ChannelPressure { pressure } => out.push(pressure.value()),
            Self::PitchBend(bend) => out.extend_from_slice(&[bend.lsb(), bend.msb()]),
        }
    }
}

#[test]
fn zero_velocity_note_on_is_note_off() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        VoiceEvent::try_note_on(60, 0).unwrap(),
        VoiceEvent::try_note_off(60, 0).unwrap()
    );
    assert!(matches!(
        VoiceEvent::try_note_on(60, 1).unwrap(),
        VoiceEvent::NoteOn { .. }
    ));
    assert_eq!(VoiceEvent::try_note_on(128, 1), Err(ParseError::DataByte(128)));
}

#[test]
fn status_bytes() {
    let msg = ChannelVoiceMessage::new(
        Channel::Ten,
        VoiceEvent::try_control_change(7, 100).unwrap(),
    );
    assert_eq!(msg.status(), 0xB9);
}
