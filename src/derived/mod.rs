#![doc = r#"
Virtual events

Some information in a MIDI stream is spread over several messages. A
registered parameter change, for example, is four control changes: two
selecting the parameter and two carrying the value. The functions here
rebuild such events from the decoded track so they can be handled, and
timed, like any other event.

Virtual events are never written back to a file.
"#]

mod parameter_number;
pub use parameter_number::*;

mod pitch_bend;
pub use pitch_bend::*;

use crate::Channel;

/// An event reconstructed from a sequence of real events
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VirtualEvent {
    /// A registered or non-registered parameter was set
    ParameterNumberChange(ParameterNumberChange),
    /// The effective pitch bend changed
    CompositePitchBend(CompositePitchBend),
}

impl VirtualEvent {
    /// The channel the event applies to
    pub const fn channel(&self) -> Channel {
        match self {
            Self::ParameterNumberChange(c) => c.channel,
            Self::CompositePitchBend(b) => b.channel,
        }
    }
}

impl From<ParameterNumberChange> for VirtualEvent {
    fn from(value: ParameterNumberChange) -> Self {
        Self::ParameterNumberChange(value)
    }
}

impl From<CompositePitchBend> for VirtualEvent {
    fn from(value: CompositePitchBend) -> Self {
        Self::CompositePitchBend(value)
    }
}
