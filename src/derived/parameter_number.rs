use alloc::vec::Vec;

use crate::{
    Channel,
    message::{Ticked, TrackEvent, TrackMessage, VoiceEvent},
};

/// Controller: data entry, most significant byte
pub const DATA_ENTRY_MSB: u8 = 0x06;
/// Controller: data entry, least significant byte
pub const DATA_ENTRY_LSB: u8 = 0x26;
/// Controller: non-registered parameter number, least significant byte
pub const NRPN_LSB: u8 = 0x62;
/// Controller: non-registered parameter number, most significant byte
pub const NRPN_MSB: u8 = 0x63;
/// Controller: registered parameter number, least significant byte
pub const RPN_LSB: u8 = 0x64;
/// Controller: registered parameter number, most significant byte
pub const RPN_MSB: u8 = 0x65;

/// The registered parameters this crate interprets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegisteredParameter {
    /// RPN `00 00`: semitones (MSB) and cents (LSB)
    PitchBendSensitivity,
    /// RPN `00 01`: 14 bit value, ±100 cents around `0x2000`
    FineTuning,
    /// RPN `00 02`: semitones around 64
    CoarseTuning,
    /// RPN `00 05`: semitones (MSB) and 128ths of a semitone (LSB)
    ModulationDepthRange,
}

/// The parameter a data entry applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterNumber {
    /// A registered parameter with known meaning
    Registered(RegisteredParameter),
    /// Any other parameter, as the raw selector pair
    NonRegistered {
        /// Parameter number MSB
        msb: u8,
        /// Parameter number LSB
        lsb: u8,
    },
}

impl ParameterNumber {
    /// Interpret a registered parameter number
    pub const fn registered(msb: u8, lsb: u8) -> Self {
        match (msb, lsb) {
            (0, 0) => Self::Registered(RegisteredParameter::PitchBendSensitivity),
            (0, 1) => Self::Registered(RegisteredParameter::FineTuning),
            (0, 2) => Self::Registered(RegisteredParameter::CoarseTuning),
            (0, 5) => Self::Registered(RegisteredParameter::ModulationDepthRange),
            (msb, lsb) => Self::NonRegistered { msb, lsb },
        }
    }
}

/// A parameter number was given a value through data entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterNumberChange {
    /// The channel of the control changes
    pub channel: Channel,
    /// The selected parameter
    pub parameter: ParameterNumber,
    /// Data entry MSB
    pub data_msb: u8,
    /// Data entry LSB
    pub data_lsb: u8,
}

impl ParameterNumberChange {
    /// The 14 bit data entry value
    pub const fn data(&self) -> u16 {
        ((self.data_msb as u16) << 7) | self.data_lsb as u16
    }

    /// The value in the parameter's unit.
    ///
    /// Semitones for pitch bend sensitivity, coarse tuning and modulation
    /// depth range; cents for fine tuning; the raw 14 bit value otherwise.
    pub fn value(&self) -> f64 {
        let (msb, lsb) = (self.data_msb as f64, self.data_lsb as f64);
        match self.parameter {
            ParameterNumber::Registered(RegisteredParameter::PitchBendSensitivity) => {
                msb + lsb / 100.
            }
            ParameterNumber::Registered(RegisteredParameter::FineTuning) => {
                (self.data() as f64 - 8192.) / 8192. * 100.
            }
            ParameterNumber::Registered(RegisteredParameter::CoarseTuning) => msb - 64.,
            ParameterNumber::Registered(RegisteredParameter::ModulationDepthRange) => {
                msb + lsb / 128.
            }
            ParameterNumber::NonRegistered { .. } => self.data() as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Registered,
    NonRegistered,
}

#[derive(Debug, Clone, Copy, Default)]
struct ParameterState {
    selection: Option<Selection>,
    msb: Option<u8>,
    lsb: Option<u8>,
    data_msb: u8,
    data_lsb: u8,
}

impl ParameterState {
    fn select(&mut self, selection: Selection, msb: Option<u8>, lsb: Option<u8>) {
        if self.selection != Some(selection) {
            self.msb = None;
            self.lsb = None;
        }
        self.selection = Some(selection);
        if msb.is_some() {
            self.msb = msb;
        }
        if lsb.is_some() {
            self.lsb = lsb;
        }
    }

    fn selected(&self) -> Option<ParameterNumber> {
        let (msb, lsb) = (self.msb?, self.lsb?);
        if (msb, lsb) == (0x7F, 0x7F) {
            return None;
        }
        match self.selection? {
            Selection::Registered => Some(ParameterNumber::registered(msb, lsb)),
            Selection::NonRegistered => Some(ParameterNumber::NonRegistered { msb, lsb }),
        }
    }
}

/// Like [`parameter_number_changes`], paired with the index of the data
/// entry event each change came from.
pub(crate) fn indexed_parameter_number_changes(
    events: &[TrackEvent],
) -> Vec<(usize, Ticked<ParameterNumberChange>)> {
    let mut states = [ParameterState::default(); 16];
    let mut changes = Vec::new();

    for (index, event) in events.iter().enumerate() {
        if !is_parameter_controller(event.event()) {
            continue;
        }
        let Some(msg) = event.event().as_channel_voice() else {
            continue;
        };
        let VoiceEvent::ControlChange { controller, value } = msg.event() else {
            continue;
        };
        let state = &mut states[msg.channel().index()];
        let value = value.value();
        match controller.value() {
            RPN_MSB => state.select(Selection::Registered, Some(value), None),
            RPN_LSB => state.select(Selection::Registered, None, Some(value)),
            NRPN_MSB => state.select(Selection::NonRegistered, Some(value), None),
            NRPN_LSB => state.select(Selection::NonRegistered, None, Some(value)),
            DATA_ENTRY_MSB | DATA_ENTRY_LSB => {
                if controller.value() == DATA_ENTRY_MSB {
                    state.data_msb = value;
                } else {
                    state.data_lsb = value;
                }
                if let Some(parameter) = state.selected() {
                    let change = ParameterNumberChange {
                        channel: msg.channel(),
                        parameter,
                        data_msb: state.data_msb,
                        data_lsb: state.data_lsb,
                    };
                    changes.push((index, Ticked::new(event.accumulated_ticks(), change)));
                }
            }
            _ => {}
        }
    }
    changes
}

#[doc = r#"
Rebuilds parameter number changes from the control changes of a track.

Each channel tracks which parameter number its RPN (101/100) or NRPN
(99/98) controllers select. Every data entry (6/38) written while a
parameter is selected yields one change. Selecting `7F 7F`, the null
parameter, suppresses changes until a new parameter is selected.
Each change carries the last data entry MSB and LSB written on the
channel, whichever parameter they were written for.

Unrecognised RPNs are reported as [`ParameterNumber::NonRegistered`] with
their raw selector bytes.
"#]
pub fn parameter_number_changes(events: &[TrackEvent]) -> Vec<Ticked<ParameterNumberChange>> {
    indexed_parameter_number_changes(events)
        .into_iter()
        .map(|(_, change)| change)
        .collect()
}

/// `true` if the message is a control change selecting or entering a parameter
pub fn is_parameter_controller(message: &TrackMessage) -> bool {
    matches!(
        message.as_channel_voice().map(|m| *m.event()),
        Some(VoiceEvent::ControlChange { controller, .. })
            if matches!(controller.value(), DATA_ENTRY_MSB | DATA_ENTRY_LSB | NRPN_LSB | NRPN_MSB | RPN_LSB | RPN_MSB)
    )
}
