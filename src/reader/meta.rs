use alloc::vec::Vec;

use super::{ReadResult, Reader, ReaderPolicies, inv_data};
use crate::{
    Channel, MetaError,
    file::{KeySignature, MetaMessage, MetaType, SmpteOffset, Tempo, Text, TimeSignature},
};

impl Reader<'_> {
    /// Decodes a meta event. The `0xFF` status byte has already been read.
    ///
    /// Returns `None` when a policy drops the event; its bytes are consumed either way.
    pub(super) fn read_meta(&mut self, policies: &ReaderPolicies) -> ReadResult<Option<MetaMessage>> {
        let meta_type = MetaType::from(self.read_u8()?);
        let (length, _) = self.read_vlq()?;
        let declared = length as usize;

        let Some(minimum) = meta_type.minimum_length() else {
            let data = self.read_slice(declared)?;
            return Ok(Some(variable_length(meta_type, data)));
        };

        if declared < minimum {
            self.skip_declared(declared)?;
            if policies.ignore_incomplete_meta_events {
                #[cfg(feature = "tracing")]
                tracing::warn!(?meta_type, declared, minimum, "dropping incomplete meta event");
                return Ok(None);
            }
            return Err(inv_data(
                self,
                MetaError::Incomplete {
                    meta_type,
                    expected: minimum as u32,
                    found: length,
                },
            ));
        }

        let data = self.read_slice(minimum)?;
        self.skip_declared(declared - minimum)?;

        let message = match meta_type {
            MetaType::SequenceNumber => {
                MetaMessage::SequenceNumber(u16::from_be_bytes([data[0], data[1]]))
            }
            MetaType::ChannelPrefix => match Channel::try_from(data[0]) {
                Ok(channel) => MetaMessage::ChannelPrefix(channel),
                Err(_) if policies.ignore_bad_channel_prefixes => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(prefix = data[0], "dropping bad channel prefix");
                    return Ok(None);
                }
                Err(_) => return Err(inv_data(self, MetaError::ChannelPrefix(data[0]))),
            },
            MetaType::Tempo => MetaMessage::Tempo(Tempo::new_from_bytes(&[data[0], data[1], data[2]])),
            MetaType::SmpteOffset => match SmpteOffset::parse(data) {
                Ok(offset) => MetaMessage::SmpteOffset(offset),
                Err(_e) if policies.ignore_bad_smpte_offsets => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = %_e, "dropping bad SMPTE offset");
                    return Ok(None);
                }
                Err(e) => return Err(inv_data(self, e)),
            },
            MetaType::TimeSignature => MetaMessage::TimeSignature(TimeSignature::from_bytes(&[
                data[0], data[1], data[2], data[3],
            ])),
            MetaType::KeySignature => match KeySignature::from_bytes(&[data[0], data[1]]) {
                Ok(key) => MetaMessage::KeySignature(key),
                Err(_e) if policies.ignore_bad_key_signatures => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = %_e, "dropping bad key signature");
                    return Ok(None);
                }
                Err(e) => return Err(inv_data(self, e)),
            },
            other => variable_length(other, data),
        };
        Ok(Some(message))
    }
}

fn variable_length(meta_type: MetaType, data: &[u8]) -> MetaMessage {
    let text = || Text::new(data.to_vec());
    match meta_type {
        MetaType::Text => MetaMessage::Text(text()),
        MetaType::Copyright => MetaMessage::Copyright(text()),
        MetaType::TrackName => MetaMessage::TrackName(text()),
        MetaType::InstrumentName => MetaMessage::InstrumentName(text()),
        MetaType::Lyric => MetaMessage::Lyric(text()),
        MetaType::Marker => MetaMessage::Marker(text()),
        MetaType::CuePoint => MetaMessage::CuePoint(text()),
        MetaType::EndOfTrack => MetaMessage::EndOfTrack,
        MetaType::SequencerSpecific => MetaMessage::SequencerSpecific(data.to_vec()),
        other => MetaMessage::Unknown {
            meta_type: other.into(),
            data: Vec::from(data),
        },
    }
}
