mod smpte;
pub use smpte::*;

use crate::HeaderError;

#[doc = r#"
The division field of the header: what a tick means.

The top bit of the 16 bit field selects the variant. When clear, the
remaining 15 bits are ticks per quarter note. When set, the upper byte
is a negated SMPTE frame rate and the lower byte is ticks per frame.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timing {
    /// Ticks are fractions of a quarter note
    TicksPerQuarterNote(TicksPerQuarterNote),

    /// Ticks are fractions of an SMPTE frame
    Smpte(SmpteHeader),
}

impl Timing {
    /// Metrical timing. `tpqn` must be within `1..=32767`.
    pub const fn new_ticks_per_quarter_note(tpqn: u16) -> Result<Self, HeaderError> {
        match TicksPerQuarterNote::new(tpqn) {
            Ok(t) => Ok(Self::TicksPerQuarterNote(t)),
            Err(e) => Err(e),
        }
    }

    /// Time code timing
    pub const fn new_smpte(fps: SmpteFps, ticks_per_frame: u8) -> Self {
        Self::Smpte(SmpteHeader {
            fps,
            ticks_per_frame,
        })
    }

    /// Decode the 16 bit division field
    pub const fn from_division(word: u16) -> Result<Self, HeaderError> {
        let [hi, lo] = word.to_be_bytes();
        if hi & 0x80 == 0 {
            return Self::new_ticks_per_quarter_note(word);
        }
        match SmpteFps::from_division_byte(hi as i8) {
            Ok(fps) => Ok(Self::new_smpte(fps, lo)),
            Err(e) => Err(e),
        }
    }

    /// Encode the 16 bit division field
    pub const fn to_division(&self) -> u16 {
        match self {
            Self::TicksPerQuarterNote(t) => t.0,
            Self::Smpte(s) => u16::from_be_bytes([s.fps.division_byte() as u8, s.ticks_per_frame]),
        }
    }

    /// Returns Some if the midi timing is defined
    /// as ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(t.0),
            _ => None,
        }
    }
}

/// Ticks per quarter note, `1..=32767`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TicksPerQuarterNote(u16);

impl TicksPerQuarterNote {
    /// Validates the range
    pub const fn new(tpqn: u16) -> Result<Self, HeaderError> {
        if tpqn == 0 || tpqn > 0x7FFF {
            return Err(HeaderError::InvalidTicksPerQuarterNote(tpqn));
        }
        Ok(Self(tpqn))
    }

    /// Returns the ticks per quarter note for the file.
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        self.0
    }
}

/// Time code division: a frame rate and a tick count per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteHeader {
    pub(crate) fps: SmpteFps,
    pub(crate) ticks_per_frame: u8,
}

impl SmpteHeader {
    /// Returns the frames per second
    pub const fn fps(&self) -> SmpteFps {
        self.fps
    }

    /// Returns the ticks per frame
    pub const fn ticks_per_frame(&self) -> u8 {
        self.ticks_per_frame
    }

    /// Ticks in one second, at the nominal frame rate
    pub const fn ticks_per_second(&self) -> u32 {
        self.fps.as_division() as u32 * self.ticks_per_frame as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ticks_per_quarter_note_bounds() {
        assert_eq!(
            Timing::new_ticks_per_quarter_note(0),
            Err(HeaderError::InvalidTicksPerQuarterNote(0))
        );
        assert_eq!(
            Timing::new_ticks_per_quarter_note(32768),
            Err(HeaderError::InvalidTicksPerQuarterNote(32768))
        );
        assert_eq!(
            Timing::new_ticks_per_quarter_note(1).unwrap().ticks_per_quarter_note(),
            Some(1)
        );
        assert_eq!(
            Timing::new_ticks_per_quarter_note(32767).unwrap().to_division(),
            0x7FFF
        );
    }

    #[test]
    fn smpte_division() {
        // -25 fps, 40 ticks per frame
        let timing = Timing::from_division(0xE728).unwrap();
        assert_eq!(timing, Timing::new_smpte(SmpteFps::TwentyFive, 40));
        assert_eq!(timing.to_division(), 0xE728);
        assert_eq!(timing.ticks_per_quarter_note(), None);

        assert_eq!(
            Timing::from_division(0xE028),
            Err(HeaderError::InvalidFrameRate(-32))
        );
    }

    #[test]
    fn drop_frame_counts_as_thirty() {
        let Timing::Smpte(header) = Timing::new_smpte(SmpteFps::TwentyNine, 80) else {
            unreachable!()
        };
        assert_eq!(header.ticks_per_second(), 2400);
    }
}
