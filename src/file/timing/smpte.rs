#![doc = r#"
SMPTE frame rates.

A file using time code division measures ticks in fractions of a video
frame rather than of a beat. MIDI knows four frame rates: 24 (film),
25 (PAL/SECAM), 29.97 (NTSC colour, "drop frame") and 30.
"#]

use crate::HeaderError;

/// The frame rates allowed by MIDI files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 frames per second
    TwentyFour,
    /// 25 frames per second
    TwentyFive,
    /// 29.97 frames per second (30000/1001), drop-frame time code
    TwentyNine,
    /// 30 frames per second
    Thirty,
}

impl SmpteFps {
    /// The nominal frame rate used for tick arithmetic.
    ///
    /// Drop-frame 29.97 counts as 30 here.
    pub const fn as_division(&self) -> u8 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::TwentyNine => 30,
            Self::Thirty => 30,
        }
    }

    /// The exact frame rate
    pub const fn as_f64(&self) -> f64 {
        match self {
            Self::TwentyFour => 24.,
            Self::TwentyFive => 25.,
            Self::TwentyNine => DROP_FRAME,
            Self::Thirty => 30.,
        }
    }

    /// Decode the upper byte of a time code division (-24, -25, -29 or -30)
    pub const fn from_division_byte(byte: i8) -> Result<Self, HeaderError> {
        match byte {
            -24 => Ok(Self::TwentyFour),
            -25 => Ok(Self::TwentyFive),
            -29 => Ok(Self::TwentyNine),
            -30 => Ok(Self::Thirty),
            other => Err(HeaderError::InvalidFrameRate(other)),
        }
    }

    /// Encode as the upper byte of a time code division
    pub const fn division_byte(&self) -> i8 {
        match self {
            Self::TwentyFour => -24,
            Self::TwentyFive => -25,
            Self::TwentyNine => -29,
            Self::Thirty => -30,
        }
    }
}

const DROP_FRAME: f64 = 30_000. / 1001.;
