#![doc = r#"
SMPTE Offset: the SMPTE time at which a track starts.

The event carries a frame rate, an hour/minute/second/frame position and
a fractional frame in hundredths. Files that synchronise to video use it
to place the first tick of a track at a given time code.
"#]

use crate::{SmpteError, file::SmpteFps};

/// A track's starting position as SMPTE time code
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteOffset {
    /// The frame rate the position is expressed in
    pub fps: SmpteFps,
    /// `0..=23`
    pub hour: u8,
    /// `0..=59`
    pub minute: u8,
    /// `0..=59`
    pub second: u8,
    /// Frame within the second. Not range checked, since the limit depends on `fps`.
    pub frame: u8,
    /// Hundredths of a frame, `0..=99`
    pub subframe: u8,
}

impl SmpteOffset {
    /// The offset in seconds, measured at the offset's own frame rate
    pub fn as_seconds(&self) -> f64 {
        let whole = self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32;
        let frames = self.frame as f64 + self.subframe as f64 / 100.;
        whole as f64 + frames / self.fps.as_f64()
    }

    /// Parse the five data bytes of the event.
    ///
    /// The first byte packs the frame rate and the hour as `0rrhhhhh`:
    /// `rr` is 0 for 24 fps, 1 for 25, 2 for 29.97 and 3 for 30.
    pub const fn parse(data: &[u8]) -> Result<Self, SmpteError> {
        if data.len() != 5 {
            return Err(SmpteError::Length(data.len()));
        }

        let fps = match data[0] >> 5 {
            0 => SmpteFps::TwentyFour,
            1 => SmpteFps::TwentyFive,
            2 => SmpteFps::TwentyNine,
            3 => SmpteFps::Thirty,
            v => return Err(SmpteError::TrackFrame(v)),
        };
        let hour = data[0] & 0b0001_1111;
        if hour > 23 {
            return Err(SmpteError::HourOffset(hour));
        }
        if data[1] > 59 {
            return Err(SmpteError::MinuteOffset(data[1]));
        }
        if data[2] > 59 {
            return Err(SmpteError::SecondOffset(data[2]));
        }
        if data[4] > 99 {
            return Err(SmpteError::Subframe(data[4]));
        }
        Ok(Self {
            fps,
            hour,
            minute: data[1],
            second: data[2],
            frame: data[3],
            subframe: data[4],
        })
    }

    pub(crate) const fn to_bytes(self) -> [u8; 5] {
        let rate = match self.fps {
            SmpteFps::TwentyFour => 0,
            SmpteFps::TwentyFive => 1,
            SmpteFps::TwentyNine => 2,
            SmpteFps::Thirty => 3,
        };
        [
            (rate << 5) | (self.hour & 0b0001_1111),
            self.minute,
            self.second,
            self.frame,
            self.subframe,
        ]
    }
}

#[test]
fn parse_smpte_offset() {
    use pretty_assertions::assert_eq;
    // the bytes after 00 FF 54 05
    let bytes = [0x41, 0x17, 0x2D, 0x0C, 0x22];
    let offset = SmpteOffset::parse(&bytes).unwrap();

    assert_eq!(offset.fps, SmpteFps::TwentyNine);
    assert_eq!(offset.hour, 1);
    assert_eq!(offset.minute, 23);
    assert_eq!(offset.second, 45);
    assert_eq!(offset.frame, 12);
    assert_eq!(offset.subframe, 34);
    assert_eq!(offset.to_bytes(), bytes);
}

#[test]
fn parse_invalid_smpte_offset() {
    use pretty_assertions::assert_eq;
    let err = SmpteOffset::parse(&[0x7F, 0x17, 0x2D, 0x0C, 0x22]).unwrap_err();
    assert_eq!(err, SmpteError::HourOffset(31));

    let err = SmpteOffset::parse(&[0x41, 0x50, 0x2D, 0x0C, 0x22]).unwrap_err();
    assert_eq!(err, SmpteError::MinuteOffset(80));

    let err = SmpteOffset::parse(&[0x81, 0x00, 0x00, 0x00, 0x00]).unwrap_err();
    assert_eq!(err, SmpteError::TrackFrame(4));
}
