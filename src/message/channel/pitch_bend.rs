use crate::{DataByte, ParseError};

#[doc = r#"
A 14 bit pitch wheel position.

`0x2000` (8192) is the centre. The wire format sends the low seven bits
first.

# Example
```rust
# use smfseq::prelude::*;
let bend = PitchBend::new(0x3FFF).unwrap();
assert_eq!(bend.centered(), 8191);
assert!(bend.normalized() < 1.);
assert_eq!(PitchBend::CENTER.normalized(), 0.);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PitchBend(u16);

impl PitchBend {
    /// No bend
    pub const CENTER: Self = Self(0x2000);
    /// Lowest position
    pub const MIN: Self = Self(0);
    /// Highest position
    pub const MAX: Self = Self(0x3FFF);

    /// Create a pitch bend, checking the value fits in 14 bits
    pub const fn new(value: u16) -> Result<Self, ParseError> {
        if value > 0x3FFF {
            return Err(ParseError::DataByte((value >> 7) as u8));
        }
        Ok(Self(value))
    }

    /// Combine the two data bytes as `(msb << 7) | lsb`
    pub const fn from_data_bytes(lsb: DataByte, msb: DataByte) -> Self {
        Self(((msb.value() as u16) << 7) | lsb.value() as u16)
    }

    /// The raw value, `0..=16383`
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// The value relative to the centre, `-8192..=8191`
    pub const fn centered(&self) -> i16 {
        self.0 as i16 - 0x2000
    }

    /// The position scaled to `-1.0..1.0`
    pub fn normalized(&self) -> f64 {
        self.centered() as f64 / 8192.
    }

    /// The low seven bits
    pub const fn lsb(&self) -> u8 {
        (self.0 & 0x7F) as u8
    }

    /// The high seven bits
    pub const fn msb(&self) -> u8 {
        (self.0 >> 7) as u8
    }
}

impl Default for PitchBend {
    fn default() -> Self {
        Self::CENTER
    }
}

#[test]
fn pitch_bend_bytes() {
    use pretty_assertions::assert_eq;
    let bend = PitchBend::from_data_bytes(DataByte::new(0x00).unwrap(), DataByte::new(0x40).unwrap());
    assert_eq!(bend, PitchBend::CENTER);
    assert_eq!(PitchBend::MIN.normalized(), -1.);
    assert_eq!(PitchBend::new(0x1234).unwrap().lsb(), 0x34);
    assert_eq!(PitchBend::new(0x1234).unwrap().msb(), 0x24);
    assert!(PitchBend::new(0x4000).is_err());
}
