use core::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::ParseError;

#[doc = r#"
A 7-bit value carried by a MIDI message.

Any byte with the leading bit set is a status byte, so data bytes
are always in the range `0..=127`.
"#]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataByte(pub(crate) u8);

impl DataByte {
    /// The largest representable data byte
    pub const MAX: Self = Self(0x7F);

    /// Create a new data byte, checking for a leading 0 bit.
    pub const fn new(byte: u8) -> Result<Self, ParseError> {
        if byte & 0x80 != 0 {
            return Err(ParseError::DataByte(byte));
        }
        Ok(Self(byte))
    }

    /// Create a data byte, dropping the leading bit.
    pub const fn new_unchecked(byte: u8) -> Self {
        Self(byte & 0x7F)
    }

    /// Create a data byte, clamping anything above 127 down to 127.
    pub const fn saturating(byte: u8) -> Self {
        if byte > 0x7F { Self::MAX } else { Self(byte) }
    }

    /// Returns the underlying byte
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DataByte {
    type Error = ParseError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DataByte> for u8 {
    fn from(value: DataByte) -> Self {
        value.0
    }
}

impl fmt::Display for DataByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[doc = r#"
The channel a voice message is addressed to.

Channels are named one through sixteen, but are encoded
as `0..=15` in the low nibble of the status byte.
"#]
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, TryFromPrimitive, IntoPrimitive,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Channel {
    One = 0,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
    Thirteen,
    Fourteen,
    Fifteen,
    Sixteen,
}

impl Channel {
    /// All sixteen channels in encoding order
    pub const ALL: [Channel; 16] = [
        Channel::One,
        Channel::Two,
        Channel::Three,
        Channel::Four,
        Channel::Five,
        Channel::Six,
        Channel::Seven,
        Channel::Eight,
        Channel::Nine,
        Channel::Ten,
        Channel::Eleven,
        Channel::Twelve,
        Channel::Thirteen,
        Channel::Fourteen,
        Channel::Fifteen,
        Channel::Sixteen,
    ];

    /// Reads the channel from the low nibble of a status byte.
    #[inline]
    pub const fn from_status(status: u8) -> Self {
        Self::ALL[(status & 0x0F) as usize]
    }

    /// The zero-based index of the channel (`0..=15`)
    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// The encoded low nibble of the channel
    #[inline]
    pub const fn to_nibble(&self) -> u8 {
        *self as u8
    }
}

#[test]
fn data_byte_rejects_status_bytes() {
    use pretty_assertions::assert_eq;
    assert_eq!(DataByte::new(0x7F).unwrap().value(), 127);
    assert_eq!(DataByte::new(0x80), Err(ParseError::DataByte(0x80)));
    assert_eq!(DataByte::saturating(0xC8), DataByte::MAX);
    assert_eq!(DataByte::new_unchecked(0x85).value(), 0x05);
}

#[test]
fn channel_nibbles() {
    use pretty_assertions::assert_eq;
    assert_eq!(Channel::from_status(0x93), Channel::Four);
    assert_eq!(Channel::Sixteen.to_nibble(), 0x0F);
    assert_eq!(Channel::try_from(15u8).ok(), Some(Channel::Sixteen));
    assert!(Channel::try_from(16u8).is_err());
}
