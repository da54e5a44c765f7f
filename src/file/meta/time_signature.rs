#[doc = r#"
The `Time Signature` meta event.

The denominator is stored as a power of two, so `6/8` is
`numerator: 6, denominator_exponent: 3`.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Beats per bar
    pub numerator: u8,
    /// The beat unit as a negative power of two
    pub denominator_exponent: u8,
    /// MIDI clocks per metronome click
    pub clocks_per_click: u8,
    /// Notated 32nd notes per MIDI quarter note (24 clocks)
    pub thirty_seconds_per_quarter: u8,
}

impl TimeSignature {
    /// Create a time signature
    pub const fn new(
        numerator: u8,
        denominator_exponent: u8,
        clocks_per_click: u8,
        thirty_seconds_per_quarter: u8,
    ) -> Self {
        Self {
            numerator,
            denominator_exponent,
            clocks_per_click,
            thirty_seconds_per_quarter,
        }
    }

    pub(crate) const fn from_bytes(bytes: &[u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// The beat unit, or `None` if the exponent doesn't fit in 32 bits
    pub const fn denominator(&self) -> Option<u32> {
        1u32.checked_shl(self.denominator_exponent as u32)
    }

    pub(crate) const fn to_bytes(self) -> [u8; 4] {
        [
            self.numerator,
            self.denominator_exponent,
            self.clocks_per_click,
            self.thirty_seconds_per_quarter,
        ]
    }
}

impl Default for TimeSignature {
    /// 4/4 with one click per quarter note
    fn default() -> Self {
        Self::new(4, 2, 24, 8)
    }
}

#[test]
fn six_eight() {
    let sig = TimeSignature::from_bytes(&[6, 3, 36, 8]);
    assert_eq!(sig.numerator, 6);
    assert_eq!(sig.denominator(), Some(8));
    assert_eq!(TimeSignature::new(4, 40, 24, 8).denominator(), None);
}
