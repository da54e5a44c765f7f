/// Microseconds per quarter note at 120 beats per minute
pub const DEFAULT_MICROS_PER_QUARTER_NOTE: u32 = 500_000;

#[doc = r#"
The `Set Tempo` meta event: microseconds per quarter note.

# Example
```rust
# use smfseq::prelude::*;
let tempo = Tempo::new(500_000);
assert_eq!(tempo.beats_per_minute(), 120.);
assert_eq!(tempo.seconds_per_beat(), 0.5);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo(u32);

impl Tempo {
    /// 120 beats per minute
    pub const DEFAULT: Self = Self(DEFAULT_MICROS_PER_QUARTER_NOTE);

    /// Create a tempo. Only the low 24 bits can be encoded.
    pub const fn new(micros_per_quarter_note: u32) -> Self {
        Self(micros_per_quarter_note & 0x00FF_FFFF)
    }

    /// Create a tempo from the three data bytes of the event
    pub const fn new_from_bytes(bytes: &[u8; 3]) -> Self {
        Self(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }

    /// Create a tempo from beats per minute, rounding to the nearest microsecond
    pub fn from_bpm(bpm: f64) -> Self {
        Self::new((60_000_000. / bpm + 0.5) as u32)
    }

    /// Microseconds per quarter note
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.0
    }

    /// `60_000_000 / micros_per_quarter_note`
    pub fn beats_per_minute(&self) -> f64 {
        60_000_000. / self.0 as f64
    }

    /// `60 / beats_per_minute`
    pub fn seconds_per_beat(&self) -> f64 {
        60. / self.beats_per_minute()
    }

    pub(crate) const fn to_bytes(self) -> [u8; 3] {
        let [_, a, b, c] = self.0.to_be_bytes();
        [a, b, c]
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[test]
fn tempo_bytes() {
    use pretty_assertions::assert_eq;
    let tempo = Tempo::new_from_bytes(&[0x07, 0xA1, 0x20]);
    assert_eq!(tempo, Tempo::DEFAULT);
    assert_eq!(tempo.to_bytes(), [0x07, 0xA1, 0x20]);
    assert_eq!(Tempo::from_bpm(90.).micros_per_quarter_note(), 666_667);
}
