use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
How the tracks of a file relate to each other.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum FormatType {
    /// Format 0: one track carrying every channel
    SingleMultiChannel = 0,
    /// Format 1: tracks played together, sharing the first track's tempo map
    Simultaneous = 1,
    /// Format 2: independent single-track patterns
    SequentiallyIndependent = 2,
}
