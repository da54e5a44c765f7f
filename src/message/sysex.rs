use alloc::vec::Vec;

/// The status byte that introduced a system exclusive event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SysexKind {
    /// `F0 len data`: a complete message, or its first packet
    Normal,
    /// `F7 len data`: a continuation packet, or an escape for arbitrary bytes
    Escape,
}

impl SysexKind {
    /// The status byte
    pub const fn status(&self) -> u8 {
        match self {
            Self::Normal => 0xF0,
            Self::Escape => 0xF7,
        }
    }
}

#[doc = r#"
A system exclusive event. The payload is kept as-is, including any
terminating `F7`.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemExclusiveMessage {
    kind: SysexKind,
    data: Vec<u8>,
}

impl SystemExclusiveMessage {
    /// Create a sysex message
    pub const fn new(kind: SysexKind, data: Vec<u8>) -> Self {
        Self { kind, data }
    }
    /// Which status byte introduced the event
    pub const fn kind(&self) -> SysexKind {
        self.kind
    }
    /// The payload following the length
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
