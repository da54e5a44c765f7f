use alloc::{borrow::Cow, string::String, vec::Vec};
use core::fmt;

#[doc = r#"
The contents of a text-bearing meta event.

The bytes are kept as they were in the file, since nothing guarantees
an encoding. Use [`Text::as_str`] for a lossy UTF-8 view.
"#]
#[derive(Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Text(Vec<u8>);

impl Text {
    /// Wrap raw bytes
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
    /// The raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
    /// The text, replacing invalid UTF-8 sequences
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Text({:?})", self.as_str())
    }
}
