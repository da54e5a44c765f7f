use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::MetaError;

#[doc = r#"
A key, by its number of sharps (positive) or flats (negative).
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i8)]
#[allow(missing_docs)]
pub enum KeySignatureKey {
    CFlat = -7,
    GFlat = -6,
    DFlat = -5,
    AFlat = -4,
    EFlat = -3,
    BFlat = -2,
    F = -1,
    C = 0,
    G = 1,
    D = 2,
    A = 3,
    E = 4,
    B = 5,
    FSharp = 6,
    CSharp = 7,
}

/// Major or minor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Scale {
    Major = 0,
    Minor = 1,
}

/// The `Key Signature` meta event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeySignature {
    /// The tonic, on the circle of fifths
    pub key: KeySignatureKey,
    /// Major or minor
    pub scale: Scale,
}

impl KeySignature {
    /// Create a key signature
    pub const fn new(key: KeySignatureKey, scale: Scale) -> Self {
        Self { key, scale }
    }

    /// Decode the two data bytes, `sf mi`
    pub fn from_bytes(bytes: &[u8; 2]) -> Result<Self, MetaError> {
        let err = MetaError::KeySignature {
            key: bytes[0] as i8,
            scale: bytes[1],
        };
        let key = KeySignatureKey::try_from(bytes[0] as i8).map_err(|_| err)?;
        let scale = Scale::try_from(bytes[1]).map_err(|_| err)?;
        Ok(Self { key, scale })
    }

    /// Sharps if positive, flats if negative
    pub fn accidentals(&self) -> i8 {
        self.key.into()
    }

    pub(crate) fn to_bytes(self) -> [u8; 2] {
        [i8::from(self.key) as u8, self.scale.into()]
    }
}

#[test]
fn key_signature_bytes() {
    use pretty_assertions::assert_eq;
    let sig = KeySignature::from_bytes(&[0xFD, 0x01]).unwrap();
    assert_eq!(sig, KeySignature::new(KeySignatureKey::EFlat, Scale::Minor));
    assert_eq!(sig.accidentals(), -3);
    assert_eq!(sig.to_bytes(), [0xFD, 0x01]);

    assert_eq!(
        KeySignature::from_bytes(&[0x08, 0x00]),
        Err(MetaError::KeySignature { key: 8, scale: 0 })
    );
    assert_eq!(
        KeySignature::from_bytes(&[0x00, 0x02]),
        Err(MetaError::KeySignature { key: 0, scale: 2 })
    );
}
