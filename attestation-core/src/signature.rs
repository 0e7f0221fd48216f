use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::layout::{Layout, LayoutItem, Value};

/// Canonical 65-byte recoverable secp256k1 signature: `r ‖ s ‖ v`, with `v`
/// carrying the recovery id in the 27/28 convention.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub r: [u8; 32],
    pub s: [u8; 32],
    pub v: u8,
}

impl Signature {
    pub const SIZE: usize = 65;

    pub fn layout() -> Layout {
        Layout::new(vec![
            LayoutItem::bytes("r", 32),
            LayoutItem::bytes("s", 32),
            LayoutItem::uint("v", 1),
        ])
    }

    pub fn to_bytes(&self) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[0..32].copy_from_slice(&self.r);
        bytes[32..64].copy_from_slice(&self.s);
        bytes[64] = self.v;
        bytes
    }

    pub fn from_bytes(bytes: &[u8; 65]) -> Self {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[0..32]);
        s.copy_from_slice(&bytes[32..64]);
        Self {
            r,
            s,
            v: bytes[64],
        }
    }

    pub fn serialize(&self) -> Result<Vec<u8>, LayoutError> {
        Self::layout().encode(&self.to_value())
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, LayoutError> {
        Self::from_value(&Self::layout().decode(bytes, true)?)
    }

    pub fn to_value(&self) -> Value {
        Value::struct_of(vec![
            ("r", Value::bytes(self.r.to_vec())),
            ("s", Value::bytes(self.s.to_vec())),
            ("v", Value::Uint(self.v as u128)),
        ])
    }

    pub fn from_value(value: &Value) -> Result<Self, LayoutError> {
        Ok(Self {
            r: expect_byte_array(value, "r")?,
            s: expect_byte_array(value, "s")?,
            v: expect_uint(value, "v")? as u8,
        })
    }
}

pub(crate) fn expect_uint(value: &Value, field: &'static str) -> Result<u128, LayoutError> {
    value
        .field(field)
        .and_then(Value::as_uint)
        .ok_or(LayoutError::TypeMismatch {
            field,
            expected: "uint",
        })
}

pub(crate) fn expect_byte_array<const N: usize>(
    value: &Value,
    field: &'static str,
) -> Result<[u8; N], LayoutError> {
    let bytes = value
        .field(field)
        .and_then(Value::as_bytes)
        .ok_or(LayoutError::TypeMismatch {
            field,
            expected: "bytes",
        })?;
    bytes.try_into().map_err(|_| LayoutError::LengthMismatch {
        field,
        expected: N,
        actual: bytes.len(),
    })
}
