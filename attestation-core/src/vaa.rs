//! Attestation envelope codec.
//!
//! Wire format (all integers big-endian):
//!
//! ```text
//! guardianSetIndex:u32 | timestamp:u32 | nonce:u32 | emitterChain:u16 |
//! emitterAddress:32 | sequence:u64 | consistencyLevel:u8 |
//! signatureCount:u8 | signatures[count] of (guardianIndex:u8 | r:32 | s:32 | v:u8) |
//! payload: remaining bytes
//! ```
//!
//! The signing digest covers the body (timestamp through payload) and is
//! `keccak256(keccak256(body))`. The guardian-set index and the signature
//! array are excluded so that repairing a VAA against a newer guardian set
//! can relabel the index without invalidating retained signatures.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chain::{Chain, ChainIdConversion};
use crate::error::{LayoutError, RegistryError};
use crate::layout::{Layout, LayoutItem, Value};
use crate::registry::Registry;
use crate::signature::{expect_byte_array, expect_uint, Signature};
use crate::utils::double_keccak256;

/// A guardian's signature over a VAA digest, tagged with its position in
/// the guardian set.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardianSignature {
    pub guardian_index: u8,
    pub signature: Signature,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Vaa {
    pub guardian_set_index: u32,
    pub timestamp: u32,
    pub nonce: u32,
    pub emitter_chain: Chain,
    pub emitter_address: [u8; 32],
    pub sequence: u64,
    pub consistency_level: u8,
    pub signatures: Vec<GuardianSignature>,
    pub payload: Vec<u8>,
}

fn signature_entry_layout() -> Layout {
    let mut items = vec![LayoutItem::uint("guardianIndex", 1)];
    items.extend(Signature::layout().items);
    Layout::new(items)
}

/// The full envelope, expressed as a layout.
pub fn envelope_layout() -> Layout {
    Layout::new(vec![
        LayoutItem::uint("guardianSetIndex", 4),
        LayoutItem::uint("timestamp", 4),
        LayoutItem::uint("nonce", 4),
        LayoutItem::uint("emitterChain", 2).with_conversion(ChainIdConversion),
        LayoutItem::bytes("emitterAddress", 32),
        LayoutItem::uint("sequence", 8),
        LayoutItem::uint("consistencyLevel", 1),
        LayoutItem::array("signatures", signature_entry_layout(), 1),
        LayoutItem::rest("payload"),
    ])
}

/// The digest input: the envelope without the guardian-set index and the
/// signature array.
fn body_layout() -> Layout {
    Layout::new(vec![
        LayoutItem::uint("timestamp", 4),
        LayoutItem::uint("nonce", 4),
        LayoutItem::uint("emitterChain", 2).with_conversion(ChainIdConversion),
        LayoutItem::bytes("emitterAddress", 32),
        LayoutItem::uint("sequence", 8),
        LayoutItem::uint("consistencyLevel", 1),
        LayoutItem::rest("payload"),
    ])
}

impl Vaa {
    /// A freshly authored VAA: header fields plus payload, with no
    /// signatures attached yet. The guardian-set index is filled in by the
    /// attestation flow that collects signatures.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        timestamp: u32,
        nonce: u32,
        emitter_chain: Chain,
        emitter_address: [u8; 32],
        sequence: u64,
        consistency_level: u8,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            guardian_set_index: 0,
            timestamp,
            nonce,
            emitter_chain,
            emitter_address,
            sequence,
            consistency_level,
            signatures: Vec::new(),
            payload,
        }
    }

    pub fn serialize(&self) -> Result<Vec<u8>, LayoutError> {
        envelope_layout().encode(&self.to_value())
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, LayoutError> {
        Self::from_value(&envelope_layout().decode(bytes, true)?)
    }

    /// Decode the envelope, then the payload bytes through the registry for
    /// the given payload literal. A registry failure propagates; there is no
    /// silent fallback to raw bytes.
    pub fn deserialize_typed(
        registry: &Registry,
        literal: &str,
        bytes: &[u8],
    ) -> Result<(Self, Value), RegistryError> {
        let vaa = Self::deserialize(bytes)?;
        let payload = registry.deserialize_payload(literal, &vaa.payload)?;
        Ok((vaa, payload))
    }

    /// The serialized digest input.
    pub fn body(&self) -> Result<Vec<u8>, LayoutError> {
        body_layout().encode(&Value::Struct(self.body_fields()))
    }

    /// The exact 32-byte message guardians sign: a double Keccak256 over the
    /// body.
    pub fn digest(&self) -> Result<[u8; 32], LayoutError> {
        Ok(double_keccak256(&self.body()?))
    }

    fn body_fields(&self) -> Vec<(String, Value)> {
        vec![
            ("timestamp".to_string(), Value::Uint(self.timestamp as u128)),
            ("nonce".to_string(), Value::Uint(self.nonce as u128)),
            (
                "emitterChain".to_string(),
                Value::str(self.emitter_chain.name()),
            ),
            (
                "emitterAddress".to_string(),
                Value::bytes(self.emitter_address.to_vec()),
            ),
            ("sequence".to_string(), Value::Uint(self.sequence as u128)),
            (
                "consistencyLevel".to_string(),
                Value::Uint(self.consistency_level as u128),
            ),
            ("payload".to_string(), Value::bytes(self.payload.clone())),
        ]
    }

    fn to_value(&self) -> Value {
        let signatures = self
            .signatures
            .iter()
            .map(|entry| {
                let mut fields = vec![(
                    "guardianIndex".to_string(),
                    Value::Uint(entry.guardian_index as u128),
                )];
                if let Value::Struct(signature_fields) = entry.signature.to_value() {
                    fields.extend(signature_fields);
                }
                Value::Struct(fields)
            })
            .collect();

        // Wire order puts the signature array between the consistency level
        // and the payload.
        Value::struct_of(vec![
            (
                "guardianSetIndex",
                Value::Uint(self.guardian_set_index as u128),
            ),
            ("timestamp", Value::Uint(self.timestamp as u128)),
            ("nonce", Value::Uint(self.nonce as u128)),
            ("emitterChain", Value::str(self.emitter_chain.name())),
            ("emitterAddress", Value::bytes(self.emitter_address.to_vec())),
            ("sequence", Value::Uint(self.sequence as u128)),
            (
                "consistencyLevel",
                Value::Uint(self.consistency_level as u128),
            ),
            ("signatures", Value::Array(signatures)),
            ("payload", Value::bytes(self.payload.clone())),
        ])
    }

    fn from_value(value: &Value) -> Result<Self, LayoutError> {
        let chain_name =
            value
                .field("emitterChain")
                .and_then(Value::as_str)
                .ok_or(LayoutError::TypeMismatch {
                    field: "emitterChain",
                    expected: "chain name",
                })?;
        let emitter_chain = Chain::from_str(chain_name).map_err(|_| LayoutError::Conversion {
            field: "emitterChain",
            reason: format!("unknown chain '{chain_name}'"),
        })?;

        let signatures = value
            .field("signatures")
            .and_then(Value::as_array)
            .ok_or(LayoutError::TypeMismatch {
                field: "signatures",
                expected: "array",
            })?
            .iter()
            .map(|entry| {
                Ok(GuardianSignature {
                    guardian_index: expect_uint(entry, "guardianIndex")? as u8,
                    signature: Signature::from_value(entry)?,
                })
            })
            .collect::<Result<Vec<_>, LayoutError>>()?;

        let payload = value
            .field("payload")
            .and_then(Value::as_bytes)
            .ok_or(LayoutError::TypeMismatch {
                field: "payload",
                expected: "bytes",
            })?
            .to_vec();

        Ok(Self {
            guardian_set_index: expect_uint(value, "guardianSetIndex")? as u32,
            timestamp: expect_uint(value, "timestamp")? as u32,
            nonce: expect_uint(value, "nonce")? as u32,
            emitter_chain,
            emitter_address: expect_byte_array(value, "emitterAddress")?,
            sequence: expect_uint(value, "sequence")? as u64,
            consistency_level: expect_uint(value, "consistencyLevel")? as u8,
            signatures,
            payload,
        })
    }
}
