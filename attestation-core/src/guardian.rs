//! Guardian keypair operations, quorum arithmetic, and signature-set
//! repair after guardian-set rotations.

use secp256k1::{ecdsa, Message, PublicKey, Secp256k1, SecretKey};
use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, RepairError};
use crate::signature::Signature;
use crate::utils::keccak256;
use crate::vaa::Vaa;

/// An indexed, ordered, immutable guardian membership. Rotation produces a
/// new set with a higher index; the caller sources rotation data from
/// governance state.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GuardianSet {
    pub index: u32,
    pub keys: Vec<[u8; 20]>,
    pub creation_time: i64,
    pub expiration_time: u64,
}

impl GuardianSet {
    pub fn is_active(&self) -> bool {
        self.expiration_time == 0
            || self.expiration_time > chrono::Utc::now().timestamp() as u64
    }

    pub fn quorum(&self) -> usize {
        quorum(self.keys.len())
    }
}

/// Minimum number of valid signatures required to trust a VAA for a set of
/// `guardian_count` members.
pub fn quorum(guardian_count: usize) -> usize {
    guardian_count * 2 / 3 + 1
}

/// Holds a guardian secret key for the duration of signing. No secret
/// material is retained anywhere else in this crate.
pub struct Signer {
    secret_key: SecretKey,
    secp: Secp256k1<secp256k1::All>,
}

impl Signer {
    pub fn new(private_key_hex: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(private_key_hex.trim_start_matches("0x"))
            .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self {
            secret_key: SecretKey::from_slice(&bytes)?,
            secp: Secp256k1::new(),
        })
    }

    pub fn sign(&self, digest: [u8; 32]) -> Result<Signature, CryptoError> {
        let message = Message::from_digest_slice(&digest)?;
        let recoverable = self.secp.sign_ecdsa_recoverable(&message, &self.secret_key);
        let (recovery_id, compact) = recoverable.serialize_compact();

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&compact[0..32]);
        s.copy_from_slice(&compact[32..64]);

        Ok(Signature {
            r,
            s,
            v: 27 + recovery_id.to_i32() as u8,
        })
    }

    pub fn public_key(&self) -> [u8; 65] {
        PublicKey::from_secret_key(&self.secp, &self.secret_key).serialize_uncompressed()
    }

    pub fn address(&self) -> [u8; 20] {
        address_from_public_key(&self.public_key())
    }
}

/// 20-byte guardian address: `keccak256(uncompressed_pubkey[1..])[12..]`.
pub fn address_from_public_key(uncompressed: &[u8; 65]) -> [u8; 20] {
    let hash = keccak256(&uncompressed[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..32]);
    address
}

/// Standard secp256k1 verification of `(r, s)` against a public key and
/// digest. The recovery byte is not consulted.
pub fn verify_signature(digest: [u8; 32], signature: &Signature, public_key: &[u8]) -> bool {
    let Ok(message) = Message::from_digest_slice(&digest) else {
        return false;
    };
    let Ok(key) = PublicKey::from_slice(public_key) else {
        return false;
    };
    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(&signature.r);
    compact[32..].copy_from_slice(&signature.s);
    let Ok(sig) = ecdsa::Signature::from_compact(&compact) else {
        return false;
    };

    Secp256k1::verification_only()
        .verify_ecdsa(&message, &sig, &key)
        .is_ok()
}

/// Recover the signer's uncompressed public key from `(r, s, v)` and the
/// digest. `v` must be a valid recovery id in the 27/28 convention.
pub fn recover_public_key(
    digest: [u8; 32],
    signature: &Signature,
) -> Result<[u8; 65], CryptoError> {
    let recovery = signature
        .v
        .checked_sub(27)
        .ok_or(CryptoError::InvalidRecoveryId { v: signature.v })?;
    let recovery_id = ecdsa::RecoveryId::from_i32(recovery as i32)
        .map_err(|_| CryptoError::InvalidRecoveryId { v: signature.v })?;

    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(&signature.r);
    compact[32..].copy_from_slice(&signature.s);
    let recoverable = ecdsa::RecoverableSignature::from_compact(&compact, recovery_id)?;

    let message = Message::from_digest_slice(&digest)?;
    let secp = Secp256k1::new();
    let public_key = secp.recover_ecdsa(&message, &recoverable)?;
    Ok(public_key.serialize_uncompressed())
}

pub fn recover_signer(digest: [u8; 32], signature: &Signature) -> Result<[u8; 20], CryptoError> {
    Ok(address_from_public_key(&recover_public_key(digest, signature)?))
}

/// Re-validate a VAA's signatures against `target` and relabel its
/// guardian-set index.
///
/// Signatures that do not recover to the key at the same guardian index in
/// `target` are discarded; if fewer than quorum survive, the VAA cannot be
/// trusted under the target set and the repair fails.
pub fn repair(vaa: &Vaa, target: &GuardianSet) -> Result<Vaa, RepairError> {
    if vaa.guardian_set_index == target.index {
        return Ok(vaa.clone());
    }

    let digest = vaa.digest()?;

    let mut retained = Vec::with_capacity(vaa.signatures.len());
    for entry in &vaa.signatures {
        let recovered = match recover_signer(digest, &entry.signature) {
            Ok(address) => address,
            Err(_) => {
                tracing::debug!(
                    guardian_index = entry.guardian_index,
                    "discarding unrecoverable signature"
                );
                continue;
            }
        };
        match target.keys.get(entry.guardian_index as usize) {
            Some(key) if *key == recovered => retained.push(*entry),
            _ => tracing::debug!(
                guardian_index = entry.guardian_index,
                "discarding signature outside target guardian set"
            ),
        }
    }

    let required = quorum(target.keys.len());
    if retained.len() < required {
        return Err(RepairError::InsufficientSignatures {
            retained: retained.len(),
            required,
        });
    }

    let mut repaired = vaa.clone();
    repaired.guardian_set_index = target.index;
    repaired.signatures = retained;
    Ok(repaired)
}
