use sha3::{Digest, Keccak256};

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Guardians sign the hash of the hash of the message body; `ecrecover`-style
/// verification expects the inner hash, so both layers use Keccak256.
pub fn double_keccak256(data: &[u8]) -> [u8; 32] {
    keccak256(&keccak256(data))
}

/// Left-pad an address of up to 32 bytes into the universal 32-byte form.
pub fn to_32_bytes(address: &[u8]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let len = address.len().min(32);
    result[32 - len..].copy_from_slice(&address[..len]);
    result
}

/// Strip leading zero padding from a universal address.
pub fn from_32_bytes(bytes: &[u8; 32]) -> Vec<u8> {
    bytes.iter().skip_while(|&&b| b == 0).copied().collect()
}
