use attestation_core::layout::Value;
use attestation_core::GuardianSet;

pub const DEVNET_GUARDIAN_KEY: &str =
    "cfb12303a19cde580bb4dd771639b0d26bc68353645571a8cff516ab2ee113a0";

/// The canonical 19-member mainnet guardian table for set index 4, in
/// guardian-index order.
pub const MAINNET_GUARDIAN_SET_INDEX: u32 = 4;
pub const MAINNET_GUARDIAN_ADDRESSES: [&str; 19] = [
    "5893b5a76c3f739645648885bdccc06cd70a3cd3",
    "ff6cb952589bde862c25ef4392132fb9d4a42157",
    "114de8460193bdf3a2fcf81f86a09765f4762fd1",
    "107a0086b32d7a0977926a205131d8731d39cbeb",
    "8c82b2fd82faed2711d59af0f2499d16e726f6b2",
    "11b39756c042441be6d8650b69b54ebe715e2343",
    "54ce5b4d348fb74b958e8966e2ec3dbd4958a7cd",
    "15e7caf07c4e3dc8e7c469f92c8cd88fb8005a20",
    "74a3bf913953d695260d88bc1aa25a4eee363ef0",
    "000ac0076727b35fbea2dac28fee5ccb0fea768e",
    "af45ced136b9d9e24903464ae889f5c8a723fc14",
    "f93124b7c738843cbb89e864c862c38cddcccf95",
    "d2cc37a4dc036a8d232b48f62cdd4731412f4890",
    "da798f6896a3331f64b48c12d1d57fd9cbe70811",
    "71aa1be1d36cafe3867910f99c09e347899c19c3",
    "8192b6e7387ccd768277c17dab1b7a5027c0b3cf",
    "178e21ad2e77ae06711549cfbb1f9c7a9d8096e8",
    "5e1487f35515d02a92753504a8d75471b9f49edb",
    "6fbebc898f403e4773e95feb15e80c9a99c8348d",
];

pub fn mainnet_guardian_set() -> GuardianSet {
    GuardianSet {
        index: MAINNET_GUARDIAN_SET_INDEX,
        keys: MAINNET_GUARDIAN_ADDRESSES
            .iter()
            .map(|address| hex::decode(address).unwrap().try_into().unwrap())
            .collect(),
        creation_time: chrono::Utc::now().timestamp(),
        expiration_time: 0,
    }
}

/// A 32-byte big-endian amount from a native integer.
pub fn u256_bytes(value: u128) -> Vec<u8> {
    let mut bytes = vec![0u8; 16];
    bytes.extend_from_slice(&value.to_be_bytes());
    bytes
}

pub fn sample_transfer_value() -> Value {
    Value::struct_of(vec![
        ("amount", Value::bytes(u256_bytes(1000))),
        ("tokenAddress", Value::bytes(vec![0x74; 32])),
        ("tokenChain", Value::str("Ethereum")),
        ("to", Value::bytes(vec![0x11; 32])),
        ("toChain", Value::str("Solana")),
        ("fee", Value::bytes(u256_bytes(0))),
    ])
}
