use thiserror::Error;

/// Decode-time format errors and encode-time range errors for the layout
/// engine. Everything here is reported synchronously to the caller; nothing
/// is retried or swallowed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("unexpected end of input while reading '{field}': needed {needed} bytes, {remaining} remaining")]
    UnexpectedEnd {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("{count} trailing bytes left unconsumed")]
    TrailingBytes { count: usize },

    #[error("unknown discriminator id {id:#x} for switch '{field}'")]
    UnknownDiscriminator { field: &'static str, id: u128 },

    #[error("unknown variant tag '{tag}' for switch '{field}'")]
    UnknownTag { field: &'static str, tag: String },

    #[error("constant mismatch for '{field}'")]
    ConstantMismatch { field: &'static str },

    #[error("value {value:#x} does not fit in {size} bytes for '{field}'")]
    ValueOutOfRange {
        field: &'static str,
        value: u128,
        size: u8,
    },

    #[error("byte length mismatch for '{field}': expected {expected}, got {actual}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("length {len} does not fit in a {width}-byte prefix for '{field}'")]
    PrefixOverflow {
        field: &'static str,
        len: usize,
        width: u8,
    },

    #[error("missing field '{field}'")]
    MissingField { field: &'static str },

    #[error("type mismatch for '{field}': expected {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    #[error("conversion failed for '{field}': {reason}")]
    Conversion { field: &'static str, reason: String },
}

/// Registry integrity and lookup errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("payload type '{literal}' is already registered")]
    DuplicatePayloadType { literal: String },

    #[error("unknown payload type '{literal}'")]
    UnknownPayloadType { literal: String },

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Signature-level failures: malformed key material, invalid recovery ids,
/// curve errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid recovery id {v}")]
    InvalidRecoveryId { v: u8 },

    #[error("invalid private key encoding: {0}")]
    InvalidPrivateKey(String),

    #[error(transparent)]
    Secp(#[from] secp256k1::Error),
}

/// Repair failures. Distinct from format errors: too few surviving
/// signatures is a trust failure, not a parsing bug.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepairError {
    #[error("insufficient signatures after repair: {retained} valid, {required} required")]
    InsufficientSignatures { retained: usize, required: usize },

    #[error(transparent)]
    Layout(#[from] LayoutError),
}
