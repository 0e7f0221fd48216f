//! Token bridge payloads. Every payload opens with a one-byte id written as
//! an `omit` constant; the id doubles as the protocol's discriminator
//! prefix for blind decoding.

use attestation_core::chain::ChainIdConversion;
use attestation_core::layout::{Layout, LayoutItem, Value};
use attestation_core::{Registry, RegistryError};

pub const PROTOCOL: &str = "TokenBridge";

/// Token transfer: 32-byte amount and fee, universal token/recipient
/// addresses, chain ids carried through the chain-name conversion.
pub fn transfer_layout() -> Layout {
    Layout::new(vec![
        LayoutItem::uint("payloadId", 1).omit(Value::Uint(1)),
        LayoutItem::bytes("amount", 32),
        LayoutItem::bytes("tokenAddress", 32),
        LayoutItem::uint("tokenChain", 2).with_conversion(ChainIdConversion),
        LayoutItem::bytes("to", 32),
        LayoutItem::uint("toChain", 2).with_conversion(ChainIdConversion),
        LayoutItem::bytes("fee", 32),
    ])
}

/// Token metadata attestation: zero-padded 32-byte symbol and name.
pub fn attest_meta_layout() -> Layout {
    Layout::new(vec![
        LayoutItem::uint("payloadId", 1).omit(Value::Uint(2)),
        LayoutItem::bytes("tokenAddress", 32),
        LayoutItem::uint("tokenChain", 2).with_conversion(ChainIdConversion),
        LayoutItem::uint("decimals", 1),
        LayoutItem::bytes("symbol", 32),
        LayoutItem::bytes("name", 32),
    ])
}

/// Transfer with an arbitrary app payload trailing to the end of the
/// buffer.
pub fn transfer_with_payload_layout() -> Layout {
    Layout::new(vec![
        LayoutItem::uint("payloadId", 1).omit(Value::Uint(3)),
        LayoutItem::bytes("amount", 32),
        LayoutItem::bytes("tokenAddress", 32),
        LayoutItem::uint("tokenChain", 2).with_conversion(ChainIdConversion),
        LayoutItem::bytes("to", 32),
        LayoutItem::uint("toChain", 2).with_conversion(ChainIdConversion),
        LayoutItem::bytes("fromAddress", 32),
        LayoutItem::rest("payload"),
    ])
}

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        PROTOCOL,
        vec![
            ("Transfer", transfer_layout()),
            ("AttestMeta", attest_meta_layout()),
            ("TransferWithPayload", transfer_with_payload_layout()),
        ],
    )
}
