//! Core bridge governance payloads.
//!
//! Governance payloads open with a 32-byte module identifier (left-padded
//! ASCII `"Core"`) and an action byte. Both are `omit` constants, so the
//! module+action pair is the discriminator prefix and doubles as a format
//! assertion on decode.

use attestation_core::layout::{Layout, LayoutItem, Value};
use attestation_core::{Registry, RegistryError};

pub const PROTOCOL: &str = "CoreBridge";

pub fn module_bytes() -> Vec<u8> {
    let mut module = vec![0u8; 28];
    module.extend_from_slice(b"Core");
    module
}

/// Contract upgrade directive for one target chain.
pub fn contract_upgrade_layout() -> Layout {
    Layout::new(vec![
        LayoutItem::bytes("module", 32).omit(Value::Bytes(module_bytes())),
        LayoutItem::uint("action", 1).omit(Value::Uint(1)),
        LayoutItem::uint("chain", 2),
        LayoutItem::bytes("newContract", 32),
    ])
}

/// Guardian-set rotation: the new index and the ordered 20-byte guardian
/// addresses. `chain` is the raw wire id; 0 addresses every chain.
pub fn guardian_set_upgrade_layout() -> Layout {
    Layout::new(vec![
        LayoutItem::bytes("module", 32).omit(Value::Bytes(module_bytes())),
        LayoutItem::uint("action", 1).omit(Value::Uint(2)),
        LayoutItem::uint("chain", 2),
        LayoutItem::uint("newGuardianSetIndex", 4),
        LayoutItem::array(
            "guardians",
            Layout::single(LayoutItem::bytes("address", 20)),
            1,
        ),
    ])
}

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        PROTOCOL,
        vec![
            ("ContractUpgrade", contract_upgrade_layout()),
            ("GuardianSetUpgrade", guardian_set_upgrade_layout()),
        ],
    )
}
