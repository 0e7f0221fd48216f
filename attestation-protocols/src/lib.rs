//! Payload-type definitions for the attestation registry.
//!
//! Each protocol module exposes its layouts and a `register` function; the
//! registry population here is the one-time write phase that must complete
//! before concurrent decoding begins.

pub mod core_bridge;
pub mod token_bridge;

use attestation_core::{Registry, RegistryError};

/// A registry with every protocol in this crate registered.
pub fn default_registry() -> Result<Registry, RegistryError> {
    let mut registry = Registry::new();
    token_bridge::register(&mut registry)?;
    core_bridge::register(&mut registry)?;
    tracing::debug!("payload registry populated");
    Ok(registry)
}
