//! Payload-type registry.
//!
//! An explicit, append-only table keyed by `(protocol, payloadName)`.
//! Protocol modules populate it once at process start; after that the
//! decoding paths only read, so a shared reference is safe across threads
//! without locking.

use std::collections::BTreeMap;

use crate::error::RegistryError;
use crate::layout::{Layout, Value};

#[derive(Debug, Clone)]
struct Entry {
    protocol: String,
    payload_name: String,
    /// Leading `omit` constants of the layout; empty when the layout has no
    /// fixed prefix.
    prefix: Vec<u8>,
    layout: Layout,
}

/// Payload literals take the form `"<Protocol>:<PayloadName>"`.
pub fn payload_literal(protocol: &str, payload_name: &str) -> String {
    format!("{protocol}:{payload_name}")
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: BTreeMap<String, Entry>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register a protocol's payload layouts. Registration order across
    /// protocols is irrelevant; re-registering an existing
    /// `(protocol, payloadName)` pair is an error.
    pub fn register(
        &mut self,
        protocol: &str,
        payloads: Vec<(&str, Layout)>,
    ) -> Result<(), RegistryError> {
        for (payload_name, layout) in payloads {
            let literal = payload_literal(protocol, payload_name);
            if self.entries.contains_key(&literal) {
                return Err(RegistryError::DuplicatePayloadType { literal });
            }

            let prefix = layout.fixed_prefix();
            tracing::debug!(literal = %literal, prefix_len = prefix.len(), "registered payload type");
            let previous = self.entries.insert(
                literal,
                Entry {
                    protocol: protocol.to_string(),
                    payload_name: payload_name.to_string(),
                    prefix,
                    layout,
                },
            );
            debug_assert!(previous.is_none());
        }
        Ok(())
    }

    pub fn layout(&self, literal: &str) -> Result<&Layout, RegistryError> {
        self.entries
            .get(literal)
            .map(|entry| &entry.layout)
            .ok_or_else(|| RegistryError::UnknownPayloadType {
                literal: literal.to_string(),
            })
    }

    /// Strict decode: the caller names the exact payload type.
    pub fn deserialize_payload(&self, literal: &str, bytes: &[u8]) -> Result<Value, RegistryError> {
        Ok(self.layout(literal)?.decode(bytes, true)?)
    }

    pub fn serialize_payload(&self, literal: &str, value: &Value) -> Result<Vec<u8>, RegistryError> {
        Ok(self.layout(literal)?.encode(value)?)
    }

    /// Try every registered layout against `bytes` and return all that parse
    /// without residual input. Zero matches means the format is unknown;
    /// more than one means two registered formats are ambiguous for these
    /// bytes. Both are informative results the caller handles; the registry
    /// never picks a "best" match.
    pub fn exhaustive_deserialize(&self, bytes: &[u8]) -> Vec<(String, Value)> {
        self.entries
            .iter()
            .filter_map(|(literal, entry)| {
                entry
                    .layout
                    .decode(bytes, true)
                    .ok()
                    .map(|value| (literal.clone(), value))
            })
            .collect()
    }

    /// Blind decode: narrow candidates to payloads whose fixed prefix
    /// matches the head of `bytes`, then run strict decode on the
    /// survivors. Payload layouts without a fixed prefix are reachable only
    /// via their literal or exhaustive decode.
    pub fn blind_deserialize(&self, bytes: &[u8]) -> Vec<(String, Value)> {
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.prefix.is_empty() && bytes.starts_with(&entry.prefix))
            .filter_map(|(literal, entry)| {
                entry
                    .layout
                    .decode(bytes, true)
                    .ok()
                    .map(|value| (literal.clone(), value))
            })
            .collect()
    }

    /// The protocols with at least one registered payload, with their
    /// payload names, in registration-key order.
    pub fn protocols(&self) -> Vec<(String, Vec<String>)> {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for entry in self.entries.values() {
            grouped
                .entry(entry.protocol.clone())
                .or_default()
                .push(entry.payload_name.clone());
        }
        grouped.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutItem;

    fn tagged_layout(tag: u8) -> Layout {
        Layout::new(vec![
            LayoutItem::uint("payloadId", 1).omit(Value::Uint(tag as u128)),
            LayoutItem::uint("amount", 8),
        ])
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut registry = Registry::new();
        registry
            .register("Demo", vec![("Ping", tagged_layout(1))])
            .unwrap();

        let result = registry.register("Demo", vec![("Ping", tagged_layout(2))]);
        assert!(matches!(
            result,
            Err(RegistryError::DuplicatePayloadType { .. })
        ));
    }

    #[test]
    fn strict_decode_requires_known_literal() {
        let registry = Registry::new();
        let result = registry.deserialize_payload("Demo:Ping", &[1, 0, 0, 0, 0, 0, 0, 0, 5]);
        assert!(matches!(
            result,
            Err(RegistryError::UnknownPayloadType { .. })
        ));
    }

    #[test]
    fn exhaustive_finds_single_match() {
        let mut registry = Registry::new();
        registry
            .register(
                "Demo",
                vec![("Ping", tagged_layout(1)), ("Pong", tagged_layout(2))],
            )
            .unwrap();

        let bytes = [2, 0, 0, 0, 0, 0, 0, 0, 5];
        let matches = registry.exhaustive_deserialize(&bytes);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].0, "Demo:Pong");
        assert_eq!(matches[0].1.field("amount").unwrap().as_uint(), Some(5));
    }

    #[test]
    fn exhaustive_reports_ambiguity() {
        let mut registry = Registry::new();
        // Two byte-identical formats under different names.
        registry
            .register("Demo", vec![("Ping", tagged_layout(1))])
            .unwrap();
        registry
            .register("Other", vec![("Echo", tagged_layout(1))])
            .unwrap();

        let matches = registry.exhaustive_deserialize(&[1, 0, 0, 0, 0, 0, 0, 0, 5]);
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn blind_skips_unprefixed_layouts() {
        let mut registry = Registry::new();
        registry
            .register("Demo", vec![("Ping", tagged_layout(1))])
            .unwrap();
        // No fixed prefix: an eight-byte counter with no omit constants.
        registry
            .register(
                "Bare",
                vec![("Counter", Layout::single(LayoutItem::uint("n", 8)))],
            )
            .unwrap();

        // Nine bytes parse as Demo:Ping only via blind decode...
        let blind = registry.blind_deserialize(&[1, 0, 0, 0, 0, 0, 0, 0, 5]);
        assert_eq!(blind.len(), 1);
        assert_eq!(blind[0].0, "Demo:Ping");

        // ...while eight bytes that only Bare:Counter accepts are invisible
        // to blind decode but found exhaustively.
        let bytes = [0, 0, 0, 0, 0, 0, 0, 9];
        assert!(registry.blind_deserialize(&bytes).is_empty());
        let exhaustive = registry.exhaustive_deserialize(&bytes);
        assert_eq!(exhaustive.len(), 1);
        assert_eq!(exhaustive[0].0, "Bare:Counter");
    }

    #[test]
    fn zero_matches_is_informative_not_an_error() {
        let mut registry = Registry::new();
        registry
            .register("Demo", vec![("Ping", tagged_layout(1))])
            .unwrap();

        assert!(registry.exhaustive_deserialize(&[9, 9]).is_empty());
        assert!(registry.blind_deserialize(&[9, 9]).is_empty());
    }
}
