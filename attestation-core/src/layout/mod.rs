//! Data-driven binary layout engine.
//!
//! A `Layout` is an ordered list of named items; each item describes a
//! fixed-width integer, a byte string, a nested layout, an array, or a
//! discriminated union. Items may carry a custom wire/logical conversion
//! and may be marked `omit`, in which case a constant is written on encode
//! and asserted on decode without surfacing in the decoded value.

mod decode;
mod encode;
mod value;

pub use decode::decode;
pub use encode::{encode, fixed_prefix};
pub use value::Value;

use std::fmt;
use std::sync::Arc;

use crate::error::LayoutError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BytesKind {
    /// Exactly `n` bytes.
    Fixed(usize),
    /// A big-endian length prefix of the given width, then that many bytes.
    Prefixed(u8),
    /// All bytes remaining in the enclosing stream.
    Rest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayCount {
    /// A big-endian element-count prefix of the given width.
    Prefixed(u8),
    /// Elements repeat until the enclosing stream is exhausted.
    ToEnd,
}

#[derive(Clone)]
pub struct SwitchVariant {
    pub id: u128,
    pub tag: &'static str,
    pub layout: Layout,
}

#[derive(Clone)]
pub enum ItemKind {
    Uint { size: u8, endian: Endian },
    Bytes(BytesKind),
    Nested(Layout),
    Array { element: Layout, count: ArrayCount },
    Switch { id_size: u8, variants: Vec<SwitchVariant> },
}

/// Bidirectional custom conversion between the raw wire value and a richer
/// logical value. Both directions are total over their accepted domain; a
/// value outside it is a decode/encode error, never a silent coercion.
pub trait Conversion: Send + Sync {
    fn to_logical(&self, wire: Value) -> Result<Value, ConversionError>;
    fn to_wire(&self, logical: &Value) -> Result<Value, ConversionError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError(pub String);

impl ConversionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

#[derive(Clone)]
pub struct LayoutItem {
    pub name: &'static str,
    pub kind: ItemKind,
    pub conversion: Option<Arc<dyn Conversion>>,
    pub omit: Option<Value>,
}

impl LayoutItem {
    fn new(name: &'static str, kind: ItemKind) -> Self {
        Self {
            name,
            kind,
            conversion: None,
            omit: None,
        }
    }

    /// Big-endian unsigned integer of `size` bytes (1..=16).
    pub fn uint(name: &'static str, size: u8) -> Self {
        debug_assert!(size >= 1 && size <= 16);
        Self::new(
            name,
            ItemKind::Uint {
                size,
                endian: Endian::Big,
            },
        )
    }

    /// Little-endian unsigned integer of `size` bytes (1..=16).
    pub fn uint_le(name: &'static str, size: u8) -> Self {
        debug_assert!(size >= 1 && size <= 16);
        Self::new(
            name,
            ItemKind::Uint {
                size,
                endian: Endian::Little,
            },
        )
    }

    pub fn bytes(name: &'static str, size: usize) -> Self {
        Self::new(name, ItemKind::Bytes(BytesKind::Fixed(size)))
    }

    pub fn length_prefixed_bytes(name: &'static str, width: u8) -> Self {
        debug_assert!(width >= 1 && width <= 8);
        Self::new(name, ItemKind::Bytes(BytesKind::Prefixed(width)))
    }

    pub fn rest(name: &'static str) -> Self {
        Self::new(name, ItemKind::Bytes(BytesKind::Rest))
    }

    pub fn nested(name: &'static str, layout: Layout) -> Self {
        Self::new(name, ItemKind::Nested(layout))
    }

    pub fn array(name: &'static str, element: Layout, width: u8) -> Self {
        debug_assert!(width >= 1 && width <= 8);
        Self::new(
            name,
            ItemKind::Array {
                element,
                count: ArrayCount::Prefixed(width),
            },
        )
    }

    pub fn array_to_end(name: &'static str, element: Layout) -> Self {
        Self::new(
            name,
            ItemKind::Array {
                element,
                count: ArrayCount::ToEnd,
            },
        )
    }

    /// Discriminated union: an id of `id_size` bytes selects one variant.
    /// Ids and tags must be unique within one switch.
    pub fn switch(
        name: &'static str,
        id_size: u8,
        variants: Vec<(u128, &'static str, Layout)>,
    ) -> Self {
        debug_assert!(id_size >= 1 && id_size <= 8);
        debug_assert!(
            variants
                .iter()
                .enumerate()
                .all(|(i, (id, tag, _))| variants[..i]
                    .iter()
                    .all(|(other_id, other_tag, _)| other_id != id && other_tag != tag)),
            "switch ids and tags must be unique"
        );
        Self::new(
            name,
            ItemKind::Switch {
                id_size,
                variants: variants
                    .into_iter()
                    .map(|(id, tag, layout)| SwitchVariant { id, tag, layout })
                    .collect(),
            },
        )
    }

    pub fn with_conversion(mut self, conversion: impl Conversion + 'static) -> Self {
        self.conversion = Some(Arc::new(conversion));
        self
    }

    /// Mark this item as carrying a compile-time constant: written verbatim
    /// on encode, asserted (against the raw wire value) on decode, never
    /// surfaced in the decoded value.
    pub fn omit(mut self, constant: Value) -> Self {
        self.omit = Some(constant);
        self
    }
}

impl fmt::Debug for LayoutItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutItem")
            .field("name", &self.name)
            .field("kind", &kind_name(&self.kind))
            .field("converted", &self.conversion.is_some())
            .field("omit", &self.omit)
            .finish()
    }
}

fn kind_name(kind: &ItemKind) -> &'static str {
    match kind {
        ItemKind::Uint { .. } => "uint",
        ItemKind::Bytes(_) => "bytes",
        ItemKind::Nested(_) => "nested",
        ItemKind::Array { .. } => "array",
        ItemKind::Switch { .. } => "switch",
    }
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub items: Vec<LayoutItem>,
}

impl Layout {
    /// Item names must be unique within one layout level.
    pub fn new(items: Vec<LayoutItem>) -> Self {
        debug_assert!(
            items
                .iter()
                .enumerate()
                .all(|(i, item)| items[..i].iter().all(|other| other.name != item.name)),
            "layout item names must be unique"
        );
        Self { items }
    }

    pub fn single(item: LayoutItem) -> Self {
        Self { items: vec![item] }
    }

    pub fn encode(&self, value: &Value) -> Result<Vec<u8>, LayoutError> {
        encode(self, value)
    }

    pub fn decode(&self, bytes: &[u8], consume_all: bool) -> Result<Value, LayoutError> {
        decode(self, bytes, consume_all)
    }

    /// The wire bytes of the leading run of `omit` constants. Every valid
    /// encoding of this layout starts with exactly these bytes; the registry
    /// uses them as the discriminator prefix for blind decoding.
    pub fn fixed_prefix(&self) -> Vec<u8> {
        fixed_prefix(self)
    }
}
