use super::{ArrayCount, BytesKind, Endian, ItemKind, Layout, LayoutItem, Value};
use crate::error::LayoutError;

pub fn encode(layout: &Layout, value: &Value) -> Result<Vec<u8>, LayoutError> {
    let mut out = Vec::new();
    encode_items(&layout.items, value, &mut out)?;
    Ok(out)
}

/// The wire bytes of the leading run of `omit` constants in `layout`.
pub fn fixed_prefix(layout: &Layout) -> Vec<u8> {
    let mut out = Vec::new();
    for item in &layout.items {
        let Some(constant) = &item.omit else { break };
        if encode_kind(&item.kind, item.name, constant, &mut out).is_err() {
            break;
        }
    }
    out
}

fn encode_items(
    items: &[LayoutItem],
    value: &Value,
    out: &mut Vec<u8>,
) -> Result<(), LayoutError> {
    for item in items {
        if let Some(constant) = &item.omit {
            encode_kind(&item.kind, item.name, constant, out)?;
            continue;
        }

        let logical = value.field(item.name).ok_or(LayoutError::MissingField {
            field: item.name,
        })?;

        match &item.conversion {
            Some(conversion) => {
                let wire = conversion
                    .to_wire(logical)
                    .map_err(|e| LayoutError::Conversion {
                        field: item.name,
                        reason: e.0,
                    })?;
                encode_kind(&item.kind, item.name, &wire, out)?;
            }
            None => encode_kind(&item.kind, item.name, logical, out)?,
        }
    }
    Ok(())
}

fn encode_kind(
    kind: &ItemKind,
    field: &'static str,
    value: &Value,
    out: &mut Vec<u8>,
) -> Result<(), LayoutError> {
    match kind {
        ItemKind::Uint { size, endian } => {
            let v = value.as_uint().ok_or(LayoutError::TypeMismatch {
                field,
                expected: "uint",
            })?;
            write_uint(v, *size, *endian, field, out)
        }

        ItemKind::Bytes(BytesKind::Fixed(size)) => {
            let bytes = value.as_bytes().ok_or(LayoutError::TypeMismatch {
                field,
                expected: "bytes",
            })?;
            if bytes.len() != *size {
                return Err(LayoutError::LengthMismatch {
                    field,
                    expected: *size,
                    actual: bytes.len(),
                });
            }
            out.extend_from_slice(bytes);
            Ok(())
        }

        ItemKind::Bytes(BytesKind::Prefixed(width)) => {
            let bytes = value.as_bytes().ok_or(LayoutError::TypeMismatch {
                field,
                expected: "bytes",
            })?;
            write_prefix(bytes.len(), *width, field, out)?;
            out.extend_from_slice(bytes);
            Ok(())
        }

        ItemKind::Bytes(BytesKind::Rest) => {
            let bytes = value.as_bytes().ok_or(LayoutError::TypeMismatch {
                field,
                expected: "bytes",
            })?;
            out.extend_from_slice(bytes);
            Ok(())
        }

        ItemKind::Nested(layout) => encode_items(&layout.items, value, out),

        ItemKind::Array { element, count } => {
            let items = value.as_array().ok_or(LayoutError::TypeMismatch {
                field,
                expected: "array",
            })?;
            if let ArrayCount::Prefixed(width) = count {
                write_prefix(items.len(), *width, field, out)?;
            }
            for item in items {
                encode_items(&element.items, item, out)?;
            }
            Ok(())
        }

        ItemKind::Switch { id_size, variants } => {
            let (tag, inner) = value.as_tagged().ok_or(LayoutError::TypeMismatch {
                field,
                expected: "tagged variant",
            })?;
            let variant = variants
                .iter()
                .find(|v| v.tag == tag)
                .ok_or_else(|| LayoutError::UnknownTag {
                    field,
                    tag: tag.to_string(),
                })?;
            write_uint(variant.id, *id_size, Endian::Big, field, out)?;
            encode_items(&variant.layout.items, inner, out)
        }
    }
}

fn write_uint(
    value: u128,
    size: u8,
    endian: Endian,
    field: &'static str,
    out: &mut Vec<u8>,
) -> Result<(), LayoutError> {
    if size < 16 && value >> (8 * size as u32) != 0 {
        return Err(LayoutError::ValueOutOfRange { field, value, size });
    }
    match endian {
        Endian::Big => out.extend_from_slice(&value.to_be_bytes()[16 - size as usize..]),
        Endian::Little => out.extend_from_slice(&value.to_le_bytes()[..size as usize]),
    }
    Ok(())
}

fn write_prefix(
    len: usize,
    width: u8,
    field: &'static str,
    out: &mut Vec<u8>,
) -> Result<(), LayoutError> {
    if width < 16 && (len as u128) >> (8 * width as u32) != 0 {
        return Err(LayoutError::PrefixOverflow { field, len, width });
    }
    out.extend_from_slice(&(len as u128).to_be_bytes()[16 - width as usize..]);
    Ok(())
}
