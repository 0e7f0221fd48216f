use std::io::Cursor;

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use super::{ArrayCount, BytesKind, Endian, ItemKind, Layout, LayoutItem, Value};
use crate::error::LayoutError;

/// Decode `bytes` against `layout`. With `consume_all`, any bytes left after
/// the top-level layout is parsed are an error; speculative (blind/exhaustive)
/// parsing relies on this to reject over-matched candidates.
pub fn decode(layout: &Layout, bytes: &[u8], consume_all: bool) -> Result<Value, LayoutError> {
    let mut cursor = Cursor::new(bytes);
    let value = decode_items(&layout.items, &mut cursor)?;

    let remaining = remaining(&cursor);
    if consume_all && remaining > 0 {
        return Err(LayoutError::TrailingBytes { count: remaining });
    }

    Ok(value)
}

fn decode_items(items: &[LayoutItem], cursor: &mut Cursor<&[u8]>) -> Result<Value, LayoutError> {
    let mut fields = Vec::with_capacity(items.len());

    for item in items {
        let wire = decode_kind(&item.kind, item.name, cursor)?;

        // Omitted constants are asserted on the raw wire value and never
        // surface in the decoded struct.
        if let Some(constant) = &item.omit {
            if &wire != constant {
                return Err(LayoutError::ConstantMismatch { field: item.name });
            }
            continue;
        }

        let logical = match &item.conversion {
            Some(conversion) => {
                conversion
                    .to_logical(wire)
                    .map_err(|e| LayoutError::Conversion {
                        field: item.name,
                        reason: e.0,
                    })?
            }
            None => wire,
        };

        fields.push((item.name.to_string(), logical));
    }

    Ok(Value::Struct(fields))
}

fn decode_kind(
    kind: &ItemKind,
    field: &'static str,
    cursor: &mut Cursor<&[u8]>,
) -> Result<Value, LayoutError> {
    match kind {
        ItemKind::Uint { size, endian } => {
            Ok(Value::Uint(read_uint(cursor, *size, *endian, field)?))
        }

        ItemKind::Bytes(BytesKind::Fixed(size)) => {
            Ok(Value::Bytes(take(cursor, *size, field)?.to_vec()))
        }

        ItemKind::Bytes(BytesKind::Prefixed(width)) => {
            let len = read_uint(cursor, *width, Endian::Big, field)? as usize;
            Ok(Value::Bytes(take(cursor, len, field)?.to_vec()))
        }

        ItemKind::Bytes(BytesKind::Rest) => {
            let len = remaining(cursor);
            Ok(Value::Bytes(take(cursor, len, field)?.to_vec()))
        }

        ItemKind::Nested(layout) => decode_items(&layout.items, cursor),

        ItemKind::Array { element, count } => {
            let mut items = Vec::new();
            match count {
                ArrayCount::Prefixed(width) => {
                    let n = read_uint(cursor, *width, Endian::Big, field)? as usize;
                    for _ in 0..n {
                        items.push(decode_items(&element.items, cursor)?);
                    }
                }
                ArrayCount::ToEnd => {
                    while remaining(cursor) > 0 {
                        items.push(decode_items(&element.items, cursor)?);
                    }
                }
            }
            Ok(Value::Array(items))
        }

        ItemKind::Switch { id_size, variants } => {
            let id = read_uint(cursor, *id_size, Endian::Big, field)?;
            let variant = variants
                .iter()
                .find(|v| v.id == id)
                .ok_or(LayoutError::UnknownDiscriminator { field, id })?;
            let inner = decode_items(&variant.layout.items, cursor)?;
            Ok(Value::Tagged(variant.tag.to_string(), Box::new(inner)))
        }
    }
}

fn read_uint(
    cursor: &mut Cursor<&[u8]>,
    size: u8,
    endian: Endian,
    field: &'static str,
) -> Result<u128, LayoutError> {
    let available = remaining(cursor);
    let result = match endian {
        Endian::Big => cursor.read_uint128::<BigEndian>(size as usize),
        Endian::Little => cursor.read_uint128::<LittleEndian>(size as usize),
    };
    result.map_err(|_| LayoutError::UnexpectedEnd {
        field,
        needed: size as usize,
        remaining: available,
    })
}

fn take<'a>(
    cursor: &mut Cursor<&'a [u8]>,
    len: usize,
    field: &'static str,
) -> Result<&'a [u8], LayoutError> {
    let position = cursor.position() as usize;
    let buffer: &'a [u8] = cursor.get_ref();
    if buffer.len() - position < len {
        return Err(LayoutError::UnexpectedEnd {
            field,
            needed: len,
            remaining: buffer.len() - position,
        });
    }
    cursor.set_position((position + len) as u64);
    Ok(&buffer[position..position + len])
}

fn remaining(cursor: &Cursor<&[u8]>) -> usize {
    cursor.get_ref().len() - cursor.position() as usize
}
