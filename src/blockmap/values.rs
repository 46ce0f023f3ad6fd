//! Typed property-value decoding
//!
//! Decodes one concrete value from a byte cursor, driven by the wire type
//! the property registry declares for the property being read. Scalars are
//! little-endian; strings are length-prefixed UTF-16LE; arrays carry a
//! variable-length element count; struct fields are self-describing (each
//! field names its own property id, resolved through the registry).

use encoding_rs::UTF_16LE;
use super::error::{BlockMapError, Result};
use super::models::{PropertyKind, Value};
use super::registry::PropertyRegistry;
use super::utils;

/// Decode one value of the given kind and advance the cursor.
pub fn decode_value(
    reader: &mut &[u8],
    kind: &PropertyKind,
    registry: &PropertyRegistry,
) -> Result<Value> {
    match kind {
        PropertyKind::Int => {
            let raw = utils::read_u32(reader)?;
            Ok(Value::Int(raw as i64))
        }
        PropertyKind::Float => Ok(Value::Float(utils::read_f32(reader)?)),
        PropertyKind::Bool => match utils::read_u8(reader)? {
            0 => Ok(Value::Bool(false)),
            1 => Ok(Value::Bool(true)),
            other => Err(BlockMapError::InvalidFormat(format!(
                "Invalid boolean byte: {:#04x}",
                other
            ))),
        },
        PropertyKind::String => decode_string(reader),
        PropertyKind::Array(elem) => {
            let count = utils::read_tsize(reader)?;
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(decode_value(reader, elem, registry)?);
            }
            Ok(Value::Array(items))
        }
        PropertyKind::Struct => decode_struct(reader, registry),
    }
}

/// Strings are a tsize unit count followed by that many UTF-16LE code units.
fn decode_string(reader: &mut &[u8]) -> Result<Value> {
    let units = utils::read_tsize(reader)?;
    let byte_len = units * 2;
    if reader.len() < byte_len {
        return Err(BlockMapError::InvalidFormat(format!(
            "Incomplete string: {} code units declared, {} bytes available",
            units,
            reader.len()
        )));
    }
    let text_bytes = &reader[..byte_len];
    let (decoded, had_errors) = UTF_16LE.decode_without_bom_handling(text_bytes);
    if had_errors {
        return Err(BlockMapError::InvalidFormat(
            "Malformed UTF-16 string data".to_string(),
        ));
    }
    *reader = &reader[byte_len..];
    Ok(Value::String(decoded.into_owned()))
}

/// Struct fields: tsize field count, then per field a property id followed
/// by that property's value. An id absent from the registry is fatal, as it
/// leaves the remaining field boundaries unknowable.
fn decode_struct(reader: &mut &[u8], registry: &PropertyRegistry) -> Result<Value> {
    let field_count = utils::read_tsize(reader)?;
    let mut fields = Vec::with_capacity(field_count);
    for _ in 0..field_count {
        let field_id = utils::read_u32(reader)?;
        let def = registry.require(field_id)?;
        let value = decode_value(reader, &def.kind, registry)?;
        fields.push((def.name.clone(), value));
    }
    Ok(Value::Struct(fields))
}
