//! Low-level byte reading utilities

use std::io::Read;
use byteorder::{LittleEndian, ReadBytesExt};
use super::error::Result;

/// Read a single byte.
pub fn read_u8(reader: &mut impl Read) -> Result<u8> {
    Ok(reader.read_u8()?)
}

/// Read a 2-byte little-endian number.
pub fn read_u16(reader: &mut impl Read) -> Result<u16> {
    Ok(reader.read_u16::<LittleEndian>()?)
}

/// Read a 4-byte little-endian number.
///
/// Used throughout the format for ids, keys and counts.
pub fn read_u32(reader: &mut impl Read) -> Result<u32> {
    Ok(reader.read_u32::<LittleEndian>()?)
}

/// Read a 4-byte little-endian float.
pub fn read_f32(reader: &mut impl Read) -> Result<f32> {
    Ok(reader.read_f32::<LittleEndian>()?)
}

/// Read a variable-length count ("tsize").
///
/// One byte for counts below 0x80. If the high bit is set, the low 7 bits
/// are the high-order part and a second byte carries the low-order part:
/// `((b0 & 0x7F) << 8) | b1`. Caps at 0x7FFF.
pub fn read_tsize(reader: &mut impl Read) -> Result<usize> {
    let first = reader.read_u8()?;
    if first & 0x80 == 0 {
        return Ok(first as usize);
    }
    let second = reader.read_u8()?;
    Ok((((first & 0x7F) as usize) << 8) | second as usize)
}
