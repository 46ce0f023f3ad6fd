//! Block-map record decoding
//!
//! A block-map record describes one world grid cell. It embeds no values of
//! its own: after its identifier, it is a list of `(key, index)` references
//! into the region's value pool.
//!
//! Record layout:
//! - 4 bytes: record id (must echo the requested id)
//! - tsize:   reference count
//! - per reference: 4-byte block map key + 2-byte index into the key's list

use log::warn;
use super::descriptor::ValuePool;
use super::error::{BlockMapError, Result};
use super::models::{DecodedBlock, Diagnostic, PropertySet};
use super::utils;

/// Namespace base of block-map record identifiers.
pub const BLOCK_MAP_BASE: u64 = 0x8010_0000;

const REGION_MASK: u64 = 0xF_0000;
const REGION_SHIFT: u64 = 16;

/// Compose the record identifier for a block.
///
/// Layout: `BASE + region*0x10000 + blockX*0x100 + blockY`. The region
/// occupies the nibble that [`region_from_id`] recovers; the two must stay
/// bit-identical, so regions above 15 or coordinates above 255 would
/// corrupt neighbouring fields.
pub fn block_map_id(region: u32, block_x: u32, block_y: u32) -> u64 {
    debug_assert!(region <= 0xF, "region {} overflows its id field", region);
    debug_assert!(block_x <= 0xFF && block_y <= 0xFF);
    BLOCK_MAP_BASE + (region as u64) * 0x10000 + (block_x as u64) * 0x100 + block_y as u64
}

/// Recover the region a record identifier routes to.
pub fn region_from_id(id: u64) -> u32 {
    ((id & REGION_MASK) >> REGION_SHIFT) as u32
}

/// Decode one block-map record against its region's pool.
///
/// Fatal conditions (identity mismatch, truncation) short-circuit with no
/// partial property set. An out-of-bounds reference skips that single
/// property; trailing bytes are recorded; both yield diagnostics on the
/// best-effort result. Pools are only ever read.
pub fn decode_block_map(id: u64, data: &[u8], pool: &ValuePool) -> Result<DecodedBlock> {
    let mut reader = data;

    let actual = utils::read_u32(&mut reader)? as u64;
    if actual != id {
        return Err(BlockMapError::BlockIdMismatch {
            expected: id,
            actual,
        });
    }

    let mut properties = PropertySet::new();
    let mut diagnostics = Vec::new();

    let reference_count = utils::read_tsize(&mut reader)?;
    for _ in 0..reference_count {
        let key = utils::read_u32(&mut reader)?;
        let index = utils::read_u16(&mut reader)?;
        match pool.entry(key, index) {
            Some(entry) => properties.set(entry.name.clone(), entry.value.clone()),
            None => {
                warn!(
                    "Block {:#010x}: unresolved pool reference key={:#010x} index={}",
                    id, key, index
                );
                diagnostics.push(Diagnostic::UnresolvedReference { key, index });
            }
        }
    }

    if !reader.is_empty() {
        warn!("Block {:#010x}: {} trailing bytes", id, reader.len());
        diagnostics.push(Diagnostic::TrailingBytes {
            count: reader.len(),
        });
    }

    Ok(DecodedBlock {
        id,
        properties,
        diagnostics,
    })
}
