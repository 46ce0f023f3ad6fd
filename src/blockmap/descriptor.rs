//! Descriptor-resource decoding (per-region value pools)
//!
//! Each region ships one descriptor resource holding every property value
//! its block-map records may reference. Records then carry compact
//! `(key, index)` pairs instead of repeating full values, so the pool built
//! here is load-bearing for every downstream consumer.
//!
//! Descriptor layout:
//! - 4 bytes: resource id (must echo the requested id)
//! - 4 bytes: reserved, must be 0
//! - tsize:   entry count
//! - per entry:
//!   - 4 bytes: property id
//!   - 4 bytes: property id again (desynchronization check)
//!   - 4 bytes: block map key
//!   - 1 byte:  reserved flag (kept verbatim; observed 0 or 1)
//!   - 4 bytes: sub-entry count
//!   - sub-entries: one typed value each, appended to the pool under the key

use std::collections::HashMap;
use log::{debug, warn};
use super::error::{BlockMapError, Result};
use super::models::{Diagnostic, PoolEntry};
use super::registry::PropertyRegistry;
use super::{utils, values};

/// An append-only pool of decoded property values for one region.
///
/// Entries are grouped by block map key; within a key, insertion order is
/// the only addressing mechanism (a record reference is the position into
/// the key's list). Built once from a descriptor resource, read-only and
/// freely shared afterwards.
#[derive(Debug, Default)]
pub struct ValuePool {
    entries: HashMap<u32, Vec<PoolEntry>>,
    diagnostics: Vec<Diagnostic>,
}

impl ValuePool {
    /// Decode a descriptor resource into a pool.
    ///
    /// Fatal conditions (wrong resource id, non-zero reserved field, echo
    /// mismatch, unknown property) abort this pool only and expose no
    /// partial pool. Trailing bytes after the declared entries are common
    /// garbage: they are recorded as a diagnostic and the pool is still
    /// returned.
    pub fn decode(resource_id: u32, data: &[u8], registry: &PropertyRegistry) -> Result<ValuePool> {
        let mut reader = data;

        let actual = utils::read_u32(&mut reader)?;
        if actual != resource_id {
            return Err(BlockMapError::ResourceIdMismatch {
                expected: resource_id,
                actual,
            });
        }
        let reserved = utils::read_u32(&mut reader)?;
        if reserved != 0 {
            return Err(BlockMapError::UnsupportedLayout { found: reserved });
        }

        let entry_count = utils::read_tsize(&mut reader)?;
        debug!(
            "Descriptor {:#010x}: {} entries to decode",
            resource_id, entry_count
        );

        let mut pool = ValuePool::default();
        for _ in 0..entry_count {
            pool.decode_entry(&mut reader, registry)?;
        }

        if !reader.is_empty() {
            warn!(
                "Descriptor {:#010x}: {} trailing bytes",
                resource_id,
                reader.len()
            );
            pool.diagnostics.push(Diagnostic::TrailingBytes {
                count: reader.len(),
            });
        }

        Ok(pool)
    }

    /// Decode one descriptor entry and append its values.
    fn decode_entry(&mut self, reader: &mut &[u8], registry: &PropertyRegistry) -> Result<()> {
        let property_id = utils::read_u32(reader)?;
        let echo = utils::read_u32(reader)?;
        if echo != property_id {
            return Err(BlockMapError::PropertyIdEchoMismatch { property_id, echo });
        }
        let def = registry.require(property_id)?;

        let block_map_key = utils::read_u32(reader)?;
        let flag = utils::read_u8(reader)?;
        let sub_count = utils::read_u32(reader)?;

        let slot = self.entries.entry(block_map_key).or_default();
        for _ in 0..sub_count {
            let value = values::decode_value(reader, &def.kind, registry)?;
            slot.push(PoolEntry {
                property_id,
                name: def.name.clone(),
                flag,
                value,
            });
        }
        Ok(())
    }

    /// Look up one pooled value by `(key, index)`.
    pub fn entry(&self, key: u32, index: u16) -> Option<&PoolEntry> {
        self.entries.get(&key)?.get(index as usize)
    }

    /// All values pooled under a key, in descriptor scan order.
    pub fn entries_for_key(&self, key: u32) -> &[PoolEntry] {
        self.entries.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct block map keys.
    pub fn num_keys(&self) -> usize {
        self.entries.len()
    }

    /// Total number of pooled values across all keys.
    pub fn num_entries(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Non-fatal conditions recorded while this pool was built.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
