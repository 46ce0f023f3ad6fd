//! Per-region pool registry
//!
//! Owns one value pool per supported region, built eagerly from the
//! region's descriptor resource. A region whose build fails is left
//! without a pool rather than failing the whole registry; the failure is
//! kept and surfaced so the embedding tool can report it.

use log::{info, warn};
use super::descriptor::ValuePool;
use super::error::{BlockMapError, Result};
use super::registry::PropertyRegistry;
use super::source::DataSource;

/// Descriptor resource ids of the four shipped regions, in region order.
pub const DESCRIPTOR_IDS: [u32; 4] = [0x1800_0000, 0x1800_0014, 0x1800_0015, 0x1800_001A];

/// A pool build that failed; the region's slot stays empty.
#[derive(Debug)]
pub struct PoolBuildFailure {
    pub region: u32,
    pub resource_id: u32,
    pub error: BlockMapError,
}

/// One value pool per region, immutable once built.
///
/// Regions are 1-indexed: descriptor id at position `i` serves region
/// `i + 1`. Construction never fails as a whole; safe for unbounded
/// concurrent reads afterwards.
#[derive(Debug)]
pub struct PoolRegistry {
    pools: Vec<Option<ValuePool>>,
    failures: Vec<PoolBuildFailure>,
}

impl PoolRegistry {
    /// Eagerly build one pool per descriptor id.
    pub fn build<S: DataSource>(
        source: &S,
        registry: &PropertyRegistry,
        descriptor_ids: &[u32],
    ) -> PoolRegistry {
        let mut pools = Vec::with_capacity(descriptor_ids.len());
        let mut failures = Vec::new();

        for (slot, &resource_id) in descriptor_ids.iter().enumerate() {
            let region = slot as u32 + 1;
            match build_pool(source, registry, resource_id) {
                Ok(pool) => {
                    info!(
                        "Region {}: pool built from {:#010x} ({} keys, {} values)",
                        region,
                        resource_id,
                        pool.num_keys(),
                        pool.num_entries()
                    );
                    pools.push(Some(pool));
                }
                Err(error) => {
                    warn!(
                        "Region {}: pool build from {:#010x} failed: {}",
                        region, resource_id, error
                    );
                    pools.push(None);
                    failures.push(PoolBuildFailure {
                        region,
                        resource_id,
                        error,
                    });
                }
            }
        }

        PoolRegistry { pools, failures }
    }

    /// The pool for a region, or `None` for regions outside `[1, N]` and
    /// regions whose build failed.
    pub fn pool_for_region(&self, region: u32) -> Option<&ValuePool> {
        if region >= 1 && region as usize <= self.pools.len() {
            self.pools[region as usize - 1].as_ref()
        } else {
            None
        }
    }

    /// Number of configured region slots (including failed ones).
    pub fn num_regions(&self) -> usize {
        self.pools.len()
    }

    /// Builds that failed during construction.
    pub fn failures(&self) -> &[PoolBuildFailure] {
        &self.failures
    }
}

fn build_pool<S: DataSource>(
    source: &S,
    registry: &PropertyRegistry,
    resource_id: u32,
) -> Result<ValuePool> {
    let data = source
        .load_resource(resource_id)
        .ok_or(BlockMapError::MissingResource { resource_id })?;
    ValuePool::decode(resource_id, &data, registry)
}
