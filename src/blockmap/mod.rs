//! Core block map decoding module

pub mod descriptor;
pub mod error;
pub mod models;
pub mod pools;
pub mod registry;
pub mod source;
mod block;
mod utils;
mod values;

use log::info;
use descriptor::ValuePool;
use pools::{PoolRegistry, DESCRIPTOR_IDS};
use registry::PropertyRegistry;
use source::DataSource;
pub use block::{block_map_id, region_from_id, BLOCK_MAP_BASE};
pub use error::{BlockMapError, Result};
pub use models::{DecodedBlock, Diagnostic, PropertySet, Value};

/// The main reader for pooled block-map property data.
///
/// Construction eagerly builds the per-region value pools from their
/// descriptor resources; a failed region is skipped (see
/// [`PoolRegistry::failures`]) and every other region stays decodable.
/// After construction the reader is read-only, so any number of block
/// decodes may run in parallel against it.
#[derive(Debug)]
pub struct BlockMapReader<S> {
    source: S,
    pools: PoolRegistry,
}

impl<S: DataSource> BlockMapReader<S> {
    /// Build a reader over the four shipped regions.
    pub fn new(source: S, registry: &PropertyRegistry) -> Self {
        Self::with_descriptors(source, registry, &DESCRIPTOR_IDS)
    }

    /// Build a reader over an explicit list of descriptor resources, one
    /// per region in region order (first id serves region 1).
    pub fn with_descriptors(source: S, registry: &PropertyRegistry, descriptor_ids: &[u32]) -> Self {
        info!("Building value pools for {} regions", descriptor_ids.len());
        let pools = PoolRegistry::build(&source, registry, descriptor_ids);
        Self { source, pools }
    }

    /// The per-region pools built at construction time.
    pub fn pools(&self) -> &PoolRegistry {
        &self.pools
    }

    /// The pool serving one region, if it was built.
    pub fn pool_for_region(&self, region: u32) -> Option<&ValuePool> {
        self.pools.pool_for_region(region)
    }

    /// Decode the properties of one map block.
    ///
    /// Returns `Ok(None)` when the archive has no record for the block —
    /// most grid coordinates have none, so absence is expected and is not
    /// an error.
    pub fn decode_block(&self, region: u32, block_x: u32, block_y: u32) -> Result<Option<DecodedBlock>> {
        self.decode_block_id(block_map_id(region, block_x, block_y))
    }

    /// Decode a block from a raw record identifier.
    ///
    /// The region is recovered from the identifier's routing bits, so the
    /// same id selects both the archive and the pool.
    pub fn decode_block_id(&self, id: u64) -> Result<Option<DecodedBlock>> {
        let region = region_from_id(id);
        let data = match self.source.load_map_entry(region, id) {
            Some(data) => data,
            None => return Ok(None),
        };
        let pool = self
            .pools
            .pool_for_region(region)
            .ok_or(BlockMapError::RegionOutOfRange { region })?;
        block::decode_block_map(id, &data, pool).map(Some)
    }
}
