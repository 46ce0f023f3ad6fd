//! # blockmap-reader
//!
//! A reader for the pooled landblock property encoding used by a game
//! client's asset archives.
//!
//! Each world region ships a descriptor resource holding every property
//! value its map blocks may carry; individual block records then reference
//! those pooled values by compact `(key, index)` pairs instead of
//! repeating them. This crate rebuilds the per-region pools and decodes
//! block records against them into named, typed property sets.
pub mod blockmap;

// Re-export the main types for convenience
pub use blockmap::{
    block_map_id, region_from_id, BlockMapError, BlockMapReader, DecodedBlock, Diagnostic,
    PropertySet, Result, Value, BLOCK_MAP_BASE,
    descriptor::ValuePool,
    models::{PoolEntry, PropertyDefinition, PropertyKind},
    pools::{PoolBuildFailure, PoolRegistry, DESCRIPTOR_IDS},
    registry::PropertyRegistry,
    source::{DataSource, FsDataSource},
};
