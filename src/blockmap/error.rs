//! Custom error types for the blockmap-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum BlockMapError {
    /// An error originating from I/O operations (including truncated input,
    /// which surfaces as `UnexpectedEof` from the byte cursor).
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// A resource's self-reported identifier does not match the requested one.
    #[error("Resource id mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ResourceIdMismatch { expected: u32, actual: u32 },

    /// The reserved field after the resource id is non-zero. Every known
    /// descriptor carries a zero here; anything else is a layout we cannot read.
    #[error("Unsupported descriptor layout: reserved field is {found:#010x}, expected 0")]
    UnsupportedLayout { found: u32 },

    /// The duplicated property-id check failed, indicating the cursor has
    /// desynchronized from the entry structure.
    #[error("Property id echo mismatch: id {property_id:#010x}, echo {echo:#010x}")]
    PropertyIdEchoMismatch { property_id: u32, echo: u32 },

    /// A property id has no entry in the property-definition registry.
    #[error("Property definition not found: id {property_id:#010x}")]
    UnknownProperty { property_id: u32 },

    /// A block-map record's self-reported identifier does not match the
    /// identifier used to request it.
    #[error("Block map id mismatch: expected {expected:#010x}, got {actual:#010x}")]
    BlockIdMismatch { expected: u64, actual: u64 },

    /// No value pool is configured for the requested region.
    #[error("No value pool for region {region}")]
    RegionOutOfRange { region: u32 },

    /// A descriptor resource is absent from the data source.
    #[error("Descriptor resource not found: {resource_id:#010x}")]
    MissingResource { resource_id: u32 },

    /// The data is structurally invalid (bad boolean byte, malformed string
    /// data, unparseable registry line, ...).
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// A convenience `Result` type alias using the crate's `BlockMapError` type.
pub type Result<T> = std::result::Result<T, BlockMapError>;
