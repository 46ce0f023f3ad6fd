//! Archive access seam
//!
//! The codec never performs I/O itself: everything it reads arrives as a
//! byte blob through this trait. Absence is `None` — archives routinely
//! have no entry for a given block, and that is not an error.

use std::fs;
use std::path::PathBuf;
use log::debug;

/// Supplies raw resource bytes to the decoder.
///
/// Map entries are routed per region because the client ships one map
/// archive per region; descriptor resources live in the shared archive.
pub trait DataSource {
    /// Load a top-level resource (descriptor resources).
    fn load_resource(&self, resource_id: u32) -> Option<Vec<u8>>;

    /// Load an entry from the map archive serving `region`.
    fn load_map_entry(&self, region: u32, entry_id: u64) -> Option<Vec<u8>>;
}

/// A `DataSource` over a directory of exported resources.
///
/// Expects the layout produced by archive dump tools: top-level resources
/// as `<root>/<ID>.bin` and per-region map entries as
/// `<root>/map_<region>/<ID>.bin`, ids in upper-case hex.
#[derive(Debug, Clone)]
pub struct FsDataSource {
    root: PathBuf,
}

impl FsDataSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read(&self, path: PathBuf) -> Option<Vec<u8>> {
        match fs::read(&path) {
            Ok(data) => Some(data),
            Err(e) => {
                debug!("No data at {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl DataSource for FsDataSource {
    fn load_resource(&self, resource_id: u32) -> Option<Vec<u8>> {
        self.read(self.root.join(format!("{:08X}.bin", resource_id)))
    }

    fn load_map_entry(&self, region: u32, entry_id: u64) -> Option<Vec<u8>> {
        self.read(
            self.root
                .join(format!("map_{}", region))
                .join(format!("{:08X}.bin", entry_id)),
        )
    }
}
