//! Property-definition registry (property id → name and wire type)

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use log::info;
use super::error::{BlockMapError, Result};
use super::models::{PropertyDefinition, PropertyKind};

/// Maps numeric property ids to their definitions.
///
/// The game client ships these definitions in its own metadata resources;
/// this crate consumes them through whatever the embedding tool exports.
/// The registry is built once and read-only afterwards.
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    defs: HashMap<u32, PropertyDefinition>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition, replacing any previous one with the same id.
    pub fn register(&mut self, def: PropertyDefinition) {
        self.defs.insert(def.id, def);
    }

    pub fn get(&self, property_id: u32) -> Option<&PropertyDefinition> {
        self.defs.get(&property_id)
    }

    /// Like [`get`](Self::get), but an absent definition is an error.
    pub fn require(&self, property_id: u32) -> Result<&PropertyDefinition> {
        self.get(property_id)
            .ok_or(BlockMapError::UnknownProperty { property_id })
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Parse a registry dump.
    ///
    /// Line format: `<id> <name> <kind>` with ids in decimal or `0x` hex and
    /// kinds as accepted by [`PropertyKind`]'s `FromStr`. Blank lines and
    /// `#` comments are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let mut registry = Self::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (id_text, name, kind_text) = match (fields.next(), fields.next(), fields.next()) {
                (Some(id), Some(name), Some(kind)) => (id, name, kind),
                _ => {
                    return Err(BlockMapError::InvalidFormat(format!(
                        "Registry line {}: expected `<id> <name> <kind>`, got {:?}",
                        line_no + 1,
                        line
                    )))
                }
            };
            let id = parse_property_id(id_text).ok_or_else(|| {
                BlockMapError::InvalidFormat(format!(
                    "Registry line {}: bad property id {:?}",
                    line_no + 1,
                    id_text
                ))
            })?;
            let kind: PropertyKind = kind_text.parse()?;
            registry.register(PropertyDefinition {
                id,
                name: name.to_string(),
                kind,
            });
        }
        info!("Property registry loaded: {} definitions", registry.len());
        Ok(registry)
    }

    /// Load and parse a registry dump from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::parse(&text)
    }
}

fn parse_property_id(text: &str) -> Option<u32> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}
