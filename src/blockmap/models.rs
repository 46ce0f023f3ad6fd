//! Data structures shared across the block map format

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use super::error::{BlockMapError, Result};

/// A decoded property value.
///
/// Values are scalars, ordered sequences, or nested named-value structures.
/// 32-bit wire integers are widened into `i64` so that unsigned data ids
/// survive untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f32),
    Bool(bool),
    String(String),
    Array(Vec<Value>),
    Struct(Vec<(String, Value)>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{:?}", v),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Struct(fields) => {
                write!(f, "{{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}={}", name, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// The wire type of a property, as declared by the property registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    Int,
    Float,
    Bool,
    String,
    /// Ordered sequence; all elements share one kind.
    Array(Box<PropertyKind>),
    /// Named fields, self-describing on the wire (each field carries its
    /// own property id, resolved through the registry).
    Struct,
}

impl FromStr for PropertyKind {
    type Err = BlockMapError;

    /// Parse a registry-file kind: `int`, `float`, `bool`, `string`,
    /// `struct`, or `array:<kind>` (nestable).
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "bool" => Ok(Self::Bool),
            "string" => Ok(Self::String),
            "struct" => Ok(Self::Struct),
            _ => match s.strip_prefix("array:") {
                Some(elem) => Ok(Self::Array(Box::new(elem.parse()?))),
                None => Err(BlockMapError::InvalidFormat(format!(
                    "Unknown property kind: {:?}",
                    s
                ))),
            },
        }
    }
}

/// One entry of the property-definition registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDefinition {
    pub id: u32,
    pub name: String,
    pub kind: PropertyKind,
}

/// One pooled property value.
///
/// The flag byte is carried verbatim from the descriptor entry the value
/// was decoded under; observed values are 0 and 1, semantics unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolEntry {
    pub property_id: u32,
    pub name: String,
    pub flag: u8,
    pub value: Value,
}

/// The named, typed properties decoded from one block-map record.
///
/// Owned by the caller; writes to an already-present name overwrite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    values: HashMap<String, Value>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// A non-fatal condition recorded while decoding.
///
/// Diagnostics accompany a best-effort result; they never abort a decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A record referenced a pool slot that does not exist; the single
    /// reference was skipped.
    UnresolvedReference { key: u32, index: u16 },
    /// Bytes remained after the declared structure was fully parsed.
    TrailingBytes { count: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvedReference { key, index } => {
                write!(f, "unresolved pool reference: key={:#010x}, index={}", key, index)
            }
            Diagnostic::TrailingBytes { count } => {
                write!(f, "{} trailing bytes after expected structure", count)
            }
        }
    }
}

/// The outcome of decoding one block-map record.
#[derive(Debug, Clone)]
pub struct DecodedBlock {
    /// The record identifier the block was requested (and verified) under.
    pub id: u64,
    pub properties: PropertySet,
    pub diagnostics: Vec<Diagnostic>,
}
