//! Configuration schema hierarchy.
//!
//! A [`Schema`] is the set of legal fields for one algorithm variant. It is
//! composed from [`BASE_FIELDS`], shared by every variant, and a per-variant
//! extension. There is no subtyping between schemas: a configuration that is
//! complete for the base schema is not implicitly accepted for a variant.
//!
//! | Field | Scope | Type |
//! |---|---|---|
//! | `pop_num`, `max_gen`, `report` | base | int |
//! | `min_fit`, `max_time`, `slow_down` | base | float |
//! | `parallel` | base | bool |
//! | `strategy` | DE | int |
//! | `F`, `CR` | DE | float |
//! | `cross`, `mutate`, `win`, `delta` | RGA | float |
//! | `alpha`, `beta_min`, `beta0`, `gamma` | FA | float |

mod value;

pub use value::{ParamMap, Value};

use crate::variant::AlgorithmType;
use std::fmt;

/// Semantic type of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Int,
    Float,
    Bool,
}

impl FieldType {
    /// Checks `value` against this type, returning the normalized value.
    ///
    /// An integer supplied for a float field is widened; every other
    /// mismatch is rejected.
    pub fn coerce(self, value: &Value) -> Option<Value> {
        match (self, value) {
            (FieldType::Int, Value::Int(v)) => Some(Value::Int(*v)),
            (FieldType::Float, Value::Float(v)) => Some(Value::Float(*v)),
            (FieldType::Float, Value::Int(v)) => Some(Value::Float(*v as f64)),
            (FieldType::Bool, Value::Bool(v)) => Some(Value::Bool(*v)),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
        })
    }
}

/// A declared configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub ty: FieldType,
    pub required: bool,
}

impl Field {
    const fn optional(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: false,
        }
    }
}

/// Fields shared by every variant.
pub const BASE_FIELDS: &[Field] = &[
    Field::optional("pop_num", FieldType::Int),
    Field::optional("max_gen", FieldType::Int),
    Field::optional("min_fit", FieldType::Float),
    Field::optional("max_time", FieldType::Float),
    Field::optional("slow_down", FieldType::Float),
    Field::optional("report", FieldType::Int),
    Field::optional("parallel", FieldType::Bool),
];

const DE_FIELDS: &[Field] = &[
    Field::optional("strategy", FieldType::Int),
    Field::optional("F", FieldType::Float),
    Field::optional("CR", FieldType::Float),
];

const RGA_FIELDS: &[Field] = &[
    Field::optional("cross", FieldType::Float),
    Field::optional("mutate", FieldType::Float),
    Field::optional("win", FieldType::Float),
    Field::optional("delta", FieldType::Float),
];

const FA_FIELDS: &[Field] = &[
    Field::optional("alpha", FieldType::Float),
    Field::optional("beta_min", FieldType::Float),
    Field::optional("beta0", FieldType::Float),
    Field::optional("gamma", FieldType::Float),
];

const TLBO_FIELDS: &[Field] = &[];

/// Why a mapping or a typed setting failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidField {
    pub field: String,
    pub reason: String,
}

impl InvalidField {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for InvalidField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl std::error::Error for InvalidField {}

/// The field set of one variant: base fields plus its extension.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    variant: AlgorithmType,
    extension: &'static [Field],
}

impl Schema {
    /// Returns the schema for `variant`.
    pub fn for_variant(variant: AlgorithmType) -> Self {
        let extension = match variant {
            AlgorithmType::Rga => RGA_FIELDS,
            AlgorithmType::Fa => FA_FIELDS,
            AlgorithmType::De => DE_FIELDS,
            AlgorithmType::Tlbo => TLBO_FIELDS,
        };
        Self { variant, extension }
    }

    pub fn variant(&self) -> AlgorithmType {
        self.variant
    }

    /// Fields added on top of the base schema.
    pub fn extension(&self) -> &'static [Field] {
        self.extension
    }

    /// All fields, base first.
    pub fn fields(&self) -> impl Iterator<Item = &'static Field> {
        BASE_FIELDS.iter().chain(self.extension.iter())
    }

    /// Looks up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields().find(|f| f.name == name)
    }

    /// Extension fields whose names shadow a base field.
    ///
    /// Always empty for the built-in schemas; checked when the default table
    /// is constructed.
    pub fn collisions(&self) -> Vec<&'static str> {
        self.extension
            .iter()
            .filter(|ext| BASE_FIELDS.iter().any(|base| base.name == ext.name))
            .map(|ext| ext.name)
            .collect()
    }

    /// Validates `config` and returns a normalized copy.
    ///
    /// Checks that every key is declared, every required field is present,
    /// and every value matches its declared type. Integers given for float
    /// fields are widened in the returned map.
    pub fn validate(&self, config: &ParamMap) -> Result<ParamMap, InvalidField> {
        let mut normalized = ParamMap::new();
        for (key, value) in config {
            let field = self.field(key).ok_or_else(|| InvalidField {
                field: key.clone(),
                reason: format!("not a field of {}", self.variant),
            })?;
            let value = field.ty.coerce(value).ok_or_else(|| InvalidField {
                field: key.clone(),
                reason: format!("expected {}, got {} {}", field.ty, value.kind(), value),
            })?;
            normalized.insert(key.clone(), value);
        }
        if let Some(missing) = self
            .fields()
            .find(|f| f.required && !normalized.contains_key(f.name))
        {
            return Err(InvalidField {
                field: missing.name.to_string(),
                reason: "required field is missing".into(),
            });
        }
        Ok(normalized)
    }
}
