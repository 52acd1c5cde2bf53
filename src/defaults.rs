//! Default parameter table.
//!
//! Each variant has its own tuning defaults; a single global set
//! (`max_gen`, `report`) is laid over every one of them. The global set is
//! applied last, so it wins when both define the same key.
//!
//! The table is built once, on first use, and validated against the schemas
//! at that point. Every accessor hands out a fresh copy.

use crate::error::{Error, Result};
use crate::params;
use crate::schema::{ParamMap, Schema};
use crate::variant::AlgorithmType;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Generation budget applied to every variant.
pub const DEFAULT_MAX_GEN: i64 = 1000;

/// Report cadence applied to every variant.
pub const DEFAULT_REPORT: i64 = 50;

static TABLE: LazyLock<Result<DefaultTable>> = LazyLock::new(DefaultTable::builtin);

/// Variant-specific defaults plus the global overlay.
#[derive(Debug, Clone)]
pub struct DefaultTable {
    variants: BTreeMap<AlgorithmType, ParamMap>,
    global: ParamMap,
}

impl DefaultTable {
    /// Builds a table from explicit entries, validating each one.
    ///
    /// Fails with [`Error::SchemaViolation`] if an entry uses an undeclared
    /// or wrongly typed field, if a global default is not a field of some
    /// variant, or if a variant's extension shadows a base field.
    pub fn from_entries<I>(variants: I, global: ParamMap) -> Result<Self>
    where
        I: IntoIterator<Item = (AlgorithmType, ParamMap)>,
    {
        let mut checked = BTreeMap::new();
        for (kind, params) in variants {
            let schema = Schema::for_variant(kind);
            if let Some(name) = schema.collisions().first() {
                return Err(Error::SchemaViolation {
                    variant: kind.to_string(),
                    field: (*name).to_string(),
                    reason: "extension field shadows a base field".into(),
                });
            }
            let params = schema
                .validate(&params)
                .map_err(|e| Error::SchemaViolation {
                    variant: kind.to_string(),
                    field: e.field,
                    reason: e.reason,
                })?;
            schema
                .validate(&global)
                .map_err(|e| Error::SchemaViolation {
                    variant: kind.to_string(),
                    field: e.field,
                    reason: format!("global default: {}", e.reason),
                })?;
            checked.insert(kind, params);
        }
        Ok(Self {
            variants: checked,
            global,
        })
    }

    /// The built-in table.
    pub fn builtin() -> Result<Self> {
        let table = Self::from_entries(
            AlgorithmType::ALL.map(|kind| (kind, builtin_params(kind))),
            params! { "max_gen" => DEFAULT_MAX_GEN, "report" => DEFAULT_REPORT },
        )?;
        tracing::debug!(variants = table.variants.len(), "default parameter table ready");
        Ok(table)
    }

    /// Merged defaults for `kind`: a fresh copy of the variant entry with
    /// the global defaults written over it.
    pub fn defaults(&self, kind: AlgorithmType) -> Result<ParamMap> {
        let mut config = self
            .variants
            .get(&kind)
            .cloned()
            .ok_or_else(|| Error::UnknownVariant(kind.to_string()))?;
        config.extend(self.global.clone());
        Ok(config)
    }

    /// The global overlay.
    pub fn global(&self) -> &ParamMap {
        &self.global
    }
}

fn builtin_params(kind: AlgorithmType) -> ParamMap {
    match kind {
        AlgorithmType::Rga => params! {
            "pop_num" => 500,
            "cross" => 0.95,
            "mutate" => 0.05,
            "win" => 0.95,
            "delta" => 5.0,
        },
        AlgorithmType::Fa => params! {
            "pop_num" => 80,
            "alpha" => 0.01,
            "beta_min" => 0.2,
            "gamma" => 1.0,
            "beta0" => 1.0,
        },
        AlgorithmType::De => params! {
            "strategy" => 1,
            "pop_num" => 400,
            "F" => 0.6,
            "CR" => 0.9,
        },
        AlgorithmType::Tlbo => params! {
            "pop_num" => 50,
        },
    }
}

/// Returns the process-wide built-in table.
pub fn table() -> Result<&'static DefaultTable> {
    TABLE.as_ref().map_err(Clone::clone)
}

/// Returns the default settings of an algorithm.
///
/// The result is an independent copy; mutating it does not affect later
/// calls.
///
/// ```
/// use u_metakernel::{default, AlgorithmType, Value};
///
/// let config = default(AlgorithmType::Tlbo).unwrap();
/// assert_eq!(config["pop_num"], Value::Int(50));
/// assert_eq!(config["max_gen"], Value::Int(1000));
/// ```
pub fn default(kind: AlgorithmType) -> Result<ParamMap> {
    table()?.defaults(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Value;

    #[test]
    fn test_rga_defaults() {
        let expected = params! {
            "pop_num" => 500, "cross" => 0.95, "mutate" => 0.05, "win" => 0.95,
            "delta" => 5.0, "max_gen" => 1000, "report" => 50,
        };
        assert_eq!(default(AlgorithmType::Rga).unwrap(), expected);
    }

    #[test]
    fn test_fa_defaults() {
        let expected = params! {
            "pop_num" => 80, "alpha" => 0.01, "beta_min" => 0.2, "gamma" => 1.0,
            "beta0" => 1.0, "max_gen" => 1000, "report" => 50,
        };
        assert_eq!(default(AlgorithmType::Fa).unwrap(), expected);
    }

    #[test]
    fn test_de_defaults() {
        let expected = params! {
            "strategy" => 1, "pop_num" => 400, "F" => 0.6, "CR" => 0.9,
            "max_gen" => 1000, "report" => 50,
        };
        assert_eq!(default(AlgorithmType::De).unwrap(), expected);
    }

    #[test]
    fn test_tlbo_defaults() {
        let expected = params! { "pop_num" => 50, "max_gen" => 1000, "report" => 50 };
        assert_eq!(default(AlgorithmType::Tlbo).unwrap(), expected);
    }

    #[test]
    fn test_global_keys_present_everywhere() {
        for kind in AlgorithmType::ALL {
            let config = default(kind).unwrap();
            assert_eq!(config["max_gen"], Value::Int(DEFAULT_MAX_GEN));
            assert_eq!(config["report"], Value::Int(DEFAULT_REPORT));
            for key in builtin_params(kind).keys() {
                assert!(config.contains_key(key), "{kind} lost {key}");
            }
        }
    }

    #[test]
    fn test_schema_containment() {
        for kind in AlgorithmType::ALL {
            let schema = Schema::for_variant(kind);
            for key in default(kind).unwrap().keys() {
                assert!(schema.field(key).is_some(), "{kind}: {key} undeclared");
            }
        }
    }

    #[test]
    fn test_copies_are_independent() {
        let mut first = default(AlgorithmType::De).unwrap();
        first.insert("F".into(), Value::Float(0.1));
        first.remove("CR");
        let second = default(AlgorithmType::De).unwrap();
        assert_eq!(second["F"], Value::Float(0.6));
        assert_eq!(second["CR"], Value::Float(0.9));
    }

    #[test]
    fn test_global_wins_on_collision() {
        let table = DefaultTable::from_entries(
            [(AlgorithmType::Tlbo, params! { "pop_num" => 10, "max_gen" => 7 })],
            params! { "max_gen" => 1000, "report" => 50 },
        )
        .unwrap();
        let config = table.defaults(AlgorithmType::Tlbo).unwrap();
        assert_eq!(config["max_gen"], Value::Int(1000));
        assert_eq!(config["pop_num"], Value::Int(10));
        assert_eq!(config.len(), 3);
    }

    #[test]
    fn test_missing_entry_is_unknown_variant() {
        let table = DefaultTable::from_entries(
            [(AlgorithmType::Rga, builtin_params(AlgorithmType::Rga))],
            ParamMap::new(),
        )
        .unwrap();
        assert_eq!(
            table.defaults(AlgorithmType::Fa),
            Err(Error::UnknownVariant("FA".into()))
        );
    }

    #[test]
    fn test_undeclared_entry_is_schema_violation() {
        let err = DefaultTable::from_entries(
            [(AlgorithmType::Tlbo, params! { "pop_num" => 50, "cross" => 0.9 })],
            ParamMap::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::SchemaViolation { ref field, .. } if field == "cross"));
    }

    #[test]
    fn test_wrongly_typed_global_is_schema_violation() {
        let err = DefaultTable::from_entries(
            [(AlgorithmType::Tlbo, params! { "pop_num" => 50 })],
            params! { "report" => 0.5 },
        )
        .unwrap_err();
        assert!(matches!(err, Error::SchemaViolation { ref field, .. } if field == "report"));
    }
}
