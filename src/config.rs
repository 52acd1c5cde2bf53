//! Configuration resolution.
//!
//! [`resolve_config`] merges a caller's overrides onto a fresh copy of the
//! variant defaults and validates the result against the variant schema.
//! Nothing reaches an algorithm constructor without passing through here.

use crate::defaults::default;
use crate::error::{Error, Result};
use crate::schema::{ParamMap, Schema, Value};
use crate::variant::AlgorithmType;

/// A configuration that has passed schema validation for one variant.
///
/// Float fields always hold [`Value::Float`], even if the caller supplied
/// an integer.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig {
    variant: AlgorithmType,
    params: ParamMap,
}

impl ValidatedConfig {
    /// Validates `params` against the schema of `variant`.
    pub fn new(variant: AlgorithmType, params: &ParamMap) -> Result<Self> {
        let params = Schema::for_variant(variant)
            .validate(params)
            .map_err(|e| Error::InvalidConfig {
                variant: variant.to_string(),
                field: e.field,
                reason: e.reason,
            })?;
        Ok(Self { variant, params })
    }

    pub fn variant(&self) -> AlgorithmType {
        self.variant
    }

    pub fn params(&self) -> &ParamMap {
        &self.params
    }

    pub fn into_params(self) -> ParamMap {
        self.params
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }
}

/// Resolves the configuration for `kind`.
///
/// Without overrides this is [`default`]; otherwise each override replaces
/// the default of the same name. Fails with [`Error::InvalidConfig`] if an
/// override names an undeclared field or carries a value of the wrong type.
///
/// ```
/// use u_metakernel::{params, resolve_config, AlgorithmType};
///
/// let config = resolve_config(AlgorithmType::Rga, Some(params! { "cross" => 0.8 })).unwrap();
/// assert_eq!(config.float("cross"), Some(0.8));
/// assert_eq!(config.float("mutate"), Some(0.05));
/// ```
pub fn resolve_config(kind: AlgorithmType, overrides: Option<ParamMap>) -> Result<ValidatedConfig> {
    let mut config = default(kind)?;
    if let Some(overrides) = overrides {
        tracing::debug!(variant = %kind, keys = overrides.len(), "applying overrides");
        config.extend(overrides);
    }
    ValidatedConfig::new(kind, &config)
}
