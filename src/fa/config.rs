//! FA settings.

use crate::algorithm::Settings;
use crate::config::ValidatedConfig;
use crate::error::Result;
use crate::schema::InvalidField;

/// Configuration for the Firefly Algorithm.
///
/// Attractiveness at squared distance `r2` is
/// `beta_min + (beta0 - beta_min) * exp(-gamma * r2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FaSettings {
    pub base: Settings,

    /// Random step size, relative to the bound width.
    pub alpha: f64,

    /// Attractiveness floor.
    pub beta_min: f64,

    /// Attractiveness at distance zero.
    pub beta0: f64,

    /// Light absorption coefficient.
    pub gamma: f64,
}

impl Default for FaSettings {
    fn default() -> Self {
        Self {
            base: Settings::new(80),
            alpha: 0.01,
            beta_min: 0.2,
            beta0: 1.0,
            gamma: 1.0,
        }
    }
}

impl FaSettings {
    pub fn from_config(config: &ValidatedConfig) -> Result<Self> {
        let d = Self::default();
        Ok(Self {
            base: Settings::from_config(config, &d.base)?,
            alpha: config.float("alpha").unwrap_or(d.alpha),
            beta_min: config.float("beta_min").unwrap_or(d.beta_min),
            beta0: config.float("beta0").unwrap_or(d.beta0),
            gamma: config.float("gamma").unwrap_or(d.gamma),
        })
    }

    pub fn with_base(mut self, base: Settings) -> Self {
        self.base = base;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta_min(mut self, beta_min: f64) -> Self {
        self.beta_min = beta_min;
        self
    }

    pub fn with_beta0(mut self, beta0: f64) -> Self {
        self.beta0 = beta0;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> std::result::Result<(), InvalidField> {
        self.base.validate()?;
        for (name, v) in [
            ("alpha", self.alpha),
            ("beta_min", self.beta_min),
            ("beta0", self.beta0),
            ("gamma", self.gamma),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(InvalidField::new(
                    name,
                    format!("must be finite and non-negative, got {v}"),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{params, resolve_config, AlgorithmType};

    #[test]
    fn test_default_matches_table() {
        let config = resolve_config(AlgorithmType::Fa, None).unwrap();
        assert_eq!(FaSettings::from_config(&config).unwrap(), FaSettings::default());
    }

    #[test]
    fn test_from_config_override() {
        let config =
            resolve_config(AlgorithmType::Fa, Some(params! { "gamma" => 0.5, "pop_num" => 12 }))
                .unwrap();
        let settings = FaSettings::from_config(&config).unwrap();
        assert!((settings.gamma - 0.5).abs() < 1e-12);
        assert_eq!(settings.base.pop_num, 12);
    }

    #[test]
    fn test_validate_negative_gamma() {
        let err = FaSettings::default().with_gamma(-0.1).validate().unwrap_err();
        assert_eq!(err.field, "gamma");
    }
}
