//! RGA settings.

use crate::algorithm::Settings;
use crate::config::ValidatedConfig;
use crate::error::Result;
use crate::schema::InvalidField;

/// Configuration for the Real-coded Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_metakernel::rga::RgaSettings;
///
/// let settings = RgaSettings::default();
/// assert_eq!(settings.base.pop_num, 500);
/// assert!((settings.cross - 0.95).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RgaSettings {
    pub base: Settings,

    /// Probability of crossing a selected pair (0.0–1.0).
    pub cross: f64,

    /// Per-gene mutation probability (0.0–1.0).
    pub mutate: f64,

    /// Probability that the fitter of two tournament contestants wins
    /// (0.0–1.0).
    pub win: f64,

    /// Shape of the non-uniform mutation. Larger values shrink the step
    /// faster as generations advance.
    pub delta: f64,
}

impl Default for RgaSettings {
    fn default() -> Self {
        Self {
            base: Settings::new(500),
            cross: 0.95,
            mutate: 0.05,
            win: 0.95,
            delta: 5.0,
        }
    }
}

impl RgaSettings {
    /// Reads the settings from a validated configuration.
    pub fn from_config(config: &ValidatedConfig) -> Result<Self> {
        let d = Self::default();
        Ok(Self {
            base: Settings::from_config(config, &d.base)?,
            cross: config.float("cross").unwrap_or(d.cross),
            mutate: config.float("mutate").unwrap_or(d.mutate),
            win: config.float("win").unwrap_or(d.win),
            delta: config.float("delta").unwrap_or(d.delta),
        })
    }

    pub fn with_base(mut self, base: Settings) -> Self {
        self.base = base;
        self
    }

    pub fn with_cross(mut self, rate: f64) -> Self {
        self.cross = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_mutate(mut self, rate: f64) -> Self {
        self.mutate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_win(mut self, prob: f64) -> Self {
        self.win = prob.clamp(0.0, 1.0);
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> std::result::Result<(), InvalidField> {
        self.base.validate()?;
        for (name, rate) in [("cross", self.cross), ("mutate", self.mutate), ("win", self.win)] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(InvalidField::new(name, format!("must be in [0, 1], got {rate}")));
            }
        }
        if self.delta.is_nan() || self.delta < 0.0 {
            return Err(InvalidField::new(
                "delta",
                format!("must be non-negative, got {}", self.delta),
            ));
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
        let config = resolve_config(AlgorithmType::Rga, None).unwrap();
        assert_eq!(RgaSettings::from_config(&config).unwrap(), RgaSettings::default());
    }

    #[test]
    fn test_from_config_override() {
        let config =
            resolve_config(AlgorithmType::Rga, Some(params! { "cross" => 0.8, "delta" => 2 }))
                .unwrap();
        let settings = RgaSettings::from_config(&config).unwrap();
        assert!((settings.cross - 0.8).abs() < 1e-12);
        assert!((settings.delta - 2.0).abs() < 1e-12);
        assert!((settings.mutate - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_validate_ok() {
        assert!(RgaSettings::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rate_out_of_range() {
        let settings = RgaSettings {
            win: 1.5,
            ..RgaSettings::default()
        };
        let err = settings.validate().unwrap_err();
        assert_eq!(err.field, "win");
    }

    #[test]
    fn test_clamp_rates() {
        let settings = RgaSettings::default()
            .with_cross(2.0)
            .with_mutate(-1.0)
            .with_win(0.7);
        assert!((settings.cross - 1.0).abs() < 1e-12);
        assert!(settings.mutate.abs() < 1e-12);
        assert!((settings.win - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_validate_negative_delta() {
        let err = RgaSettings::default().with_delta(-1.0).validate().unwrap_err();
        assert_eq!(err.field, "delta");
    }
}
