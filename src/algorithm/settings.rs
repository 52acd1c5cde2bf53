//! Base settings shared by every variant.

use crate::config::ValidatedConfig;
use crate::defaults::{DEFAULT_MAX_GEN, DEFAULT_REPORT};
use crate::error::{Error, Result};
use crate::schema::InvalidField;

/// Typed view of the base configuration fields.
///
/// Termination conditions combine: every one that is set is checked after
/// each generation and the first one met stops the run.
///
/// # Examples
///
/// ```
/// use u_metakernel::Settings;
///
/// let settings = Settings::new(40)
///     .with_max_gen(200)
///     .with_min_fit(1e-8)
///     .with_report(10)
///     .with_seed(7);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Population size.
    pub pop_num: usize,

    /// Generation budget. `0` disables the generation limit.
    pub max_gen: usize,

    /// Stop once the best fitness is at or below this value.
    pub min_fit: Option<f64>,

    /// Wall-clock budget in seconds.
    pub max_time: Option<f64>,

    /// Stop when the relative improvement between two report checkpoints
    /// does not exceed this ratio. Requires `report > 0`.
    pub slow_down: Option<f64>,

    /// Record a [`Report`](super::Report) every this many generations.
    /// `0` disables reporting.
    pub report: usize,

    /// Evaluate candidates in parallel (requires the `parallel` feature).
    pub parallel: bool,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Settings {
    /// Base settings with the global defaults and the given population.
    pub fn new(pop_num: usize) -> Self {
        Self {
            pop_num,
            max_gen: DEFAULT_MAX_GEN as usize,
            min_fit: None,
            max_time: None,
            slow_down: None,
            report: DEFAULT_REPORT as usize,
            parallel: false,
            seed: None,
        }
    }

    /// Reads the base fields from `config`, falling back to `fallback` for
    /// any field the configuration does not carry.
    pub fn from_config(config: &ValidatedConfig, fallback: &Settings) -> Result<Self> {
        Ok(Self {
            pop_num: count(config, "pop_num")?.unwrap_or(fallback.pop_num),
            max_gen: count(config, "max_gen")?.unwrap_or(fallback.max_gen),
            min_fit: config.float("min_fit").or(fallback.min_fit),
            max_time: config.float("max_time").or(fallback.max_time),
            slow_down: config.float("slow_down").or(fallback.slow_down),
            report: count(config, "report")?.unwrap_or(fallback.report),
            parallel: config.bool("parallel").unwrap_or(fallback.parallel),
            seed: fallback.seed,
        })
    }

    pub fn with_pop_num(mut self, n: usize) -> Self {
        self.pop_num = n;
        self
    }

    pub fn with_max_gen(mut self, n: usize) -> Self {
        self.max_gen = n;
        self
    }

    pub fn with_min_fit(mut self, fitness: f64) -> Self {
        self.min_fit = Some(fitness);
        self
    }

    pub fn with_max_time(mut self, seconds: f64) -> Self {
        self.max_time = Some(seconds);
        self
    }

    pub fn with_slow_down(mut self, ratio: f64) -> Self {
        self.slow_down = Some(ratio);
        self
    }

    pub fn with_report(mut self, every: usize) -> Self {
        self.report = every;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns the offending field if any parameter is invalid.
    pub fn validate(&self) -> std::result::Result<(), InvalidField> {
        if self.pop_num < 2 {
            return Err(InvalidField::new("pop_num", "must be at least 2"));
        }
        if let Some(t) = self.max_time {
            if t.is_nan() || t <= 0.0 {
                return Err(InvalidField::new("max_time", format!("must be positive, got {t}")));
            }
        }
        if let Some(r) = self.slow_down {
            if r.is_nan() || r < 0.0 {
                return Err(InvalidField::new(
                    "slow_down",
                    format!("must be non-negative, got {r}"),
                ));
            }
        }
        let slow_down_active = self.slow_down.is_some() && self.report > 0;
        if self.max_gen == 0
            && self.min_fit.is_none()
            && self.max_time.is_none()
            && !slow_down_active
        {
            return Err(InvalidField::new(
                "max_gen",
                "is 0 and no other stop condition is set",
            ));
        }
        Ok(())
    }
}

/// Reads a non-negative integer field.
fn count(config: &ValidatedConfig, name: &str) -> Result<Option<usize>> {
    match config.int(name) {
        None => Ok(None),
        Some(v) => usize::try_from(v).map(Some).map_err(|_| Error::InvalidConfig {
            variant: config.variant().to_string(),
            field: name.to_string(),
            reason: format!("must be non-negative, got {v}"),
        }),
    }
}

/// Maps a settings validation failure onto [`Error::InvalidConfig`].
pub(crate) fn invalid(config: &ValidatedConfig, e: InvalidField) -> Error {
    Error::InvalidConfig {
        variant: config.variant().to_string(),
        field: e.field,
        reason: e.reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{params, resolve_config, AlgorithmType};

    #[test]
    fn test_new_uses_global_defaults() {
        let settings = Settings::new(30);
        assert_eq!(settings.pop_num, 30);
        assert_eq!(settings.max_gen, 1000);
        assert_eq!(settings.report, 50);
        assert!(!settings.parallel);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_config_reads_base_fields() {
        let config = resolve_config(
            AlgorithmType::Tlbo,
            Some(params! { "max_time" => 2, "slow_down" => 0.01, "parallel" => true }),
        )
        .unwrap();
        let settings = Settings::from_config(&config, &Settings::new(10).with_seed(3)).unwrap();
        assert_eq!(settings.pop_num, 50);
        assert_eq!(settings.max_time, Some(2.0));
        assert_eq!(settings.slow_down, Some(0.01));
        assert!(settings.parallel);
        assert_eq!(settings.seed, Some(3));
    }

    #[test]
    fn test_negative_count_rejected() {
        let config =
            resolve_config(AlgorithmType::Tlbo, Some(params! { "max_gen" => -1 })).unwrap();
        let err = Settings::from_config(&config, &Settings::new(10)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { ref field, .. } if field == "max_gen"));
    }

    #[test]
    fn test_validate_population_too_small() {
        assert!(Settings::new(1).validate().is_err());
    }

    #[test]
    fn test_validate_requires_stop_condition() {
        let settings = Settings::new(10).with_max_gen(0);
        assert!(settings.validate().is_err());
        assert!(settings.clone().with_max_time(1.0).validate().is_ok());
        assert!(settings.clone().with_slow_down(0.1).validate().is_ok());
        assert!(settings
            .with_slow_down(0.1)
            .with_report(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_names_field() {
        let err = Settings::new(10).with_max_time(-1.0).validate().unwrap_err();
        assert_eq!(err.field, "max_time");
        let err = Settings::new(10).with_slow_down(f64::NAN).validate().unwrap_err();
        assert_eq!(err.field, "slow_down");
        let err = Settings::new(10).with_max_gen(0).validate().unwrap_err();
        assert_eq!(err.field, "max_gen");
    }

    #[test]
    fn test_invalid_keeps_field() {
        let config = resolve_config(AlgorithmType::De, None).unwrap();
        let err = invalid(&config, InvalidField::new("CR", "must be in [0, 1], got 2"));
        assert_eq!(
            err,
            Error::InvalidConfig {
                variant: "DE".into(),
                field: "CR".into(),
                reason: "must be in [0, 1], got 2".into(),
            }
        );
    }
}
