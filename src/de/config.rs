//! DE settings and strategies.

use crate::algorithm::Settings;
use crate::config::ValidatedConfig;
use crate::error::Result;
use crate::schema::InvalidField;

/// Donor vector formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Donor {
    /// `best + F * (r1 - r2)`
    Best1,
    /// `r1 + F * (r2 - r3)`
    Rand1,
    /// `x + F * (best - x) + F * (r1 - r2)`
    RandToBest1,
    /// `best + F * (r1 + r2 - r3 - r4)`
    Best2,
    /// `r5 + F * (r1 + r2 - r3 - r4)`
    Rand2,
}

impl Donor {
    /// Number of distinct random members the formula draws.
    pub fn random_members(self) -> usize {
        match self {
            Donor::Best1 | Donor::RandToBest1 => 2,
            Donor::Rand1 => 3,
            Donor::Best2 => 4,
            Donor::Rand2 => 5,
        }
    }
}

/// How a trial inherits genes from its donor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossover {
    /// A contiguous run of genes, continued while `rand < CR`.
    Exponential,
    /// Each gene independently with probability `CR`; one gene always.
    Binomial,
}

/// A DE strategy: donor formula plus crossover kind.
///
/// Encoded as an integer in `0..=9`:
///
/// | id | donor | crossover |
/// |---|---|---|
/// | 0 / 5 | best/1 | exp / bin |
/// | 1 / 6 | rand/1 | exp / bin |
/// | 2 / 7 | rand-to-best/1 | exp / bin |
/// | 3 / 8 | best/2 | exp / bin |
/// | 4 / 9 | rand/2 | exp / bin |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy {
    pub donor: Donor,
    pub crossover: Crossover,
}

impl Strategy {
    /// Decodes a strategy id; `None` outside `0..=9`.
    pub fn from_id(id: i64) -> Option<Self> {
        let donor = match id.rem_euclid(5) {
            0 => Donor::Best1,
            1 => Donor::Rand1,
            2 => Donor::RandToBest1,
            3 => Donor::Best2,
            _ => Donor::Rand2,
        };
        let crossover = match id {
            0..=4 => Crossover::Exponential,
            5..=9 => Crossover::Binomial,
            _ => return None,
        };
        Some(Self { donor, crossover })
    }

    pub fn id(self) -> i64 {
        let base = match self.donor {
            Donor::Best1 => 0,
            Donor::Rand1 => 1,
            Donor::RandToBest1 => 2,
            Donor::Best2 => 3,
            Donor::Rand2 => 4,
        };
        match self.crossover {
            Crossover::Exponential => base,
            Crossover::Binomial => base + 5,
        }
    }
}

/// Configuration for Differential Evolution.
///
/// ```
/// use u_metakernel::de::{DeSettings, Donor};
///
/// let settings = DeSettings::default().with_strategy(8).with_f(0.5);
/// assert_eq!(settings.strategy().unwrap().donor, Donor::Best2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DeSettings {
    pub base: Settings,

    /// Strategy id in `0..=9`, see [`Strategy`].
    pub strategy: i64,

    /// Differential weight.
    pub f: f64,

    /// Crossover rate (0.0–1.0).
    pub cr: f64,
}

impl Default for DeSettings {
    fn default() -> Self {
        Self {
            base: Settings::new(400),
            strategy: 1,
            f: 0.6,
            cr: 0.9,
        }
    }
}

impl DeSettings {
    pub fn from_config(config: &ValidatedConfig) -> Result<Self> {
        let d = Self::default();
        Ok(Self {
            base: Settings::from_config(config, &d.base)?,
            strategy: config.int("strategy").unwrap_or(d.strategy),
            f: config.float("F").unwrap_or(d.f),
            cr: config.float("CR").unwrap_or(d.cr),
        })
    }

    /// The decoded strategy, if the id is valid.
    pub fn strategy(&self) -> Option<Strategy> {
        Strategy::from_id(self.strategy)
    }

    pub fn with_base(mut self, base: Settings) -> Self {
        self.base = base;
        self
    }

    pub fn with_strategy(mut self, id: i64) -> Self {
        self.strategy = id;
        self
    }

    pub fn with_f(mut self, f: f64) -> Self {
        self.f = f;
        self
    }

    pub fn with_cr(mut self, cr: f64) -> Self {
        self.cr = cr.clamp(0.0, 1.0);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> std::result::Result<(), InvalidField> {
        self.base.validate()?;
        let strategy = self.strategy().ok_or_else(|| {
            InvalidField::new("strategy", format!("must be in 0..=9, got {}", self.strategy))
        })?;
        let needed = strategy.donor.random_members() + 1;
        if self.base.pop_num < needed {
            return Err(InvalidField::new(
                "pop_num",
                format!(
                    "must be at least {needed} for strategy {}, got {}",
                    self.strategy, self.base.pop_num
                ),
            ));
        }
        if !self.f.is_finite() || self.f < 0.0 {
            return Err(InvalidField::new(
                "F",
                format!("must be finite and non-negative, got {}", self.f),
            ));
        }
        if !(0.0..=1.0).contains(&self.cr) {
            return Err(InvalidField::new("CR", format!("must be in [0, 1], got {}", self.cr)));
        }
        Ok(())
    }
}
