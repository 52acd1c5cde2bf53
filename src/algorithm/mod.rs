//! Algorithm capability shared by every registered variant.
//!
//! Users describe their problem by implementing [`ObjFunc`]; every
//! algorithm in the registry implements [`Algorithm`] and can be built from
//! a [`ValidatedConfig`](crate::ValidatedConfig) through [`FromConfig`].
//!
//! # Key Types
//!
//! - [`Settings`]: the base fields every variant understands
//! - [`Solution`]: best vector, its fitness, and the report history
//! - [`StopReason`]: which termination condition ended the run

mod engine;
mod settings;

pub use engine::{Report, Solution, StopReason};
pub use settings::Settings;

pub(crate) use settings::invalid;

pub(crate) use engine::{check_bounds, cmp_fitness, drive, Context, Method};

use crate::config::ValidatedConfig;
use crate::error::Result;
use crate::variant::AlgorithmType;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// An objective function over a bounded box. Lower fitness is better.
///
/// Must be `Send + Sync`: candidates may be evaluated in parallel.
pub trait ObjFunc: Send + Sync {
    /// Scores a candidate vector. May be stochastic.
    fn fitness(&self, xs: &[f64]) -> f64;

    /// Inclusive `[lower, upper]` bound per dimension.
    fn bound(&self) -> &[[f64; 2]];

    /// Number of decision variables.
    fn dim(&self) -> usize {
        self.bound().len()
    }
}

/// Adapts a closure and a bound list into an [`ObjFunc`].
///
/// ```
/// use u_metakernel::{FnObjective, ObjFunc};
///
/// let sphere = FnObjective::new(vec![[-5.0, 5.0]; 3], |xs: &[f64]| xs.iter().map(|x| x * x).sum());
/// assert_eq!(sphere.dim(), 3);
/// assert_eq!(sphere.fitness(&[1.0, 2.0, 0.0]), 5.0);
/// ```
pub struct FnObjective<F> {
    bounds: Vec<[f64; 2]>,
    func: F,
}

impl<F> FnObjective<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    pub fn new(bounds: Vec<[f64; 2]>, func: F) -> Self {
        Self { bounds, func }
    }
}

impl<F> ObjFunc for FnObjective<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn fitness(&self, xs: &[f64]) -> f64 {
        (self.func)(xs)
    }

    fn bound(&self) -> &[[f64; 2]] {
        &self.bounds
    }
}

/// A runnable metaheuristic.
///
/// `run` blocks until a stop condition from the configuration is met and
/// returns the best candidate found.
pub trait Algorithm: Send + Sync {
    /// The variant this implementation is registered under.
    fn variant(&self) -> AlgorithmType;

    /// Runs the optimization.
    fn run(&self) -> Solution {
        self.run_with_cancel(None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// The flag is checked once per generation; when set, the run stops and
    /// returns the best solution so far.
    fn run_with_cancel(&self, cancel: Option<Arc<AtomicBool>>) -> Solution;
}

/// Construction from an objective function and a validated configuration.
pub trait FromConfig: Algorithm + Sized {
    fn from_config(func: Arc<dyn ObjFunc>, config: &ValidatedConfig) -> Result<Self>;
}

/// Rejects a configuration that was validated for a different variant.
pub(crate) fn expect_variant(config: &ValidatedConfig, kind: AlgorithmType) -> Result<()> {
    if config.variant() == kind {
        Ok(())
    } else {
        Err(crate::Error::InvalidConfig {
            variant: kind.to_string(),
            field: "variant".into(),
            reason: format!("configuration was validated for {}", config.variant()),
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// `f(x) = sum(x_i^2)` on `[-5, 5]^dim`.
    pub fn sphere(dim: usize) -> Arc<dyn ObjFunc> {
        Arc::new(FnObjective::new(vec![[-5.0, 5.0]; dim], |xs: &[f64]| {
            xs.iter().map(|x| x * x).sum()
        }))
    }
}
