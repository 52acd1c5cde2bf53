//! FA generation loop.

use super::config::FaSettings;
use crate::algorithm::{
    check_bounds, drive, expect_variant, invalid, Algorithm, Context, FromConfig, Method,
    ObjFunc, Solution,
};
use crate::config::ValidatedConfig;
use crate::error::Result;
use crate::schema::InvalidField;
use crate::variant::AlgorithmType;
use rand::Rng;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Firefly Algorithm.
pub struct Fa {
    func: Arc<dyn ObjFunc>,
    settings: FaSettings,
}

impl Fa {
    pub fn new(func: Arc<dyn ObjFunc>, settings: FaSettings) -> std::result::Result<Self, InvalidField> {
        settings.validate()?;
        check_bounds(&*func)?;
        Ok(Self { func, settings })
    }

    pub fn settings(&self) -> &FaSettings {
        &self.settings
    }
}

impl Algorithm for Fa {
    fn variant(&self) -> AlgorithmType {
        AlgorithmType::Fa
    }

    fn run_with_cancel(&self, cancel: Option<Arc<AtomicBool>>) -> Solution {
        let mut method = FaMethod {
            settings: &self.settings,
        };
        drive(
            AlgorithmType::Fa,
            &*self.func,
            &self.settings.base,
            &mut method,
            cancel,
        )
    }
}

impl FromConfig for Fa {
    fn from_config(func: Arc<dyn ObjFunc>, config: &ValidatedConfig) -> Result<Self> {
        expect_variant(config, AlgorithmType::Fa)?;
        let settings = FaSettings::from_config(config)?;
        Self::new(func, settings).map_err(|e| invalid(config, e))
    }
}

struct FaMethod<'s> {
    settings: &'s FaSettings,
}

impl FaMethod<'_> {
    fn attractiveness(&self, r2: f64) -> f64 {
        let s = self.settings;
        s.beta_min + (s.beta0 - s.beta_min) * (-s.gamma * r2).exp()
    }

    /// Moves `x` toward `target` by the attractiveness at their distance.
    fn attract(&self, x: &mut [f64], target: &[f64]) {
        let r2: f64 = x.iter().zip(target).map(|(a, b)| (a - b) * (a - b)).sum();
        let beta = self.attractiveness(r2);
        for (xi, ti) in x.iter_mut().zip(target) {
            *xi += beta * (ti - *xi);
        }
    }
}

impl Method for FaMethod<'_> {
    fn generation(&mut self, ctx: &mut Context<'_>) {
        let n = ctx.pop_num();
        let mut moved = Vec::with_capacity(n);

        for i in 0..n {
            let mut x = ctx.pool[i].clone();
            for j in 0..n {
                if ctx.fitness[j] < ctx.fitness[i] {
                    self.attract(&mut x, &ctx.pool[j]);
                }
            }
            for (k, xk) in x.iter_mut().enumerate() {
                let width = ctx.upper(k) - ctx.lower(k);
                let r: f64 = ctx.rng.random();
                *xk = ctx.clamp(k, *xk + self.settings.alpha * width * (r - 0.5));
            }
            moved.push(x);
        }

        ctx.replace_all(moved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::testing::sphere;
    use crate::algorithm::{Settings, StopReason};
    use crate::{resolve_config, Error};

    fn settings() -> FaSettings {
        FaSettings::default()
            .with_alpha(0.05)
            .with_base(Settings::new(20).with_max_gen(100).with_seed(7))
    }

    #[test]
    fn test_attractiveness_bounds() {
        let s = FaSettings::default();
        let method = FaMethod { settings: &s };
        assert!((method.attractiveness(0.0) - 1.0).abs() < 1e-12);
        assert!((method.attractiveness(1e6) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_attract_moves_closer() {
        let s = FaSettings::default();
        let method = FaMethod { settings: &s };
        let mut x = vec![1.0, 1.0];
        method.attract(&mut x, &[0.0, 0.0]);
        assert!(x[0] < 1.0 && x[0] > 0.0);
    }

    #[test]
    fn test_sphere_improves() {
        let solution = Fa::new(sphere(2), settings()).unwrap().run();

        assert_eq!(solution.stop, StopReason::MaxGen);
        assert!(solution.best_fitness <= solution.history[0].fitness);
        assert!(
            solution.best_fitness < 1.0,
            "expected fitness < 1.0 for 2D sphere, got {}",
            solution.best_fitness
        );
    }

    #[test]
    fn test_from_config_rejects_other_variant() {
        let config = resolve_config(AlgorithmType::De, None).unwrap();
        let err = Fa::from_config(sphere(2), &config).err().unwrap();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }
}
