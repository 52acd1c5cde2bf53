//! TLBO generation loop.

use super::config::TlboSettings;
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

/// Teaching-Learning-Based Optimization.
pub struct Tlbo {
    func: Arc<dyn ObjFunc>,
    settings: TlboSettings,
}

impl Tlbo {
    pub fn new(func: Arc<dyn ObjFunc>, settings: TlboSettings) -> std::result::Result<Self, InvalidField> {
        settings.validate()?;
        check_bounds(&*func)?;
        Ok(Self { func, settings })
    }

    pub fn settings(&self) -> &TlboSettings {
        &self.settings
    }
}

impl Algorithm for Tlbo {
    fn variant(&self) -> AlgorithmType {
        AlgorithmType::Tlbo
    }

    fn run_with_cancel(&self, cancel: Option<Arc<AtomicBool>>) -> Solution {
        drive(
            AlgorithmType::Tlbo,
            &*self.func,
            &self.settings.base,
            &mut TlboMethod,
            cancel,
        )
    }
}

impl FromConfig for Tlbo {
    fn from_config(func: Arc<dyn ObjFunc>, config: &ValidatedConfig) -> Result<Self> {
        expect_variant(config, AlgorithmType::Tlbo)?;
        let settings = TlboSettings::from_config(config)?;
        Self::new(func, settings).map_err(|e| invalid(config, e))
    }
}

struct TlboMethod;

impl TlboMethod {
    fn mean(ctx: &Context<'_>) -> Vec<f64> {
        let n = ctx.pop_num() as f64;
        (0..ctx.dim())
            .map(|k| ctx.pool.iter().map(|x| x[k]).sum::<f64>() / n)
            .collect()
    }

    fn teach(ctx: &mut Context<'_>) {
        let mean = Self::mean(ctx);
        let teacher = ctx.best.clone();
        let candidates: Vec<Vec<f64>> = (0..ctx.pop_num())
            .map(|i| {
                let factor = ctx.rng.random_range(1..=2) as f64;
                (0..ctx.dim())
                    .map(|k| {
                        let r: f64 = ctx.rng.random();
                        let v = ctx.pool[i][k] + r * (teacher[k] - factor * mean[k]);
                        ctx.clamp(k, v)
                    })
                    .collect()
            })
            .collect();
        ctx.replace_if_better(candidates);
    }

    fn learn(ctx: &mut Context<'_>) {
        let candidates: Vec<Vec<f64>> = (0..ctx.pop_num())
            .map(|i| {
                let j = ctx.other_than(&[i]);
                let toward_j = ctx.fitness[j] < ctx.fitness[i];
                (0..ctx.dim())
                    .map(|k| {
                        let r: f64 = ctx.rng.random();
                        let (xi, xj) = (ctx.pool[i][k], ctx.pool[j][k]);
                        let v = if toward_j {
                            xi + r * (xj - xi)
                        } else {
                            xi + r * (xi - xj)
                        };
                        ctx.clamp(k, v)
                    })
                    .collect()
            })
            .collect();
        ctx.replace_if_better(candidates);
    }
}

impl Method for TlboMethod {
    fn generation(&mut self, ctx: &mut Context<'_>) {
        Self::teach(ctx);
        Self::learn(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::testing::sphere;
    use crate::algorithm::{Settings, StopReason};
    use crate::resolve_config;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_sphere_improves() {
        let settings =
            TlboSettings::default().with_base(Settings::new(20).with_max_gen(60).with_seed(11));
        let solution = Tlbo::new(sphere(4), settings).unwrap().run();

        assert_eq!(solution.stop, StopReason::MaxGen);
        assert!(
            solution.best_fitness < 0.1,
            "expected fitness < 0.1 for 4D sphere, got {}",
            solution.best_fitness
        );
    }

    #[test]
    fn test_mean() {
        let func = sphere(2);
        let settings = Settings::new(4).with_seed(1);
        let mut ctx = Context::new(&*func, &settings);
        ctx.pool = vec![vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0, 5.0], vec![6.0, 7.0]];
        assert_eq!(TlboMethod::mean(&ctx), vec![3.0, 4.0]);
    }

    #[test]
    fn test_cancellation() {
        let settings =
            TlboSettings::default().with_base(Settings::new(20).with_max_gen(0).with_max_time(60.0));
        let tlbo = Tlbo::new(sphere(3), settings).unwrap();

        let cancel = Arc::new(AtomicBool::new(false));
        let cancel_clone = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(10));
            cancel_clone.store(true, Ordering::Relaxed);
        });

        let solution = tlbo.run_with_cancel(Some(cancel));
        assert_eq!(solution.stop, StopReason::Cancelled);
    }

    #[test]
    fn test_from_config_defaults() {
        let config = resolve_config(AlgorithmType::Tlbo, None).unwrap();
        let tlbo = Tlbo::from_config(sphere(2), &config).unwrap();
        assert_eq!(tlbo.settings().base.pop_num, 50);
        assert_eq!(tlbo.settings().base.max_gen, 1000);
        assert_eq!(tlbo.variant(), AlgorithmType::Tlbo);
    }
}
