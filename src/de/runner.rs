//! DE generation loop.

use super::config::{Crossover, DeSettings, Donor, Strategy};
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

/// Differential Evolution.
pub struct De {
    func: Arc<dyn ObjFunc>,
    settings: DeSettings,
    strategy: Strategy,
}

impl De {
    pub fn new(func: Arc<dyn ObjFunc>, settings: DeSettings) -> std::result::Result<Self, InvalidField> {
        settings.validate()?;
        check_bounds(&*func)?;
        let strategy = settings
            .strategy()
            .ok_or_else(|| {
                InvalidField::new("strategy", format!("must be in 0..=9, got {}", settings.strategy))
            })?;
        Ok(Self {
            func,
            settings,
            strategy,
        })
    }

    pub fn settings(&self) -> &DeSettings {
        &self.settings
    }
}

impl Algorithm for De {
    fn variant(&self) -> AlgorithmType {
        AlgorithmType::De
    }

    fn run_with_cancel(&self, cancel: Option<Arc<AtomicBool>>) -> Solution {
        let mut method = DeMethod {
            strategy: self.strategy,
            f: self.settings.f,
            cr: self.settings.cr,
        };
        drive(
            AlgorithmType::De,
            &*self.func,
            &self.settings.base,
            &mut method,
            cancel,
        )
    }
}

impl FromConfig for De {
    fn from_config(func: Arc<dyn ObjFunc>, config: &ValidatedConfig) -> Result<Self> {
        expect_variant(config, AlgorithmType::De)?;
        let settings = DeSettings::from_config(config)?;
        Self::new(func, settings).map_err(|e| invalid(config, e))
    }
}

struct DeMethod {
    strategy: Strategy,
    f: f64,
    cr: f64,
}

impl DeMethod {
    /// Distinct random members, none equal to `target`.
    fn pick(&self, ctx: &mut Context<'_>, target: usize) -> Vec<usize> {
        let mut chosen = vec![target];
        for _ in 0..self.strategy.donor.random_members() {
            let r = ctx.other_than(&chosen);
            chosen.push(r);
        }
        chosen.remove(0);
        chosen
    }

    fn donor(&self, ctx: &Context<'_>, target: usize, r: &[usize]) -> Vec<f64> {
        let f = self.f;
        let x = |i: usize, k: usize| ctx.pool[i][k];
        let best = &ctx.best;
        (0..ctx.dim())
            .map(|k| match self.strategy.donor {
                Donor::Best1 => best[k] + f * (x(r[0], k) - x(r[1], k)),
                Donor::Rand1 => x(r[0], k) + f * (x(r[1], k) - x(r[2], k)),
                Donor::RandToBest1 => {
                    let xt = x(target, k);
                    xt + f * (best[k] - xt) + f * (x(r[0], k) - x(r[1], k))
                }
                Donor::Best2 => best[k] + f * (x(r[0], k) + x(r[1], k) - x(r[2], k) - x(r[3], k)),
                Donor::Rand2 => {
                    x(r[4], k) + f * (x(r[0], k) + x(r[1], k) - x(r[2], k) - x(r[3], k))
                }
            })
            .collect()
    }

    fn trial(&self, ctx: &mut Context<'_>, target: usize) -> Vec<f64> {
        let r = self.pick(ctx, target);
        let donor = self.donor(ctx, target, &r);
        let dim = ctx.dim();
        let mut trial = ctx.pool[target].clone();
        let start = ctx.rng.random_range(0..dim);

        match self.strategy.crossover {
            Crossover::Exponential => {
                let mut k = start;
                for _ in 0..dim {
                    trial[k] = donor[k];
                    k = (k + 1) % dim;
                    if !ctx.rng.random_bool(self.cr) {
                        break;
                    }
                }
            }
            Crossover::Binomial => {
                for k in 0..dim {
                    if k == start || ctx.rng.random_bool(self.cr) {
                        trial[k] = donor[k];
                    }
                }
            }
        }

        for (k, v) in trial.iter_mut().enumerate() {
            *v = ctx.clamp(k, *v);
        }
        trial
    }
}

impl Method for DeMethod {
    fn generation(&mut self, ctx: &mut Context<'_>) {
        let trials: Vec<Vec<f64>> = (0..ctx.pop_num()).map(|i| self.trial(ctx, i)).collect();
        ctx.replace_if_better(trials);
    }
}
