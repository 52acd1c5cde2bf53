//! RGA generation loop.

use super::config::RgaSettings;
use crate::algorithm::{
    check_bounds, cmp_fitness, drive, expect_variant, invalid, Algorithm, Context, FromConfig,
    Method, ObjFunc, Solution,
};
use crate::config::ValidatedConfig;
use crate::error::Result;
use crate::schema::InvalidField;
use crate::variant::AlgorithmType;
use rand::Rng;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Real-coded Genetic Algorithm.
///
/// ```
/// use std::sync::Arc;
/// use u_metakernel::rga::{Rga, RgaSettings};
/// use u_metakernel::{Algorithm, FnObjective, Settings};
///
/// let func = Arc::new(FnObjective::new(vec![[-5.0, 5.0]; 2], |xs: &[f64]| {
///     xs.iter().map(|x| x * x).sum()
/// }));
/// let settings = RgaSettings::default().with_base(Settings::new(30).with_max_gen(50).with_seed(1));
/// let solution = Rga::new(func, settings).unwrap().run();
/// assert_eq!(solution.generations, 50);
/// ```
pub struct Rga {
    func: Arc<dyn ObjFunc>,
    settings: RgaSettings,
}

impl Rga {
    /// Creates the algorithm, validating settings and bounds.
    pub fn new(func: Arc<dyn ObjFunc>, settings: RgaSettings) -> std::result::Result<Self, InvalidField> {
        settings.validate()?;
        check_bounds(&*func)?;
        Ok(Self { func, settings })
    }

    pub fn settings(&self) -> &RgaSettings {
        &self.settings
    }
}

impl Algorithm for Rga {
    fn variant(&self) -> AlgorithmType {
        AlgorithmType::Rga
    }

    fn run_with_cancel(&self, cancel: Option<Arc<AtomicBool>>) -> Solution {
        let mut method = RgaMethod {
            settings: &self.settings,
        };
        drive(
            AlgorithmType::Rga,
            &*self.func,
            &self.settings.base,
            &mut method,
            cancel,
        )
    }
}

impl FromConfig for Rga {
    fn from_config(func: Arc<dyn ObjFunc>, config: &ValidatedConfig) -> Result<Self> {
        expect_variant(config, AlgorithmType::Rga)?;
        let settings = RgaSettings::from_config(config)?;
        Self::new(func, settings).map_err(|e| invalid(config, e))
    }
}

struct RgaMethod<'s> {
    settings: &'s RgaSettings,
}

impl RgaMethod<'_> {
    /// Binary tournament: the fitter contestant wins with probability `win`.
    fn select(&self, ctx: &mut Context<'_>) -> usize {
        let i = ctx.rng.random_range(0..ctx.pop_num());
        let j = ctx.other_than(&[i]);
        let (better, worse) = if ctx.fitness[i] <= ctx.fitness[j] {
            (i, j)
        } else {
            (j, i)
        };
        if ctx.rng.random_bool(self.settings.win) {
            better
        } else {
            worse
        }
    }

    /// Arithmetic crossover: three blends of the parents, best two kept.
    fn crossover(&self, ctx: &Context<'_>, a: usize, b: usize) -> (Vec<f64>, Vec<f64>) {
        let (pa, pb) = (&ctx.pool[a], &ctx.pool[b]);
        let mut children: Vec<(f64, Vec<f64>)> = [(0.5, 0.5), (1.5, -0.5), (-0.5, 1.5)]
            .iter()
            .map(|&(wa, wb)| {
                let x: Vec<f64> = (0..ctx.dim())
                    .map(|k| ctx.clamp(k, wa * pa[k] + wb * pb[k]))
                    .collect();
                (ctx.evaluate(&x), x)
            })
            .collect();
        children.sort_by(|x, y| cmp_fitness(x.0, y.0));
        let mut best_two = children.into_iter().map(|(_, x)| x);
        match (best_two.next(), best_two.next()) {
            (Some(c1), Some(c2)) => (c1, c2),
            _ => (pa.clone(), pb.clone()),
        }
    }

    /// Non-uniform mutation: the step toward a bound decays with progress.
    fn mutate(&self, ctx: &mut Context<'_>, child: &mut [f64]) {
        let progress = if ctx.max_gen > 0 {
            (ctx.gen as f64 / ctx.max_gen as f64).min(1.0)
        } else {
            0.0
        };
        let shape = (1.0 - progress).powf(self.settings.delta);
        for (k, gene) in child.iter_mut().enumerate() {
            if !ctx.rng.random_bool(self.settings.mutate) {
                continue;
            }
            let r: f64 = ctx.rng.random();
            let step = 1.0 - r.powf(shape);
            let x = *gene;
            let moved = if ctx.rng.random_bool(0.5) {
                x + (ctx.upper(k) - x) * step
            } else {
                x - (x - ctx.lower(k)) * step
            };
            *gene = ctx.clamp(k, moved);
        }
    }
}

impl Method for RgaMethod<'_> {
    fn generation(&mut self, ctx: &mut Context<'_>) {
        let n = ctx.pop_num();
        let mut next = Vec::with_capacity(n);
        next.push(ctx.best.clone());

        while next.len() < n {
            let a = self.select(ctx);
            let b = self.select(ctx);
            let (c1, c2) = if ctx.rng.random_bool(self.settings.cross) {
                self.crossover(ctx, a, b)
            } else {
                (ctx.pool[a].clone(), ctx.pool[b].clone())
            };
            for mut child in [c1, c2] {
                if next.len() >= n {
                    break;
                }
                self.mutate(ctx, &mut child);
                next.push(child);
            }
        }

        ctx.replace_all(next);
    }
}
