//! Generation loop shared by every variant.
//!
//! [`drive`] owns initialization, termination checks, progress reports and
//! best tracking. A variant only supplies a [`Method`], which rewrites the
//! population once per generation through a [`Context`].

use super::settings::Settings;
use super::ObjFunc;
use crate::schema::InvalidField;
use crate::variant::AlgorithmType;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The generation budget was used up.
    MaxGen,
    /// The best fitness reached `min_fit`.
    MinFit,
    /// The wall-clock budget was used up.
    MaxTime,
    /// Improvement between report checkpoints fell below `slow_down`.
    SlowDown,
    /// The cancellation flag was set.
    Cancelled,
}

/// A progress checkpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub generation: usize,
    pub fitness: f64,
    pub elapsed: Duration,
}

/// Result of a run.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Best candidate found during the entire run.
    pub best: Vec<f64>,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Generations executed.
    pub generations: usize,

    pub stop: StopReason,

    /// Checkpoints recorded every `report` generations, plus the initial
    /// population and the final state.
    pub history: Vec<Report>,
}

/// Per-generation population update of one variant.
pub(crate) trait Method {
    /// Called once after the initial population has been evaluated.
    fn init(&mut self, _ctx: &mut Context<'_>) {}

    /// Advances the population by one generation.
    ///
    /// Implementations keep `ctx.fitness` in sync with `ctx.pool` and call
    /// [`Context::update_best`] (directly or through the replace helpers).
    fn generation(&mut self, ctx: &mut Context<'_>);
}

/// Population state handed to a [`Method`].
pub(crate) struct Context<'a> {
    func: &'a dyn ObjFunc,
    parallel: bool,
    pub rng: StdRng,
    pub pool: Vec<Vec<f64>>,
    pub fitness: Vec<f64>,
    pub best: Vec<f64>,
    pub best_f: f64,
    /// Current generation, starting at 1 inside [`Method::generation`].
    pub gen: usize,
    pub max_gen: usize,
}

impl<'a> Context<'a> {
    pub fn new(func: &'a dyn ObjFunc, settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut ctx = Self {
            func,
            parallel: settings.parallel,
            rng: StdRng::seed_from_u64(seed),
            pool: Vec::with_capacity(settings.pop_num),
            fitness: Vec::new(),
            best: Vec::new(),
            best_f: f64::INFINITY,
            gen: 0,
            max_gen: settings.max_gen,
        };
        for _ in 0..settings.pop_num {
            let x = ctx.random_vector();
            ctx.pool.push(x);
        }
        ctx.fitness = ctx.evaluate_all(&ctx.pool);
        ctx.update_best();
        ctx
    }

    pub fn pop_num(&self) -> usize {
        self.pool.len()
    }

    pub fn dim(&self) -> usize {
        self.func.dim()
    }

    pub fn lower(&self, i: usize) -> f64 {
        self.func.bound()[i][0]
    }

    pub fn upper(&self, i: usize) -> f64 {
        self.func.bound()[i][1]
    }

    /// Clamps a gene into its bound.
    pub fn clamp(&self, i: usize, v: f64) -> f64 {
        let [lo, hi] = self.func.bound()[i];
        if v.is_nan() {
            lo
        } else {
            v.clamp(lo, hi)
        }
    }

    /// A uniformly random candidate inside the bounds.
    pub fn random_vector(&mut self) -> Vec<f64> {
        let func = self.func;
        func.bound()
            .iter()
            .map(|&[lo, hi]| {
                if lo < hi {
                    self.rng.random_range(lo..hi)
                } else {
                    lo
                }
            })
            .collect()
    }

    pub fn evaluate(&self, x: &[f64]) -> f64 {
        self.func.fitness(x)
    }

    /// Evaluates a batch, in parallel when enabled.
    pub fn evaluate_all(&self, xs: &[Vec<f64>]) -> Vec<f64> {
        evaluate_batch(self.func, xs, self.parallel)
    }

    /// Index of a random member other than `exclude`.
    pub fn other_than(&mut self, exclude: &[usize]) -> usize {
        loop {
            let i = self.rng.random_range(0..self.pool.len());
            if !exclude.contains(&i) {
                return i;
            }
        }
    }

    /// Refreshes the global best from the current population.
    pub fn update_best(&mut self) {
        if let Some(i) = best_index(&self.fitness) {
            if self.best.is_empty() || self.fitness[i] < self.best_f {
                self.best_f = self.fitness[i];
                self.best = self.pool[i].clone();
            }
        }
    }

    /// Replaces each member whose candidate is at least as good.
    pub fn replace_if_better(&mut self, candidates: Vec<Vec<f64>>) {
        let fitness = self.evaluate_all(&candidates);
        for (i, (x, f)) in candidates.into_iter().zip(fitness).enumerate() {
            if f <= self.fitness[i] {
                self.pool[i] = x;
                self.fitness[i] = f;
            }
        }
        self.update_best();
    }

    /// Replaces the whole population.
    pub fn replace_all(&mut self, pool: Vec<Vec<f64>>) {
        self.fitness = self.evaluate_all(&pool);
        self.pool = pool;
        self.update_best();
    }
}

#[cfg(feature = "parallel")]
fn evaluate_batch(func: &dyn ObjFunc, xs: &[Vec<f64>], parallel: bool) -> Vec<f64> {
    use rayon::prelude::*;
    if parallel {
        xs.par_iter().map(|x| func.fitness(x)).collect()
    } else {
        xs.iter().map(|x| func.fitness(x)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_batch(func: &dyn ObjFunc, xs: &[Vec<f64>], _parallel: bool) -> Vec<f64> {
    xs.iter().map(|x| func.fitness(x)).collect()
}

/// Orders fitness values ascending with NaN last.
pub(crate) fn cmp_fitness(a: f64, b: f64) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Index of the lowest fitness; NaN never wins.
pub(crate) fn best_index(fitness: &[f64]) -> Option<usize> {
    fitness
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| cmp_fitness(**a, **b))
        .map(|(i, _)| i)
}

/// Relative drop of the best fitness from `prev` to `best`.
fn relative_improvement(prev: f64, best: f64) -> f64 {
    if prev.is_infinite() && best.is_finite() {
        return f64::INFINITY;
    }
    (prev - best) / prev.abs().max(f64::EPSILON)
}

/// Runs `method` until a stop condition of `settings` is met.
///
/// `settings` must have passed [`Settings::validate`] and `func` must have a
/// non-empty, ordered bound list.
pub(crate) fn drive<M: Method>(
    kind: AlgorithmType,
    func: &dyn ObjFunc,
    settings: &Settings,
    method: &mut M,
    cancel: Option<Arc<AtomicBool>>,
) -> Solution {
    let start = Instant::now();
    tracing::info!(
        variant = %kind,
        pop_num = settings.pop_num,
        max_gen = settings.max_gen,
        dim = func.dim(),
        "optimization started"
    );

    let mut ctx = Context::new(func, settings);
    method.init(&mut ctx);

    let mut history = vec![Report {
        generation: 0,
        fitness: ctx.best_f,
        elapsed: start.elapsed(),
    }];
    let mut checkpoint = ctx.best_f;

    let stop = loop {
        if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            break StopReason::Cancelled;
        }
        if settings.max_gen > 0 && ctx.gen >= settings.max_gen {
            break StopReason::MaxGen;
        }
        if settings.min_fit.is_some_and(|min_fit| ctx.best_f <= min_fit) {
            break StopReason::MinFit;
        }
        if settings
            .max_time
            .is_some_and(|t| start.elapsed().as_secs_f64() >= t)
        {
            break StopReason::MaxTime;
        }

        ctx.gen += 1;
        method.generation(&mut ctx);

        if settings.report > 0 && ctx.gen.is_multiple_of(settings.report) {
            history.push(Report {
                generation: ctx.gen,
                fitness: ctx.best_f,
                elapsed: start.elapsed(),
            });
            tracing::debug!(variant = %kind, generation = ctx.gen, fitness = ctx.best_f, "progress");

            if let Some(ratio) = settings.slow_down {
                // Anything but strictly greater, NaN included, is a stall.
                let improvement = relative_improvement(checkpoint, ctx.best_f);
                if improvement.partial_cmp(&ratio) != Some(std::cmp::Ordering::Greater) {
                    break StopReason::SlowDown;
                }
                checkpoint = ctx.best_f;
            }
        }
    };

    if history.last().is_some_and(|r| r.generation != ctx.gen) {
        history.push(Report {
            generation: ctx.gen,
            fitness: ctx.best_f,
            elapsed: start.elapsed(),
        });
    }

    tracing::info!(
        variant = %kind,
        generations = ctx.gen,
        fitness = ctx.best_f,
        stop = ?stop,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "optimization finished"
    );

    Solution {
        best: ctx.best,
        best_fitness: ctx.best_f,
        generations: ctx.gen,
        stop,
        history,
    }
}

/// Checks that `func` has a usable bound list.
///
/// Each bound must be ordered with a finite width so that uniform sampling
/// inside it is defined.
pub(crate) fn check_bounds(func: &dyn ObjFunc) -> std::result::Result<(), InvalidField> {
    let bound = func.bound();
    if bound.is_empty() {
        return Err(InvalidField::new("bounds", "must have at least one dimension"));
    }
    for (i, &[lo, hi]) in bound.iter().enumerate() {
        if !lo.is_finite() || !hi.is_finite() || lo > hi || !(hi - lo).is_finite() {
            return Err(InvalidField::new(
                "bounds",
                format!("dimension {i} is invalid: [{lo}, {hi}]"),
            ));
        }
    }
    Ok(())
}
