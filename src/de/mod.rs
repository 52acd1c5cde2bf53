//! Differential Evolution (DE).
//!
//! Ten classic strategies are available through [`Strategy`]: five donor
//! formulas, each combined with exponential (`0..=4`) or binomial (`5..=9`)
//! crossover. Trials replace their target when they are at least as fit.
//!
//! # References
//!
//! - Storn & Price (1997), "Differential Evolution – A Simple and Efficient
//!   Heuristic for global Optimization over Continuous Spaces"

mod config;
mod runner;

pub use config::{Crossover, DeSettings, Donor, Strategy};
pub use runner::De;
