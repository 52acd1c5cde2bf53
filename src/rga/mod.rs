//! Real-coded Genetic Algorithm (RGA).
//!
//! Chromosomes are real vectors inside the objective bounds. Each generation
//! keeps the best individual, selects parents by binary tournament, applies
//! arithmetic crossover (three candidate children, the best two survive) and
//! non-uniform mutation whose step shrinks as the run approaches `max_gen`.
//!
//! # References
//!
//! - Wright (1991), "Genetic algorithms for real parameter optimization"
//! - Michalewicz (1996), *Genetic Algorithms + Data Structures = Evolution Programs*

mod config;
mod runner;

pub use config::RgaSettings;
pub use runner::Rga;
