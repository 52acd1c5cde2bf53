//! Teaching-Learning-Based Optimization (TLBO).
//!
//! A parameter-free method: beyond the base settings there is nothing to
//! tune. Each generation runs a teacher phase (move toward the best member
//! and away from the class mean) and a learner phase (move toward a fitter
//! random peer or away from a worse one). Both phases accept a move only if
//! it does not worsen the member.
//!
//! # References
//!
//! - Rao, Savsani & Vakharia (2011), "Teaching–learning-based optimization:
//!   A novel method for constrained mechanical design optimization problems"

mod config;
mod runner;

pub use config::TlboSettings;
pub use runner::Tlbo;
