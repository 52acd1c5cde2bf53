//! Firefly Algorithm (FA).
//!
//! Every firefly moves toward each brighter (fitter) one with an
//! attractiveness that decays with squared distance, plus a random step
//! scaled by `alpha` and the bound width. The brightest firefly only takes
//! the random step.
//!
//! # References
//!
//! - Yang (2009), "Firefly algorithms for multimodal optimization"

mod config;
mod runner;

pub use config::FaSettings;
pub use runner::Fa;
