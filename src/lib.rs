//! Metaheuristic algorithm registry and typed configuration.
//!
//! Binds a closed set of algorithm variants to their implementation types
//! and to validated default parameters:
//!
//! - **RGA**: Real-coded Genetic Algorithm with tournament selection and
//!   non-uniform mutation.
//! - **FA**: Firefly Algorithm; members move toward brighter ones with
//!   distance-decayed attraction.
//! - **DE**: Differential Evolution with ten donor/crossover strategies.
//! - **TLBO**: Teaching-Learning-Based Optimization, parameter-free.
//!
//! # Architecture
//!
//! - [`schema`]: field declarations, base fields plus one extension per variant
//! - [`AlgorithmType`]: the closed variant identity
//! - [`default`]: per-variant defaults with the global `max_gen`/`report` overlay
//! - [`resolve_config`]: overrides merged onto defaults, validated eagerly
//! - [`algorithm()`] / [`build`]: identity → implementation → runnable [`Algorithm`]
//!
//! ```
//! use std::sync::Arc;
//! use u_metakernel::{build, params, AlgorithmType, FnObjective};
//!
//! let sphere = Arc::new(FnObjective::new(vec![[-5.0, 5.0]; 3], |xs: &[f64]| {
//!     xs.iter().map(|x| x * x).sum()
//! }));
//! let de = build(
//!     AlgorithmType::De,
//!     sphere,
//!     Some(params! { "pop_num" => 20, "max_gen" => 50, "report" => 10 }),
//! )
//! .unwrap();
//! let solution = de.run();
//! assert_eq!(solution.generations, 50);
//! ```

pub mod algorithm;
mod config;
pub mod de;
mod defaults;
mod error;
pub mod fa;
mod registry;
pub mod rga;
pub mod schema;
pub mod tlbo;
mod variant;

pub use algorithm::{
    Algorithm, FnObjective, FromConfig, ObjFunc, Report, Settings, Solution, StopReason,
};
pub use config::{resolve_config, ValidatedConfig};
pub use defaults::{default, table, DefaultTable, DEFAULT_MAX_GEN, DEFAULT_REPORT};
pub use error::{Error, Result};
pub use registry::{algorithm, algorithm_by_name, build, Implementation, Registry};
pub use schema::{Field, FieldType, InvalidField, ParamMap, Schema, Value, BASE_FIELDS};
pub use variant::AlgorithmType;
