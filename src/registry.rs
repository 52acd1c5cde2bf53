//! Variant registry.
//!
//! Binds each [`AlgorithmType`] to the concrete type implementing it. An
//! [`Implementation`] carries the type's name and a constructor that takes
//! an objective function and a validated configuration.

use crate::algorithm::{Algorithm, FromConfig, ObjFunc};
use crate::config::{resolve_config, ValidatedConfig};
use crate::de::De;
use crate::error::{Error, Result};
use crate::fa::Fa;
use crate::rga::Rga;
use crate::schema::ParamMap;
use crate::tlbo::Tlbo;
use crate::variant::AlgorithmType;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

type Constructor = fn(Arc<dyn ObjFunc>, &ValidatedConfig) -> Result<Box<dyn Algorithm>>;

/// A registered implementation type.
pub struct Implementation {
    variant: AlgorithmType,
    type_name: fn() -> &'static str,
    construct: Constructor,
}

impl Implementation {
    fn of<A: FromConfig + 'static>(variant: AlgorithmType) -> Self {
        Self {
            variant,
            type_name: std::any::type_name::<A>,
            construct: construct::<A>,
        }
    }

    pub fn variant(&self) -> AlgorithmType {
        self.variant
    }

    /// Fully qualified name of the implementing type.
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Builds the algorithm.
    ///
    /// `config` must have been validated for this entry's variant.
    pub fn construct(
        &self,
        func: Arc<dyn ObjFunc>,
        config: &ValidatedConfig,
    ) -> Result<Box<dyn Algorithm>> {
        (self.construct)(func, config)
    }
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Implementation")
            .field("variant", &self.variant)
            .field("type_name", &self.type_name())
            .finish()
    }
}

fn construct<A: FromConfig + 'static>(
    func: Arc<dyn ObjFunc>,
    config: &ValidatedConfig,
) -> Result<Box<dyn Algorithm>> {
    Ok(Box::new(A::from_config(func, config)?))
}

fn builtin(kind: AlgorithmType) -> Implementation {
    match kind {
        AlgorithmType::Rga => Implementation::of::<Rga>(kind),
        AlgorithmType::Fa => Implementation::of::<Fa>(kind),
        AlgorithmType::De => Implementation::of::<De>(kind),
        AlgorithmType::Tlbo => Implementation::of::<Tlbo>(kind),
    }
}

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    Registry::from_entries(AlgorithmType::ALL.map(builtin))
});

/// Identity → implementation lookup.
#[derive(Debug)]
pub struct Registry {
    entries: BTreeMap<AlgorithmType, Implementation>,
}

impl Registry {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = Implementation>,
    {
        Self {
            entries: entries.into_iter().map(|e| (e.variant, e)).collect(),
        }
    }

    pub fn get(&self, kind: AlgorithmType) -> Result<&Implementation> {
        self.entries
            .get(&kind)
            .ok_or_else(|| Error::UnknownVariant(kind.to_string()))
    }
}

/// Returns the implementation registered for `kind`.
///
/// ```
/// use u_metakernel::{algorithm, AlgorithmType};
///
/// let imp = algorithm(AlgorithmType::Fa).unwrap();
/// assert!(imp.type_name().ends_with("::Fa"));
/// ```
pub fn algorithm(kind: AlgorithmType) -> Result<&'static Implementation> {
    REGISTRY.get(kind)
}

/// Resolves a symbolic name such as `"DE"`; unknown names fail with
/// [`Error::UnknownVariant`].
pub fn algorithm_by_name(name: &str) -> Result<&'static Implementation> {
    algorithm(name.parse()?)
}

/// Resolves the configuration for `kind` and constructs its algorithm.
pub fn build(
    kind: AlgorithmType,
    func: Arc<dyn ObjFunc>,
    overrides: Option<ParamMap>,
) -> Result<Box<dyn Algorithm>> {
    let config = resolve_config(kind, overrides)?;
    let implementation = algorithm(kind)?;
    tracing::debug!(variant = %kind, ty = implementation.type_name(), "constructing algorithm");
    implementation.construct(func, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::testing::sphere;
    use crate::{params, StopReason};
    use std::collections::HashSet;

    #[test]
    fn test_distinct_type_per_variant() {
        let names: HashSet<_> = AlgorithmType::ALL
            .iter()
            .map(|&kind| algorithm(kind).unwrap().type_name())
            .collect();
        assert_eq!(names.len(), AlgorithmType::ALL.len());
    }

    #[test]
    fn test_entries_match_variant() {
        for kind in AlgorithmType::ALL {
            let imp = algorithm(kind).unwrap();
            assert_eq!(imp.variant(), kind);
        }
        assert!(algorithm(AlgorithmType::De).unwrap().type_name().ends_with("::De"));
    }

    #[test]
    fn test_every_entry_constructs_and_runs() {
        for kind in AlgorithmType::ALL {
            let config = resolve_config(
                kind,
                Some(params! { "pop_num" => 10, "max_gen" => 5, "report" => 0 }),
            )
            .unwrap();
            let algo = algorithm(kind).unwrap().construct(sphere(2), &config).unwrap();
            assert_eq!(algo.variant(), kind);
            let solution = algo.run();
            assert_eq!(solution.generations, 5);
            assert_eq!(solution.stop, StopReason::MaxGen);
            assert_eq!(solution.best.len(), 2);
        }
    }

    #[test]
    fn test_by_name() {
        assert_eq!(algorithm_by_name("tlbo").unwrap().variant(), AlgorithmType::Tlbo);
        assert_eq!(
            algorithm_by_name("ACO").unwrap_err(),
            Error::UnknownVariant("ACO".into())
        );
    }

    #[test]
    fn test_missing_entry_is_unknown_variant() {
        let registry = Registry::from_entries([builtin(AlgorithmType::Rga)]);
        assert!(registry.get(AlgorithmType::Rga).is_ok());
        assert_eq!(
            registry.get(AlgorithmType::De).unwrap_err(),
            Error::UnknownVariant("DE".into())
        );
    }

    #[test]
    fn test_build_with_overrides() {
        let algo = build(
            AlgorithmType::De,
            sphere(3),
            Some(params! { "pop_num" => 12, "max_gen" => 3, "F" => 0.5 }),
        )
        .unwrap();
        assert_eq!(algo.run().generations, 3);
    }

    #[test]
    fn test_build_rejects_invalid_override() {
        let err = build(AlgorithmType::Fa, sphere(2), Some(params! { "beta0" => "bright" }))
            .err()
            .unwrap();
        assert!(matches!(err, Error::InvalidConfig { ref field, .. } if field == "beta0"));
    }

    #[test]
    fn test_build_rejects_bad_bounds() {
        let func = Arc::new(crate::FnObjective::new(vec![], |_: &[f64]| 0.0));
        let err = build(AlgorithmType::Tlbo, func, None).err().unwrap();
        assert!(matches!(err, Error::InvalidConfig { ref field, .. } if field == "bounds"));
    }

    #[test]
    fn test_build_rejects_overflowing_bounds() {
        let func = Arc::new(crate::FnObjective::new(vec![[-1e308, 1e308]; 2], |xs: &[f64]| {
            xs.iter().map(|x| x.abs()).sum()
        }));
        let err = build(AlgorithmType::Tlbo, func, Some(params! { "pop_num" => 4, "max_gen" => 2 }))
            .err()
            .unwrap();
        assert!(matches!(err, Error::InvalidConfig { ref field, .. } if field == "bounds"));
    }

    #[test]
    fn test_zero_slow_down_run_terminates() {
        for kind in AlgorithmType::ALL {
            let overrides = params! {
                "pop_num" => 6,
                "max_gen" => 0,
                "slow_down" => 0.0,
                "report" => 1,
                "max_time" => 30.0,
            };
            let solution = build(kind, sphere(2), Some(overrides)).unwrap().run();
            assert_eq!(solution.stop, StopReason::SlowDown, "{kind}");
        }
    }
}
