//! Variant identity.
//!
//! [`AlgorithmType`] is the closed set of algorithm kinds this crate knows
//! how to configure and construct. Every table keyed by it is built with an
//! exhaustive `match`, so adding a member without a registry and default
//! entry fails to compile.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Supported metaheuristic algorithms.
///
/// # Examples
///
/// ```
/// use u_metakernel::AlgorithmType;
///
/// let kind: AlgorithmType = "de".parse().unwrap();
/// assert_eq!(kind, AlgorithmType::De);
/// assert_eq!(kind.description(), "Differential Evolution");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum AlgorithmType {
    /// Real-coded Genetic Algorithm.
    Rga,
    /// Firefly Algorithm.
    Fa,
    /// Differential Evolution.
    De,
    /// Teaching Learning Based Optimization.
    Tlbo,
}

impl AlgorithmType {
    /// Every member, in declaration order.
    pub const ALL: [AlgorithmType; 4] = [
        AlgorithmType::Rga,
        AlgorithmType::Fa,
        AlgorithmType::De,
        AlgorithmType::Tlbo,
    ];

    /// Stable symbolic name.
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmType::Rga => "RGA",
            AlgorithmType::Fa => "FA",
            AlgorithmType::De => "DE",
            AlgorithmType::Tlbo => "TLBO",
        }
    }

    /// Human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            AlgorithmType::Rga => "Real-coded Genetic Algorithm",
            AlgorithmType::Fa => "Firefly Algorithm",
            AlgorithmType::De => "Differential Evolution",
            AlgorithmType::Tlbo => "Teaching Learning Based Optimization",
        }
    }
}

impl fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmType {
    type Err = Error;

    /// Parses a symbolic name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        AlgorithmType::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownVariant(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_and_descriptions() {
        assert_eq!(AlgorithmType::Rga.name(), "RGA");
        assert_eq!(AlgorithmType::Fa.description(), "Firefly Algorithm");
        assert_eq!(
            AlgorithmType::Tlbo.description(),
            "Teaching Learning Based Optimization"
        );
        assert_eq!(AlgorithmType::De.to_string(), "DE");
    }

    #[test]
    fn test_parse_round_trip() {
        for kind in AlgorithmType::ALL {
            assert_eq!(kind.name().parse::<AlgorithmType>(), Ok(kind));
            assert_eq!(
                kind.name().to_lowercase().parse::<AlgorithmType>(),
                Ok(kind)
            );
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "PSO".parse::<AlgorithmType>(),
            Err(Error::UnknownVariant("PSO".into()))
        );
    }

    #[test]
    fn test_hash_by_tag() {
        let set: HashSet<AlgorithmType> = AlgorithmType::ALL.into_iter().collect();
        assert_eq!(set.len(), 4);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_uses_symbolic_name() {
        let json = serde_json::to_string(&AlgorithmType::Tlbo).unwrap();
        assert_eq!(json, "\"TLBO\"");
        let back: AlgorithmType = serde_json::from_str("\"DE\"").unwrap();
        assert_eq!(back, AlgorithmType::De);
    }
}
