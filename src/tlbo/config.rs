//! TLBO settings.

use crate::algorithm::Settings;
use crate::config::ValidatedConfig;
use crate::error::Result;
use crate::schema::InvalidField;

/// Configuration for TLBO. Only the base fields apply.
#[derive(Debug, Clone, PartialEq)]
pub struct TlboSettings {
    pub base: Settings,
}

impl Default for TlboSettings {
    fn default() -> Self {
        Self {
            base: Settings::new(50),
        }
    }
}

impl TlboSettings {
    pub fn from_config(config: &ValidatedConfig) -> Result<Self> {
        Ok(Self {
            base: Settings::from_config(config, &Self::default().base)?,
        })
    }

    pub fn with_base(mut self, base: Settings) -> Self {
        self.base = base;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), InvalidField> {
        self.base.validate()
    }
}
