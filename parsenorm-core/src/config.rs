//! Normalizer configuration

use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;
use crate::mwt::MwtContainerPolicy;
use crate::offset::OffsetUnit;

/// Default configuration constants
pub mod defaults {
    /// Dependency flavor of emitted edges
    pub const FLAVOR: &str = crate::model::BASIC_FLAVOR;

    /// Whether sentences are validated when the request does not say
    pub const VALIDATE_SENTENCES: bool = true;

    /// Unit of request offsets, as counted by Java and JavaScript strings
    pub const CALLER_OFFSET_UNIT: crate::offset::OffsetUnit = crate::offset::OffsetUnit::Utf16;
}

/// Normalization configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub(crate) validate_sentences: bool,
    pub(crate) mwt_containers: MwtContainerPolicy,
    pub(crate) caller_offset_unit: OffsetUnit, // unit of request offsets
    pub(crate) report_external_offsets: bool,  // emit offsets in caller_offset_unit
    pub(crate) flavor: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            validate_sentences: defaults::VALIDATE_SENTENCES,
            mwt_containers: MwtContainerPolicy::default(),
            caller_offset_unit: defaults::CALLER_OFFSET_UNIT,
            report_external_offsets: false,
            flavor: defaults::FLAVOR.to_string(),
        }
    }
}

impl NormalizerConfig {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Builder seeded with this configuration's values
    pub fn to_builder(&self) -> ConfigBuilder {
        ConfigBuilder {
            validate_sentences: Some(self.validate_sentences),
            mwt_containers: Some(self.mwt_containers),
            caller_offset_unit: Some(self.caller_offset_unit),
            report_external_offsets: Some(self.report_external_offsets),
            flavor: Some(self.flavor.clone()),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), NormalizeError> {
        if self.flavor.trim().is_empty() {
            return Err(NormalizeError::Configuration(
                "flavor must not be empty".into(),
            ));
        }

        if self.flavor.chars().any(char::is_whitespace) {
            return Err(NormalizeError::Configuration(format!(
                "flavor '{}' must not contain whitespace",
                self.flavor
            )));
        }

        Ok(())
    }

    /// Default for sentence validation
    pub fn validate_sentences(&self) -> bool {
        self.validate_sentences
    }

    /// Handling of multi-word token containers
    pub fn mwt_containers(&self) -> MwtContainerPolicy {
        self.mwt_containers
    }

    /// Unit of offsets in requests
    pub fn caller_offset_unit(&self) -> OffsetUnit {
        self.caller_offset_unit
    }

    /// Whether responses use the caller's offset unit
    pub fn report_external_offsets(&self) -> bool {
        self.report_external_offsets
    }

    /// Flavor of emitted edges
    pub fn flavor(&self) -> &str {
        &self.flavor
    }
}

/// Fluent builder for configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    validate_sentences: Option<bool>,
    mwt_containers: Option<MwtContainerPolicy>,
    caller_offset_unit: Option<OffsetUnit>,
    report_external_offsets: Option<bool>,
    flavor: Option<String>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate sentences unless the request overrides it
    pub fn validate_sentences(mut self, validate: bool) -> Self {
        self.validate_sentences = Some(validate);
        self
    }

    /// Set the container policy
    pub fn mwt_containers(mut self, policy: MwtContainerPolicy) -> Self {
        self.mwt_containers = Some(policy);
        self
    }

    /// Set the unit of request offsets
    pub fn caller_offset_unit(mut self, unit: OffsetUnit) -> Self {
        self.caller_offset_unit = Some(unit);
        self
    }

    /// Report offsets in the caller's unit
    pub fn report_external_offsets(mut self, external: bool) -> Self {
        self.report_external_offsets = Some(external);
        self
    }

    /// Set the dependency flavor
    pub fn flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = Some(flavor.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<NormalizerConfig, NormalizeError> {
        let mut config = NormalizerConfig::default();

        if let Some(validate) = self.validate_sentences {
            config.validate_sentences = validate;
        }

        if let Some(policy) = self.mwt_containers {
            config.mwt_containers = policy;
        }

        if let Some(unit) = self.caller_offset_unit {
            config.caller_offset_unit = unit;
        }

        if let Some(external) = self.report_external_offsets {
            config.report_external_offsets = external;
        }

        if let Some(flavor) = self.flavor {
            config.flavor = flavor;
        }

        config.validate()?;
        Ok(config)
    }
}
