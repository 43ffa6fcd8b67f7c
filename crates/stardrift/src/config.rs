//! Engine configuration.
//!
//! One TOML document, loaded and validated at startup. Everything here
//! has a default matching the stock visual design, so an empty document
//! is a complete, valid configuration.

use serde::Deserialize;
use thiserror::Error;

use stardrift_motion::{ParallaxOptions, RevealOptions};
use stardrift_rendering::FieldConfig;
use stardrift_shared::Color;

/// Errors raised while loading a configuration document.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document is not valid TOML for this schema.
    #[error("configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The particle size range is inverted.
    #[error("invalid particle size range: min {min} > max {max}")]
    SizeRange {
        /// Configured minimum size.
        min: f32,
        /// Configured maximum size.
        max: f32,
    },

    /// A field that must be a non-negative finite number is not.
    #[error("field `{field}` must be a non-negative finite number, got {value}")]
    NonFinite {
        /// The offending field.
        field: &'static str,
        /// The configured value.
        value: f32,
    },

    /// A reveal threshold outside the valid interval.
    #[error("reveal threshold {threshold} outside (0, 1]")]
    Threshold {
        /// The configured threshold.
        threshold: f32,
    },
}

/// Particle field settings, as they appear in the config document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    /// Number of particles.
    pub count: u32,
    /// Inner radius of the spherical shell.
    pub base_radius: f32,
    /// Radial thickness of the shell.
    pub spread: f32,
    /// Gradient color at mix factor 0.
    pub primary: Color,
    /// Gradient color at mix factor 1.
    pub secondary: Color,
    /// Smallest base sprite size.
    pub size_min: f32,
    /// Largest base sprite size.
    pub size_max: f32,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self::from(&FieldConfig::default())
    }
}

impl From<&FieldConfig> for FieldSettings {
    fn from(config: &FieldConfig) -> Self {
        Self {
            count: config.count,
            base_radius: config.base_radius,
            spread: config.spread,
            primary: config.primary,
            secondary: config.secondary,
            size_min: config.size_min,
            size_max: config.size_max,
        }
    }
}

impl From<&FieldSettings> for FieldConfig {
    fn from(settings: &FieldSettings) -> Self {
        Self {
            count: settings.count,
            base_radius: settings.base_radius,
            spread: settings.spread,
            primary: settings.primary,
            secondary: settings.secondary,
            size_min: settings.size_min,
            size_max: settings.size_max,
        }
    }
}

/// One parallax binding within a section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParallaxSettings {
    /// Selector for the driven elements.
    pub selector: String,
    /// Speed, direction and marker options.
    #[serde(flatten)]
    pub options: ParallaxOptions,
}

/// Reveal settings for a section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RevealSettings {
    /// Selector for the revealed members, in stagger order.
    pub members: String,
    /// Threshold, stagger and timing options.
    #[serde(flatten)]
    pub options: RevealOptions,
}

/// One section of the page and the effects mounted on it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SectionConfig {
    /// Selector for the section element itself.
    pub selector: String,
    /// Parallax bindings to mount inside the section.
    #[serde(default)]
    pub parallax: Vec<ParallaxSettings>,
    /// Reveal transition for the section's members, if any.
    #[serde(default)]
    pub reveal: Option<RevealSettings>,
}

/// The complete engine configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for the particle field RNG.
    pub seed: u64,
    /// Particle field settings.
    pub field: FieldSettings,
    /// Sections to mount at startup.
    pub sections: Vec<SectionConfig>,
}

impl EngineConfig {
    /// Parses and validates a TOML configuration document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] if the document does not match the schema;
    /// a validation variant if a value is out of range.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let field = &self.field;
        if field.size_min > field.size_max {
            return Err(ConfigError::SizeRange {
                min: field.size_min,
                max: field.size_max,
            });
        }
        for (name, value) in [
            ("field.base_radius", field.base_radius),
            ("field.spread", field.spread),
            ("field.size_min", field.size_min),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NonFinite { field: name, value });
            }
        }

        for section in &self.sections {
            for parallax in &section.parallax {
                if !parallax.options.speed.is_finite() {
                    return Err(ConfigError::NonFinite {
                        field: "parallax.speed",
                        value: parallax.options.speed,
                    });
                }
            }
            if let Some(reveal) = &section.reveal {
                let threshold = reveal.options.threshold;
                if !(threshold > 0.0 && threshold <= 1.0) {
                    return Err(ConfigError::Threshold { threshold });
                }
            }
        }
        Ok(())
    }
}
