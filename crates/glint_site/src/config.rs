//! Site configuration file handling (glint.toml)

use crate::error::ConfigError;
use glint_animation::SpringConfig;
use glint_core::Vec2;
use glint_motion::{HoverConfig, ParallaxConfig, RevealConfig, RevealDirection};
use glint_theme::{ThemeMode, DEFAULT_STORAGE_KEY};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// Conventional config file name
pub const CONFIG_FILE: &str = "glint.toml";

/// Top-level site configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub reveal: RevealSettings,
    #[serde(default)]
    pub parallax: ParallaxSettings,
    #[serde(default)]
    pub hover: HoverSettings,
}

/// Theme store settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ThemeConfig {
    /// Mode adopted when nothing valid is persisted
    #[serde(default, deserialize_with = "lenient_mode")]
    pub default_mode: ThemeMode,
    /// Client storage key holding the persisted tag
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// `FileStorage` location used by the CLI
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(".glint/storage.toml")
}

fn lenient_mode<'de, D>(deserializer: D) -> Result<ThemeMode, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_mode: ThemeMode::Default,
            storage_key: default_storage_key(),
            storage_path: default_storage_path(),
        }
    }
}

/// Defaults for every reveal on the site
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RevealSettings {
    #[serde(default)]
    pub direction: RevealDirection,
    #[serde(default = "default_distance")]
    pub distance: f32,
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    #[serde(default = "default_true")]
    pub once: bool,
    #[serde(default = "SpringConfig::reveal")]
    pub spring: SpringConfig,
}

fn default_distance() -> f32 {
    70.0
}

fn default_threshold() -> f32 {
    0.2
}

fn default_true() -> bool {
    true
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            direction: RevealDirection::Up,
            distance: default_distance(),
            threshold: default_threshold(),
            once: true,
            spring: SpringConfig::reveal(),
        }
    }
}

/// Defaults for pointer parallax
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ParallaxSettings {
    /// Pixels on both axes
    #[serde(default = "default_translate_range")]
    pub translate_range: f32,
    /// Degrees
    #[serde(default = "default_rotate_range")]
    pub rotate_range: f32,
    #[serde(default = "SpringConfig::parallax")]
    pub spring: SpringConfig,
}

fn default_translate_range() -> f32 {
    15.0
}

fn default_rotate_range() -> f32 {
    2.0
}

impl Default for ParallaxSettings {
    fn default() -> Self {
        Self {
            translate_range: default_translate_range(),
            rotate_range: default_rotate_range(),
            spring: SpringConfig::parallax(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HoverSettings {
    #[serde(default = "SpringConfig::hover")]
    pub spring: SpringConfig,
}

impl Default for HoverSettings {
    fn default() -> Self {
        Self {
            spring: SpringConfig::hover(),
        }
    }
}

impl SiteConfig {
    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `glint.toml` from `dir`, or defaults when it doesn't exist
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.reveal.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::OutOfRange {
                field: "reveal.threshold",
                expected: "between 0 and 1",
                value: threshold,
            });
        }
        let springs = [
            ("reveal.spring", self.reveal.spring),
            ("parallax.spring", self.parallax.spring),
            ("hover.spring", self.hover.spring),
        ];
        for (field, spring) in springs {
            if !(spring.stiffness > 0.0 && spring.mass > 0.0 && spring.damping >= 0.0) {
                return Err(ConfigError::OutOfRange {
                    field,
                    expected: "positive stiffness and mass",
                    value: spring.stiffness.min(spring.mass),
                });
            }
        }
        Ok(())
    }

    /// Base reveal config; callers set direction / delay / stagger per use
    pub fn reveal_config(&self) -> RevealConfig {
        RevealConfig::default()
            .direction(self.reveal.direction)
            .distance(self.reveal.distance)
            .threshold(self.reveal.threshold)
            .once(self.reveal.once)
            .spring(self.reveal.spring)
    }

    pub fn parallax_config(&self) -> ParallaxConfig {
        let range = self.parallax.translate_range;
        ParallaxConfig {
            translate_range: Vec2::splat(range),
            rotate_range: self.parallax.rotate_range,
            smoothing: glint_animation::Smoothing::Spring(self.parallax.spring),
            ..ParallaxConfig::default()
        }
    }

    /// Apply the site hover spring to a preset
    pub fn hover_config(&self, preset: HoverConfig) -> HoverConfig {
        preset.spring(self.hover.spring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_file_is_defaults() {
        let config = SiteConfig::from_toml_str("").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.theme.storage_key, "theme");
        assert_eq!(config.reveal.spring, SpringConfig::new(300.0, 30.0, 0.5));
        assert_eq!(config.parallax.spring, SpringConfig::new(100.0, 25.0, 1.0));
    }

    #[test]
    fn test_partial_file() {
        let config = SiteConfig::from_toml_str(
            r#"
            [theme]
            default_mode = "Kawaii"

            [reveal]
            direction = "sideways"
            threshold = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.theme.default_mode, ThemeMode::Alternate);
        assert_eq!(config.reveal.direction, RevealDirection::Up);
        assert_eq!(config.reveal.threshold, 0.5);
        assert_eq!(config.reveal.distance, 70.0);
        assert_eq!(config.reveal_config().threshold, 0.5);
    }

    #[test]
    fn test_invalid_mode_is_an_error() {
        let err = SiteConfig::from_toml_str("[theme]\ndefault_mode = \"neon\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_threshold_out_of_range() {
        let err = SiteConfig::from_toml_str("[reveal]\nthreshold = 2.0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "reveal.threshold",
                ..
            }
        ));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(SiteConfig::load_from_dir(dir.path()).unwrap(), SiteConfig::default());

        std::fs::write(dir.path().join(CONFIG_FILE), "[parallax]\ntranslate_range = 30.0\n").unwrap();
        let config = SiteConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.parallax_config().translate_range, Vec2::splat(30.0));
    }
}
