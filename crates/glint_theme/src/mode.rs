//! The two site themes

use crate::error::ParseThemeModeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Active visual theme. Exactly one is active at any time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeMode {
    /// Clean portfolio look
    #[default]
    #[serde(rename = "portfolio")]
    Default,
    /// Pastel "kawaii" look
    #[serde(rename = "kawaii")]
    Alternate,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 2] = [ThemeMode::Default, ThemeMode::Alternate];

    /// Tag written to client storage
    pub const fn tag(self) -> &'static str {
        match self {
            ThemeMode::Default => "portfolio",
            ThemeMode::Alternate => "kawaii",
        }
    }

    /// Class set on the document root while this mode is active
    pub const fn root_class(self) -> &'static str {
        match self {
            ThemeMode::Default => "theme-portfolio",
            ThemeMode::Alternate => "theme-kawaii",
        }
    }

    /// The other mode
    pub const fn toggle(self) -> Self {
        match self {
            ThemeMode::Default => ThemeMode::Alternate,
            ThemeMode::Alternate => ThemeMode::Default,
        }
    }

    /// Exact match against the persisted tags. Anything else is `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.tag() == tag)
    }
}

impl FromStr for ThemeMode {
    type Err = ParseThemeModeError;

    /// Lenient parse for config files and the command line: tags are
    /// case-insensitive and `default` / `alternate` are accepted as aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portfolio" | "default" => Ok(ThemeMode::Default),
            "kawaii" | "alternate" => Ok(ThemeMode::Alternate),
            _ => Err(ParseThemeModeError(s.to_string())),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_involution() {
        for mode in ThemeMode::ALL {
            assert_ne!(mode.toggle(), mode);
            assert_eq!(mode.toggle().toggle(), mode);
        }
    }

    #[test]
    fn test_from_tag_is_strict() {
        assert_eq!(ThemeMode::from_tag("portfolio"), Some(ThemeMode::Default));
        assert_eq!(ThemeMode::from_tag("kawaii"), Some(ThemeMode::Alternate));
        assert_eq!(ThemeMode::from_tag("Kawaii"), None);
        assert_eq!(ThemeMode::from_tag("dark"), None);
        assert_eq!(ThemeMode::from_tag(""), None);
    }

    #[test]
    fn test_from_str_is_lenient() {
        assert_eq!(" KAWAII ".parse::<ThemeMode>(), Ok(ThemeMode::Alternate));
        assert_eq!("default".parse::<ThemeMode>(), Ok(ThemeMode::Default));
        assert!("neon".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn test_root_classes_are_distinct() {
        assert_ne!(
            ThemeMode::Default.root_class(),
            ThemeMode::Alternate.root_class()
        );
    }
}
