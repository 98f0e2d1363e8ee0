//! Per-mode color palette
//!
//! Components mostly branch on [`ThemeMode`] directly; the palette covers the
//! handful of colors the motion layer needs, such as the default glow.

use crate::mode::ThemeMode;
use glint_core::Color;

/// Colors for one theme mode
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub accent: Color,
    pub glow: Color,
}

impl Palette {
    pub fn portfolio() -> Self {
        Self {
            background: Color::from_hex(0x0F172A),
            surface: Color::from_hex(0x1E293B),
            text: Color::from_hex(0xF8FAFC),
            accent: Color::from_hex(0x6366F1),
            glow: Color::from_hex(0x818CF8).with_alpha(0.6),
        }
    }

    pub fn kawaii() -> Self {
        Self {
            background: Color::from_hex(0xFFF0F6),
            surface: Color::from_hex(0xFFFFFF),
            text: Color::from_hex(0x831843),
            accent: Color::from_hex(0xEC4899),
            glow: Color::from_hex(0xF9A8D4).with_alpha(0.7),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Default => Self::portfolio(),
            ThemeMode::Alternate => Self::kawaii(),
        }
    }
}

impl ThemeMode {
    pub fn palette(self) -> Palette {
        Palette::for_mode(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_have_distinct_glow() {
        assert_ne!(
            ThemeMode::Default.palette().glow,
            ThemeMode::Alternate.palette().glow
        );
    }
}
