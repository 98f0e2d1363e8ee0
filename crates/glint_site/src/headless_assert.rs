//! Snapshots and assertion helpers for headless runs.

use glint_theme::ThemeMode;
use serde::Serialize;
use std::collections::BTreeMap;

/// Observable site state, keyed by scenario element id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SiteSnapshot {
    pub mode: Option<ThemeMode>,
    pub reveals: BTreeMap<String, RevealSnapshot>,
    pub parallaxes: BTreeMap<String, ParallaxSnapshot>,
    pub hovers: BTreeMap<String, HoverSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevealSnapshot {
    pub revealed: bool,
    pub reveal_count: u32,
    pub opacity: f32,
    pub translate: [f32; 2],
    /// Per-child opacity when staggered
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParallaxSnapshot {
    pub at_rest: bool,
    pub offset: [f32; 2],
    pub translate: [f32; 2],
    pub rotate: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverSnapshot {
    pub hovering: bool,
    pub scale: f32,
    pub lift: f32,
    pub glow_opacity: Option<f32>,
}

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

fn missing(id: &str) -> AssertionResult {
    AssertionResult::Failed {
        code: "missing_element".to_string(),
        message: format!("{id}: element not mounted"),
    }
}

pub fn evaluate_assert_mode(expected: ThemeMode, snapshot: &SiteSnapshot) -> AssertionResult {
    match snapshot.mode {
        Some(mode) if mode == expected => AssertionResult::Passed,
        Some(mode) => AssertionResult::Failed {
            code: "mode_mismatch".to_string(),
            message: format!("expected theme {expected}, got {mode}"),
        },
        None => AssertionResult::Failed {
            code: "theme_uninitialized".to_string(),
            message: "theme store not initialized".to_string(),
        },
    }
}

pub fn evaluate_assert_revealed(id: &str, expected: bool, snapshot: &SiteSnapshot) -> AssertionResult {
    let Some(reveal) = snapshot.reveals.get(id) else {
        return missing(id);
    };
    if reveal.revealed == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "reveal_mismatch".to_string(),
            message: format!("{id}: expected revealed = {expected}, got {}", reveal.revealed),
        }
    }
}

pub fn evaluate_assert_opacity(
    id: &str,
    expected: f32,
    tolerance: f32,
    snapshot: &SiteSnapshot,
) -> AssertionResult {
    let Some(reveal) = snapshot.reveals.get(id) else {
        return missing(id);
    };
    if (reveal.opacity - expected).abs() <= tolerance {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "opacity_mismatch".to_string(),
            message: format!("{id}: expected opacity {expected} ± {tolerance}, got {}", reveal.opacity),
        }
    }
}

pub fn evaluate_assert_translate(
    id: &str,
    expected: [f32; 2],
    tolerance: f32,
    snapshot: &SiteSnapshot,
) -> AssertionResult {
    let actual = if let Some(reveal) = snapshot.reveals.get(id) {
        reveal.translate
    } else if let Some(parallax) = snapshot.parallaxes.get(id) {
        parallax.translate
    } else {
        return missing(id);
    };

    let close = (actual[0] - expected[0]).abs() <= tolerance
        && (actual[1] - expected[1]).abs() <= tolerance;
    if close {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "translate_mismatch".to_string(),
            message: format!("{id}: expected translate {expected:?}, got {actual:?}"),
        }
    }
}

pub fn evaluate_assert_parallax_at_rest(id: &str, snapshot: &SiteSnapshot) -> AssertionResult {
    let Some(parallax) = snapshot.parallaxes.get(id) else {
        return missing(id);
    };
    if parallax.at_rest {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "parallax_moving".to_string(),
            message: format!("{id}: parallax offset {:?} not at rest", parallax.offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reveal(revealed: bool, opacity: f32) -> RevealSnapshot {
        RevealSnapshot {
            revealed,
            reveal_count: u32::from(revealed),
            opacity,
            translate: [0.0, 0.0],
            children: Vec::new(),
        }
    }

    #[test]
    fn test_missing_element() {
        let snapshot = SiteSnapshot::default();
        assert!(matches!(
            evaluate_assert_revealed("hero", true, &snapshot),
            AssertionResult::Failed { code, .. } if code == "missing_element"
        ));
    }

    #[test]
    fn test_opacity_tolerance() {
        let mut snapshot = SiteSnapshot::default();
        snapshot.reveals.insert("card".to_string(), reveal(true, 0.995));
        assert_eq!(evaluate_assert_opacity("card", 1.0, 0.01, &snapshot), AssertionResult::Passed);
        assert!(matches!(
            evaluate_assert_opacity("card", 1.0, 0.001, &snapshot),
            AssertionResult::Failed { .. }
        ));
    }

    #[test]
    fn test_mode() {
        let snapshot = SiteSnapshot {
            mode: Some(ThemeMode::Alternate),
            ..SiteSnapshot::default()
        };
        assert_eq!(evaluate_assert_mode(ThemeMode::Alternate, &snapshot), AssertionResult::Passed);
        assert!(matches!(
            evaluate_assert_mode(ThemeMode::Default, &snapshot),
            AssertionResult::Failed { code, .. } if code == "mode_mismatch"
        ));
    }
}
