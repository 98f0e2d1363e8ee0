//! Scenario definition for headless site runs.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Sequence of headless steps driving one [`crate::Site`].
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    #[serde(default)]
    pub name: Option<String>,
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid scenario {}", path.display()))
    }
}

/// Page-space rectangle in scenario files
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoundsSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<BoundsSpec> for glint_core::Rect {
    fn from(b: BoundsSpec) -> Self {
        glint_core::Rect::new(b.x, b.y, b.width, b.height)
    }
}

/// Hover presets addressable from scenarios
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverPreset {
    #[default]
    Card,
    Button,
    Sticker,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    Wait {
        ms: u64,
    },
    Tick {
        frames: u32,
    },
    ToggleTheme,
    /// Lenient tag ("kawaii", "Default", ...)
    SetTheme {
        mode: String,
    },
    Reload,
    /// Scroll so the viewport top sits at `y`
    Scroll {
        y: f32,
    },
    PointerMove {
        x: f32,
        y: f32,
    },
    PointerLeave,
    HoverEnter {
        id: String,
    },
    HoverLeave {
        id: String,
    },
    MountReveal {
        id: String,
        bounds: BoundsSpec,
        /// Unknown names fall back to "up"
        #[serde(default)]
        direction: Option<String>,
        #[serde(default)]
        delay: Option<f32>,
        #[serde(default)]
        once: Option<bool>,
        #[serde(default)]
        threshold: Option<f32>,
        #[serde(default)]
        stagger_children: Option<usize>,
        #[serde(default)]
        stagger_delay: Option<f32>,
    },
    MountParallax {
        id: String,
        #[serde(default)]
        bounds: Option<BoundsSpec>,
        #[serde(default)]
        hero: bool,
        #[serde(default)]
        depth: Option<f32>,
    },
    MountHover {
        id: String,
        #[serde(default)]
        preset: HoverPreset,
        #[serde(default)]
        glow: Option<bool>,
    },
    Unmount {
        id: String,
    },
    AssertMode {
        mode: String,
    },
    AssertRevealed {
        id: String,
        #[serde(default = "default_true")]
        revealed: bool,
    },
    AssertOpacity {
        id: String,
        value: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
    AssertTranslate {
        id: String,
        x: f32,
        y: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
    AssertParallaxAtRest {
        id: String,
    },
}

fn default_true() -> bool {
    true
}

fn default_tolerance() -> f32 {
    0.01
}
