//! End-to-end headless scenarios

use glint_site::{run_scenario, HeadlessRunConfig, ReportStatus, Site, SiteConfig};
use glint_theme::{FileStorage, MemoryStorage, NoopMarker, ThemeMode};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn site() -> Site {
    Site::new(SiteConfig::default(), MemoryStorage::new(), NoopMarker)
}

#[test]
fn theme_survives_reload() {
    let mut site = site();
    let outcome = run_scenario(
        &mut site,
        r#"{
            "name": "theme-reload",
            "steps": [
                { "type": "assert_mode", "mode": "portfolio" },
                { "type": "toggle_theme" },
                { "type": "assert_mode", "mode": "kawaii" },
                { "type": "reload" },
                { "type": "assert_mode", "mode": "kawaii" },
                { "type": "toggle_theme" },
                { "type": "toggle_theme" },
                { "type": "assert_mode", "mode": "kawaii" }
            ]
        }"#,
        HeadlessRunConfig::default(),
    )
    .unwrap();

    let report = outcome.report();
    assert_eq!(report.status, ReportStatus::Passed);
    assert_eq!(report.scenario.as_deref(), Some("theme-reload"));
    assert_eq!(report.snapshot.mode, Some(ThemeMode::Alternate));
}

#[test]
fn reload_through_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.toml");

    let mut first = Site::new(SiteConfig::default(), FileStorage::new(&path), NoopMarker);
    first.set_theme(ThemeMode::Alternate);

    let second = Site::new(SiteConfig::default(), FileStorage::new(&path), NoopMarker);
    assert_eq!(second.mode(), ThemeMode::Alternate);
}

#[test]
fn invalid_set_theme_is_ignored() {
    let mut site = site();
    let outcome = run_scenario(
        &mut site,
        r#"{ "steps": [
            { "type": "set_theme", "mode": "neon" },
            { "type": "assert_mode", "mode": "portfolio" },
            { "type": "set_theme", "mode": "Kawaii" },
            { "type": "assert_mode", "mode": "kawaii" }
        ] }"#,
        HeadlessRunConfig::default(),
    )
    .unwrap();
    assert!(!outcome.is_failed());
}

#[test]
fn left_reveal_with_delay() {
    let mut site = site();
    // Viewport 1280x720; element spans y 1000..1200
    let outcome = run_scenario(
        &mut site,
        r#"{ "steps": [
            { "type": "mount_reveal", "id": "about",
              "bounds": { "x": 0, "y": 1000, "width": 600, "height": 200 },
              "direction": "left", "delay": 0.3 },
            { "type": "assert_translate", "id": "about", "x": 70, "y": 0 },
            { "type": "assert_opacity", "id": "about", "value": 0 },

            { "type": "scroll", "y": 310 },
            { "type": "wait", "ms": 1000 },
            { "type": "assert_revealed", "id": "about", "revealed": false },

            { "type": "scroll", "y": 320 },
            { "type": "assert_revealed", "id": "about" },
            { "type": "wait", "ms": 200 },
            { "type": "assert_translate", "id": "about", "x": 70, "y": 0 },

            { "type": "wait", "ms": 2500 },
            { "type": "assert_translate", "id": "about", "x": 0, "y": 0 },
            { "type": "assert_opacity", "id": "about", "value": 1 }
        ] }"#,
        HeadlessRunConfig::default(),
    )
    .unwrap();

    let report = outcome.report();
    assert_eq!(report.status, ReportStatus::Passed, "{:?}", report.message);
    assert_eq!(report.snapshot.reveals["about"].reveal_count, 1);
}

#[test]
fn parallax_relaxes_after_leave() {
    let mut site = site();
    let outcome = run_scenario(
        &mut site,
        r#"{ "steps": [
            { "type": "mount_parallax", "id": "hero",
              "bounds": { "x": 0, "y": 0, "width": 1280, "height": 720 } },
            { "type": "pointer_move", "x": 1280, "y": 360 },
            { "type": "wait", "ms": 3000 },
            { "type": "assert_translate", "id": "hero", "x": 15, "y": 0 },
            { "type": "pointer_leave" },
            { "type": "tick", "frames": 1 },
            { "type": "assert_parallax_at_rest", "id": "hero" }
        ] }"#,
        HeadlessRunConfig::default(),
    )
    .unwrap();

    // One frame after leaving the offset is still relaxing
    let report = outcome.report();
    assert_eq!(report.status, ReportStatus::Failed);
    assert_eq!(report.assertion.as_deref(), Some("assert_parallax_at_rest"));
    assert_eq!(report.failed_step_index, Some(6));
}

#[test]
fn hover_glow_uses_theme() {
    let storage = Arc::new(MemoryStorage::new());
    storage.insert("theme", "kawaii");
    let mut site = Site::new(SiteConfig::default(), storage, NoopMarker);

    let outcome = run_scenario(
        &mut site,
        r#"{ "steps": [
            { "type": "mount_hover", "id": "card", "preset": "card" },
            { "type": "hover_enter", "id": "card" },
            { "type": "wait", "ms": 1000 }
        ] }"#,
        HeadlessRunConfig::default(),
    )
    .unwrap();

    let hover = &outcome.report().snapshot.hovers["card"];
    assert!(hover.hovering);
    assert!((hover.scale - 1.03).abs() < 1e-3);
    assert!(hover.glow_opacity.unwrap() > 0.7);
}

#[test]
fn malformed_steps_are_errors() {
    let mut site = site();
    let err = run_scenario(
        &mut site,
        r#"{ "steps": [{ "type": "hover_enter", "id": "nope" }] }"#,
        HeadlessRunConfig::default(),
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("unknown element id"));

    let err = run_scenario(
        &mut site,
        r#"{ "steps": [
            { "type": "mount_hover", "id": "a" },
            { "type": "mount_hover", "id": "a" }
        ] }"#,
        HeadlessRunConfig::default(),
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("already mounted"));
}

#[test]
fn bundled_scenarios_pass() {
    let bundled = [
        include_str!("../../../scenarios/theme_reload.json"),
        include_str!("../../../scenarios/reveal_left.json"),
        include_str!("../../../scenarios/hover_parallax.json"),
    ];
    for input in bundled {
        let mut site = site();
        let outcome = run_scenario(&mut site, input, HeadlessRunConfig::default()).unwrap();
        let report = outcome.report();
        assert_eq!(
            report.status,
            ReportStatus::Passed,
            "{:?}: {:?}",
            report.scenario,
            report.message
        );
    }
}
