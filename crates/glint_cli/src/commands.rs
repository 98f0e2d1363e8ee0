//! Subcommand implementations

use anyhow::{Context, Result};
use glint_site::{run_loaded_scenario, HeadlessRunConfig, HeadlessScenario, Site, SiteConfig};
use glint_theme::{FileStorage, MemoryStorage, NoopMarker, ThemeMode, ThemeStore};
use std::path::Path;
use std::process::ExitCode;

pub fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    let config = match path {
        Some(path) => SiteConfig::load(path)?,
        None => SiteConfig::load_from_dir(Path::new("."))?,
    };
    Ok(config)
}

pub fn run(
    config: &SiteConfig,
    scenario_path: &Path,
    report_path: Option<&Path>,
    persist: bool,
    run_config: HeadlessRunConfig,
) -> Result<ExitCode> {
    let scenario = HeadlessScenario::from_path(scenario_path)?;

    let mut site = if persist {
        Site::new(config.clone(), FileStorage::new(&config.theme.storage_path), NoopMarker)
    } else {
        Site::new(config.clone(), MemoryStorage::new(), NoopMarker)
    };

    tracing::info!(
        scenario = %scenario_path.display(),
        steps = scenario.steps.len(),
        mode = %site.mode(),
        "running scenario"
    );
    let outcome = run_loaded_scenario(&mut site, &scenario, run_config)?;
    let failed = outcome.is_failed();
    let report = outcome.into_report();

    match report_path {
        Some(path) => {
            report
                .write_to_path(path)
                .with_context(|| format!("failed to write report {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => report.write_to_writer(&mut std::io::stdout().lock())?,
    }

    if failed {
        tracing::error!(
            step = ?report.failed_step_index,
            reason = report.message.as_deref().unwrap_or_default(),
            "scenario failed"
        );
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn open_store(config: &SiteConfig) -> ThemeStore {
    let store = ThemeStore::new(FileStorage::new(&config.theme.storage_path), NoopMarker)
        .with_key(config.theme.storage_key.clone());
    store.initialize(config.theme.default_mode);
    store
}

pub fn theme_get(config: &SiteConfig) -> ThemeMode {
    open_store(config)
        .mode()
        .unwrap_or(config.theme.default_mode)
}

pub fn theme_toggle(config: &SiteConfig) -> Result<ThemeMode> {
    let store = open_store(config);
    store
        .toggle()
        .context("theme store failed to initialize")
}

pub fn theme_set(config: &SiteConfig, mode: &str) -> Result<ThemeMode> {
    let mode: ThemeMode = mode.parse()?;
    let store = open_store(config);
    store.set_mode(mode);
    Ok(mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.theme.storage_path = dir.join("storage.toml");
        config
    }

    #[test]
    fn test_theme_commands_persist() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        assert_eq!(theme_get(&config), ThemeMode::Default);
        assert_eq!(theme_toggle(&config).unwrap(), ThemeMode::Alternate);
        assert_eq!(theme_get(&config), ThemeMode::Alternate);
        assert_eq!(theme_set(&config, "Portfolio").unwrap(), ThemeMode::Default);
        assert_eq!(theme_get(&config), ThemeMode::Default);
    }

    #[test]
    fn test_theme_set_rejects_unknown_mode() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        assert!(theme_set(&config, "neon").is_err());
        assert_eq!(theme_get(&config), ThemeMode::Default);
    }
}
