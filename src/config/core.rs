use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use std::path::Path;

use super::PolylintConfig;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Repository-level configuration file name
const REPO_CONFIG: &str = "polylint.toml";

/// The embedded defaults alone, the base every other layer merges onto
pub fn default_figment() -> Figment {
    Figment::new().merge(Toml::string(DEFAULT_CONFIG))
}

/// Load the layered configuration.
///
/// Priority, lowest first: embedded defaults, user config, repository config,
/// `custom_config`, `POLYLINT_*` environment variables (`__` separates
/// nested keys, e.g. `POLYLINT_GENERAL__SOURCE_ROOT`).
pub fn load(custom_config: Option<&str>) -> Result<PolylintConfig> {
    tracing::trace!("CONFIG LOAD: Starting");

    let mut figment = default_figment()
        .merge(Toml::file(user_config_path()))
        .merge(Toml::file(REPO_CONFIG));

    if let Some(custom_path) = custom_config {
        if !Path::new(custom_path).exists() {
            tracing::warn!("Config file {custom_path} not found, ignoring it");
        }
        figment = figment.merge(Toml::file(custom_path));
    }

    figment = figment.merge(Env::prefixed("POLYLINT_").split("__"));

    let config: PolylintConfig = figment.extract().context("Invalid polylint configuration")?;
    config.validate()?;

    tracing::trace!(
        "CONFIG LOAD: {} linters, {} blacklist entries",
        config.linters.len(),
        config.blacklist.len()
    );
    Ok(config)
}

fn user_config_path() -> String {
    match std::env::var("HOME") {
        Ok(home) => format!("{home}/.config/polylint/config.toml"),
        Err(_) => "~/.config/polylint/config.toml".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linters::{Language, OutputPolicy};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_load() {
        let config: PolylintConfig = default_figment()
            .extract()
            .expect("Should parse embedded defaults");

        config.validate().unwrap();
        assert!(config.general.source_root.is_empty());
        assert_eq!(config.blacklist.len(), 25);

        let keys: Vec<Language> = config.linters.iter().map(|l| l.key).collect();
        assert_eq!(
            keys,
            vec![
                Language::Cpp,
                Language::Python,
                Language::JavaScript,
                Language::JavaScript
            ]
        );
        assert_eq!(config.linters[0].policy, OutputPolicy::Cpplint);
        assert_eq!(config.linters[1].env["PYTHONPATH"], "{root}/script");
        assert_eq!(config.linters[3].cwd.as_deref(), Some("{root}/spec"));
    }

    #[test]
    fn test_custom_config_overrides_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let custom = temp_dir.path().join("custom.toml");
        fs::write(
            &custom,
            r#"
blacklist = ["gen/out.h"]

[general]
source_root = "/srv/checkout"

[[linters]]
key = "python"
roots = ["tools"]
extensions = ["py"]
command = "ruff"
args = ["check"]
policy = "exit-status"
"#,
        )?;

        let config = load(Some(custom.to_str().unwrap()))?;
        assert_eq!(config.general.source_root, "/srv/checkout");
        assert_eq!(config.blacklist, vec!["gen/out.h".to_string()]);
        assert_eq!(config.linters.len(), 1);
        assert_eq!(config.linters[0].command, "ruff");
        assert_eq!(config.linters[0].policy, OutputPolicy::ExitStatus);
        Ok(())
    }

    #[test]
    fn test_missing_custom_config_falls_back() {
        let config = load(Some("non_existent_polylint.toml"));
        assert!(config.is_ok(), "Should handle missing custom config gracefully");
    }

    #[test]
    fn test_invalid_config_is_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let custom = temp_dir.path().join("bad.toml");
        fs::write(
            &custom,
            r#"
[[linters]]
key = "rust"
roots = ["src"]
extensions = ["rs"]
command = "clippy"
policy = "quiet"
"#,
        )?;

        assert!(load(Some(custom.to_str().unwrap())).is_err());
        Ok(())
    }
}
