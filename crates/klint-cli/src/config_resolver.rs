//! Finds and loads the configuration for a run.
//!
//! Lookup order:
//!
//! 1. `--config <path>`
//! 2. the nearest `klint.toml` or `.klint.toml` in the working directory or
//!    any of its ancestors, so a Gradle module picks up the root config
//! 3. `$KLINT_CONFIG_DIR/config.toml`, else `~/.klint/config.toml`
//! 4. built-in defaults

use anyhow::{Context, Result};
use klint::Config;
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_NAMES: &[&str] = &["klint.toml", ".klint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the working directory or one of its ancestors.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the config file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }
}

/// A loaded configuration and the file it was read from.
#[derive(Debug)]
pub struct ResolvedConfig {
    /// Parsed configuration.
    pub config: Config,
    /// Where it was found.
    pub source: ConfigSource,
}

/// Locates and parses the configuration for a run started in `start_dir`.
///
/// # Errors
///
/// Returns an error if the located file cannot be read or parsed. A missing
/// `--config` file is an error, never a silent fallback.
pub fn load(start_dir: &Path, explicit: Option<&Path>) -> Result<ResolvedConfig> {
    load_with_global(start_dir, explicit, global_config_dir().as_deref())
}

fn load_with_global(
    start_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<&Path>,
) -> Result<ResolvedConfig> {
    let source = locate(start_dir, explicit, global_dir);
    let config = match source.path() {
        Some(path) => {
            tracing::info!("Using config: {}", path.display());
            Config::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?
        }
        None => {
            tracing::debug!("No klint.toml found, using defaults");
            Config::default()
        }
    };
    Ok(ResolvedConfig { config, source })
}

fn locate(start_dir: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    let start = start_dir
        .canonicalize()
        .unwrap_or_else(|_| start_dir.to_path_buf());
    if let Some(path) = start.ancestors().find_map(project_config) {
        return ConfigSource::Project(path);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|path| path.is_file())
        .map_or(ConfigSource::Default, ConfigSource::Global)
}

fn project_config(dir: &Path) -> Option<PathBuf> {
    PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// The global config directory: `$KLINT_CONFIG_DIR`, else `~/.klint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("KLINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".klint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn gradle_project() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("app/src/main/kotlin")).unwrap();
        fs::write(tmp.path().join("klint.toml"), "report-type = \"pmd\"\n").unwrap();
        tmp
    }

    #[test]
    fn module_directory_uses_the_root_config() {
        let project = gradle_project();
        let module = project.path().join("app/src/main/kotlin");

        let resolved = load_with_global(&module, None, None).unwrap();
        assert!(matches!(resolved.source, ConfigSource::Project(_)));
        assert_eq!(resolved.config.report_type.as_deref(), Some("pmd"));
    }

    #[test]
    fn nearest_config_wins() {
        let project = gradle_project();
        let app = project.path().join("app");
        fs::write(app.join(".klint.toml"), "report-type = \"xcode\"\n").unwrap();

        let resolved = load_with_global(&app.join("src"), None, None).unwrap();
        assert_eq!(resolved.config.report_type.as_deref(), Some("xcode"));
    }

    #[test]
    fn plain_name_preferred_in_the_same_directory() {
        let project = gradle_project();
        fs::write(project.path().join(".klint.toml"), "report-type = \"json\"\n").unwrap();

        let resolved = load_with_global(project.path(), None, None).unwrap();
        assert_eq!(resolved.config.report_type.as_deref(), Some("pmd"));
    }

    #[test]
    fn directory_named_like_a_config_is_skipped() {
        let project = TempDir::new().unwrap();
        fs::create_dir(project.path().join("klint.toml")).unwrap();

        let resolved = load_with_global(project.path(), None, None).unwrap();
        assert_eq!(resolved.source, ConfigSource::Default);
    }

    #[test]
    fn explicit_config_must_exist() {
        let project = gradle_project();
        let missing = project.path().join("missing.toml");

        let err = load_with_global(project.path(), Some(&missing), None).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn global_config_used_outside_projects() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "disable-rules = [\"long_line\"]\n").unwrap();

        let resolved = load_with_global(project.path(), None, Some(global.path())).unwrap();
        assert_eq!(
            resolved.source,
            ConfigSource::Global(global.path().join("config.toml"))
        );
        assert_eq!(resolved.config.disable_rules, vec!["long_line"]);
    }

    #[test]
    fn defaults_when_nothing_is_found() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        let resolved = load_with_global(project.path(), None, Some(global.path())).unwrap();
        assert!(resolved.source.path().is_none());
        assert!(resolved.config.enable_rules.is_none());
    }

    #[test]
    fn malformed_config_is_an_error() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("klint.toml"), "enable-rules = 3\n").unwrap();

        assert!(load_with_global(project.path(), None, None).is_err());
    }
}
