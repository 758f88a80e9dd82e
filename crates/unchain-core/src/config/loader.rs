//! Configuration file discovery and loading

use super::UnchainConfig;
use crate::{Result, UnchainError};
use std::path::{Path, PathBuf};

/// Config file names in lookup priority order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".unchainrc.json",
    ".unchainrc.jsonc",
    ".unchainrc.toml",
    "unchain.yaml",
    "unchain.yml",
    "unchain.json",
];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover config file by traversing upward from start_path
    ///
    /// Every directory is checked for [`CONFIG_FILE_NAMES`] in order, moving up
    /// until a config is found or the filesystem root is reached.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path.canonicalize().map_err(|e| {
            UnchainError::config_error(format!("Invalid path '{}': {e}", start_path.display()))
        })?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<UnchainConfig> {
        let config = UnchainConfig::load(path)?;
        tracing::info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Load config from path or auto-discover
    ///
    /// An explicit path must exist. Without one, the search starts at
    /// `start_dir` (or the current directory), and defaults are used when no
    /// config file is found.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<UnchainConfig> {
        if let Some(path) = custom_path {
            if !path.is_file() {
                return Err(UnchainError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(UnchainConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleSeverity;
    use std::fs;
    use tempfile::TempDir;

    fn create_temp_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
        let path = dir.join(filename);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_from_file_jsonc() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            ".unchainrc.jsonc",
            r#"{
                // comments and trailing commas are fine
                "linter": {
                    "rules": { "style/no-chained-assignments": "error", },
                },
            }"#,
        );

        let config = ConfigLoader::load_from_file(&config_path).unwrap();
        assert_eq!(
            config.rule_severity("style/no-chained-assignments"),
            Some(RuleSeverity::Error)
        );
    }

    #[test]
    fn test_load_from_file_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            ".unchainrc.toml",
            r#"
[autofix]
maxPasses = 4
unsafe = true
"#,
        );

        let config = ConfigLoader::load_from_file(&config_path).unwrap();
        let fix = config.fix_config();
        assert_eq!(fix.max_passes, 4);
        assert!(fix.apply_unsafe);
    }

    #[test]
    fn test_load_from_file_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            "unchain.yaml",
            "files:\n  include:\n    - \"src/**/*.js\"\n",
        );

        let config = ConfigLoader::load_from_file(&config_path).unwrap();
        assert_eq!(config.files_config().include.unwrap(), vec!["src/**/*.js"]);
    }

    #[test]
    fn test_auto_discover_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("src/nested");
        fs::create_dir_all(&nested).unwrap();
        create_temp_config(temp_dir.path(), "unchain.json", "{}");

        let found = ConfigLoader::auto_discover(&nested).unwrap();
        assert_eq!(found.unwrap().file_name().unwrap(), "unchain.json");
    }

    #[test]
    fn test_auto_discover_priority() {
        let temp_dir = TempDir::new().unwrap();
        create_temp_config(temp_dir.path(), "unchain.json", "{}");
        create_temp_config(temp_dir.path(), "unchain.yaml", "linter:\n  enabled: true\n");
        create_temp_config(temp_dir.path(), ".unchainrc.toml", "");

        let found = ConfigLoader::auto_discover(temp_dir.path()).unwrap();
        assert_eq!(found.unwrap().file_name().unwrap(), ".unchainrc.toml");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Some(Path::new("nonexistent.json")), None);
        assert!(matches!(result, Err(UnchainError::ConfigError { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(temp_dir.path(), "unchain.json", "{ invalid json }");

        let result = ConfigLoader::load_from_file(&config_path);
        assert!(matches!(result, Err(UnchainError::ConfigError { .. })));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(temp_dir.path(), "unchain.ini", "x=1");
        assert!(ConfigLoader::load_from_file(&config_path).is_err());
    }
}
