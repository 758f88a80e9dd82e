//! File discovery for JavaScript linting
//!
//! Files are found through the configured include globs (or by extension when
//! no include pattern is configured), then filtered by exclude globs and the
//! root `.gitignore`.

use crate::config::UnchainConfig;
use crate::{Result, UnchainError};
use glob::{Pattern, glob};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Extensions linted when no include pattern is configured
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "mjs", "cjs"];

/// Trait for file discovery functionality
pub trait FileDiscovery {
    /// Discover JavaScript files based on configuration patterns
    fn discover_files(&self, config: &UnchainConfig) -> Result<Vec<PathBuf>>;

    /// Check if a file should be included based on configuration
    fn should_include(&self, path: &Path, config: &UnchainConfig) -> bool;
}

/// Default implementation of file discovery
#[derive(Debug, Clone)]
pub struct DefaultFileDiscovery {
    /// Root directory for file discovery
    pub root_dir: PathBuf,
}

fn compile_patterns(patterns: &[String], what: &str) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| {
                UnchainError::config_error(format!("Invalid {what} pattern '{p}': {e}"))
            })
        })
        .collect()
}

/// Turn one `.gitignore` line into a glob pattern
fn gitignore_to_glob(line: &str) -> String {
    let line = line.trim_start_matches('/');
    if let Some(dir) = line.strip_suffix('/') {
        format!("**/{dir}/**")
    } else if line.contains('/') {
        line.to_string()
    } else {
        format!("**/{line}")
    }
}

fn has_default_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| DEFAULT_EXTENSIONS.contains(&ext.as_str()))
}

impl DefaultFileDiscovery {
    /// Create a new file discovery instance
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Patterns from the root `.gitignore`, if there is one
    fn load_ignore_patterns(&self) -> Vec<Pattern> {
        let path = self.root_dir.join(".gitignore");
        if !path.is_file() {
            return Vec::new();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let patterns: Vec<Pattern> = content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty() && !line.starts_with('#'))
                    // negations are not supported
                    .filter(|line| !line.starts_with('!'))
                    .filter_map(|line| Pattern::new(&gitignore_to_glob(line)).ok())
                    .collect();
                debug!("Loaded {} patterns from .gitignore", patterns.len());
                patterns
            }
            Err(e) => {
                warn!("Failed to read .gitignore: {}", e);
                Vec::new()
            }
        }
    }

    /// Check if a path matches any pattern, relative to the root
    fn matches_any(&self, path: &Path, patterns: &[Pattern]) -> bool {
        let relative = path.strip_prefix(&self.root_dir).unwrap_or(path);
        let text = relative.to_string_lossy();
        patterns.iter().any(|pattern| pattern.matches(&text))
    }

    /// Discover files using glob patterns
    fn discover_with_globs(&self, patterns: &[String]) -> Result<Vec<PathBuf>> {
        let root = Pattern::escape(&self.root_dir.to_string_lossy());
        let mut files = Vec::new();

        for pattern in patterns {
            let full_pattern = if Path::new(pattern).is_absolute() {
                pattern.clone()
            } else {
                format!("{root}/{pattern}")
            };

            let entries = glob(&full_pattern).map_err(|e| {
                UnchainError::config_error(format!("Invalid include pattern '{pattern}': {e}"))
            })?;

            for entry in entries {
                match entry {
                    Ok(path) if path.is_file() => files.push(path),
                    Ok(_) => {}
                    Err(e) => warn!("Glob entry error: {}", e),
                }
            }
        }

        Ok(files)
    }

    /// Discover files by walking directory tree
    fn discover_by_walking(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.root_dir)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| has_default_extension(path))
            .collect()
    }
}

impl FileDiscovery for DefaultFileDiscovery {
    fn discover_files(&self, config: &UnchainConfig) -> Result<Vec<PathBuf>> {
        info!("Discovering JavaScript files in {}", self.root_dir.display());

        let files = config.files_config();
        let include = files.include.unwrap_or_default();
        let exclude = compile_patterns(&files.exclude.unwrap_or_default(), "exclude")?;
        let ignored = self.load_ignore_patterns();

        let mut discovered = if include.is_empty() {
            self.discover_by_walking()
        } else {
            self.discover_with_globs(&include)?
        };

        discovered.retain(|path| {
            !self.matches_any(path, &exclude) && !self.matches_any(path, &ignored)
        });

        let unique: BTreeSet<PathBuf> = discovered
            .into_iter()
            .map(|path| std::fs::canonicalize(&path).unwrap_or(path))
            .collect();

        info!("Discovered {} JavaScript files", unique.len());
        debug!("Files: {:?}", unique);

        Ok(unique.into_iter().collect())
    }

    fn should_include(&self, path: &Path, config: &UnchainConfig) -> bool {
        let files = config.files_config();
        let include = files.include.unwrap_or_default();

        let matches_include = if include.is_empty() {
            has_default_extension(path)
        } else {
            compile_patterns(&include, "include")
                .map(|patterns| self.matches_any(path, &patterns))
                .unwrap_or(false)
        };
        if !matches_include {
            return false;
        }

        let excluded = compile_patterns(&files.exclude.unwrap_or_default(), "exclude")
            .map(|patterns| self.matches_any(path, &patterns))
            .unwrap_or(false);

        !excluded && !self.matches_any(path, &self.load_ignore_patterns())
    }
}

/// Resolve command-line paths into the files to lint
///
/// Files are taken as given, directories are searched with
/// [`DefaultFileDiscovery`], and anything else is expanded as a glob. An empty
/// list searches `cwd`.
pub fn resolve_lint_targets(
    paths: &[PathBuf],
    cwd: &Path,
    config: &UnchainConfig,
) -> Result<Vec<PathBuf>> {
    if paths.is_empty() {
        return DefaultFileDiscovery::new(cwd).discover_files(config);
    }

    let mut files = BTreeSet::new();
    for path in paths {
        if path.is_file() {
            files.insert(path.clone());
        } else if path.is_dir() {
            files.extend(DefaultFileDiscovery::new(path).discover_files(config)?);
        } else {
            let pattern = path.to_string_lossy();
            let entries = glob(&pattern).map_err(|e| {
                UnchainError::io_error(
                    path,
                    std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
                )
            })?;

            let before = files.len();
            files.extend(
                entries
                    .filter_map(|entry| entry.ok())
                    .filter(|p| p.is_file() && has_default_extension(p)),
            );
            if files.len() == before {
                return Err(UnchainError::io_error(
                    path,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
                ));
            }
        }
    }

    Ok(files.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilesConfiguration;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_config() -> UnchainConfig {
        UnchainConfig {
            files: Some(FilesConfiguration {
                include: Some(vec!["**/*.js".to_string()]),
                exclude: Some(vec!["**/vendor/**".to_string()]),
            }),
            ..Default::default()
        }
    }

    fn canonical_root(temp_dir: &TempDir) -> PathBuf {
        temp_dir.path().canonicalize().unwrap()
    }

    #[test]
    fn test_discover_files_basic() {
        let temp_dir = TempDir::new().unwrap();
        let root = canonical_root(&temp_dir);

        fs::write(root.join("b.js"), "b = 1;").unwrap();
        fs::write(root.join("a.js"), "a = 1;").unwrap();
        fs::write(root.join("readme.md"), "# README").unwrap();
        fs::create_dir_all(root.join("vendor")).unwrap();
        fs::write(root.join("vendor/lib.js"), "x = 1;").unwrap();

        let files = DefaultFileDiscovery::new(&root)
            .discover_files(&create_test_config())
            .unwrap();

        assert_eq!(files, vec![root.join("a.js"), root.join("b.js")]);
    }

    #[test]
    fn test_default_config_skips_node_modules() {
        let temp_dir = TempDir::new().unwrap();
        let root = canonical_root(&temp_dir);

        fs::create_dir_all(root.join("node_modules/dep")).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("node_modules/dep/index.js"), "").unwrap();
        fs::write(root.join("src/app.mjs"), "").unwrap();
        fs::write(root.join("src/legacy.cjs"), "").unwrap();

        let files = DefaultFileDiscovery::new(&root)
            .discover_files(&UnchainConfig::default())
            .unwrap();

        assert_eq!(
            files,
            vec![root.join("src/app.mjs"), root.join("src/legacy.cjs")]
        );
    }

    #[test]
    fn test_walk_fallback_without_include_patterns() {
        let temp_dir = TempDir::new().unwrap();
        let root = canonical_root(&temp_dir);
        fs::write(root.join("a.js"), "").unwrap();
        fs::write(root.join("a.ts"), "").unwrap();

        let config = UnchainConfig {
            files: Some(FilesConfiguration {
                include: Some(vec![]),
                exclude: None,
            }),
            ..Default::default()
        };
        let files = DefaultFileDiscovery::new(&root).discover_files(&config).unwrap();
        assert_eq!(files, vec![root.join("a.js")]);
    }

    #[test]
    fn test_should_include() {
        let temp_dir = TempDir::new().unwrap();
        let discovery = DefaultFileDiscovery::new(temp_dir.path());
        let config = create_test_config();

        assert!(discovery.should_include(Path::new("test.js"), &config));
        assert!(!discovery.should_include(Path::new("test.md"), &config));
        assert!(!discovery.should_include(Path::new("vendor/test.js"), &config));
    }

    #[test]
    fn test_gitignore_support() {
        let temp_dir = TempDir::new().unwrap();
        let root = canonical_root(&temp_dir);

        fs::write(root.join(".gitignore"), "# build output\ndist/\n*.min.js\n").unwrap();
        fs::create_dir_all(root.join("dist")).unwrap();
        fs::write(root.join("dist/bundle.js"), "").unwrap();
        fs::write(root.join("app.min.js"), "").unwrap();
        fs::write(root.join("app.js"), "").unwrap();

        let files = DefaultFileDiscovery::new(&root)
            .discover_files(&create_test_config())
            .unwrap();

        assert_eq!(files, vec![root.join("app.js")]);
    }

    #[test]
    fn test_resolve_lint_targets() {
        let temp_dir = TempDir::new().unwrap();
        let root = canonical_root(&temp_dir);
        fs::create_dir_all(root.join("lib")).unwrap();
        fs::write(root.join("main.js"), "").unwrap();
        fs::write(root.join("lib/util.js"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();

        let config = create_test_config();
        let explicit = root.join("notes.txt");
        let files = resolve_lint_targets(
            &[explicit.clone(), root.join("lib"), root.join("*.js")],
            &root,
            &config,
        )
        .unwrap();
        assert_eq!(files, vec![root.join("lib/util.js"), root.join("main.js"), explicit]);

        let missing = resolve_lint_targets(&[root.join("missing.js")], &root, &config);
        assert!(matches!(missing, Err(UnchainError::IoError { .. })));
    }

    #[test]
    fn test_gitignore_to_glob() {
        assert_eq!(gitignore_to_glob("dist/"), "**/dist/**");
        assert_eq!(gitignore_to_glob("*.log"), "**/*.log");
        assert_eq!(gitignore_to_glob("/build/out"), "build/out");
    }
}
