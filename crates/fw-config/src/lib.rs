//! Configuration management for flatwiki.
//!
//! Parses `flatwiki.toml` with serde and discovers it in the current
//! directory or its parents. Without a file, defaults apply relative to the
//! current directory. CLI overrides are applied via [`CliSettings`].
//!
//! ```toml
//! [wiki]
//! root_dir = "data"      # holds documents/ and comments/
//! home_dir = "home"      # top-level document that titles the root
//!
//! [versions]
//! max_versions = 20      # <= 0 keeps every revision
//!
//! [comments]
//! admins = ["alice"]
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `wiki.root_dir` and each `comments.admins` entry support `${VAR}` and
//! `${VAR:-default}`.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "flatwiki.toml";

const DEFAULT_ROOT_DIR: &str = "data";
const DEFAULT_HOME_DIR: &str = "home";

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override wiki root directory.
    pub root_dir: Option<PathBuf>,
    /// Override revision limit.
    pub max_versions: Option<i64>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wiki layout (paths are relative strings from TOML).
    wiki: WikiConfigRaw,
    /// Revision retention.
    pub versions: VersionsConfig,
    /// Comment moderation.
    pub comments: CommentsConfig,

    /// Resolved wiki configuration (set after loading).
    #[serde(skip)]
    pub wiki_resolved: WikiConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct WikiConfigRaw {
    root_dir: Option<String>,
    home_dir: Option<String>,
}

/// Resolved wiki configuration with absolute paths.
#[derive(Debug, Default)]
pub struct WikiConfig {
    /// Directory holding `documents/` and `comments/`.
    pub root_dir: PathBuf,
    /// Top-level document directory used as the home page.
    pub home_dir: String,
}

/// Revision retention configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VersionsConfig {
    /// Snapshots kept per document; `<= 0` keeps all.
    pub max_versions: i64,
}

/// Comment configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    /// Users allowed to delete comments.
    pub admins: Vec<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),

    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`wiki.root_dir`").
        field: String,
        /// Error message (e.g., "${`WIKI_ROOT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `flatwiki.toml` in the current directory and its parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the result does not validate.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root_dir) = &settings.root_dir {
            self.wiki_resolved.root_dir.clone_from(root_dir);
        }
        if let Some(max_versions) = settings.max_versions {
            self.versions.max_versions = max_versions;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Default config with paths relative to `base`.
    #[must_use]
    pub fn default_with_base(base: &Path) -> Self {
        Self {
            wiki: WikiConfigRaw::default(),
            versions: VersionsConfig::default(),
            comments: CommentsConfig::default(),
            wiki_resolved: WikiConfig {
                root_dir: base.join(DEFAULT_ROOT_DIR),
                home_dir: DEFAULT_HOME_DIR.to_owned(),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any check fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let home = &self.wiki_resolved.home_dir;
        if home.is_empty() {
            return Err(ConfigError::Validation(
                "wiki.home_dir cannot be empty".to_owned(),
            ));
        }
        if home.contains(['/', '\\']) || home.starts_with('.') {
            return Err(ConfigError::Validation(format!(
                "wiki.home_dir must be a single directory name, got {home:?}"
            )));
        }
        if self.comments.admins.iter().any(String::is_empty) {
            return Err(ConfigError::Validation(
                "comments.admins cannot contain empty names".to_owned(),
            ));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref root_dir) = self.wiki.root_dir {
            self.wiki.root_dir = Some(expand::expand_env(root_dir, "wiki.root_dir")?);
        }
        for admin in &mut self.comments.admins {
            *admin = expand::expand_env(admin, "comments.admins")?;
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.wiki_resolved = WikiConfig {
            root_dir: config_dir.join(self.wiki.root_dir.as_deref().unwrap_or(DEFAULT_ROOT_DIR)),
            home_dir: self
                .wiki
                .home_dir
                .clone()
                .unwrap_or_else(|| DEFAULT_HOME_DIR.to_owned()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));

        assert_eq!(config.wiki_resolved.root_dir, PathBuf::from("/test/data"));
        assert_eq!(config.wiki_resolved.home_dir, "home");
        assert_eq!(config.versions.max_versions, 0);
        assert!(config.comments.admins.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.versions.max_versions, 0);
        assert!(config.comments.admins.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[wiki]
root_dir = "/srv/wiki"
home_dir = "start"

[versions]
max_versions = 25

[comments]
admins = ["alice", "bob"]
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/etc/flatwiki"));

        assert_eq!(config.wiki_resolved.root_dir, PathBuf::from("/srv/wiki"));
        assert_eq!(config.wiki_resolved.home_dir, "start");
        assert_eq!(config.versions.max_versions, 25);
        assert_eq!(config.comments.admins, vec!["alice", "bob"]);
    }

    #[test]
    fn test_relative_root_resolves_against_config_dir() {
        let mut config: Config = toml::from_str("[wiki]\nroot_dir = \"content\"\n").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.wiki_resolved.root_dir, PathBuf::from("/project/content"));
    }

    #[test]
    fn test_negative_max_versions_parses() {
        let config: Config = toml::from_str("[versions]\nmax_versions = -1\n").unwrap();

        assert_eq!(config.versions.max_versions, -1);
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings {
            root_dir: Some(PathBuf::from("/elsewhere")),
            max_versions: Some(3),
        });

        assert_eq!(config.wiki_resolved.root_dir, PathBuf::from("/elsewhere"));
        assert_eq!(config.versions.max_versions, 3);
    }

    #[test]
    fn test_apply_empty_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.wiki_resolved.root_dir, PathBuf::from("/test/data"));
        assert_eq!(config.versions.max_versions, 0);
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: variable names are unique to this test
        unsafe {
            std::env::set_var("FW_TEST_CONFIG_ROOT", "/mnt/wiki");
            std::env::set_var("FW_TEST_CONFIG_ADMIN", "carol");
        }

        let toml = r#"
[wiki]
root_dir = "${FW_TEST_CONFIG_ROOT}"

[comments]
admins = ["${FW_TEST_CONFIG_ADMIN}", "${FW_TEST_CONFIG_UNSET:-dave}"]
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.wiki_resolved.root_dir, PathBuf::from("/mnt/wiki"));
        assert_eq!(config.comments.admins, vec!["carol", "dave"]);

        unsafe {
            std::env::remove_var("FW_TEST_CONFIG_ROOT");
            std::env::remove_var("FW_TEST_CONFIG_ADMIN");
        }
    }

    #[test]
    fn test_validate_home_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));

        for bad in ["", "a/b", ".hidden", "..\\x"] {
            bad.clone_into(&mut config.wiki_resolved.home_dir);
            assert!(
                matches!(config.validate(), Err(ConfigError::Validation(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_validate_empty_admin() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.comments.admins = vec!["alice".to_owned(), String::new()];

        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[versions]\nmax_versions = 5\n").unwrap();

        let config = Config::load(
            Some(&path),
            Some(&CliSettings {
                max_versions: Some(7),
                ..CliSettings::default()
            }),
        )
        .unwrap();

        assert_eq!(config.wiki_resolved.root_dir, temp.path().join("data"));
        assert_eq!(config.versions.max_versions, 7);
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/flatwiki.toml")), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[versions\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
