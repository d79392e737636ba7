use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The starter configuration TOML content, embedded from
/// `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Tool configuration. Every field has a default, so an absent file and an
/// empty file both yield a working (if degraded) configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub store: StoreConfig,
    pub github: GithubConfig,
    pub dashboard: DashboardConfig,
}

/// Document store connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Base URL of the document store; `None` disables store queries.
    pub base_url: Option<String>,

    /// Collection holding the member documents.
    pub collection: String,

    /// API key for the document store.
    pub api_key: Option<String>,
}

/// GitHub API settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GithubConfig {
    /// Base URL of the GitHub REST API.
    pub base_url: String,

    /// Access token; `None` means anonymous and degraded.
    pub token: Option<String>,
}

/// Dashboard behavior settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// GitHub handle of the dashboard administrator.
    pub admin_handle: Option<String>,

    /// Days covered by the pull-request trend.
    pub trend_days: u32,

    /// Rows kept in leaderboards.
    pub leaderboard_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            collection: "members".to_string(),
            api_key: None,
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            token: None,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            admin_handle: None,
            trend_days: 14,
            leaderboard_size: 10,
        }
    }
}

impl Config {
    /// The configuration file location: the explicit path when one was given,
    /// otherwise `teampulse/config.toml` under the platform config directory.
    pub fn locate(explicit: Option<&Utf8Path>) -> Result<Utf8PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        let dirs = BaseDirs::new().into_app_err("could not determine the configuration directory")?;
        let path = dirs.config_dir().join("teampulse").join("config.toml");

        Utf8PathBuf::from_path_buf(path).map_err(|path| app_err!("configuration path '{}' is not valid UTF-8", path.display()))
    }

    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Write the starter configuration to `path`, refusing to overwrite an
    /// existing file unless `force` is set.
    pub fn save_starter(path: &Utf8Path, force: bool) -> Result<()> {
        if !force && path.exists() {
            return Err(app_err!("configuration file '{path}' already exists, pass --force to overwrite it"));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).into_app_err_with(|| format!("creating configuration directory '{parent}'"))?;
        }

        fs::write(path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing starter configuration to '{path}'"))
    }

    /// Whether `handle` is the configured administrator account. The
    /// comparison ignores case; with no administrator configured, everyone is
    /// denied.
    #[must_use]
    pub fn is_admin(&self, handle: &str) -> bool {
        self.dashboard
            .admin_handle
            .as_deref()
            .map(str::trim)
            .filter(|admin| !admin.is_empty())
            .is_some_and(|admin| admin.eq_ignore_ascii_case(handle.trim()))
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.dashboard.trend_days == 0 {
            return Err(app_err!("dashboard.trend_days must be at least 1"));
        }

        if self.dashboard.leaderboard_size == 0 {
            return Err(app_err!("dashboard.leaderboard_size must be at least 1"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();

        assert_eq!(config.store.collection, "members");
        assert_eq!(config.github.base_url, "https://api.github.com");
        assert_eq!(config.dashboard.trend_days, 14);
        assert_eq!(config.dashboard.leaderboard_size, 10);
    }

    #[test]
    fn test_starter_toml_matches_defaults() {
        let parsed: Config = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_parse_full_config() {
        let text = r#"
            [store]
            base_url = "https://store.example.com/v1"
            collection = "people"
            api_key = "secret"

            [github]
            base_url = "https://github.example.com/api/v3"
            token = "ghp_x"

            [dashboard]
            admin_handle = "octocat"
            trend_days = 30
            leaderboard_size = 5
        "#;

        let config: Config = toml::from_str(text).unwrap();
        config.validate().unwrap();

        assert_eq!(config.store.base_url.as_deref(), Some("https://store.example.com/v1"));
        assert_eq!(config.store.collection, "people");
        assert_eq!(config.github.token.as_deref(), Some("ghp_x"));
        assert_eq!(config.dashboard.trend_days, 30);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("[dashboard]\nrows = 3\n").is_err());
    }

    #[test]
    fn test_validate_rejects_zero_trend_days() {
        let mut config = Config::default();
        config.dashboard.trend_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_leaderboard_size() {
        let mut config = Config::default();
        config.dashboard.leaderboard_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_admin_ignores_case() {
        let mut config = Config::default();
        config.dashboard.admin_handle = Some("Octocat".to_string());

        assert!(config.is_admin("octocat"));
        assert!(config.is_admin(" OCTOCAT "));
        assert!(!config.is_admin("someone-else"));
    }

    #[test]
    fn test_is_admin_denies_when_unconfigured() {
        let config = Config::default();
        assert!(!config.is_admin("octocat"));

        let mut blank = Config::default();
        blank.dashboard.admin_handle = Some("  ".to_string());
        assert!(!blank.is_admin("octocat"));
    }

    #[test]
    fn test_locate_prefers_explicit_path() {
        let path = Config::locate(Some(Utf8Path::new("/tmp/teampulse.toml"))).unwrap();
        assert_eq!(path, Utf8PathBuf::from("/tmp/teampulse.toml"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri does not support file system access")]
    fn test_load_missing_file_uses_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join("config.toml")).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri does not support file system access")]
    fn test_save_starter_then_load() {
        let temp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join("nested").join("config.toml")).unwrap();

        Config::save_starter(&path, false).unwrap();
        let loaded = Config::load(&path).unwrap();

        assert_eq!(loaded, Config::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri does not support file system access")]
    fn test_save_starter_refuses_overwrite_without_force() {
        let temp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(temp.path().join("config.toml")).unwrap();

        Config::save_starter(&path, false).unwrap();
        assert!(Config::save_starter(&path, false).is_err());
        Config::save_starter(&path, true).unwrap();
    }
}
