//! Configuration file loading and environment variable handling.
//!
//! Precedence: CLI args > Environment vars > Config file > Defaults

use pickline_core::{EngineConfig, TargetDigit};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Default document location when nothing else is configured.
pub const DEFAULT_SOURCE: &str = "predictions.json";

/// Default config file content for `--config-init`.
pub const DEFAULT_CONFIG: &str = r#"# Pickline configuration
# See: pickline --help for all options

# Document to read: a path, "-" for stdin, or an http(s) URL
source = "predictions.json"

# Leading digit applied to Game 2 codes (0-9), unset for none
# target = 9

# History rows to show
limit = 20

# Disable colored output
no_color = false

# URL fetch timeout in seconds
url_timeout = 30

# Maximum response size for URL fetches (K, M, G suffixes)
url_max_size = "10M"

# Re-fetch every N seconds (0 = run once)
watch = 0

[engine]
# "reject" codes longer than three digits, or "keep-last" three
overflow = "reject"
# Offset and label for the last-updated line
utc_offset_minutes = -300
zone_label = "EST"
# Date shapes to switch off (see pickline --shapes)
disabled_shapes = []
"#;

/// Configuration loaded from file and environment.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: Option<String>,
    pub target: Option<u8>,
    pub limit: Option<usize>,
    pub no_color: Option<bool>,
    pub url_timeout: Option<u64>,
    pub url_max_size: Option<String>,
    pub watch: Option<u64>,
    pub engine: EngineConfig,
}

impl Config {
    /// Get the config file path.
    ///
    /// - Linux/macOS: `~/.config/pickline/config.toml`
    /// - Windows: `%APPDATA%\pickline\config.toml`
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pickline").join("config.toml"))
    }

    /// Load config from file. Returns default if file doesn't exist.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };

        let Ok(contents) = fs::read_to_string(&path) else {
            return Self::default();
        };

        toml::from_str(&contents).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Read value from environment variable.
    fn env_var<T: std::str::FromStr>(name: &str) -> Option<T> {
        std::env::var(name).ok()?.parse().ok()
    }

    /// Get source with precedence: env > config > default.
    pub fn source(&self) -> String {
        std::env::var("PICKLINE_SOURCE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.source.clone())
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string())
    }

    /// Get target digit with precedence: env > config > none.
    ///
    /// Values outside `0..=9` are ignored.
    pub fn target(&self) -> Option<TargetDigit> {
        Self::env_var::<TargetDigit>("PICKLINE_TARGET")
            .or_else(|| self.target.and_then(|d| TargetDigit::try_from(d).ok()))
    }

    /// Get limit with precedence: env > config > engine default.
    pub fn limit(&self) -> usize {
        Self::env_var("PICKLINE_LIMIT")
            .or(self.limit)
            .unwrap_or(self.engine.recent_limit)
    }

    /// Get no_color with precedence: env > config > default.
    ///
    /// Respects the `NO_COLOR` standard (https://no-color.org/).
    pub fn no_color(&self) -> bool {
        // NO_COLOR is a standard - presence means disable color
        if std::env::var("NO_COLOR").is_ok() {
            return true;
        }
        if std::env::var("PICKLINE_NO_COLOR").is_ok() {
            return true;
        }
        self.no_color.unwrap_or(false)
    }

    /// Get url_timeout with precedence: env > config > default.
    pub fn url_timeout(&self) -> u64 {
        Self::env_var("PICKLINE_URL_TIMEOUT")
            .or(self.url_timeout)
            .unwrap_or(30)
    }

    /// Get url_max_size with precedence: env > config > default.
    pub fn url_max_size(&self) -> String {
        std::env::var("PICKLINE_URL_MAX_SIZE")
            .ok()
            .or_else(|| self.url_max_size.clone())
            .unwrap_or_else(|| "10M".to_string())
    }

    /// Get watch interval with precedence: env > config > default.
    /// Zero means run once.
    pub fn watch(&self) -> Option<u64> {
        Self::env_var("PICKLINE_WATCH")
            .or(self.watch)
            .filter(|secs| *secs > 0)
    }
}

/// Create a default config file at the standard location.
pub fn init_config() -> Result<PathBuf, String> {
    let path = Config::path().ok_or("Cannot determine config directory")?;

    if path.exists() {
        return Err(format!("Config file already exists: {}", path.display()));
    }

    // Create parent directory
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("Failed to create directory: {}", e))?;
    }

    fs::write(&path, DEFAULT_CONFIG).map_err(|e| format!("Failed to write config: {}", e))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickline_core::OverflowPolicy;
    use serial_test::serial;

    const ENV_KEYS: &[&str] = &[
        "PICKLINE_SOURCE",
        "PICKLINE_TARGET",
        "PICKLINE_LIMIT",
        "PICKLINE_NO_COLOR",
        "PICKLINE_URL_TIMEOUT",
        "PICKLINE_URL_MAX_SIZE",
        "PICKLINE_WATCH",
        "NO_COLOR",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_default_config_is_valid_toml() {
        clear_env();
        let config: Config = toml::from_str(DEFAULT_CONFIG).expect("DEFAULT_CONFIG should parse");
        assert_eq!(config.source.as_deref(), Some("predictions.json"));
        assert_eq!(config.target, None);
        assert_eq!(config.limit, Some(20));
        assert_eq!(config.no_color, Some(false));
        assert_eq!(config.url_timeout, Some(30));
        assert_eq!(config.url_max_size, Some("10M".to_string()));
        assert_eq!(config.watch(), None);
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    #[serial]
    fn test_partial_config() {
        clear_env();
        let toml = r#"
limit = 10
target = 4

[engine]
overflow = "keep-last"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.limit, Some(10));
        assert_eq!(config.engine.overflow, OverflowPolicy::KeepLast);
        assert_eq!(config.engine.zone_label, "EST");

        // Getters should use defaults for missing values
        assert_eq!(config.limit(), 10);
        assert_eq!(config.target().map(u8::from), Some(4));
        assert_eq!(config.source(), DEFAULT_SOURCE);
        assert_eq!(config.url_timeout(), 30);
    }

    #[test]
    #[serial]
    fn test_empty_config() {
        clear_env();
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.limit(), 20);
        assert_eq!(config.target(), None);
        assert!(!config.no_color());
        assert_eq!(config.url_max_size(), "10M");
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let config: Config = toml::from_str("limit = 10\ntarget = 4\nsource = \"a.json\"").unwrap();

        std::env::set_var("PICKLINE_LIMIT", "3");
        std::env::set_var("PICKLINE_TARGET", "7");
        std::env::set_var("PICKLINE_SOURCE", "https://example.com/p.json");
        assert_eq!(config.limit(), 3);
        assert_eq!(config.target().map(u8::from), Some(7));
        assert_eq!(config.source(), "https://example.com/p.json");

        // Unparseable env values fall through to the file
        std::env::set_var("PICKLINE_LIMIT", "lots");
        std::env::set_var("PICKLINE_TARGET", "12");
        assert_eq!(config.limit(), 10);
        assert_eq!(config.target().map(u8::from), Some(4));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_out_of_range_target_ignored() {
        clear_env();
        let config: Config = toml::from_str("target = 12").unwrap();
        assert_eq!(config.target(), None);
    }

    #[test]
    #[serial]
    fn test_no_color_env() {
        clear_env();
        let config = Config::default();
        assert!(!config.no_color());
        std::env::set_var("NO_COLOR", "1");
        assert!(config.no_color());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_watch_zero_is_off() {
        clear_env();
        let config: Config = toml::from_str("watch = 0").unwrap();
        assert_eq!(config.watch(), None);
        std::env::set_var("PICKLINE_WATCH", "15");
        assert_eq!(config.watch(), Some(15));
        clear_env();
    }
}
