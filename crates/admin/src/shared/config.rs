use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Базовый URL REST API админки (без завершающего `/`)
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Путь к лог-файлу; если не задан, пишем только в stderr
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Environment variable that overrides `api.base_url`
pub const API_URL_ENV: &str = "API_URL";

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://localhost:3000"
timeout_secs = 30

[logging]
level = "info"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// Afterwards `API_URL` overrides the base URL (`.env` is loaded by the caller).
/// Tracing is not initialized yet at this point, so nothing is logged here.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = match config_path_next_to_exe() {
        Some(path) => {
            let contents = std::fs::read_to_string(&path)?;
            parse_config(&contents)?
        }
        None => parse_config(DEFAULT_CONFIG)?,
    };

    if let Ok(url) = std::env::var(API_URL_ENV) {
        apply_api_url(&mut config, &url);
    }
    Ok(config)
}

/// Parse a TOML document and normalize it
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config: Config = toml::from_str(contents)?;
    config.api.base_url = normalize_url(&config.api.base_url);
    if config.api.base_url.is_empty() {
        anyhow::bail!("api.base_url must not be empty");
    }
    Ok(config)
}

/// Override the API base URL; blank values are ignored
pub fn apply_api_url(config: &mut Config, url: &str) {
    let url = normalize_url(url);
    if !url.is_empty() {
        config.api.base_url = url;
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn config_path_next_to_exe() -> Option<std::path::PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let config_path = exe_path.parent()?.join("config.toml");
    config_path.exists().then_some(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_optional_sections_default() {
        let config = parse_config("[api]\nbase_url = \"https://admin.example.com/\"\n").unwrap();
        assert_eq!(config.api.base_url, "https://admin.example.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_api_url_override() {
        let mut config = parse_config(DEFAULT_CONFIG).unwrap();
        apply_api_url(&mut config, "  ");
        assert_eq!(config.api.base_url, "http://localhost:3000");
        apply_api_url(&mut config, "http://10.0.0.5:8080/");
        assert_eq!(config.api.base_url, "http://10.0.0.5:8080");
    }

    #[test]
    fn test_missing_base_url_is_error() {
        assert!(parse_config("[logging]\nlevel = \"debug\"\n").is_err());
        assert!(parse_config("[api]\nbase_url = \"\"\n").is_err());
        assert!(parse_config("[api]\nbase_url = \"   \"\n").is_err());
        assert!(parse_config("[api]\nbase_url = \"/\"\n").is_err());
    }

    #[test]
    fn test_base_url_is_trimmed() {
        let config = parse_config("[api]\nbase_url = \"  http://api.local//  \"\n").unwrap();
        assert_eq!(config.api.base_url, "http://api.local");
    }
}
