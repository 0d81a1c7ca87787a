use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path segment in front of every farmer route, e.g. `spic_to_erp`
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_api_prefix() -> String {
    "spic_to_erp".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_prefix: default_api_prefix(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/farmers.db"

[server]
host = "0.0.0.0"
port = 3000
api_prefix = "spic_to_erp"
"#;

/// Directory of the running binary; config and relative DB paths live there
fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

/// Reads `config.toml` from the binary's directory, or the embedded
/// default when the file is absent. A present but malformed file is an error.
pub fn load_config() -> anyhow::Result<Config> {
    match exe_dir().map(|dir| dir.join("config.toml")) {
        Some(path) if path.exists() => {
            tracing::info!("Loading config from: {}", path.display());
            let contents = std::fs::read_to_string(&path).map_err(|e| {
                anyhow::anyhow!("Cannot read config {}: {}", path.display(), e)
            })?;
            parse_config(&contents)
        }
        Some(path) => {
            tracing::warn!(
                "config.toml not found at {}, using embedded defaults",
                path.display()
            );
            parse_config(DEFAULT_CONFIG)
        }
        None => {
            tracing::warn!("Cannot determine executable directory, using embedded defaults");
            parse_config(DEFAULT_CONFIG)
        }
    }
}

fn parse_config(contents: &str) -> anyhow::Result<Config> {
    toml::from_str(contents).map_err(|e| anyhow::anyhow!("Invalid config.toml: {}", e))
}

/// Database file location; relative paths hang off the binary's directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let configured = PathBuf::from(&config.database.path);
    if configured.as_os_str().is_empty() {
        anyhow::bail!("database.path must not be empty");
    }
    if configured.is_absolute() {
        return Ok(configured);
    }
    Ok(match exe_dir() {
        Some(dir) => dir.join(configured),
        None => configured,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/farmers.db");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.api_prefix, "spic_to_erp");
    }

    #[test]
    fn test_server_section_is_optional() {
        let config = parse_config("[database]\npath = \"/var/lib/farmers.db\"\n").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.api_prefix, "spic_to_erp");
        assert_eq!(
            get_database_path(&config).unwrap(),
            PathBuf::from("/var/lib/farmers.db")
        );
    }

    #[test]
    fn test_relative_database_path_follows_binary() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        let path = get_database_path(&config).unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("target/db/farmers.db"));
    }

    #[test]
    fn test_empty_database_path_is_rejected() {
        let config = parse_config("[database]\npath = \"\"\n").unwrap();
        assert!(get_database_path(&config).is_err());
    }

    #[test]
    fn test_missing_database_section_is_rejected() {
        assert!(parse_config("[server]\nport = 8080\n").is_err());
    }
}
