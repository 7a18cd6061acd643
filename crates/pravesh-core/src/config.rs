use anyhow::Result;
use config::Config;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the server address as a string in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory uploaded attachments are written into.
    pub upload_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    fn load_from(config_file: &str) -> Result<Self> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.max_connections", 4)?
            .set_default("storage.upload_dir", "uploads")?
            .set_default("logging.level", "debug")?
            // TOML file
            .add_source(config::File::with_name(config_file).required(false))
            // Environment last so env vars win over file values
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_overrides_config_file() {
        let path = std::env::temp_dir().join(format!("pravesh-settings-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[database]\nurl = \"postgres://localhost/pravesh\"\n\n[server]\nport = 8080\n\n[storage]\nupload_dir = \"blobs\"\n",
        )
        .unwrap();

        std::env::set_var("SERVER_PORT", "4545");
        let settings = Settings::load_from(&path.to_string_lossy()).unwrap();
        std::env::remove_var("SERVER_PORT");
        std::fs::remove_file(&path).ok();

        // Env wins over the file; file values the env does not touch apply.
        assert_eq!(settings.server.port, 4545);
        assert_eq!(settings.storage.upload_dir, "blobs");
    }
}
