use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

/// Environment variable names read on top of the TOML file.
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_WORKER_THREADS: &str = "TOKIO_WORKER_THREADS";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_SEED_CUSTOMERS: &str = "SEED_CUSTOMERS";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    /// Required; there is no default port.
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: None, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

/// Start-up data for the in-memory customer store.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_seed_customers")]
    pub customers: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { customers: default_seed_customers() }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_seed_customers() -> usize { 10 }

/// Load `CONFIG_PATH` (or `config.toml`). A missing file yields defaults so
/// that a deployment can be configured from the environment alone.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if std::path::Path::new(&path).exists() {
        load_from_file(&path)
    } else {
        Ok(AppConfig::default())
    }
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// File, then `.env` and process environment, then validation.
    pub fn load_and_validate() -> Result<Self> {
        dotenvy::dotenv().ok();
        let mut cfg = load_default()?;
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay values from an environment lookup; set variables win over the file.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow!("{ENV_PORT} is not a valid port: {e}"))?;
            self.server.port = Some(port);
        }
        if let Some(w) = lookup(ENV_WORKER_THREADS).and_then(|v| v.parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(url) = lookup(ENV_DATABASE_URL) {
            self.database.url = url;
        }
        if let Some(n) = lookup(ENV_SEED_CUSTOMERS) {
            self.seed.customers = n
                .trim()
                .parse::<usize>()
                .map_err(|e| anyhow!("{ENV_SEED_CUSTOMERS} is not a valid count: {e}"))?;
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        match self.port {
            None => return Err(anyhow!("PORT is not defined")),
            Some(0) => return Err(anyhow!("server.port must be in 1..=65535")),
            Some(_) => {}
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    /// `host:port`, only meaningful after validation.
    pub fn bind_addr(&self) -> Result<String> {
        let port = self.port.ok_or_else(|| anyhow!("PORT is not defined"))?;
        Ok(format!("{}:{}", self.host, port))
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or {ENV_DATABASE_URL}"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn parses_full_file() {
        let cfg = load_from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 3000

            [database]
            url = "sqlite://customers.db?mode=rwc"
            max_connections = 5

            [seed]
            customers = 3
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, Some(3000));
        assert_eq!(cfg.database.max_connections, 5);
        assert_eq!(cfg.database.min_connections, 1);
        assert_eq!(cfg.seed.customers, 3);
    }

    #[test]
    fn missing_port_is_rejected() {
        let mut cfg = load_from_str("[database]\nurl = \"sqlite::memory:\"\n").unwrap();
        let err = cfg.normalize_and_validate().unwrap_err();
        assert_eq!(err.to_string(), "PORT is not defined");
    }

    #[test]
    fn env_overrides_file() {
        let mut cfg = load_from_str("[server]\nport = 3000\n").unwrap();
        cfg.apply_env(env_of(&[("PORT", "4000"), ("DATABASE_URL", "postgres://localhost/app")])).unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, Some(4000));
        assert_eq!(cfg.server.bind_addr().unwrap(), "127.0.0.1:4000");
        assert_eq!(cfg.seed.customers, 10);
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn bad_port_in_env_is_an_error() {
        let mut cfg = AppConfig::default();
        assert!(cfg.apply_env(env_of(&[("PORT", "eighty")])).is_err());
    }

    #[test]
    fn database_url_scheme_is_checked() {
        let mut cfg = AppConfig::default();
        cfg.apply_env(env_of(&[("PORT", "3000"), ("DATABASE_URL", "mysql://localhost/app")])).unwrap();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.apply_env(env_of(&[("PORT", "3000")])).unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }
}
