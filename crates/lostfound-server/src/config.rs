use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://lostfound.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),
    #[error("DATABASE_TLS must be true or false, got {0:?}")]
    InvalidTlsToggle(String),
    #[error("DATABASE_URL {0:?} is not a SQLite location")]
    UnsupportedDatabaseUrl(String),
    #[error("invalid listen address {0:?}")]
    InvalidListenAddr(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
    /// Accepted for parity with networked databases; a local SQLite file has no TLS.
    pub database_tls: bool,
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let database_path = parse_database_url(&database_url)?;

        let database_tls = match lookup("DATABASE_TLS") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidTlsToggle(raw))?,
            None => false,
        };

        let host = lookup("LOSTFOUND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let static_dir = lookup("LOSTFOUND_STATIC_DIR")
            .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
            .into();

        Ok(Self {
            database_path,
            database_tls,
            host,
            port,
            static_dir,
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidListenAddr(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// `sqlite://path`, `sqlite:path`, `file:path` or a bare path.
fn parse_database_url(url: &str) -> Result<PathBuf, ConfigError> {
    let path = ["sqlite://", "sqlite:", "file:"]
        .iter()
        .find_map(|prefix| url.strip_prefix(prefix))
        .unwrap_or(url);

    // Anything else that looks like a URL scheme (postgres://, mysql://) is not ours
    if path.is_empty() || path == ":memory:" || path.contains("://") {
        return Err(ConfigError::UnsupportedDatabaseUrl(url.to_string()));
    }
    Ok(PathBuf::from(path))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.database_path, PathBuf::from("lostfound.db"));
        assert!(!config.database_tls);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.static_dir, PathBuf::from("public"));
        assert_eq!(config.listen_addr().unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn overrides() {
        let config = load(&[
            ("DATABASE_URL", "sqlite:/var/lib/lostfound/data.db"),
            ("DATABASE_TLS", "Yes"),
            ("LOSTFOUND_HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("LOSTFOUND_STATIC_DIR", "/srv/www"),
        ])
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("/var/lib/lostfound/data.db"));
        assert!(config.database_tls);
        assert_eq!(config.listen_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.static_dir, PathBuf::from("/srv/www"));
    }

    #[test]
    fn ipv6_listen_addr() {
        let config = load(&[("LOSTFOUND_HOST", "::"), ("PORT", "8080")]).unwrap();
        assert_eq!(config.listen_addr().unwrap().to_string(), "[::]:8080");

        let config = load(&[("LOSTFOUND_HOST", "::1")]).unwrap();
        assert_eq!(config.listen_addr().unwrap().to_string(), "[::1]:3000");
    }

    #[test]
    fn hostname_is_not_a_listen_addr() {
        let config = load(&[("LOSTFOUND_HOST", "localhost")]).unwrap();
        assert!(matches!(
            config.listen_addr(),
            Err(ConfigError::InvalidListenAddr(_))
        ));
    }

    #[test]
    fn database_url_forms() {
        assert_eq!(parse_database_url("data.db").unwrap(), PathBuf::from("data.db"));
        assert_eq!(parse_database_url("file:data.db").unwrap(), PathBuf::from("data.db"));
        assert_eq!(
            parse_database_url("sqlite://./data/lf.db").unwrap(),
            PathBuf::from("./data/lf.db")
        );
        assert!(matches!(
            parse_database_url("postgres://user@localhost/lostfound"),
            Err(ConfigError::UnsupportedDatabaseUrl(_))
        ));
        assert!(parse_database_url("sqlite::memory:").is_err());
        assert!(parse_database_url("").is_err());
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(matches!(
            load(&[("PORT", "http")]),
            Err(ConfigError::InvalidPort(_))
        ));
        assert!(matches!(
            load(&[("PORT", "70000")]),
            Err(ConfigError::InvalidPort(_))
        ));
        assert!(matches!(
            load(&[("DATABASE_TLS", "maybe")]),
            Err(ConfigError::InvalidTlsToggle(_))
        ));
    }
}
