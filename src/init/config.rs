use std::{net::SocketAddr, time::Duration};

use anyhow::anyhow;

use crate::{init::state::DEFAULT_SESSION_DURATION, store::client::DEFAULT_STORE_TIMEOUT};

pub struct DbConfig {
    db_host: String,
    db_port: Option<u16>,
    db_username: String,
    db_password: String,
    db_name: String,
}

impl DbConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let is_socket_path = std::env::var("DB_HOST")
            .ok()
            .is_some_and(|host| host.starts_with('/'));

        if !is_socket_path {
            if let Ok(db_url) = std::env::var("DB_URL") {
                return Self::from_url(&db_url);
            }
        }

        let db_host = std::env::var("DB_HOST")
            .map_err(|_| anyhow!("Environment variable DB_HOST not found"))?;

        let db_port = if db_host.starts_with('/') {
            None
        } else {
            Some(
                std::env::var("DB_PORT")
                    .map_err(|_| anyhow!("Environment variable DB_PORT not found"))?
                    .parse::<u16>()?,
            )
        };

        let db_username = std::env::var("DB_USERNAME")
            .map_err(|_| anyhow!("Environment variable DB_USERNAME not found"))?;

        let db_password = std::env::var("DB_PASSWORD")
            .map_err(|_| anyhow!("Environment variable DB_PASSWORD not found"))?;

        let db_name = std::env::var("DB_NAME")
            .map_err(|_| anyhow!("Environment variable DB_NAME not found"))?;

        Ok(DbConfig {
            db_host,
            db_port,
            db_username,
            db_password,
            db_name,
        })
    }

    pub fn from_url(url: &str) -> anyhow::Result<Self> {
        let (scheme, rest) = url
            .split_once("://")
            .ok_or_else(|| anyhow!("Invalid URL format"))?;

        match scheme.trim().to_lowercase().as_ref() {
            "postgres" | "psql" | "postgresql" | "pg" => {}
            other => return Err(anyhow!("Unsupported DB scheme {other:?}; only PostgreSQL is supported")),
        }

        // Passwords may contain '@', so the host starts after the last one.
        let (credentials, host_and_path) = rest
            .rsplit_once('@')
            .ok_or_else(|| anyhow!("Missing credentials"))?;

        let (db_username, db_password) = match credentials.split_once(':') {
            Some((user, pw)) => (user.to_owned(), pw.to_owned()),
            None => (credentials.to_owned(), String::new()),
        };

        let (host_and_port, db_name) = host_and_path
            .split_once('/')
            .unwrap_or((host_and_path, ""));
        let db_name = db_name.split('?').next().unwrap_or_default().to_owned();

        let (db_host, db_port) = match host_and_port.split_once(':') {
            Some((host, port)) => (host, Some(port.parse::<u16>()?)),
            None => (host_and_port, Some(5432)),
        };

        if db_host.is_empty() {
            return Err(anyhow!("Missing host"));
        }

        Ok(DbConfig {
            db_host: db_host.to_owned(),
            db_port,
            db_username,
            db_password,
            db_name,
        })
    }

    pub fn to_url(&self) -> String {
        // Unix socket
        if self.db_host.starts_with('/') {
            return format!(
                "postgres://{user}:{pw}@/{db}?host={host}",
                user = self.db_username,
                pw = self.db_password,
                db = self.db_name,
                host = self.db_host
            );
        }

        format!(
            "postgres://{user}:{pw}@{host}{port}/{db}",
            user = self.db_username,
            pw = self.db_password,
            host = self.db_host,
            port = match self.db_port {
                Some(port) => format!(":{port}"),
                None => String::new(),
            },
            db = self.db_name
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl StoreBackend {
    pub fn from_env_value(value: Option<&str>) -> anyhow::Result<Self> {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            None | Some("") | Some("postgres") | Some("postgresql") | Some("pg") => {
                Ok(StoreBackend::Postgres)
            }
            Some("memory") | Some("mem") => Ok(StoreBackend::Memory),
            Some(other) => Err(anyhow!("Unknown STORE_BACKEND {other:?}")),
        }
    }
}

pub struct AppConfig {
    pub store_backend: StoreBackend,
    pub host: String,
    pub port: u16,
    pub store_timeout: Duration,
    pub session_duration: chrono::Duration,
    pub admin_bootstrap: Option<(String, String)>,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T: std::str::FromStr>(key: &str, value: Option<String>, default: T) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("Invalid value {raw:?} for {key}: {e}")),
        None => Ok(default),
    }
}

fn parse_bool(value: Option<String>) -> bool {
    matches!(
        value.map(|v| v.trim().to_lowercase()).as_deref(),
        Some("1") | Some("true") | Some("yes") | Some("on")
    )
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(env_opt)
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let store_backend = StoreBackend::from_env_value(lookup("STORE_BACKEND").as_deref())?;

        let store_timeout_ms = parse_or(
            "STORE_TIMEOUT_MS",
            lookup("STORE_TIMEOUT_MS"),
            DEFAULT_STORE_TIMEOUT.as_millis() as u64,
        )?;
        if store_timeout_ms == 0 {
            return Err(anyhow!("STORE_TIMEOUT_MS must be greater than zero"));
        }

        let session_hours = parse_or(
            "SESSION_HOURS",
            lookup("SESSION_HOURS"),
            DEFAULT_SESSION_DURATION.num_hours(),
        )?;
        if session_hours <= 0 {
            return Err(anyhow!("SESSION_HOURS must be greater than zero"));
        }

        let admin_bootstrap = match (
            lookup("ADMIN_BOOTSTRAP_EMAIL"),
            lookup("ADMIN_BOOTSTRAP_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some((email, password)),
            (None, None) => None,
            _ => {
                return Err(anyhow!(
                    "ADMIN_BOOTSTRAP_EMAIL and ADMIN_BOOTSTRAP_PASSWORD must be set together"
                ));
            }
        };

        Ok(AppConfig {
            store_backend,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port: parse_or("PORT", lookup("PORT"), 3000)?,
            store_timeout: Duration::from_millis(store_timeout_ms),
            session_duration: chrono::Duration::hours(session_hours),
            admin_bootstrap,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_owned()),
            log_json: parse_bool(lookup("LOG_JSON")),
            log_dir: lookup("LOG_DIR"),
        })
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse::<SocketAddr>()
            .map_err(|e| anyhow!("Invalid HOST/PORT {}:{}: {e}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn url_round_trips_through_parts() {
        let cfg = DbConfig::from_url("postgresql://lumen:s3cr@t@db.internal:6543/content").unwrap();
        assert_eq!(cfg.db_username, "lumen");
        assert_eq!(cfg.db_password, "s3cr@t");
        assert_eq!(cfg.db_port, Some(6543));
        assert_eq!(
            cfg.to_url(),
            "postgres://lumen:s3cr@t@db.internal:6543/content"
        );
    }

    #[test]
    fn url_without_port_defaults_to_5432() {
        let cfg = DbConfig::from_url("pg://u:p@localhost/lumen").unwrap();
        assert_eq!(cfg.db_port, Some(5432));
        assert_eq!(cfg.db_name, "lumen");
    }

    #[test]
    fn other_databases_are_rejected() {
        assert!(DbConfig::from_url("mysql://u:p@localhost/db").is_err());
        assert!(DbConfig::from_url("not a url").is_err());
    }

    #[test]
    fn socket_host_uses_query_form() {
        let cfg = DbConfig {
            db_host: "/var/run/postgresql".to_owned(),
            db_port: None,
            db_username: "u".to_owned(),
            db_password: "p".to_owned(),
            db_name: "lumen".to_owned(),
        };
        assert_eq!(cfg.to_url(), "postgres://u:p@/lumen?host=/var/run/postgresql");
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.store_backend, StoreBackend::Postgres);
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.store_timeout, Duration::from_millis(5000));
        assert_eq!(cfg.session_duration, chrono::Duration::hours(8));
        assert!(cfg.admin_bootstrap.is_none());
        assert!(!cfg.log_json);
        assert_eq!(cfg.socket_addr().unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn explicit_values_are_parsed() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("STORE_BACKEND", "Memory"),
            ("PORT", "8080"),
            ("STORE_TIMEOUT_MS", "250"),
            ("SESSION_HOURS", "2"),
            ("LOG_JSON", "true"),
            ("ADMIN_BOOTSTRAP_EMAIL", "admin@lumengaze.test"),
            ("ADMIN_BOOTSTRAP_PASSWORD", "hunter22"),
        ]))
        .unwrap();

        assert_eq!(cfg.store_backend, StoreBackend::Memory);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.store_timeout, Duration::from_millis(250));
        assert_eq!(cfg.session_duration, chrono::Duration::hours(2));
        assert!(cfg.log_json);
        assert!(cfg.admin_bootstrap.is_some());
    }

    #[test]
    fn bad_values_are_startup_errors() {
        assert!(AppConfig::from_lookup(lookup_from(&[("PORT", "http")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("STORE_TIMEOUT_MS", "0")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("STORE_BACKEND", "redis")])).is_err());
        assert!(
            AppConfig::from_lookup(lookup_from(&[("ADMIN_BOOTSTRAP_EMAIL", "a@b.test")])).is_err()
        );
    }
}
