use std::env;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres { database_url: String },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub storage: StorageBackend,
    pub max_connections: u32,
    pub run_migrations: bool,
    pub seed_data: bool,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => write!(f, "{} has an invalid value: {}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = lookup("STORAGE_BACKEND").unwrap_or_else(|| "postgres".to_string());
        let storage = match backend.trim().to_ascii_lowercase().as_str() {
            "postgres" => {
                let database_url = lookup("DATABASE_URL")
                    .filter(|url| !url.trim().is_empty())
                    .ok_or(ConfigError::Missing("DATABASE_URL"))?;
                StorageBackend::Postgres { database_url }
            }
            "memory" => StorageBackend::Memory,
            _ => {
                return Err(ConfigError::Invalid { key: "STORAGE_BACKEND", value: backend });
            }
        };

        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5u32)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                value: max_connections.to_string(),
            });
        }

        Ok(Settings {
            storage,
            max_connections,
            run_migrations: parse_flag(&lookup, "RUN_MIGRATIONS", true)?,
            seed_data: parse_flag(&lookup, "SEED_DATA", false)?,
            host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "SERVER_PORT", 8080u16)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

fn parse_flag<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(ConfigError::Invalid { key, value }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn postgres_requires_database_url() {
        assert_eq!(settings_from(&[]), Err(ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn defaults_apply() {
        let settings = settings_from(&[("DATABASE_URL", "postgres://localhost/employees")]).unwrap();
        assert_eq!(
            settings.storage,
            StorageBackend::Postgres { database_url: "postgres://localhost/employees".to_string() }
        );
        assert_eq!(settings.max_connections, 5);
        assert!(settings.run_migrations);
        assert!(!settings.seed_data);
        assert_eq!(settings.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn memory_backend_needs_no_url() {
        let settings = settings_from(&[
            ("STORAGE_BACKEND", "Memory"),
            ("SEED_DATA", "yes"),
            ("SERVER_PORT", "9000"),
        ])
        .unwrap();
        assert_eq!(settings.storage, StorageBackend::Memory);
        assert!(settings.seed_data);
        assert_eq!(settings.port, 9000);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            settings_from(&[("STORAGE_BACKEND", "mongo")]),
            Err(ConfigError::Invalid { key: "STORAGE_BACKEND", value: "mongo".to_string() })
        );
        assert_eq!(
            settings_from(&[("STORAGE_BACKEND", "memory"), ("SERVER_PORT", "http")]),
            Err(ConfigError::Invalid { key: "SERVER_PORT", value: "http".to_string() })
        );
        assert_eq!(
            settings_from(&[("STORAGE_BACKEND", "memory"), ("SEED_DATA", "maybe")]),
            Err(ConfigError::Invalid { key: "SEED_DATA", value: "maybe".to_string() })
        );
        assert!(settings_from(&[("STORAGE_BACKEND", "memory"), ("DATABASE_MAX_CONNECTIONS", "0")]).is_err());
    }
}
