use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use notify_events::KafkaConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Time allowed for the producer flush on shutdown (default: `10`).
    pub shutdown_timeout_secs: u64,
    /// Optional JSON directory file; the built-in directory is used when unset.
    pub directory_path: Option<PathBuf>,
    /// Broker connection settings.
    pub kafka: KafkaConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                 |
    /// |------------------------------|-------------------------|
    /// | `HOST`                       | `0.0.0.0`               |
    /// | `PORT`                       | `8080`                  |
    /// | `CORS_ORIGINS`               | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`      | `10`                    |
    /// | `DIRECTORY_PATH`             | unset                   |
    /// | `KAFKA_BROKERS`              | `localhost:9092`        |
    /// | `KAFKA_TOPIC`                | `notifications`         |
    /// | `KAFKA_CLIENT_ID`            | `notify-api`            |
    /// | `KAFKA_MESSAGE_TIMEOUT_MS`   | `30000`                 |
    /// | `KAFKA_CONNECT_TIMEOUT_SECS` | `10`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let string = |var: &str, default: &str| lookup(var).unwrap_or_else(|| default.into());

        let cors_origins: Vec<String> = string("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let kafka = KafkaConfig {
            brokers: string("KAFKA_BROKERS", "localhost:9092"),
            topic: string("KAFKA_TOPIC", "notifications"),
            client_id: string("KAFKA_CLIENT_ID", "notify-api"),
            message_timeout_ms: parse(&lookup, "KAFKA_MESSAGE_TIMEOUT_MS", 30_000, "u64")?,
            connect_timeout: Duration::from_secs(parse(
                &lookup,
                "KAFKA_CONNECT_TIMEOUT_SECS",
                10,
                "u64",
            )?),
        };

        Ok(Self {
            host: string("HOST", "0.0.0.0"),
            port: parse(&lookup, "PORT", 8080, "u16")?,
            cors_origins,
            request_timeout_secs: parse(&lookup, "REQUEST_TIMEOUT_SECS", 30, "u64")?,
            shutdown_timeout_secs: parse(&lookup, "SHUTDOWN_TIMEOUT_SECS", 10, "u64")?,
            directory_path: lookup("DIRECTORY_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            kafka,
        })
    }
}

fn parse<T, F>(
    lookup: &F,
    var: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_match_local_development() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert!(config.directory_path.is_none());
        assert_eq!(config.kafka.brokers, "localhost:9092");
        assert_eq!(config.kafka.topic, "notifications");
        assert_eq!(config.kafka.message_timeout_ms, 30_000);
        assert_eq!(config.kafka.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("PORT", "9000"),
            ("KAFKA_BROKERS", "kafka-1:9092,kafka-2:9092"),
            ("KAFKA_TOPIC", "alerts"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
            ("DIRECTORY_PATH", "/etc/notify/parties.json"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.kafka.brokers, "kafka-1:9092,kafka-2:9092");
        assert_eq!(config.kafka.topic, "alerts");
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(
            config.directory_path,
            Some(PathBuf::from("/etc/notify/parties.json"))
        );
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert_matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        );
        assert_matches!(
            load(&[("PORT", "70000")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        );
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        assert_matches!(
            load(&[("KAFKA_MESSAGE_TIMEOUT_MS", "-1")]),
            Err(ConfigError::Invalid { var: "KAFKA_MESSAGE_TIMEOUT_MS", .. })
        );
    }
}
