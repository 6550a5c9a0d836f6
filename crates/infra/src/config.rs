use chrono_tz::Tz;
use pantry_reminder_domain::ReminderSettings;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

const DEFAULT_TIMEZONE: &str = "Europe/Moscow";
const DEFAULT_NOTIFY_HOUR: u32 = 9;
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_PATH: &str = "data/products.db";
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;
const MAX_POLL_TIMEOUT_SECS: u64 = 600;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("The {0} environment variable must be set")]
    Missing(&'static str),
    #[error("The {name} environment variable has an invalid value `{value}`: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Token used to authenticate against the Telegram Bot API
    pub bot_token: String,
    /// Base url of the Telegram Bot API, overridable for local bot api servers
    pub telegram_api_url: String,
    /// The single time zone every date typed by a user is interpreted in
    pub timezone: Tz,
    /// Hour of the day at which expiration, day and week reminders are anchored
    pub notify_hour: u32,
    /// Port for the liveness endpoint
    pub port: u16,
    /// Location of the SQLite database file
    pub database_path: PathBuf,
    /// How long a single long poll for chat updates may wait
    pub poll_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key value source, `lookup` returning
    /// `None` for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = match lookup("BOT_TOKEN") {
            Some(token) if !token.trim().is_empty() => token.trim().to_string(),
            _ => return Err(ConfigError::Missing("BOT_TOKEN")),
        };

        let timezone = match lookup("TIMEZONE") {
            Some(tz) => tz.parse::<Tz>().map_err(|e| ConfigError::Invalid {
                name: "TIMEZONE",
                value: tz.clone(),
                reason: format!("{}", e),
            })?,
            None => DEFAULT_TIMEZONE
                .parse::<Tz>()
                .map_err(|e| ConfigError::Invalid {
                    name: "TIMEZONE",
                    value: DEFAULT_TIMEZONE.into(),
                    reason: format!("{}", e),
                })?,
        };

        let notify_hour = match lookup("NOTIFY_HOUR") {
            Some(hour) => match hour.trim().parse::<u32>() {
                Ok(h) if h < 24 => h,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "NOTIFY_HOUR",
                        value: hour,
                        reason: "expected an hour between 0 and 23".into(),
                    })
                }
            },
            None => DEFAULT_NOTIFY_HOUR,
        };

        let port = match lookup("PORT") {
            Some(port) => port.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                value: port.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let poll_timeout_secs = match lookup("POLL_TIMEOUT_SECS") {
            Some(secs) => match secs.trim().parse::<u64>() {
                Ok(s) if s <= MAX_POLL_TIMEOUT_SECS => s,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "POLL_TIMEOUT_SECS",
                        value: secs,
                        reason: format!("expected seconds between 0 and {}", MAX_POLL_TIMEOUT_SECS),
                    })
                }
            },
            None => DEFAULT_POLL_TIMEOUT_SECS,
        };

        let database_path = lookup("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));
        let telegram_api_url = lookup("TELEGRAM_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.into());

        let config = Self {
            bot_token,
            telegram_api_url,
            timezone,
            notify_hour,
            port,
            database_path,
            poll_timeout_secs,
        };
        info!(
            "Configured with timezone: {}, notify hour: {}, port: {}, database: {:?}",
            config.timezone, config.notify_hour, config.port, config.database_path
        );
        Ok(config)
    }

    pub fn reminder_settings(&self) -> ReminderSettings {
        ReminderSettings {
            timezone: self.timezone,
            notify_hour: self.notify_hour,
        }
    }
}

impl Default for Config {
    /// Defaults without a bot token, used for contexts that never talk to Telegram
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            telegram_api_url: DEFAULT_TELEGRAM_API_URL.into(),
            timezone: chrono_tz::Europe::Moscow,
            notify_hour: DEFAULT_NOTIFY_HOUR,
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            poll_timeout_secs: DEFAULT_POLL_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn it_requires_bot_token() {
        assert_eq!(
            config_from(&[]).unwrap_err(),
            ConfigError::Missing("BOT_TOKEN")
        );
        assert_eq!(
            config_from(&[("BOT_TOKEN", "  ")]).unwrap_err(),
            ConfigError::Missing("BOT_TOKEN")
        );
    }

    #[test]
    fn it_uses_defaults() {
        let config = config_from(&[("BOT_TOKEN", "123:abc")]).expect("Valid config");
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.timezone, chrono_tz::Europe::Moscow);
        assert_eq!(config.notify_hour, 9);
        assert_eq!(config.port, 8000);
        assert_eq!(config.database_path, PathBuf::from("data/products.db"));
        assert_eq!(config.telegram_api_url, "https://api.telegram.org");
    }

    #[test]
    fn it_reads_overrides() {
        let config = config_from(&[
            ("BOT_TOKEN", "123:abc"),
            ("TIMEZONE", "Europe/Oslo"),
            ("NOTIFY_HOUR", "18"),
            ("PORT", "9000"),
            ("DATABASE_PATH", "/tmp/pantry.db"),
            ("TELEGRAM_API_URL", "http://localhost:8081/"),
            ("POLL_TIMEOUT_SECS", "600"),
        ])
        .expect("Valid config");
        assert_eq!(config.timezone, chrono_tz::Europe::Oslo);
        assert_eq!(config.notify_hour, 18);
        assert_eq!(config.port, 9000);
        assert_eq!(config.database_path, PathBuf::from("/tmp/pantry.db"));
        assert_eq!(config.telegram_api_url, "http://localhost:8081");
        assert_eq!(config.poll_timeout_secs, 600);
    }

    #[test]
    fn it_rejects_invalid_values() {
        let invalid = vec![
            ("TIMEZONE", "Mars/Olympus"),
            ("NOTIFY_HOUR", "24"),
            ("NOTIFY_HOUR", "nine"),
            ("PORT", "70000"),
            ("POLL_TIMEOUT_SECS", "-1"),
            ("POLL_TIMEOUT_SECS", "601"),
            ("POLL_TIMEOUT_SECS", "18446744073709551615"),
        ];
        for (key, value) in invalid {
            let res = config_from(&[("BOT_TOKEN", "123:abc"), (key, value)]);
            match res {
                Err(ConfigError::Invalid { name, .. }) => assert_eq!(name, key),
                other => panic!("Expected {} = {} to be rejected, got {:?}", key, value, other),
            }
        }
    }
}
