use std::env;
use std::time::Duration;

/// Minimum salt length accepted by Argon2.
const MIN_SALT_LEN: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` runs the service on the in-process store.
    pub database_url: Option<String>,
    pub server_port: u16,
    pub server_host: String,
    pub password_salt: String,
    pub database_max_connections: u32,
    pub database_connect_attempts: u32,
    pub database_connect_delay: Duration,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let password_salt =
            env::var("PASSWORD_SALT").map_err(|_| ConfigError::Missing("PASSWORD_SALT"))?;
        if password_salt.len() < MIN_SALT_LEN {
            return Err(ConfigError::Invalid {
                var: "PASSWORD_SALT",
                reason: format!("must be at least {} bytes", MIN_SALT_LEN),
            });
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            server_port: parse_var("SERVER_PORT", 8080)?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            password_salt,
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,
            database_connect_attempts: parse_var("DATABASE_CONNECT_ATTEMPTS", 5)?,
            database_connect_delay: Duration::from_secs(parse_var(
                "DATABASE_CONNECT_DELAY_SECS",
                5,
            )?),
            run_migrations: parse_var("RUN_MIGRATIONS", true)?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-wide, so everything runs in one test.
    #[test]
    fn test_config_from_env() {
        env::remove_var("PASSWORD_SALT");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing("PASSWORD_SALT"))
        ));

        env::set_var("PASSWORD_SALT", "short");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { var: "PASSWORD_SALT", .. })
        ));

        env::set_var("PASSWORD_SALT", "static-test-salt");
        env::set_var("DATABASE_URL", "postgres://test");

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_url.as_deref(), Some("postgres://test"));
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.database_connect_delay, Duration::from_secs(5));
        assert!(config.run_migrations);

        env::set_var("SERVER_PORT", "3000");
        env::set_var("SERVER_HOST", "0.0.0.0");
        env::set_var("DATABASE_URL", "");

        let config = Config::from_env().unwrap();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "0.0.0.0");
        assert!(config.database_url.is_none());
        assert_eq!(config.server_url(), "http://0.0.0.0:3000");

        env::set_var("SERVER_PORT", "not-a-port");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { var: "SERVER_PORT", .. })
        ));

        env::remove_var("SERVER_PORT");
        env::remove_var("SERVER_HOST");
    }
}
