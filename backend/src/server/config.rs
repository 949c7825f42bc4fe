//! HTTP server configuration object and helpers.

use std::env;
use std::net::SocketAddr;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while assembling the server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is absent.
    #[error("missing required environment variable: {name}")]
    Missing { name: &'static str },

    /// An environment variable holds an unparseable value.
    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

impl ConfigError {
    fn missing(name: &'static str) -> Self {
        Self::Missing { name }
    }

    fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            name,
            message: message.into(),
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) database_url: String,
    pub(crate) identity_provider_url: Url,
}

impl ServerConfig {
    /// Construct a server configuration from explicit values.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, database_url: String, identity_provider_url: Url) -> Self {
        Self {
            bind_addr,
            database_url,
            identity_provider_url,
        }
    }

    /// Load the configuration from the environment.
    ///
    /// Reads `BIND_ADDR` (optional, defaults to `0.0.0.0:8080`),
    /// `DATABASE_URL` (required), and `IDENTITY_PROVIDER_URL` (required, the
    /// token introspection endpoint).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is absent or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid("BIND_ADDR", e.to_string()))?;

        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::missing("DATABASE_URL"))?;

        let identity_provider_url = env::var("IDENTITY_PROVIDER_URL")
            .map_err(|_| ConfigError::missing("IDENTITY_PROVIDER_URL"))?
            .parse::<Url>()
            .map_err(|e| ConfigError::invalid("IDENTITY_PROVIDER_URL", e.to_string()))?;

        Ok(Self::new(bind_addr, database_url, identity_provider_url))
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the PostgreSQL connection string.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Return the identity provider introspection endpoint.
    #[must_use]
    pub fn identity_provider_url(&self) -> &Url {
        &self.identity_provider_url
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn explicit_values_round_trip() {
        let config = ServerConfig::new(
            "127.0.0.1:9000".parse().expect("socket addr"),
            "postgres://localhost/benefits".to_owned(),
            "https://id.example.com/introspect".parse().expect("url"),
        );

        assert_eq!(config.bind_addr().port(), 9000);
        assert_eq!(config.database_url(), "postgres://localhost/benefits");
        assert_eq!(config.identity_provider_url().host_str(), Some("id.example.com"));
    }

    #[rstest]
    fn config_errors_name_the_variable() {
        assert!(
            ConfigError::missing("DATABASE_URL")
                .to_string()
                .contains("DATABASE_URL")
        );
        assert!(
            ConfigError::invalid("BIND_ADDR", "bad port")
                .to_string()
                .contains("bad port")
        );
    }
}
