use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use hopespring_application::CredentialEntry;
use hopespring_core::AppError;
use hopespring_infrastructure::{default_accounts, parse_credential_table};
use tracing_subscriber::EnvFilter;
use url::Url;

const LOCAL_BACKEND_URL: &str = "http://localhost:5000/api";
const DEPLOYED_BACKEND_URL: &str = "https://chiragchiru.pythonanywhere.com/api";

/// Where record and appointment data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    /// REST hospital backend.
    Rest {
        /// Base URL every endpoint is joined onto.
        base_url: Url,
        /// Per-request timeout.
        timeout: Duration,
    },
    /// Seeded in-process backend.
    InMemory,
}

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub frontend_url: String,
    pub portal_host: String,
    pub portal_port: u16,
    pub cookie_secure: bool,
    pub backend: BackendConfig,
    pub credentials: Vec<CredentialEntry>,
}

impl PortalConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from a variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let frontend_url =
            optional("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());
        let portal_host = optional("PORTAL_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let portal_port = optional("PORTAL_PORT")
            .map(|value| {
                value.parse::<u16>().map_err(|error| {
                    AppError::Validation(format!("invalid PORTAL_PORT '{value}': {error}"))
                })
            })
            .transpose()?
            .unwrap_or(3001);
        let cookie_secure = optional("SESSION_COOKIE_SECURE")
            .is_some_and(|value| value.eq_ignore_ascii_case("true"));

        let timeout = optional("BACKEND_TIMEOUT_SECONDS")
            .map(|value| {
                value
                    .parse::<u64>()
                    .ok()
                    .filter(|seconds| *seconds > 0)
                    .map(Duration::from_secs)
                    .ok_or_else(|| {
                        AppError::Validation(format!(
                            "BACKEND_TIMEOUT_SECONDS must be a positive integer, got '{value}'"
                        ))
                    })
            })
            .transpose()?
            .unwrap_or(Duration::from_secs(10));

        let backend_url = |default: &str| {
            let raw = optional("BACKEND_BASE_URL").unwrap_or_else(|| default.to_owned());
            Url::parse(&raw).map_err(|error| {
                AppError::Validation(format!("invalid BACKEND_BASE_URL '{raw}': {error}"))
            })
        };

        let backend = match optional("BACKEND_TARGET")
            .unwrap_or_else(|| "local".to_owned())
            .as_str()
        {
            "local" => BackendConfig::Rest {
                base_url: backend_url(LOCAL_BACKEND_URL)?,
                timeout,
            },
            "deployed" => BackendConfig::Rest {
                base_url: backend_url(DEPLOYED_BACKEND_URL)?,
                timeout,
            },
            "in_memory" => BackendConfig::InMemory,
            other => {
                return Err(AppError::Validation(format!(
                    "BACKEND_TARGET must be 'local', 'deployed' or 'in_memory', got '{other}'"
                )));
            }
        };

        let credentials = match optional("PORTAL_CREDENTIALS") {
            Some(table) => parse_credential_table(&table)?,
            None => default_accounts(),
        };

        Ok(Self {
            frontend_url,
            portal_host,
            portal_port,
            cookie_secure,
            backend,
            credentials,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.portal_host).map_err(|error| {
            AppError::Validation(format!(
                "invalid PORTAL_HOST '{}': {error}",
                self.portal_host
            ))
        })?;
        Ok(SocketAddr::from((host, self.portal_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use hopespring_core::AppError;
    use hopespring_domain::Role;

    use super::{BackendConfig, PortalConfig};

    fn load(pairs: &[(&str, &str)]) -> Result<PortalConfig, AppError> {
        let variables: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        PortalConfig::from_lookup(|name| variables.get(name).cloned())
    }

    #[test]
    fn defaults_target_local_backend() {
        let config = load(&[]).unwrap_or_else(|error| panic!("defaults should load: {error}"));

        assert_eq!(config.portal_port, 3001);
        assert!(!config.cookie_secure);
        assert_eq!(config.credentials.len(), 5);
        assert!(matches!(
            &config.backend,
            BackendConfig::Rest { base_url, timeout }
                if base_url.as_str() == "http://localhost:5000/api"
                    && *timeout == Duration::from_secs(10)
        ));
        assert!(config.socket_address().is_ok());
    }

    #[test]
    fn base_url_overrides_deployed_default() {
        let config = load(&[
            ("BACKEND_TARGET", "deployed"),
            ("BACKEND_BASE_URL", "https://records.example/api"),
            ("BACKEND_TIMEOUT_SECONDS", "3"),
        ]);

        assert!(matches!(
            config.map(|config| config.backend),
            Ok(BackendConfig::Rest { base_url, timeout })
                if base_url.as_str() == "https://records.example/api"
                    && timeout == Duration::from_secs(3)
        ));
    }

    #[test]
    fn in_memory_target_ignores_base_url() {
        let config = load(&[("BACKEND_TARGET", "in_memory"), ("BACKEND_BASE_URL", "::")]);
        assert!(matches!(
            config.map(|config| config.backend),
            Ok(BackendConfig::InMemory)
        ));
    }

    #[test]
    fn invalid_values_are_rejected() {
        for pairs in [
            [("BACKEND_TARGET", "staging")],
            [("PORTAL_PORT", "70000")],
            [("BACKEND_TIMEOUT_SECONDS", "0")],
            [("PORTAL_CREDENTIALS", "admin")],
        ] {
            assert!(matches!(load(&pairs), Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn credentials_table_replaces_defaults() {
        let config = load(&[("PORTAL_CREDENTIALS", "chief:pw:admin")]);
        let credentials = config.map(|config| config.credentials).unwrap_or_default();

        assert_eq!(credentials.len(), 1);
        assert_eq!(credentials[0].role, Role::Admin);
    }

    #[test]
    fn unparsable_host_is_rejected_at_bind_time() {
        let config = load(&[("PORTAL_HOST", "localhost")]);
        assert!(matches!(
            config.map(|config| config.socket_address()),
            Ok(Err(AppError::Validation(_)))
        ));
    }
}
