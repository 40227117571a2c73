//! Endpoint configuration for the catalog client.
//!
//! The remote service runs as a fixed set of deployments (production,
//! staging, local). Each deployment is an API base URL paired with the web
//! frontend URL that authentication redirects land on. The pair is resolved
//! once at startup from `$SKILLBRIDGE_ENV` and passed explicitly into
//! [`crate::CatalogClient`] — nothing reads the environment after that.

use tracing::warn;

/// Environment variable selecting the deployment to talk to.
pub const ENV_SKILLBRIDGE_ENV: &str = "SKILLBRIDGE_ENV";

/// API base URL for the production deployment.
const API_URL_PRODUCTION: &str = "https://api.skillbridge.dev";

/// Web URL for the production deployment.
const WEB_URL_PRODUCTION: &str = "https://app.skillbridge.dev";

/// API base URL for the staging deployment.
const API_URL_STAGING: &str = "https://api.staging.skillbridge.dev";

/// Web URL for the staging deployment.
const WEB_URL_STAGING: &str = "https://app.staging.skillbridge.dev";

/// API base URL for a local development server.
const API_URL_LOCAL: &str = "http://localhost:9900";

/// Web URL for a local development server.
const WEB_URL_LOCAL: &str = "http://localhost:3000";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A known deployment of the remote tool platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiEnvironment {
    /// The production service.
    #[default]
    Production,
    /// The staging service.
    Staging,
    /// A locally running development server.
    Local,
}

impl ApiEnvironment {
    /// Parse an environment name as found in `$SKILLBRIDGE_ENV`.
    ///
    /// Unknown values fall back to [`ApiEnvironment::Production`] with a
    /// warning rather than failing startup.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" | "" => Self::Production,
            "staging" => Self::Staging,
            "local" => Self::Local,
            other => {
                warn!(value = other, "unknown SKILLBRIDGE_ENV, using production");
                Self::Production
            }
        }
    }

    /// Resolve the environment from `$SKILLBRIDGE_ENV`, defaulting to
    /// production when unset.
    pub fn from_env() -> Self {
        match std::env::var(ENV_SKILLBRIDGE_ENV) {
            Ok(value) => Self::parse(&value),
            Err(_) => Self::Production,
        }
    }

    /// The name used in `$SKILLBRIDGE_ENV` for this environment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Local => "local",
        }
    }
}

impl std::fmt::Display for ApiEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The resolved API/web URL pair for one deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Base URL of the catalog API.
    pub api_base_url: String,

    /// Base URL of the web frontend (where auth redirects land).
    pub web_base_url: String,
}

impl Endpoints {
    /// The fixed URL pair for a given environment.
    pub fn for_environment(env: ApiEnvironment) -> Self {
        let (api, web) = match env {
            ApiEnvironment::Production => (API_URL_PRODUCTION, WEB_URL_PRODUCTION),
            ApiEnvironment::Staging => (API_URL_STAGING, WEB_URL_STAGING),
            ApiEnvironment::Local => (API_URL_LOCAL, WEB_URL_LOCAL),
        };
        Self {
            api_base_url: api.to_owned(),
            web_base_url: web.to_owned(),
        }
    }

    /// Resolve endpoints from `$SKILLBRIDGE_ENV` once, at startup.
    pub fn resolve() -> Self {
        Self::for_environment(ApiEnvironment::from_env())
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::for_environment(ApiEnvironment::Production)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_environments() {
        assert_eq!(ApiEnvironment::parse("production"), ApiEnvironment::Production);
        assert_eq!(ApiEnvironment::parse("prod"), ApiEnvironment::Production);
        assert_eq!(ApiEnvironment::parse("staging"), ApiEnvironment::Staging);
        assert_eq!(ApiEnvironment::parse("local"), ApiEnvironment::Local);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(ApiEnvironment::parse("STAGING"), ApiEnvironment::Staging);
        assert_eq!(ApiEnvironment::parse(" Local "), ApiEnvironment::Local);
    }

    #[test]
    fn parse_unknown_falls_back_to_production() {
        assert_eq!(ApiEnvironment::parse("quux"), ApiEnvironment::Production);
    }

    #[test]
    fn endpoints_are_an_enumerated_table() {
        let prod = Endpoints::for_environment(ApiEnvironment::Production);
        assert_eq!(prod.api_base_url, "https://api.skillbridge.dev");
        assert_eq!(prod.web_base_url, "https://app.skillbridge.dev");

        let staging = Endpoints::for_environment(ApiEnvironment::Staging);
        assert_eq!(staging.api_base_url, "https://api.staging.skillbridge.dev");

        let local = Endpoints::for_environment(ApiEnvironment::Local);
        assert_eq!(local.api_base_url, "http://localhost:9900");
        assert_eq!(local.web_base_url, "http://localhost:3000");
    }

    #[test]
    fn from_env_reads_variable() {
        unsafe { std::env::set_var(ENV_SKILLBRIDGE_ENV, "staging") };
        assert_eq!(ApiEnvironment::from_env(), ApiEnvironment::Staging);
        unsafe { std::env::remove_var(ENV_SKILLBRIDGE_ENV) };
        assert_eq!(ApiEnvironment::from_env(), ApiEnvironment::Production);
    }
}
