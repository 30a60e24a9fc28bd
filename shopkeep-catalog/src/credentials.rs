//! API credentials and environment selection.

use std::fmt;

/// Which catalog deployment the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    /// Base URL for this environment's API endpoints.
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Production => "https://connect.squareup.com",
            Environment::Sandbox => "https://connect.squareupsandbox.com",
        }
    }

    /// Parse an environment name as it appears in config (`production`
    /// or `sandbox`, case-insensitive).
    pub fn parse(s: &str) -> Option<Environment> {
        match s.to_ascii_lowercase().as_str() {
            "production" => Some(Environment::Production),
            "sandbox" => Some(Environment::Sandbox),
            _ => None,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => f.write_str("production"),
            Environment::Sandbox => f.write_str("sandbox"),
        }
    }
}

/// Credentials for authenticating with the catalog API.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Bearer token for the merchant account.
    pub access_token: String,
    pub environment: Environment,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>, environment: Environment) -> Self {
        Self {
            access_token: access_token.into(),
            environment,
        }
    }
}
