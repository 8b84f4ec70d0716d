//! Configuration module for environment variable parsing.
//!
//! All configuration comes from environment variables. Blank values are
//! treated as unset so an empty `DISCORD_WEBHOOK_URL=` in a deployment
//! dashboard does not count as a configured destination.

use std::env;
use std::time::Duration;
use tracing::warn;

use crate::form::Category;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Webhook destinations for formatted submissions
    pub webhooks: WebhookConfig,

    /// Optional timeout for the outbound webhook call.
    /// `None` leaves the HTTP client's default behaviour in place.
    pub webhook_timeout: Option<Duration>,
}

/// Webhook URLs: a default plus optional per-category overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookConfig {
    /// Fallback destination for every category
    pub default: Option<String>,

    /// Override for contract submissions
    pub contracts: Option<String>,

    /// Override for recruitment submissions
    pub recruits: Option<String>,
}

impl WebhookConfig {
    /// Whether any destination at all is configured.
    pub fn any_configured(&self) -> bool {
        self.default.is_some() || self.contracts.is_some() || self.recruits.is_some()
    }

    /// Resolve the destination for a submission category.
    ///
    /// Contracts and recruitments prefer their override; everything falls
    /// back to the default.
    pub fn resolve(&self, category: Category) -> Option<&str> {
        let specific = match category {
            Category::Contract(_) => self.contracts.as_deref(),
            Category::Recruitment => self.recruits.as_deref(),
            Category::Generic => None,
        };

        specific.or(self.default.as_deref())
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Config {
            port: parse_number(&lookup, "PORT").unwrap_or(8080),

            webhooks: WebhookConfig {
                default: non_blank(&lookup, "DISCORD_WEBHOOK_URL"),
                contracts: non_blank(&lookup, "DISCORD_WEBHOOK_URL_CONTRACTS"),
                recruits: non_blank(&lookup, "DISCORD_WEBHOOK_URL_RECRUITS"),
            },

            webhook_timeout: parse_number::<_, u64>(&lookup, "WEBHOOK_TIMEOUT_MS")
                .map(Duration::from_millis),
        }
    }
}

/// Read a variable, treating blank values as absent.
fn non_blank<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a numeric variable, warning on garbage.
fn parse_number<F, T>(lookup: &F, name: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = non_blank(lookup, name)?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid number, using default");
            None
        }
    }
}
