//! Storefront configuration, read from the process environment.
//!
//! A `.env` file in the working directory is loaded first when present.
//!
//! | variable | default |
//! |----------|---------|
//! | `STOREFRONT_BASE_URL` | required |
//! | `STOREFRONT_HOST` | `127.0.0.1` |
//! | `STOREFRONT_PORT` | `3000` |
//! | `STOREFRONT_SHOP_NAME` | `Hydrogen` |
//! | `STOREFRONT_COUNTRY`, `STOREFRONT_LANGUAGE` | unset (`@inContext` omitted) |
//! | `SHOPIFY_STORE` | required |
//! | `SHOPIFY_STOREFRONT_PUBLIC_TOKEN` | required |
//! | `SHOPIFY_STOREFRONT_PRIVATE_TOKEN` | unset (public token used) |
//! | `SHOPIFY_API_VERSION` | `2026-01` |
//! | `SENTRY_DSN`, `SENTRY_ENVIRONMENT` | unset |
//! | `SENTRY_SAMPLE_RATE`, `SENTRY_TRACES_SAMPLE_RATE` | `1.0`, `0.0` |

use std::collections::HashMap;
use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Storefront API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "2026-01";

/// Real access tokens are random; below this they are almost certainly typed in.
const MIN_TOKEN_ENTROPY: f64 = 3.3;

/// Fragments that give away a copied-in example value (matched lowercase).
const PLACEHOLDER_FRAGMENTS: &[&str] = &[
    "your-",
    "your_",
    "changeme",
    "placeholder",
    "example",
    "replace",
    "secret",
    "token-here",
    "xxx",
    "todo",
    "insert",
];

/// Failure to build a [`StorefrontConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingEnvVar(String),
    #[error("{0} is invalid: {1}")]
    InvalidEnvVar(String, String),
    #[error("{0} looks unsafe to use: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Public URL the storefront is served from
    pub base_url: Url,
    /// Shop name shown in page titles
    pub shop_name: String,
    pub shopify: ShopifyStorefrontConfig,
    pub sentry: SentryConfig,
}

/// Storefront API access settings.
///
/// `Debug` is written by hand so the private token never reaches logs.
#[derive(Clone)]
pub struct ShopifyStorefrontConfig {
    /// Store domain, e.g. `aula.myshopify.com`
    pub store: String,
    /// Versioned API path segment, e.g. `2026-01`
    pub api_version: String,
    /// Public token, also usable from browsers
    pub storefront_public_token: String,
    /// Server-side token; preferred over the public one when set
    pub storefront_private_token: Option<SecretString>,
    /// Buyer country for `@inContext` (ISO 3166-1 alpha-2)
    pub country: Option<String>,
    /// Buyer language for `@inContext`
    pub language: Option<String>,
}

impl std::fmt::Debug for ShopifyStorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let private = self
            .storefront_private_token
            .as_ref()
            .map(|_| "[REDACTED]");

        f.debug_struct("ShopifyStorefrontConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field("storefront_public_token", &self.storefront_public_token)
            .field("storefront_private_token", &private)
            .field("country", &self.country)
            .field("language", &self.language)
            .finish()
    }
}

/// Sentry reporting settings.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    /// Reporting is off without a DSN
    pub dsn: Option<String>,
    pub environment: Option<String>,
    /// Share of error events sent
    pub sample_rate: f32,
    /// Share of requests traced
    pub traces_sample_rate: f32,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: None,
            sample_rate: 1.0,
            traces_sample_rate: 0.0,
        }
    }
}

impl StorefrontConfig {
    /// Read the configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a required variable is missing, a value
    /// does not parse, or the private token looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        Ok(Self {
            host: parse_env("STOREFRONT_HOST", "127.0.0.1")?,
            port: parse_env("STOREFRONT_PORT", "3000")?,
            base_url: Url::parse(&required_env("STOREFRONT_BASE_URL")?)
                .map_err(|e| invalid("STOREFRONT_BASE_URL", e))?,
            shop_name: optional_env("STOREFRONT_SHOP_NAME")
                .unwrap_or_else(|| crate::DEFAULT_SHOP_NAME.to_string()),
            shopify: ShopifyStorefrontConfig::from_env()?,
            sentry: SentryConfig::from_env()?,
        })
    }

    /// Address the server binds to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ShopifyStorefrontConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let private_token = optional_env("SHOPIFY_STOREFRONT_PRIVATE_TOKEN")
            .map(|token| {
                check_token("SHOPIFY_STOREFRONT_PRIVATE_TOKEN", &token)?;
                Ok::<_, ConfigError>(SecretString::from(token))
            })
            .transpose()?;

        Ok(Self {
            store: required_env("SHOPIFY_STORE")?,
            api_version: optional_env("SHOPIFY_API_VERSION")
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            storefront_public_token: required_env("SHOPIFY_STOREFRONT_PUBLIC_TOKEN")?,
            storefront_private_token: private_token,
            country: context_code_env("STOREFRONT_COUNTRY")?,
            language: context_code_env("STOREFRONT_LANGUAGE")?,
        })
    }

    /// GraphQL endpoint for this store.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("https://{}/api/{}/graphql.json", self.store, self.api_version)
    }
}

impl SentryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            dsn: optional_env("SENTRY_DSN"),
            environment: optional_env("SENTRY_ENVIRONMENT"),
            sample_rate: rate_env("SENTRY_SAMPLE_RATE", defaults.sample_rate)?,
            traces_sample_rate: rate_env("SENTRY_TRACES_SAMPLE_RATE", defaults.traces_sample_rate)?,
        })
    }
}

// =============================================================================
// Environment access
// =============================================================================

fn invalid(key: &str, reason: impl Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.to_string())
}

fn required_env(key: &str) -> Result<String, ConfigError> {
    optional_env(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Blank values count as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    optional_env(key)
        .as_deref()
        .unwrap_or(default)
        .trim()
        .parse()
        .map_err(|e| invalid(key, e))
}

/// A sampling rate in `0.0..=1.0`.
fn rate_env(key: &str, default: f32) -> Result<f32, ConfigError> {
    let rate: f32 = parse_env(key, &default.to_string())?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(invalid(key, format!("{rate} is outside 0.0..=1.0")))
    }
}

fn context_code_env(key: &str) -> Result<Option<String>, ConfigError> {
    optional_env(key)
        .map(|value| parse_context_code(&value).map_err(|reason| invalid(key, reason)))
        .transpose()
}

/// Normalize a country or language code (`cl` -> `CL`, `pt_br` -> `PT_BR`).
fn parse_context_code(value: &str) -> Result<String, String> {
    let code = value.trim().to_ascii_uppercase();
    let well_formed = (2..=5).contains(&code.len())
        && code.bytes().all(|b| b.is_ascii_uppercase() || b == b'_')
        && !code.starts_with('_')
        && !code.ends_with('_');

    if well_formed {
        Ok(code)
    } else {
        Err(format!("expected a code like CL or PT_BR, got {value:?}"))
    }
}

// =============================================================================
// Token checks
// =============================================================================

/// Shannon entropy of `s`, in bits per character.
fn entropy_bits(s: &str) -> f64 {
    let mut counts: HashMap<char, u32> = HashMap::new();
    let mut total = 0_u32;
    for c in s.chars() {
        *counts.entry(c).or_default() += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }

    let total = f64::from(total);
    counts
        .values()
        .map(|&n| {
            let p = f64::from(n) / total;
            -p * p.log2()
        })
        .sum()
}

/// Reject tokens that are obviously copied placeholders or hand-typed.
fn check_token(key: &str, token: &str) -> Result<(), ConfigError> {
    let lower = token.to_lowercase();
    if let Some(fragment) = PLACEHOLDER_FRAGMENTS.iter().find(|f| lower.contains(*f)) {
        return Err(ConfigError::InsecureSecret(
            key.to_string(),
            format!("contains placeholder text {fragment:?}"),
        ));
    }

    let bits = entropy_bits(token);
    if bits < MIN_TOKEN_ENTROPY {
        return Err(ConfigError::InsecureSecret(
            key.to_string(),
            format!("entropy {bits:.2} bits/char is below {MIN_TOKEN_ENTROPY}"),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn shopify() -> ShopifyStorefrontConfig {
        ShopifyStorefrontConfig {
            store: "aula.myshopify.com".to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            storefront_public_token: "public_token_value".to_string(),
            storefront_private_token: Some(SecretString::from("hidden_private_token_value")),
            country: Some("CL".to_string()),
            language: None,
        }
    }

    #[test]
    fn test_entropy_bits() {
        assert!(entropy_bits("").abs() < f64::EPSILON);
        assert!((entropy_bits("abab") - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_check_token_rejects_placeholder() {
        let result = check_token("TOKEN", "your-private-token");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_check_token_rejects_low_entropy() {
        let result = check_token("TOKEN", "abababababababababababab");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_check_token_accepts_random_token() {
        assert!(check_token("TOKEN", "shpat_9fK2mQ7xLp4Zr8Vt1Nc6Bw3Hy5Dj0Gs").is_ok());
    }

    #[test]
    fn test_parse_context_code() {
        assert_eq!(parse_context_code("cl").unwrap(), "CL");
        assert_eq!(parse_context_code(" pt_br ").unwrap(), "PT_BR");
        assert!(parse_context_code("C").is_err());
        assert!(parse_context_code("CHILE!").is_err());
        assert!(parse_context_code("_ES").is_err());
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            shopify().endpoint(),
            "https://aula.myshopify.com/api/2026-01/graphql.json"
        );
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "0.0.0.0".parse().unwrap(),
            port: 8080,
            base_url: Url::parse("http://localhost:8080").unwrap(),
            shop_name: crate::DEFAULT_SHOP_NAME.to_string(),
            shopify: shopify(),
            sentry: SentryConfig::default(),
        };

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_debug_redacts_private_token() {
        let output = format!("{:?}", shopify());

        assert!(output.contains("aula.myshopify.com"));
        assert!(output.contains("public_token_value"));
        assert!(output.contains("[REDACTED]"));
        assert!(!output.contains("hidden_private_token_value"));
    }
}
