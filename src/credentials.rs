use secrecy::{ExposeSecret, SecretString};

/// API token for the token-gated equity quote source.
///
/// Read from the environment so CI schedulers can inject it as a secret
/// without a credentials file. A missing or empty value is not an error:
/// the refresh simply runs without that source.
pub struct QuoteToken(SecretString);

impl QuoteToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Load the token from `var`, treating unset or blank values as absent.
    pub fn from_env(var: &str) -> Option<Self> {
        match std::env::var(var) {
            Ok(value) if !value.trim().is_empty() => Some(Self::new(value)),
            _ => None,
        }
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for QuoteToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("QuoteToken").field(&"[REDACTED]").finish()
    }
}
