//! API key resolution.
//!
//! An explicit, non-blank key wins. Otherwise the named environment variable
//! is read. Anything else is [`PrecisError::CredentialMissing`].

use std::fmt;

use crate::{PrecisError, Result};

/// A resolved, non-empty API key.
///
/// `Debug` never prints the key itself.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// The raw key, for building the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Resolves the API key from `explicit`, then from the process environment.
pub fn resolve_api_key(explicit: Option<&str>, env_var: &str) -> Result<ApiKey> {
    resolve_api_key_with(explicit, env_var, |name| std::env::var(name).ok())
}

/// Like [`resolve_api_key`], reading the fallback through `lookup`.
pub fn resolve_api_key_with<F>(explicit: Option<&str>, env_var: &str, lookup: F) -> Result<ApiKey>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = explicit.map(str::trim).filter(|key| !key.is_empty()) {
        return Ok(ApiKey(key.to_string()));
    }

    match lookup(env_var) {
        Some(key) if !key.trim().is_empty() => Ok(ApiKey(key.trim().to_string())),
        _ => Err(PrecisError::CredentialMissing { var: env_var.to_string() }),
    }
}
