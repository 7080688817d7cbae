//! Auth token provider port
//!
//! The dashboard authenticates against an external identity provider; this
//! client only needs a bearer token per request. The provider is consumed
//! through a narrow trait so tests can supply a fixed token.

use async_trait::async_trait;

use crate::error::Error;

/// Supplies a bearer token for each outgoing request
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Return a fresh bearer token, or an auth error when none is available
    async fn token(&self) -> Result<String, Error>;
}

/// Token provider backed by a fixed string, for service accounts and tests
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn token(&self) -> Result<String, Error> {
        if self.token.is_empty() {
            return Err(Error::auth("no auth token available"));
        }
        Ok(self.token.clone())
    }
}
