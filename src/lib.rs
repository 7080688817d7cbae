//! Vantage AOI Client Library
//!
//! A Rust client for the Vantage satellite-monitoring backend, built around
//! an optimistic AOI lifecycle manager: mutations appear in a local entity
//! cache immediately, the server stays authoritative, and a delayed
//! reconciliation refresh absorbs server-side effects (baseline image
//! generation) that complete out of band.

pub mod api;
pub mod aoi;
pub mod auth;
pub mod config;
pub mod error;
pub mod fetch;
pub mod notify;
pub mod scheduler;

use reqwest::Client;
use std::sync::Arc;

use crate::aoi::{AoiManager, CreditSource};
use crate::api::VantageApi;
use crate::auth::TokenProvider;
use crate::config::ClientOptions;
use crate::error::Error;
use crate::notify::Notifier;
use crate::scheduler::TokioScheduler;

/// The main entry point for the Vantage AOI client
pub struct Vantage {
    /// The base URL of the Vantage backend
    pub url: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Bearer token provider
    pub tokens: Arc<dyn TokenProvider>,
    /// Client options
    pub options: ClientOptions,
}

impl Vantage {
    /// Create a new Vantage client
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use vantage_aoi::Vantage;
    /// use vantage_aoi::auth::StaticTokenProvider;
    ///
    /// let vantage = Vantage::new(
    ///     "https://api.vantage.example.com",
    ///     Arc::new(StaticTokenProvider::new("service-token")),
    /// )
    /// .unwrap();
    /// ```
    pub fn new(url: &str, tokens: Arc<dyn TokenProvider>) -> Result<Self, Error> {
        Self::new_with_options(url, tokens, ClientOptions::default())
    }

    /// Create a new Vantage client with custom options
    pub fn new_with_options(
        url: &str,
        tokens: Arc<dyn TokenProvider>,
        options: ClientOptions,
    ) -> Result<Self, Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(Self {
            url: url.to_string(),
            http_client,
            tokens,
            options,
        })
    }

    /// Build the remote access port for the AOI endpoints
    pub fn api(&self) -> VantageApi {
        VantageApi::new(
            &self.url,
            self.http_client.clone(),
            Arc::clone(&self.tokens),
            self.options.clone(),
        )
    }

    /// Build an AOI lifecycle manager wired to this client.
    ///
    /// The notifier surfaces user-visible messages; the credit source is the
    /// read-only view of the profile's token balance.
    pub fn aoi(&self, notifier: Arc<dyn Notifier>, credits: Arc<dyn CreditSource>) -> AoiManager {
        AoiManager::new(
            Arc::new(self.api()),
            notifier,
            Arc::new(TokioScheduler::default()),
            credits,
            self.options.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenProvider;
    use std::time::Duration;

    #[test]
    fn client_builds_with_a_custom_timeout() {
        let options =
            ClientOptions::default().with_request_timeout(Some(Duration::from_secs(5)));
        let vantage = Vantage::new_with_options(
            "http://localhost:54321",
            Arc::new(StaticTokenProvider::new("test-token")),
            options,
        );
        assert!(vantage.is_ok());
    }

    #[test]
    fn client_builds_without_a_timeout() {
        let options = ClientOptions::default().with_request_timeout(None);
        let vantage = Vantage::new_with_options(
            "http://localhost:54321",
            Arc::new(StaticTokenProvider::new("test-token")),
            options,
        );
        assert!(vantage.is_ok());
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::aoi::types::{
        AnalysisType, AoiDraft, AoiKey, AoiRecord, BoundingBox, Classification,
        MonitoringFrequency, Priority, RecordStatus,
    };
    pub use crate::aoi::{AoiManager, CreditSource};
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::notify::Notifier;
    pub use crate::Vantage;
}
