//! Configuration options for the Vantage client

use std::time::Duration;

use crate::aoi::types::MonitoringFrequency;

/// Configuration options for the Vantage client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// Delay before the post-create reconciliation refresh. The server
    /// starts baseline generation in the background when an AOI is created;
    /// this delay gives it a chance to finish before the canonical list is
    /// re-fetched.
    pub reconcile_delay: Duration,

    /// Monitoring frequency sent with newly created AOIs
    pub default_frequency: MonitoringFrequency,

    /// Value of the X-Client-Info header sent with every request
    pub client_info: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            reconcile_delay: Duration::from_millis(1500),
            default_frequency: MonitoringFrequency::Weekly,
            client_info: "vantage-aoi-rust/0.2.0".to_string(),
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the reconciliation delay
    pub fn with_reconcile_delay(mut self, value: Duration) -> Self {
        self.reconcile_delay = value;
        self
    }

    /// Set the default monitoring frequency for new AOIs
    pub fn with_default_frequency(mut self, value: MonitoringFrequency) -> Self {
        self.default_frequency = value;
        self
    }

    /// Set the X-Client-Info header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }
}
