//! Remote access port for the Vantage AOI backend

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

use crate::aoi::types::{
    AnalysisReport, AnalysisType, AoiDto, AoiListData, ApiEnvelope, CreateAoiRequest, CreateAck,
    MonitoringFrequency, RunAnalysisRequest, ScheduleRequest,
};
use crate::auth::TokenProvider;
use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::Fetch;

/// The remote authority for AOI state. Implementations may fail with
/// transport errors or application errors; callers treat both uniformly.
#[async_trait]
pub trait AoiApi: Send + Sync {
    /// Fetch the canonical AOI list
    async fn list(&self) -> Result<Vec<AoiDto>, Error>;

    /// Create an AOI server-side; baseline generation starts asynchronously
    async fn create(&self, request: &CreateAoiRequest) -> Result<CreateAck, Error>;

    /// Delete an AOI
    async fn delete(&self, id: i64) -> Result<(), Error>;

    /// Run an analysis against an AOI, consuming a credit token
    async fn run_analysis(
        &self,
        id: i64,
        analysis_type: AnalysisType,
    ) -> Result<AnalysisReport, Error>;

    /// Enable scheduled monitoring for an AOI
    async fn set_schedule(&self, id: i64, frequency: MonitoringFrequency) -> Result<(), Error>;
}

/// HTTP implementation of the remote access port
pub struct VantageApi {
    url: String,
    client: Client,
    tokens: Arc<dyn TokenProvider>,
    options: ClientOptions,
}

impl VantageApi {
    pub(crate) fn new(
        url: &str,
        client: Client,
        tokens: Arc<dyn TokenProvider>,
        options: ClientOptions,
    ) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            client,
            tokens,
            options,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/api/aoi{}", self.url, path)
    }
}

#[async_trait]
impl AoiApi for VantageApi {
    async fn list(&self) -> Result<Vec<AoiDto>, Error> {
        let token = self.tokens.token().await?;

        let envelope = Fetch::get(&self.client, &self.get_url(""))
            .bearer_auth(&token)
            .header("X-Client-Info", &self.options.client_info)
            .execute::<ApiEnvelope<AoiListData>>()
            .await?;

        Ok(envelope.into_data()?.areas_of_interest)
    }

    async fn create(&self, request: &CreateAoiRequest) -> Result<CreateAck, Error> {
        let token = self.tokens.token().await?;

        let envelope = Fetch::post(&self.client, &self.get_url(""))
            .bearer_auth(&token)
            .header("X-Client-Info", &self.options.client_info)
            .json(request)?
            .execute::<ApiEnvelope<CreateAck>>()
            .await?;

        envelope.into_data()
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        let token = self.tokens.token().await?;

        Fetch::delete(&self.client, &self.get_url(&format!("/{}", id)))
            .bearer_auth(&token)
            .header("X-Client-Info", &self.options.client_info)
            .execute_ok()
            .await
    }

    async fn run_analysis(
        &self,
        id: i64,
        analysis_type: AnalysisType,
    ) -> Result<AnalysisReport, Error> {
        let token = self.tokens.token().await?;

        let envelope = Fetch::post(&self.client, &self.get_url(&format!("/{}/run-analysis", id)))
            .bearer_auth(&token)
            .header("X-Client-Info", &self.options.client_info)
            .json(&RunAnalysisRequest { analysis_type })?
            .execute::<ApiEnvelope<AnalysisReport>>()
            .await?;

        envelope.into_data()
    }

    async fn set_schedule(&self, id: i64, frequency: MonitoringFrequency) -> Result<(), Error> {
        let token = self.tokens.token().await?;

        Fetch::post(
            &self.client,
            &self.get_url(&format!("/{}/schedule-monitoring", id)),
        )
        .bearer_auth(&token)
        .header("X-Client-Info", &self.options.client_info)
        .json(&ScheduleRequest {
            frequency,
            enabled: true,
        })?
        .execute_ok()
        .await
    }
}
