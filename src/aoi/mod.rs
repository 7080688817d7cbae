//! Optimistic AOI lifecycle management
//!
//! Each lifecycle operation applies a tentative local mutation first, sends
//! the corresponding request to the remote authority, reconciles the cache
//! with the authoritative response, and rolls the tentative mutation back on
//! failure. Creation additionally schedules a delayed full refresh to absorb
//! server-side effects (baseline generation) that are not returned
//! synchronously.

pub mod cache;
pub mod types;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::api::AoiApi;
use crate::config::ClientOptions;
use crate::error::Error;
use crate::notify::Notifier;
use crate::scheduler::RefreshScheduler;

use cache::AoiCache;
use types::{
    AnalysisReport, AnalysisType, AoiDraft, AoiKey, AoiRecord, CreateAck, CreateAoiRequest,
    MonitoringFrequency, RecordStatus,
};

/// Read-only view of the user's credit balance, owned by an external
/// profile collaborator. The server remains authoritative; this is a
/// precondition check, not a guarantee.
pub trait CreditSource: Send + Sync {
    fn tokens_remaining(&self) -> i64;
}

/// Credit source backed by a fixed balance, for tests and service accounts
#[derive(Debug)]
pub struct FixedCredits(pub i64);

impl CreditSource for FixedCredits {
    fn tokens_remaining(&self) -> i64 {
        self.0
    }
}

/// What `create_aoi` hands back: the temporary key for correlating the
/// optimistic record, and the server's acknowledgment.
#[derive(Debug, Clone)]
pub struct CreateReceipt {
    pub temp_key: AoiKey,
    pub ack: CreateAck,
}

/// Manages the AOI entity cache and its lifecycle operations
pub struct AoiManager {
    api: Arc<dyn AoiApi>,
    cache: AoiCache,
    notifier: Arc<dyn Notifier>,
    scheduler: Arc<dyn RefreshScheduler>,
    credits: Arc<dyn CreditSource>,
    options: ClientOptions,
    next_temp_id: AtomicU64,
}

impl AoiManager {
    pub fn new(
        api: Arc<dyn AoiApi>,
        notifier: Arc<dyn Notifier>,
        scheduler: Arc<dyn RefreshScheduler>,
        credits: Arc<dyn CreditSource>,
        options: ClientOptions,
    ) -> Self {
        Self {
            api,
            cache: AoiCache::new(),
            notifier,
            scheduler,
            credits,
            options,
            next_temp_id: AtomicU64::new(1),
        }
    }

    /// The entity cache. The rendering layer reads snapshots through this;
    /// all mutation happens inside the lifecycle operations.
    pub fn cache(&self) -> &AoiCache {
        &self.cache
    }

    /// Snapshot of the cached records in display order
    pub fn list(&self) -> Vec<AoiRecord> {
        self.cache.list()
    }

    /// Create an AOI.
    ///
    /// The record appears in the cache with `Creating` status before the
    /// network call resolves. On acknowledgment the status moves to
    /// `Created` and a reconciliation refresh is scheduled after
    /// `ClientOptions::reconcile_delay`, replacing the cache with the
    /// canonical list once baseline generation has had a chance to finish.
    /// On failure the optimistic record is removed again.
    pub async fn create_aoi(&self, draft: &AoiDraft) -> Result<CreateReceipt, Error> {
        draft.validate()?;

        if self.credits.tokens_remaining() <= 0 {
            self.notifier
                .warning("No tokens remaining. You need 1 token to create an AOI.");
            return Err(Error::InsufficientTokens);
        }

        let temp = self.next_temp_id.fetch_add(1, Ordering::Relaxed);
        let temp_key = AoiKey::Pending(temp);
        self.cache.upsert(AoiRecord::pending(
            temp,
            draft,
            self.options.default_frequency,
        ));

        let request = CreateAoiRequest::from_draft(draft, self.options.default_frequency);
        match self.api.create(&request).await {
            Ok(ack) => {
                self.cache.patch_status(temp_key, RecordStatus::Created);
                self.schedule_reconcile();
                self.notifier
                    .success(&format!("AOI \"{}\" created successfully!", draft.name));
                Ok(CreateReceipt { temp_key, ack })
            }
            Err(err) => {
                self.cache.remove(temp_key);
                self.notifier
                    .error(&format!("Failed to create AOI: {}", err));
                Err(err)
            }
        }
    }

    /// Delete an AOI. A no-op when the key is not in the cache.
    pub async fn delete_aoi(&self, key: AoiKey) -> Result<(), Error> {
        let record = match self.cache.get(key) {
            Some(record) => record,
            None => return Ok(()),
        };
        // A record still awaiting confirmation has no server-side identity
        // to delete; the UI keeps actions disabled until it stabilizes.
        let id = match key {
            AoiKey::Confirmed(id) => id,
            AoiKey::Pending(_) => return Ok(()),
        };

        self.cache.patch_status(key, RecordStatus::Deleting);

        match self.api.delete(id).await {
            Ok(()) => {
                self.cache.remove(key);
                self.notifier
                    .success(&format!("AOI \"{}\" deleted successfully", record.name));
                Ok(())
            }
            Err(err) => {
                self.cache.patch_status(key, RecordStatus::Stable);
                self.notifier
                    .error(&format!("Failed to delete AOI: {}", err));
                Err(err)
            }
        }
    }

    /// Run an analysis against an AOI.
    ///
    /// The credit gate for analysis lives with the caller, which owns the
    /// profile state; this operation assumes it has been checked. The record
    /// never stays in `Analyzing` once the call settles.
    pub async fn run_analysis(
        &self,
        key: AoiKey,
        analysis_type: AnalysisType,
    ) -> Result<AnalysisReport, Error> {
        let record = self
            .cache
            .get(key)
            .ok_or_else(|| Error::UnknownAoi(key.to_string()))?;
        let id = match key {
            AoiKey::Confirmed(id) => id,
            AoiKey::Pending(_) => return Err(Error::UnknownAoi(key.to_string())),
        };

        self.cache.patch_status(key, RecordStatus::Analyzing);

        let result = self.api.run_analysis(id, analysis_type).await;
        self.cache.patch_status(key, RecordStatus::Stable);

        match result {
            Ok(report) => {
                self.notifier
                    .success(&format!("Analysis completed for \"{}\"", record.name));
                Ok(report)
            }
            Err(err) => {
                // Whether a token was charged for a failed call is unknown
                // here; the caller's profile refresh is the source of truth.
                if err.is_server_error() {
                    self.notifier.error(
                        "Server error during analysis. A token may have been consumed - check your analysis history.",
                    );
                    self.notifier.info(
                        "Check your token balance. The analysis may have partially completed.",
                    );
                } else if err.to_string().contains("not bound to a Session") {
                    self.notifier
                        .error("Database session error. A token may have been consumed but the analysis is incomplete.");
                    self.notifier
                        .info("This is a server issue. Check your token balance.");
                } else {
                    self.notifier.error(&format!(
                        "Analysis failed for \"{}\": {}",
                        record.name, err
                    ));
                }
                Err(err)
            }
        }
    }

    /// Enable scheduled monitoring for an AOI.
    ///
    /// Deliberately weaker guarantees than the other mutations: the set is
    /// brief and idempotent, so no optimistic status and no rollback. The
    /// caller re-fetches the AOI dashboard for live schedule data.
    pub async fn schedule_monitoring(
        &self,
        key: AoiKey,
        frequency: MonitoringFrequency,
    ) -> Result<(), Error> {
        let record = self
            .cache
            .get(key)
            .ok_or_else(|| Error::UnknownAoi(key.to_string()))?;
        let id = match key {
            AoiKey::Confirmed(id) => id,
            AoiKey::Pending(_) => return Err(Error::UnknownAoi(key.to_string())),
        };

        match self.api.set_schedule(id, frequency).await {
            Ok(()) => {
                self.notifier.success(&format!(
                    "Monitoring scheduled for \"{}\" ({})",
                    record.name, frequency
                ));
                Ok(())
            }
            Err(err) => {
                self.notifier
                    .error(&format!("Failed to schedule monitoring: {}", err));
                Err(err)
            }
        }
    }

    /// Replace the cache wholesale with the canonical server list. On
    /// failure the cache degrades to empty rather than keeping stale data
    /// that could hide confirmed deletions.
    pub async fn refresh_all(&self) -> Result<(), Error> {
        match self.api.list().await {
            Ok(dtos) => {
                self.cache
                    .replace_all(dtos.into_iter().map(AoiRecord::from).collect());
                Ok(())
            }
            Err(err) => {
                tracing::error!("failed to load AOIs: {}", err);
                self.cache.clear();
                self.notifier.error("Failed to load AOIs");
                Err(err)
            }
        }
    }

    /// Queue the post-create reconciliation. Fetch errors inside the task
    /// are logged and ignored; the refresh is best-effort.
    fn schedule_reconcile(&self) {
        let api = Arc::clone(&self.api);
        let cache = self.cache.clone();
        self.scheduler.schedule(
            self.options.reconcile_delay,
            Box::pin(async move {
                match api.list().await {
                    Ok(dtos) => {
                        cache.reconcile(dtos.into_iter().map(AoiRecord::from).collect());
                    }
                    Err(err) => {
                        tracing::warn!("reconciliation refresh failed: {}", err);
                    }
                }
            }),
        );
    }
}
