//! Notifier port for user-visible messages
//!
//! The rendering layer owns toast display; the lifecycle operations only
//! emit messages through this interface.

/// Fire-and-forget sink for human-readable status messages
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn warning(&self, message: &str);
    fn info(&self, message: &str);
}

/// Notifier that routes messages to `tracing`, for headless use
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(kind = "success", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(kind = "error", "{}", message);
    }

    fn warning(&self, message: &str) {
        tracing::warn!(kind = "warning", "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(kind = "info", "{}", message);
    }
}
