/// Stand-in for the transient toast layer: every mutation outcome goes
/// through one of these. Implementations must be cheap and non-blocking.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Default notifier that routes toasts to the log.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(toast = "success", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::warn!(toast = "error", "{message}");
    }
}
