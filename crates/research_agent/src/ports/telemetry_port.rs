use crate::domain::TelemetryEvent;

/// Sink for named pipeline events. Shared behind `Arc` across pipeline runs.
pub trait TelemetryPort: Send + Sync {
    fn emit(&self, event: &TelemetryEvent);
}
