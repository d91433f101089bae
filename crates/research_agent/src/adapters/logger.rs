use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::info;

use crate::domain::TelemetryEvent;
use crate::ports::TelemetryPort;

/// Keeps every pipeline event in memory and mirrors it to the `log` facade under the
/// `telemetry` target. Clones share one buffer, so a caller can hand a clone to the
/// pipeline and inspect its own handle afterwards.
#[derive(Clone, Default, Debug)]
pub struct LoggerTelemetry {
    events: Arc<Mutex<Vec<TelemetryEvent>>>,
}

impl LoggerTelemetry {
    /// Drains the buffer.
    pub fn take(&self) -> Vec<TelemetryEvent> {
        std::mem::take(&mut *self.buffer())
    }

    pub fn names(&self) -> Vec<String> {
        self.buffer().iter().map(|e| e.name.clone()).collect()
    }

    pub fn find(&self, name: &str) -> Option<TelemetryEvent> {
        self.buffer().iter().find(|e| e.name == name).cloned()
    }

    // a panicking branch must not hide the events recorded before it
    fn buffer(&self) -> MutexGuard<'_, Vec<TelemetryEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TelemetryPort for LoggerTelemetry {
    fn emit(&self, event: &TelemetryEvent) {
        info!(target: "telemetry", "{}: {}", event.name, event.value);
        self.buffer().push(event.clone());
    }
}

#[derive(Clone, Copy, Default, Debug)]
pub struct NullTelemetry;

impl TelemetryPort for NullTelemetry {
    fn emit(&self, _event: &TelemetryEvent) {}
}
