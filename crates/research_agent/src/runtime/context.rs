use crate::ports::TelemetryPort;

pub struct PipelineContext<'a> {
    pub telemetry: &'a dyn TelemetryPort,
}

impl<'a> PipelineContext<'a> {
    pub fn new(telemetry: &'a dyn TelemetryPort) -> Self {
        Self { telemetry }
    }
}
