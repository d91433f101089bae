pub mod http_client;
pub mod logger;

pub use http_client::HttpTextGenClient;
pub use logger::{LoggerTelemetry, NullTelemetry};
