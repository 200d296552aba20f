//! Adapters implementing the application ports

mod logging_observer;
mod metrics_sink;
mod tracing_logger;

pub use logging_observer::LoggingTransitionObserver;
pub use metrics_sink::MetricsCrateSink;
pub use tracing_logger::TracingLogger;
