//! Logging abstractions
//!
//! Components take an `Arc<dyn Logger>`; production code passes a
//! `TracingLogger`, tests usually a `NoOpLogger`.

mod traits;
mod noop;
mod tracing_logger;

pub use traits::{Logger, SharedLogger};
pub use noop::NoOpLogger;
pub use tracing_logger::{init_tracing, TracingLogger, LOG_ENV};
