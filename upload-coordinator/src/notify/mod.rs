pub mod level;
pub mod sink;
pub mod tracing_sink;

pub use level::DebugLevel;
pub use sink::{NotificationSink, Severity, ToastVariant};
pub use tracing_sink::TracingSink;
