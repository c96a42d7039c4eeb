use crate::notify::{DebugLevel, NotificationSink, Severity, ToastVariant};

/// Sends logs through `tracing`, gated by a [`DebugLevel`].
///
/// Toasts are always emitted, under the `toast` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink {
    level: DebugLevel,
}

impl TracingSink {
    pub fn new(level: DebugLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> DebugLevel {
        self.level
    }
}

impl NotificationSink for TracingSink {
    fn log(&self, severity: Severity, message: &str) {
        if !self.level.allows(severity) {
            return;
        }
        match severity {
            Severity::Info => tracing::info!("[INFO]: {}", message),
            Severity::Warning => tracing::warn!("[WARN]: {}", message),
            Severity::Error => tracing::error!("[ERROR]: {}", message),
        }
    }

    fn notify(&self, variant: ToastVariant, title: &str, message: &str) {
        match variant {
            ToastVariant::Success => tracing::info!(target: "toast", title, "{}", message),
            ToastVariant::Error => tracing::error!(target: "toast", title, "{}", message),
        }
    }
}
