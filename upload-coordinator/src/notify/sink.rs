use std::sync::Arc;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Success,
    Error,
}

/// Receives diagnostic logs and user-facing toasts.
///
/// Implementations must not fail or panic back into the caller; nothing sent
/// here alters the result of an operation.
pub trait NotificationSink: Send + Sync {
    fn log(&self, severity: Severity, message: &str);

    fn notify(&self, variant: ToastVariant, title: &str, message: &str);
}

impl<T: NotificationSink + ?Sized> NotificationSink for Arc<T> {
    fn log(&self, severity: Severity, message: &str) {
        (**self).log(severity, message)
    }

    fn notify(&self, variant: ToastVariant, title: &str, message: &str) {
        (**self).notify(variant, title, message)
    }
}
