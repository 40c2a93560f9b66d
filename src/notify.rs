//! Transient user notifications (toasts)

use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStatus {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPosition {
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub status: ToastStatus,
    pub duration_ms: u64,
    pub position: ToastPosition,
}

impl Toast {
    pub fn success(title: impl Into<String>, description: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: ToastStatus::Success,
            duration_ms,
            position: ToastPosition::Bottom,
        }
    }

    pub fn error(description: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.into(),
            status: ToastStatus::Error,
            duration_ms,
            position: ToastPosition::Bottom,
        }
    }

    pub fn at(mut self, position: ToastPosition) -> Self {
        self.position = position;
        self
    }
}

/// Sink for toasts raised by services and screens
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Writes toasts to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.status {
            ToastStatus::Error => tracing::warn!(
                title = %toast.title,
                duration_ms = toast.duration_ms,
                "{}",
                toast.description
            ),
            _ => tracing::info!(
                title = %toast.title,
                duration_ms = toast.duration_ms,
                "{}",
                toast.description
            ),
        }
    }
}

/// Keeps every toast in memory, for embedding front-ends that poll
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        match self.toasts.lock() {
            Ok(toasts) => toasts.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Remove and return the pending toasts
    pub fn drain(&self) -> Vec<Toast> {
        match self.toasts.lock() {
            Ok(mut toasts) => std::mem::take(&mut *toasts),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, toast: Toast) {
        match self.toasts.lock() {
            Ok(mut toasts) => toasts.push(toast),
            Err(poisoned) => poisoned.into_inner().push(toast),
        }
    }
}
