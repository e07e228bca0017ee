//! Notification boundary.
//!
//! Every mutating operation emits at most one user-facing notification.
//! The engine produces [`Notification`] values as effect data; a
//! [`Notifier`] delivers them to whatever UI collaborator is attached.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{error, info};

/// Severity of a notification. Error is reserved for the publish refusal
/// and failed sync/export operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// One user-facing notification event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub display_duration_ms: u64,
}

impl Notification {
    /// Informational notification with the default 2s display.
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::Info,
            display_duration_ms: 2_000,
        }
    }

    /// Error notification with the longer 3s display.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::Error,
            display_duration_ms: 3_000,
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.display_duration_ms = duration_ms;
        self
    }
}

/// Delivery seam for notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification);
}

/// Notifier backed by an unbounded channel; the UI collaborator drains the
/// receiving end. Dropping the receiver turns delivery into a no-op.
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn notify(&self, notification: Notification) {
        // Receiver gone means no UI is attached; nothing to deliver.
        let _ = self.tx.send(notification);
    }
}

/// Notifier that writes to the tracing log. Useful for headless runs.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info => info!(
                title = %notification.title,
                "{}", notification.message
            ),
            Severity::Error => error!(
                title = %notification.title,
                "{}", notification.message
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_pick_the_documented_defaults() {
        let info = Notification::info("Status Updated", "Article approved for newsletter");
        assert_eq!(info.severity, Severity::Info);
        assert_eq!(info.display_duration_ms, 2_000);

        let error = Notification::error("No Articles to Sync", "Please approve some articles first");
        assert_eq!(error.severity, Severity::Error);
        assert_eq!(error.display_duration_ms, 3_000);

        assert_eq!(info.with_duration(5_000).display_duration_ms, 5_000);
    }

    #[tokio::test]
    async fn channel_notifier_delivers_in_order() {
        let (notifier, mut rx) = ChannelNotifier::new();
        notifier.notify(Notification::info("first", "a")).await;
        notifier.notify(Notification::error("second", "b")).await;

        assert_eq!(rx.recv().await.unwrap().title, "first");
        assert_eq!(rx.recv().await.unwrap().title, "second");
    }
}
