use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Sending half of the toast queue rendered by the shell.
#[derive(Debug, Clone)]
pub struct ToastSender {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier for ToastSender {
    fn notify(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            warn!("toast receiver dropped");
        }
    }
}

pub fn toast_channel() -> (ToastSender, mpsc::UnboundedReceiver<Notification>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ToastSender { tx }, rx)
}

/// Writes toasts to the log. For headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, n: Notification) {
        match n.variant {
            ToastVariant::Default => info!(title = %n.title, "{}", n.description),
            ToastVariant::Destructive => warn!(title = %n.title, "{}", n.description),
        }
    }
}
