//! Collaborator traits the host UI provides.
//!
//! These are consumed, never implemented beyond logging defaults: the real
//! toast surface, the full-page checkout navigation, and the charity picker
//! all belong to the host application.

use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    /// Partial-success states ("uploaded but not saved") — distinct from
    /// `Error` so the UI can style them differently.
    Warning,
    Error,
}

/// Transient notification sink. `key` is a stable message key the host's
/// i18n layer resolves; `detail` is optional raw context for display or
/// logging.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, key: &str, detail: Option<&str>);
}

/// Default notifier that writes to the tracing log instead of a UI.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotifier;

impl Notifier for LoggingNotifier {
    fn notify(&self, level: NoticeLevel, key: &str, detail: Option<&str>) {
        match level {
            NoticeLevel::Error => tracing::error!(key, detail, "notice"),
            NoticeLevel::Warning => tracing::warn!(key, detail, "notice"),
            _ => tracing::info!(key, detail, "notice"),
        }
    }
}

/// Full-page navigation to the external payment processor. This is a hard
/// hand-off, not an in-app transition: the processor runs its own
/// verification flow and sends the user back with a session identifier.
pub trait CheckoutRedirect: Send + Sync {
    fn redirect(&self, checkout_url: &str);
}

/// Blocking charity choice resolved by the host UI.
#[async_trait]
pub trait CharitySelector: Send + Sync {
    /// Present `message` and resolve to the chosen charity identifier, or
    /// `None` when the user dismisses the picker.
    async fn choose(&self, message: &str) -> Option<String>;
}
