//! User-visible notification port
//!
//! Only conditions the user can act on are surfaced here (missing API key,
//! no document to write into). Everything else goes to `tracing`.

/// Fire-and-forget channel for user-visible notices
pub trait NotificationChannel: Send + Sync {
    fn notify(&self, message: &str);
}

/// No-op notification channel
pub struct NoNotification;

impl NotificationChannel for NoNotification {
    fn notify(&self, _message: &str) {}
}
