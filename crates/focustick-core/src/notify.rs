//! Best-effort completion notifications.
//!
//! Platform notification support is an environment capability, not a core
//! concern. The engine exposes completion events; a `Notifier` decides how
//! (or whether) to surface them. A missing or denied notification facility
//! must never surface as an error or alter timer state.

use crate::timer::TimerMode;

/// Injectable notification capability.
pub trait Notifier {
    /// Ask for permission to notify. `false` means alerts will be silently
    /// skipped; it must never block timer operation.
    fn request_permission(&self) -> bool {
        true
    }

    /// Surface a completion alert. Implementations swallow failures.
    fn notify(&self, completed: TimerMode, next: TimerMode);
}

/// Notifier that drops every alert. Default for tests and headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _completed: TimerMode, _next: TimerMode) {}
}
