//! # Telemetry
//!
//! The logging capability handed to each component at construction.
//!
//! Components emit ordinary `tracing` events, but always from inside
//! [`Telemetry::in_scope`]. A `Telemetry` built with [`Telemetry::scoped`]
//! routes those events to its own dispatcher, which lets a test capture one
//! component's output without touching the global subscriber. The default
//! value forwards to whatever subscriber is installed for the process.

use tracing::Dispatch;

/// Where a component's log events go.
#[derive(Clone, Default)]
pub struct Telemetry {
    dispatch: Option<Dispatch>,
}

impl std::fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Telemetry")
            .field("scoped", &self.dispatch.is_some())
            .finish()
    }
}

impl Telemetry {
    /// Forward to the process-wide subscriber.
    pub fn global() -> Self {
        Self::default()
    }

    /// Route events to `dispatch` only.
    pub fn scoped(dispatch: Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
        }
    }

    /// Discard every event.
    pub fn silent() -> Self {
        Self::scoped(Dispatch::none())
    }

    /// Run `f` with this telemetry's dispatcher as the default.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }
}
