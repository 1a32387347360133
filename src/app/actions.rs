//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to Zellij directly. It returns a
//! `Vec<Action>` after each event and the plugin shim executes them in order:
//! web requests go out through `web_request`, timers through `set_timeout`.

use crate::api::HttpRequest;
use std::time::Duration;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    ///
    /// Sent when the user explicitly requests to exit the plugin (e.g., pressing 'q').
    CloseFocus,

    /// Issues a GET request.
    ///
    /// The shim encodes the bound [`crate::api::ApiRequest`] into the request
    /// context so the reply can be correlated when it arrives.
    Fetch(HttpRequest),

    /// Schedules a timer event after the given delay.
    StartTimer(Duration),
}
