//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) never talks to the host. It returns
//! a list of [`Action`]s and the plugin shim performs them in order, which
//! keeps every state transition testable without a running Zellij.

use crate::search::WebRequest;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the floating plugin pane.
    CloseFocus,

    /// Arms one host timer. Each armed timer later arrives as exactly one
    /// `Event::TimerElapsed`.
    StartTimer {
        seconds: f64,
    },

    /// Sends a search POST. The response comes back with the same context.
    SendWebRequest(WebRequest),

    /// Writes an OSC 52 clipboard sequence with the next frame.
    EmitOsc52 {
        sequence: String,
    },

    /// Runs the configured copy tool through the host command runner.
    RunCopyCommand {
        argv: Vec<String>,
    },
}
