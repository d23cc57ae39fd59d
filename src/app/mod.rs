//! Application layer coordinating state, events, and actions.
//!
//! ```text
//! Key / host event → Event → handle_event → AppState mutation → Vec<Action>
//!                      ↑                                            │
//!                      └──── timer, web response, command result ◄──┘
//! ```
//!
//! - [`actions`]: side effects executed by the plugin shim
//! - [`handler`]: event processing and state transitions
//! - [`modes`]: keyboard focus
//! - [`panel`]: rows of the filter panel
//! - [`state`]: the state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod panel;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::Focus;
pub use panel::PanelRow;
pub use state::{AppState, StatusLine};
