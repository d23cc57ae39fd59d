//! Host-facing utilities: sandbox paths and clipboard delivery.

pub mod clipboard;
pub mod paths;

pub use clipboard::{plan_copy, plan_fallback, ClipboardConfig, ClipboardMethod, ClipboardPlan};
pub use paths::{expand_tilde, get_data_dir, trace_file};
