//! Result storage and presentation state.
//!
//! - [`store`]: latest-wins result set, pagination, layout, card reveal
//! - [`selection`]: table row selection and select-all state
//! - [`export`]: plain-text record rendering for the clipboard
//! - [`reveal`]: chunked card reveal driven by sentinel signals

pub mod export;
pub mod reveal;
pub mod selection;
pub mod store;

pub use reveal::{RevealCursor, SentinelEpoch, REVEAL_CHUNK};
pub use selection::{SelectAllState, Selection};
pub use store::{dedup, ResultStore, ViewMode, PAGE_SIZE};
