//! Terminal rendering.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI output
//! ```
//!
//! - [`viewmodel`]: display-ready view model types
//! - [`renderer`]: top-level layout
//! - [`components`]: one renderer per screen region
//! - [`helpers`]: cursor positioning, truncation, highlighting
//! - [`theme`]: palettes and escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    CardItem, CardsView, ChipItem, ChipStrip, EmptyState, FilterPanelView, FooterInfo,
    HeaderInfo, PanelLine, ResultsView, SearchBarInfo, StatusInfo, TableRow, TableView,
    UIViewModel,
};
