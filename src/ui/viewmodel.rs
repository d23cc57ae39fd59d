//! Display-ready snapshots of application state.
//!
//! Built by `AppState::compute_viewmodel` and consumed by the renderer. View
//! models hold already truncated strings, highlight ranges, and cursor flags
//! so components never consult application state directly.

use crate::results::SelectAllState;

#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    pub chips: ChipStrip,
    /// `None` while the filter panel is collapsed.
    pub filter_panel: Option<FilterPanelView>,
    pub results: ResultsView,
    pub footer: FooterInfo,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
    /// Sort and layout summary shown under the title.
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub text: String,
    pub is_error: bool,
}

#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,
    pub focused: bool,
    pub status: Option<StatusInfo>,
}

#[derive(Debug, Clone)]
pub struct ChipItem {
    pub label: String,
    pub removable: bool,
    pub is_cursor: bool,
}

#[derive(Debug, Clone)]
pub struct ChipStrip {
    pub chips: Vec<ChipItem>,
    pub focused: bool,
}

/// One line of the filter panel.
#[derive(Debug, Clone)]
pub struct PanelLine {
    /// Section name, set on the first visible line of a section.
    pub heading: Option<&'static str>,
    pub label: String,
    /// Checkbox state; `None` for value rows such as range bounds.
    pub checked: Option<bool>,
    pub is_cursor: bool,
}

#[derive(Debug, Clone)]
pub struct FilterPanelView {
    pub lines: Vec<PanelLine>,
    pub focused: bool,
    /// Lines hidden above and below the window.
    pub hidden_above: usize,
    pub hidden_below: usize,
}

#[derive(Debug, Clone)]
pub enum ResultsView {
    /// A centered message: before the first search, while the first search
    /// loads, or after an empty result.
    Message(EmptyState),
    Table(TableView),
    Cards(CardsView),
}

#[derive(Debug, Clone)]
pub struct TableView {
    /// `"Found N results"`.
    pub summary: String,
    pub select_all: SelectAllState,
    pub selected_count: usize,
    pub rows: Vec<TableRow>,
    pub page: usize,
    pub page_count: usize,
    pub focused: bool,
}

#[derive(Debug, Clone)]
pub struct TableRow {
    pub title: String,
    /// Character ranges of `title` matching the query, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
    pub issn: String,
    pub impact_factor: String,
    pub cite_score: String,
    pub publisher: String,
    pub is_cursor: bool,
    pub is_checked: bool,
}

#[derive(Debug, Clone)]
pub struct CardsView {
    pub summary: String,
    pub cards: Vec<CardItem>,
    /// More cards are revealed once the end of the list scrolls into view.
    pub more_below: bool,
    pub focused: bool,
}

#[derive(Debug, Clone)]
pub struct CardItem {
    pub title: String,
    pub highlight_ranges: Vec<(usize, usize)>,
    /// Secondary lines, already truncated to the card width.
    pub lines: Vec<String>,
    pub is_cursor: bool,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}
