//! Application state and view model computation.
//!
//! [`AppState`] owns every component of the search pipeline: the filter
//! editor, the dispatcher with its cache, the client, the result store, and
//! the row selection. Handler code mutates it through the methods below;
//! rendering reads it through [`AppState::compute_viewmodel`].

use super::actions::Action;
use super::modes::Focus;
use super::panel::{self, PanelRow};
use crate::domain::{Journal, Result, ScoutError};
use crate::filter::FilterEditor;
use crate::infrastructure::clipboard::{
    plan_copy, plan_fallback, ClipboardConfig, ClipboardMethod, ClipboardPlan,
};
use crate::results::export::{render_bulk, render_record};
use crate::results::{ResultStore, Selection, ViewMode};
use crate::search::{CacheKey, Dispatch, DispatchPhase, Dispatcher, RequestId, SearchClient, SortSpec};
use crate::ui::helpers::{clip_ranges, table_title_width, truncate, PUBLISHER_COLS};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CardItem, CardsView, ChipItem, ChipStrip, EmptyState, FilterPanelView, FooterInfo,
    HeaderInfo, PanelLine, ResultsView, SearchBarInfo, StatusInfo, TableRow, TableView,
    UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::BTreeMap;
use std::ops::Range;

/// Rows taken by everything except the filter panel and the results region:
/// top margin, header, border, search box (3), status, chips, border, and
/// border plus footer at the bottom.
pub const CHROME_ROWS: usize = 11;

/// Rows per card: title, five detail lines, separator.
pub const CARD_HEIGHT: usize = 7;

const MIN_CARD_COLS: usize = 12;

pub const NO_RESULTS_MESSAGE: &str = "No results found. Try adjusting your search criteria.";

/// Transient message under the search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Info(String),
    Error(String),
}

/// Export text waiting on the copy command's exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingCopy {
    text: String,
    records: usize,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub theme: Theme,
    pub focus: Focus,
    pub query: String,
    pub editor: FilterEditor,
    pub filters_expanded: bool,
    pub panel_cursor: usize,
    pub chip_cursor: usize,
    pub sort: Option<SortSpec>,
    pub dispatcher: Dispatcher,
    pub client: SearchClient,
    pub store: ResultStore,
    pub selection: Selection,
    /// Cursor within the current page (table) or the revealed cards.
    pub cursor: usize,
    pub clipboard: ClipboardConfig,
    pub status: Option<StatusLine>,
    /// Set when the configuration is unusable; searching is refused.
    pub config_error: Option<String>,
    /// The host refused web access; fetches fail without leaving the plugin.
    pub web_access_denied: bool,
    /// Last known `(rows, cols)` of the plugin pane.
    pub viewport: (usize, usize),
    pending_copy: Option<PendingCopy>,
}

impl AppState {
    #[must_use]
    pub fn new(client: SearchClient, dispatcher: Dispatcher, clipboard: ClipboardConfig, theme: Theme) -> Self {
        Self {
            theme,
            focus: Focus::SearchBar,
            query: String::new(),
            editor: FilterEditor::new(),
            filters_expanded: false,
            panel_cursor: 0,
            chip_cursor: 0,
            sort: None,
            dispatcher,
            client,
            store: ResultStore::new(),
            selection: Selection::default(),
            cursor: 0,
            clipboard,
            status: None,
            config_error: None,
            web_access_denied: false,
            viewport: (0, 0),
            pending_copy: None,
        }
    }

    /// Records the pane size and reveals cards whose sentinel is now on screen.
    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport = (rows, cols);
        self.pump_reveal();
    }

    // ---- searching -------------------------------------------------------

    /// Commits the current query, filters, and sort.
    ///
    /// Typed and filter commits are debounced; sort changes go out at once.
    /// Returns `None` when nothing was dispatched: a blank query, or a
    /// configuration that refuses searching.
    pub fn commit_search(&mut self, immediate: bool) -> Option<Vec<Action>> {
        if let Some(error) = &self.config_error {
            tracing::warn!(%error, "refusing to search with invalid configuration");
            self.status = Some(StatusLine::Error(error.clone()));
            return None;
        }

        let include_aims = self.editor.include_aims_and_scope();
        let outcome = if immediate {
            self.dispatcher
                .dispatch_immediate(&self.query, self.editor.criteria(), include_aims, self.sort)
        } else {
            self.dispatcher
                .dispatch(&self.query, self.editor.criteria(), include_aims, self.sort)
        };

        match outcome {
            Ok(Dispatch::Skipped) => {
                tracing::debug!("empty query, nothing to search");
                None
            }
            Ok(dispatch) => Some(self.apply_dispatch(dispatch)),
            Err(e) => {
                tracing::error!(error = %e, "could not build search request");
                self.status = Some(StatusLine::Error(e.to_string()));
                Some(vec![])
            }
        }
    }

    /// Turns a dispatcher decision into state changes and host actions.
    pub fn apply_dispatch(&mut self, dispatch: Dispatch) -> Vec<Action> {
        match dispatch {
            Dispatch::Skipped => {
                tracing::debug!("empty query, nothing to search");
                vec![]
            }
            Dispatch::Scheduled { delay } => vec![Action::StartTimer { seconds: delay.as_secs_f64() }],
            Dispatch::CacheHit { id, results } => {
                self.begin(id);
                if self.store.accept(id, results) {
                    self.on_new_results();
                }
                vec![]
            }
            Dispatch::Joined { id } => {
                self.begin(id);
                vec![]
            }
            Dispatch::Fetch { id, key, request } => {
                self.begin(id);
                if self.web_access_denied {
                    self.fail_fetch(
                        id,
                        key,
                        ScoutError::Transport {
                            status: 0,
                            body: "web access was not granted".to_string(),
                        },
                    );
                    return vec![];
                }
                match self.client.build_request(&request, id, &key) {
                    Ok(web) => vec![Action::SendWebRequest(web)],
                    Err(e) => {
                        self.fail_fetch(id, key, e);
                        vec![]
                    }
                }
            }
        }
    }

    /// Ends a fetch that never reached the network.
    fn fail_fetch(&mut self, id: RequestId, key: CacheKey, error: ScoutError) {
        let failure: Result<Vec<Journal>> = Err(error);
        self.dispatcher.complete(id, key, &failure);
        if let Err(e) = failure {
            self.fail_search(id, &e);
        }
    }

    fn begin(&mut self, id: RequestId) {
        self.store.expect(id);
        self.status = None;
    }

    /// Handles a search response. Returns `true` if the display changed.
    pub fn on_search_response(&mut self, status: u16, body: &[u8], context: &BTreeMap<String, String>) -> bool {
        let Some((id, key)) = SearchClient::correlate(context) else {
            tracing::debug!(?context, "response without search context");
            return false;
        };

        let outcome = SearchClient::parse_response(status, body);
        self.dispatcher.complete(id, key, &outcome);

        match outcome {
            Ok(results) => {
                let accepted = self.store.accept(id, results);
                if accepted {
                    self.on_new_results();
                }
                accepted
            }
            Err(e) => self.fail_search(id, &e),
        }
    }

    fn fail_search(&mut self, id: RequestId, error: &ScoutError) -> bool {
        if !self.store.fail(id, error) {
            return false;
        }
        tracing::error!(%id, %error, "search failed");
        self.on_new_results();
        self.status = Some(StatusLine::Error(error.to_string()));
        true
    }

    fn on_new_results(&mut self) {
        self.selection.clear();
        self.cursor = 0;
        self.pump_reveal();
    }

    // ---- results navigation ---------------------------------------------

    fn cursor_len(&self) -> usize {
        match self.store.view_mode() {
            ViewMode::Table => self.store.page_items().len(),
            ViewMode::Cards => self.store.visible_cards().len(),
        }
    }

    /// The record under the cursor in either layout.
    #[must_use]
    pub fn current_journal(&self) -> Option<&Journal> {
        match self.store.view_mode() {
            ViewMode::Table => self.store.page_items().get(self.cursor),
            ViewMode::Cards => self.store.visible_cards().get(self.cursor),
        }
    }

    pub fn move_cursor_down(&mut self) -> bool {
        if self.cursor + 1 >= self.cursor_len() {
            return false;
        }
        self.cursor += 1;
        self.pump_reveal();
        true
    }

    pub fn move_cursor_up(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Moves to another table page, keeping the cursor on row one.
    pub fn change_page(&mut self, forward: bool) -> bool {
        if self.store.view_mode() != ViewMode::Table {
            return false;
        }
        let target = if forward {
            self.store.page() + 1
        } else {
            self.store.page().saturating_sub(1)
        };
        let changed = self.store.set_page(target);
        if changed {
            self.cursor = 0;
        }
        changed
    }

    /// First row of page one, or the first card.
    pub fn scroll_to_top(&mut self) {
        self.store.set_page(1);
        self.cursor = 0;
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.store.set_view_mode(mode);
        self.cursor = 0;
        self.pump_reveal();
    }

    fn results_rows(&self) -> usize {
        self.viewport.0.saturating_sub(CHROME_ROWS + self.panel_height())
    }

    fn cards_per_screen(&self) -> usize {
        (self.results_rows().saturating_sub(2) / CARD_HEIGHT).max(1)
    }

    /// Indices of the revealed cards currently on screen.
    fn card_window(&self) -> Range<usize> {
        let per_screen = self.cards_per_screen();
        let len = self.store.visible_cards().len();
        let start = (self.cursor / per_screen) * per_screen;
        start.min(len)..(start + per_screen).min(len)
    }

    /// Reveals card chunks for as long as the sentinel after the last
    /// revealed card is on screen.
    pub fn pump_reveal(&mut self) {
        while let Some(sentinel) = self.store.sentinel() {
            if self.card_window().end < self.store.visible_cards().len() {
                break;
            }
            if !self.store.reveal_more(sentinel) {
                break;
            }
            tracing::debug!(visible = self.store.visible_cards().len(), "revealed more cards");
        }
    }

    // ---- selection and export -------------------------------------------

    pub fn toggle_row_selection(&mut self) -> bool {
        if self.store.view_mode() != ViewMode::Table {
            return false;
        }
        let Some(journal) = self.store.page_items().get(self.cursor) else {
            return false;
        };
        self.selection.toggle(journal);
        true
    }

    pub fn toggle_select_all(&mut self) -> bool {
        if self.store.view_mode() != ViewMode::Table || self.store.page_items().is_empty() {
            return false;
        }
        self.selection.toggle_page(self.store.page_items());
        true
    }

    pub fn export_current(&mut self) -> Vec<Action> {
        let Some(text) = self.current_journal().map(render_record) else {
            return vec![];
        };
        self.copy(text, 1)
    }

    /// Copies every selected record and clears the selection.
    pub fn export_selected(&mut self) -> Vec<Action> {
        let picked = self.selection.collect(self.store.results());
        if picked.is_empty() {
            self.status = Some(StatusLine::Info("Select rows with Space to export them".into()));
            return vec![];
        }
        let records = picked.len();
        let text = render_bulk(picked);
        self.selection.clear();
        self.copy(text, records)
    }

    fn copy(&mut self, text: String, records: usize) -> Vec<Action> {
        match plan_copy(&self.clipboard, &text) {
            Ok(plan) => self.deliver(plan, text, records),
            Err(e) => {
                tracing::warn!(error = %e, "no clipboard mechanism available");
                self.status = Some(StatusLine::Error(e.to_string()));
                vec![]
            }
        }
    }

    fn deliver(&mut self, plan: ClipboardPlan, text: String, records: usize) -> Vec<Action> {
        tracing::debug!(method = ?plan.method(), records, bytes = text.len(), "copying export");
        match plan {
            ClipboardPlan::Osc52 { sequence } => {
                self.pending_copy = None;
                self.status = Some(StatusLine::Info(copied_message(records)));
                vec![Action::EmitOsc52 { sequence }]
            }
            ClipboardPlan::Command { argv } => {
                self.pending_copy = Some(PendingCopy { text, records });
                vec![Action::RunCopyCommand { argv }]
            }
        }
    }

    /// Handles the copy command's exit. A failure falls back to OSC 52.
    pub fn on_copy_finished(&mut self, success: bool, stderr: &str) -> Vec<Action> {
        let Some(pending) = self.pending_copy.take() else {
            return vec![];
        };
        if success {
            self.status = Some(StatusLine::Info(copied_message(pending.records)));
            return vec![];
        }

        tracing::warn!(stderr = stderr.trim(), "copy command failed, falling back");
        match plan_fallback(&self.clipboard, ClipboardMethod::Command, &pending.text) {
            Ok(plan) => self.deliver(plan, pending.text, pending.records),
            Err(e) => {
                tracing::warn!(error = %e, "clipboard fallback unavailable");
                self.status = Some(StatusLine::Error(e.to_string()));
                vec![]
            }
        }
    }

    // ---- filter panel and chips -----------------------------------------

    #[must_use]
    pub fn panel_rows(&self) -> Vec<PanelRow> {
        panel::rows(&self.editor)
    }

    #[must_use]
    pub fn current_panel_row(&self) -> Option<PanelRow> {
        self.panel_rows().get(self.panel_cursor).copied()
    }

    /// Keeps the panel and chip cursors inside their lists after edits.
    pub fn clamp_cursors(&mut self) {
        let panel_len = self.panel_rows().len();
        self.panel_cursor = self.panel_cursor.min(panel_len.saturating_sub(1));
        let chips = self.editor.chips().len();
        self.chip_cursor = self.chip_cursor.min(chips.saturating_sub(1));
    }

    /// Whether a region can take focus right now.
    #[must_use]
    pub fn can_focus(&self, focus: Focus) -> bool {
        match focus {
            Focus::FilterPanel => self.filters_expanded,
            Focus::Chips => !self.editor.chips().is_empty(),
            Focus::SearchBar | Focus::Results => true,
        }
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        let mut next = self.focus;
        for _ in 0..4 {
            next = if forward { next.next() } else { next.prev() };
            if self.can_focus(next) {
                break;
            }
        }
        self.focus = next;
    }

    fn panel_height(&self) -> usize {
        if !self.filters_expanded {
            return 0;
        }
        let available = self.viewport.0.saturating_sub(CHROME_ROWS);
        self.panel_rows().len().min(available / 2)
    }

    // ---- view model ------------------------------------------------------

    /// Builds everything the renderer needs for a `rows` x `cols` pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows, cols).entered();

        let matcher = (!self.query.trim().is_empty()).then(SkimMatcherV2::default);

        UIViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.query.clone(),
                focused: self.focus == Focus::SearchBar,
                status: self.compute_status(),
            },
            chips: self.compute_chips(),
            filter_panel: self.compute_filter_panel(),
            results: self.compute_results(rows, cols, matcher.as_ref()),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let sort = self
            .sort
            .map_or_else(|| "Relevance".to_string(), |s| format!("{} {}", s.field.label(), s.order.arrow()));
        HeaderInfo {
            title: " Journalscout ".to_string(),
            subtitle: format!("Sort: {sort}  |  View: {}", self.store.view_mode().label()),
        }
    }

    fn compute_status(&self) -> Option<StatusInfo> {
        if let Some(error) = &self.config_error {
            return Some(StatusInfo { text: error.clone(), is_error: true });
        }
        if matches!(self.dispatcher.phase(), DispatchPhase::Pending | DispatchPhase::Fetching) {
            return Some(StatusInfo { text: "Searching...".to_string(), is_error: false });
        }
        self.status.as_ref().map(|status| match status {
            StatusLine::Info(text) => StatusInfo { text: text.clone(), is_error: false },
            StatusLine::Error(text) => StatusInfo { text: text.clone(), is_error: true },
        })
    }

    fn compute_chips(&self) -> ChipStrip {
        let focused = self.focus == Focus::Chips;
        let chips = self
            .editor
            .chips()
            .into_iter()
            .enumerate()
            .map(|(i, chip)| ChipItem {
                label: chip.label,
                removable: chip.removable,
                is_cursor: focused && i == self.chip_cursor,
            })
            .collect();
        ChipStrip { chips, focused }
    }

    fn compute_filter_panel(&self) -> Option<FilterPanelView> {
        if !self.filters_expanded {
            return None;
        }
        let rows = self.panel_rows();
        let focused = self.focus == Focus::FilterPanel;
        let window = visible_window(rows.len(), self.panel_cursor, self.panel_height());

        let lines = rows[window.clone()]
            .iter()
            .enumerate()
            .map(|(offset, row)| {
                let index = window.start + offset;
                let starts_section =
                    offset == 0 || index == 0 || rows[index - 1].section() != row.section();
                PanelLine {
                    heading: starts_section.then(|| row.section()),
                    label: panel::label(&self.editor, *row),
                    checked: panel::checked(&self.editor, *row),
                    is_cursor: focused && index == self.panel_cursor,
                }
            })
            .collect();

        Some(FilterPanelView {
            lines,
            focused,
            hidden_above: window.start,
            hidden_below: rows.len() - window.end,
        })
    }

    fn compute_results(&self, rows: usize, cols: usize, matcher: Option<&SkimMatcherV2>) -> ResultsView {
        if !self.store.has_searched() {
            let message = if self.store.is_loading() {
                "Searching..."
            } else {
                "Search journals by title, ISSN, publisher, or keyword"
            };
            return ResultsView::Message(EmptyState {
                message: message.to_string(),
                subtitle: "Type a query and press Enter. Ctrl+f opens the filters.".to_string(),
            });
        }

        if self.store.total() == 0 {
            return ResultsView::Message(EmptyState {
                message: NO_RESULTS_MESSAGE.to_string(),
                subtitle: self.store.error().unwrap_or_default().to_string(),
            });
        }

        let focused = self.focus == Focus::Results;
        let summary = found_message(self.store.total());
        match self.store.view_mode() {
            ViewMode::Table => ResultsView::Table(self.compute_table(rows, cols, matcher, summary, focused)),
            ViewMode::Cards => ResultsView::Cards(self.compute_cards(cols, matcher, summary, focused)),
        }
    }

    fn compute_table(
        &self,
        rows: usize,
        cols: usize,
        matcher: Option<&SkimMatcherV2>,
        summary: String,
        focused: bool,
    ) -> TableView {
        let page = self.store.page_items();
        let capacity = rows
            .saturating_sub(CHROME_ROWS + self.panel_height())
            .saturating_sub(3)
            .max(1);
        let window = visible_window(page.len(), self.cursor, capacity);
        let title_width = table_title_width(cols);

        let table_rows = page[window.clone()]
            .iter()
            .enumerate()
            .map(|(offset, journal)| {
                let (title, highlight_ranges) = self.display_title(&journal.title, title_width, matcher);
                TableRow {
                    title,
                    highlight_ranges,
                    issn: journal.issn.clone(),
                    impact_factor: format_metric(journal.impact_factor),
                    cite_score: format_metric(journal.cite_score),
                    publisher: truncate(&journal.publisher, PUBLISHER_COLS),
                    is_cursor: focused && window.start + offset == self.cursor,
                    is_checked: self.selection.is_selected(journal),
                }
            })
            .collect();

        TableView {
            summary,
            select_all: self.selection.state_for(page),
            selected_count: self.selection.len(),
            rows: table_rows,
            page: self.store.page(),
            page_count: self.store.page_count(),
            focused,
        }
    }

    fn compute_cards(&self, cols: usize, matcher: Option<&SkimMatcherV2>, summary: String, focused: bool) -> CardsView {
        let width = cols.saturating_sub(4).max(MIN_CARD_COLS);
        let window = self.card_window();
        let cards = self.store.visible_cards()[window.clone()]
            .iter()
            .enumerate()
            .map(|(offset, journal)| {
                let (title, highlight_ranges) = self.display_title(&journal.title, width, matcher);
                let indexed = journal.indexed_label();
                let lines = [
                    format!("ISSN {}  ·  {}", or_dash(&journal.issn), or_dash(&journal.publisher)),
                    format!(
                        "Impact Factor {}  ·  CiteScore {}",
                        format_metric(journal.impact_factor),
                        format_metric(journal.cite_score)
                    ),
                    format!("Indexed: {}", or_dash(&indexed)),
                    format!("Aims & Scope: {}", or_dash(&journal.aims_and_scope)),
                    or_dash(&journal.link).to_string(),
                ]
                .iter()
                .map(|line| truncate(line, width))
                .collect();
                CardItem {
                    title,
                    highlight_ranges,
                    lines,
                    is_cursor: focused && window.start + offset == self.cursor,
                }
            })
            .collect();

        CardsView {
            summary,
            cards,
            more_below: self.store.sentinel().is_some() || window.end < self.store.visible_cards().len(),
            focused,
        }
    }

    /// Truncates a title and computes the query-match ranges still visible.
    fn display_title(&self, title: &str, width: usize, matcher: Option<&SkimMatcherV2>) -> (String, Vec<(usize, usize)>) {
        let shown = truncate(title, width);
        let ranges = matcher.map_or_else(Vec::new, |m| self.compute_highlight_ranges(title, m));
        let kept = if shown == title {
            shown.chars().count()
        } else {
            shown.chars().count().saturating_sub(3)
        };
        (shown, clip_ranges(&ranges, kept))
    }

    /// Coalesces the matcher's character indices into `(start, end)` runs.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, self.query.trim()) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.focus {
            Focus::SearchBar => "Enter: search  Tab: next  Ctrl+f: filters  Esc: clear  Ctrl+c: quit",
            Focus::FilterPanel => "j/k: move  Space: toggle  h/l H/L: adjust  x: clear all  f: hide  Tab: next",
            Focus::Chips => "h/l: move  d/Backspace: remove  x: clear all  Tab: next  /: search",
            Focus::Results => match self.store.view_mode() {
                ViewMode::Table => {
                    "j/k: move  n/p: page  Space: select  a: all  y: copy  Y: copy selected  v: cards  s/o: sort  g: top  q: quit"
                }
                ViewMode::Cards => "j/k: move  y: copy  v: table  s/o: sort  g: top  /: search  q: quit",
            },
        };
        FooterInfo { keybindings: keybindings.to_string() }
    }
}

/// A window of at most `capacity` items around `cursor`, centered where
/// possible and pinned to the ends of the list otherwise.
#[must_use]
pub fn visible_window(len: usize, cursor: usize, capacity: usize) -> Range<usize> {
    if len <= capacity {
        return 0..len;
    }
    let start = cursor.saturating_sub(capacity / 2).min(len - capacity);
    start..start + capacity
}

#[must_use]
pub fn found_message(total: usize) -> String {
    if total == 1 {
        "Found 1 result".to_string()
    } else {
        format!("Found {total} results")
    }
}

fn copied_message(records: usize) -> String {
    if records == 1 {
        "Copied 1 record to the clipboard".to_string()
    } else {
        format!("Copied {records} records to the clipboard")
    }
}

fn format_metric(value: f64) -> String {
    if value > 0.0 {
        format!("{value:.1}")
    } else {
        "-".to_string()
    }
}

fn or_dash(text: &str) -> &str {
    if text.trim().is_empty() {
        "-"
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn window_centers_then_pins() {
        assert_eq!(visible_window(5, 3, 10), 0..5);
        assert_eq!(visible_window(30, 0, 10), 0..10);
        assert_eq!(visible_window(30, 15, 10), 10..20);
        assert_eq!(visible_window(30, 29, 10), 20..30);
    }

    #[test]
    fn result_count_wording() {
        assert_eq!(found_message(1), "Found 1 result");
        assert_eq!(found_message(25), "Found 25 results");
    }

    #[test]
    fn metrics_render_dash_when_missing() {
        assert_eq!(format_metric(0.0), "-");
        assert_eq!(format_metric(64.83), "64.8");
    }

    #[test]
    fn highlight_ranges_coalesce_runs() {
        let mut state = AppState::new(
            SearchClient::new("http://localhost:5000", None, None),
            Dispatcher::default(),
            ClipboardConfig::default(),
            Theme::default(),
        );
        state.query = "nat".into();
        let matcher = SkimMatcherV2::default();
        assert_eq!(state.compute_highlight_ranges("Nature", &matcher), vec![(0, 3)]);
    }
}
