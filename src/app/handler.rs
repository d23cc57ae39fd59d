//! Event handling and state transitions.
//!
//! The plugin shim maps keys and host events into [`Event`]s, which
//! [`handle_event`] applies to [`AppState`]. The returned flag says whether
//! the pane needs a re-render; the returned actions are executed in order by
//! the shim.

use super::actions::Action;
use super::modes::Focus;
use super::panel::{self, COARSE_STEPS};
use super::state::{AppState, StatusLine};
use crate::domain::error::Result;
use crate::search::next_sort;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // Focus
    FocusNext,
    FocusPrev,
    FocusSearchBar,

    // Search bar
    Char(char),
    Backspace,
    /// Clears the query; on an empty query moves focus to the results.
    ClearQuery,
    /// Enter in the search bar: debounced commit that also collapses the
    /// filter panel.
    Submit,

    // Filter panel
    ToggleFilterPanel,
    PanelUp,
    PanelDown,
    /// Checks or unchecks the row under the panel cursor.
    PanelToggle,
    /// Nudges the range bound under the panel cursor by this many steps.
    PanelAdjust(i32),
    /// Nudges by a coarse step in the given direction.
    PanelAdjustCoarse(bool),
    ClearFilters,

    // Chips
    ChipLeft,
    ChipRight,
    RemoveChip,

    // Results
    CursorDown,
    CursorUp,
    NextPage,
    PrevPage,
    ScrollToTop,
    ToggleRowSelection,
    ToggleSelectAll,
    ExportCurrent,
    ExportSelected,
    ToggleViewMode,
    CycleSortField,
    ToggleSortOrder,

    // Host
    /// One armed timer fired.
    TimerElapsed,
    SearchResponse {
        status: u16,
        body: Vec<u8>,
        context: BTreeMap<String, String>,
    },
    PermissionsResult {
        granted: bool,
    },
    ClipboardCommandFinished {
        success: bool,
        stderr: String,
    },
    CloseFocus,
}

/// Applies an event and returns `(needs_render, actions)`.
///
/// # Errors
///
/// Search, permission, and clipboard failures become state (status line,
/// empty results) and are not returned here.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event_name(event)).entered();

    match event {
        Event::FocusNext => {
            state.cycle_focus(true);
            Ok((true, vec![]))
        }
        Event::FocusPrev => {
            state.cycle_focus(false);
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.focus = Focus::SearchBar;
            Ok((true, vec![]))
        }

        Event::Char(c) => {
            if !state.focus.is_typing() {
                return Ok((false, vec![]));
            }
            state.query.push(*c);
            tracing::trace!(query = %state.query, "query updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !state.focus.is_typing() || state.query.pop().is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, vec![]))
        }
        Event::ClearQuery => {
            if state.query.is_empty() {
                state.focus = Focus::Results;
            } else {
                state.query.clear();
            }
            Ok((true, vec![]))
        }
        Event::Submit => {
            tracing::debug!(query = %state.query, "search submitted");
            let Some(actions) = state.commit_search(false) else {
                return Ok((state.config_error.is_some(), vec![]));
            };
            state.filters_expanded = false;
            if state.focus == Focus::FilterPanel {
                state.focus = Focus::SearchBar;
            }
            Ok((true, actions))
        }

        Event::ToggleFilterPanel => {
            state.filters_expanded = !state.filters_expanded;
            if state.filters_expanded {
                state.focus = Focus::FilterPanel;
                state.clamp_cursors();
            } else if state.focus == Focus::FilterPanel {
                state.focus = Focus::SearchBar;
            }
            Ok((true, vec![]))
        }
        Event::PanelUp => {
            if state.focus != Focus::FilterPanel || state.panel_cursor == 0 {
                return Ok((false, vec![]));
            }
            state.panel_cursor -= 1;
            Ok((true, vec![]))
        }
        Event::PanelDown => {
            if state.focus != Focus::FilterPanel || state.panel_cursor + 1 >= state.panel_rows().len() {
                return Ok((false, vec![]));
            }
            state.panel_cursor += 1;
            Ok((true, vec![]))
        }
        Event::PanelToggle => {
            let Some(row) = state.current_panel_row().filter(|_| state.focus == Focus::FilterPanel) else {
                return Ok((false, vec![]));
            };
            let changed = panel::toggle(&mut state.editor, row);
            Ok(after_filter_edit(state, changed))
        }
        Event::PanelAdjust(steps) => {
            let Some(row) = state.current_panel_row().filter(|_| state.focus == Focus::FilterPanel) else {
                return Ok((false, vec![]));
            };
            let changed = panel::adjust(&mut state.editor, row, *steps);
            Ok(after_filter_edit(state, changed))
        }
        Event::PanelAdjustCoarse(forward) => {
            let steps = if *forward { COARSE_STEPS } else { -COARSE_STEPS };
            handle_event(state, &Event::PanelAdjust(steps))
        }
        Event::ClearFilters => {
            state.editor.clear_all();
            Ok(after_filter_edit(state, true))
        }

        Event::ChipLeft => {
            if state.focus != Focus::Chips || state.chip_cursor == 0 {
                return Ok((false, vec![]));
            }
            state.chip_cursor -= 1;
            Ok((true, vec![]))
        }
        Event::ChipRight => {
            if state.focus != Focus::Chips || state.chip_cursor + 1 >= state.editor.chips().len() {
                return Ok((false, vec![]));
            }
            state.chip_cursor += 1;
            Ok((true, vec![]))
        }
        Event::RemoveChip => {
            if state.focus != Focus::Chips {
                return Ok((false, vec![]));
            }
            let Some(chip) = state.editor.chips().into_iter().nth(state.chip_cursor) else {
                return Ok((false, vec![]));
            };
            if !chip.removable {
                state.status = Some(StatusLine::Info(format!("{} cannot be removed", chip.label)));
                return Ok((true, vec![]));
            }
            let changed = state.editor.remove_chip(&chip.kind);
            let outcome = after_filter_edit(state, changed);
            if !state.can_focus(Focus::Chips) {
                state.focus = Focus::SearchBar;
            }
            Ok(outcome)
        }

        Event::CursorDown => Ok((state.move_cursor_down(), vec![])),
        Event::CursorUp => Ok((state.move_cursor_up(), vec![])),
        Event::NextPage => Ok((state.change_page(true), vec![])),
        Event::PrevPage => Ok((state.change_page(false), vec![])),
        Event::ScrollToTop => {
            state.scroll_to_top();
            Ok((true, vec![]))
        }
        Event::ToggleRowSelection => Ok((state.toggle_row_selection(), vec![])),
        Event::ToggleSelectAll => Ok((state.toggle_select_all(), vec![])),
        Event::ExportCurrent => {
            let actions = state.export_current();
            Ok((true, actions))
        }
        Event::ExportSelected => {
            let actions = state.export_selected();
            Ok((true, actions))
        }
        Event::ToggleViewMode => {
            let mode = state.store.view_mode().toggled();
            tracing::debug!(?mode, "switching layout");
            state.set_view_mode(mode);
            Ok((true, vec![]))
        }
        Event::CycleSortField => {
            state.sort = next_sort(state.sort);
            tracing::debug!(sort = ?state.sort, "sort changed");
            let actions = state.commit_search(true).unwrap_or_default();
            Ok((true, actions))
        }
        Event::ToggleSortOrder => {
            let Some(sort) = state.sort.as_mut() else {
                return Ok((false, vec![]));
            };
            sort.order = sort.order.toggled();
            tracing::debug!(sort = ?state.sort, "sort order changed");
            let actions = state.commit_search(true).unwrap_or_default();
            Ok((true, actions))
        }

        Event::TimerElapsed => match state.dispatcher.on_timer() {
            Some(dispatch) => {
                let actions = state.apply_dispatch(dispatch);
                Ok((true, actions))
            }
            None => Ok((false, vec![])),
        },
        Event::SearchResponse { status, body, context } => {
            tracing::debug!(status, bytes = body.len(), "search response received");
            let changed = state.on_search_response(*status, body, context);
            Ok((changed, vec![]))
        }
        Event::PermissionsResult { granted } => {
            state.web_access_denied = !*granted;
            if *granted {
                return Ok((false, vec![]));
            }
            tracing::warn!("permissions denied; searches and the copy command will fail");
            state.status = Some(StatusLine::Error(
                "Web access was not granted; searches cannot reach the service".to_string(),
            ));
            Ok((true, vec![]))
        }
        Event::ClipboardCommandFinished { success, stderr } => {
            let actions = state.on_copy_finished(*success, stderr);
            Ok((true, actions))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
    }
}

/// Live refinement: once a search has completed, filter edits re-run it
/// through the debounced path.
fn after_filter_edit(state: &mut AppState, changed: bool) -> (bool, Vec<Action>) {
    state.clamp_cursors();
    if !changed {
        return (true, vec![]);
    }
    let actions = if state.store.has_searched() {
        state.commit_search(false).unwrap_or_default()
    } else {
        vec![]
    };
    (true, actions)
}

/// Event name for span fields, without response bodies.
fn event_name(event: &Event) -> &'static str {
    match event {
        Event::SearchResponse { .. } => "SearchResponse",
        Event::Char(_) => "Char",
        Event::TimerElapsed => "TimerElapsed",
        Event::ClipboardCommandFinished { .. } => "ClipboardCommandFinished",
        Event::PermissionsResult { .. } => "PermissionsResult",
        _ => "Input",
    }
}
