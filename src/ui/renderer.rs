//! Top-level layout.
//!
//! ```text
//! [blank]
//! [Header]
//! [Border]
//! [Search box, 3 lines]
//! [Status]
//! [Chips]
//! [Filter panel, when expanded]
//! [Border]
//! [Results: table, cards, or message]
//! [Border]
//! [Footer]
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ResultsView, UIViewModel};

/// Computes the view model for a `rows` x `cols` pane and prints it.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2;

    current_row = components::render_header(current_row, &vm.header, theme, cols);
    current_row = components::render_border(current_row, &theme.colors.border, cols);
    current_row = components::render_search_bar(current_row, &vm.search_bar, theme, cols);
    current_row = components::render_chips(current_row, &vm.chips, theme, cols);
    if let Some(panel) = &vm.filter_panel {
        current_row = components::render_filter_panel(current_row, panel, theme, cols);
    }
    current_row = components::render_border(current_row, &theme.colors.border, cols);

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);

    let results_end = match &vm.results {
        ResultsView::Message(empty) => {
            components::clear_rows(current_row, border_row, cols);
            components::render_empty_state(current_row, empty, theme, cols);
            border_row
        }
        ResultsView::Table(table) => components::render_table(current_row, table, theme, cols),
        ResultsView::Cards(cards) => components::render_cards(current_row, cards, theme, cols),
    };
    components::clear_rows(results_end, border_row, cols);

    components::render_border(border_row, &theme.colors.border, cols);
    components::render_footer(footer_row, &vm.footer, theme, cols);
}
