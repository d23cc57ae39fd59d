//! One renderer per screen region.
//!
//! Every component takes the 1-indexed row it starts on, prints its lines
//! padded to the full pane width, and returns the next free row.
//!
//! - [`header`]: title and sort/layout summary
//! - [`search`]: query box and status line
//! - [`chips`]: selected-filters strip
//! - [`panel`]: expanded filter panel
//! - [`table`]: paginated results with selection
//! - [`cards`]: revealed result cards
//! - [`empty`]: centered messages
//! - [`footer`]: keybinding hints

mod cards;
mod chips;
mod empty;
mod footer;
mod header;
mod panel;
mod search;
mod table;

pub use cards::render_cards;
pub use chips::render_chips;
pub use empty::render_empty_state;
pub use footer::render_footer;
pub use header::render_header;
pub use panel::render_filter_panel;
pub use search::render_search_bar;
pub use table::render_table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;

/// Horizontal separator line.
pub fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Blanks rows `from..to` so stale content from a taller frame disappears.
pub fn clear_rows(from: usize, to: usize, cols: usize) {
    for row in from..to {
        position_cursor(row, 1);
        print!("{}", " ".repeat(cols));
    }
}
