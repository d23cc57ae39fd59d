//! Search box and the status line under it.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders a 3-line box holding the query, then one status line.
///
/// ```text
/// [margin] ┌──────────────────┐ [margin]
/// [margin] │ Search: query█   │ [margin]
/// [margin] └──────────────────┘ [margin]
/// [margin] Searching...
/// ```
///
/// The box border takes the focus color while the box has focus, and a
/// block cursor follows the query.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.focused {
        &theme.colors.focus_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if search.focused { "█" } else { "" };
    let search_text = truncate(&format!(" Search: {}{cursor}", search.query), inner_width);
    let padding = inner_width.saturating_sub(search_text.chars().count());

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{search_text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    position_cursor(row + 3, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    if let Some(status) = &search.status {
        let color = if status.is_error {
            &theme.colors.status_error_fg
        } else {
            &theme.colors.status_info_fg
        };
        let text = truncate(&status.text, box_width);
        print!("{}", Theme::fg(color));
        print!("{text}");
        print!("{}", " ".repeat(cols.saturating_sub(SEARCH_BOX_MARGIN + text.chars().count())));
        print!("{}", Theme::reset());
    } else {
        print!("{}", " ".repeat(cols.saturating_sub(SEARCH_BOX_MARGIN)));
    }

    row + 4
}
