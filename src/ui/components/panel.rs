//! Expanded filter panel.

use crate::ui::helpers::{pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterPanelView;

const HEADING_COLS: usize = 13;

/// Renders one line per visible panel row:
///
/// ```text
///  Search in    [x] Title
///                   [ ]   also match Aims & Scope
///  Publisher    [ ] Elsevier
/// ```
///
/// `▲`/`▼` mark rows scrolled out of the window.
pub fn render_filter_panel(row: usize, panel: &FilterPanelView, theme: &Theme, cols: usize) -> usize {
    let last = panel.lines.len().saturating_sub(1);
    let mut current_row = row;

    for (i, line) in panel.lines.iter().enumerate() {
        position_cursor(current_row, 1);

        let heading_color = if panel.focused {
            &theme.colors.header_fg
        } else {
            &theme.colors.text_dim
        };
        print!("{}{}", Theme::bold(), Theme::fg(heading_color));
        print!(" {}", pad(line.heading.unwrap_or(""), HEADING_COLS - 1));
        print!("{}", Theme::reset());

        if line.is_cursor {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        }

        let checkbox = match line.checked {
            Some(true) => "[x] ",
            Some(false) => "[ ] ",
            None => "    ",
        };
        if line.checked == Some(true) && !line.is_cursor {
            print!("{}{checkbox}", Theme::fg(&theme.colors.checkbox_fg));
        } else {
            print!("{checkbox}");
        }
        if !line.is_cursor {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }

        let marker = if i == 0 && panel.hidden_above > 0 {
            " ▲"
        } else if i == last && panel.hidden_below > 0 {
            " ▼"
        } else {
            ""
        };
        let body_width = cols.saturating_sub(HEADING_COLS + checkbox.len() + marker.chars().count());
        let label = truncate(&line.label, body_width);
        print!("{label}");
        print!("{}", Theme::reset());
        print!("{}{marker}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
        print!("{}", " ".repeat(body_width.saturating_sub(label.chars().count())));

        current_row += 1;
    }

    current_row
}
