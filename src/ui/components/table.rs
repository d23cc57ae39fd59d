//! Paginated result table.

use crate::ui::helpers::{
    self, pad, position_cursor, table_title_width, CITESCORE_COLS, IMPACT_COLS, ISSN_COLS,
    PUBLISHER_COLS,
};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{TableRow, TableView};

/// Renders the summary line, column headers, the visible rows, and the page
/// indicator. Returns the row after the page indicator.
///
/// ```text
/// Found 25 results                                  2 selected
/// [-] TITLE                       ISSN        IF       CITESCORE PUBLISHER
/// [x] Journal of Hydrology        0022-1694   6.4      10.9      Elsevier
///                            ‹ Page 1 of 3 ›
/// ```
pub fn render_table(row: usize, table: &TableView, theme: &Theme, cols: usize) -> usize {
    let mut current_row = render_summary(row, table, theme, cols);
    current_row = render_table_headers(current_row, table, theme, cols);
    for item in &table.rows {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    render_page_indicator(current_row, table, theme, cols)
}

fn render_summary(row: usize, table: &TableView, theme: &Theme, cols: usize) -> usize {
    let selected = if table.selected_count > 0 {
        format!("{} selected ", table.selected_count)
    } else {
        String::new()
    };
    let summary = format!(" {}", table.summary);
    let gap = cols.saturating_sub(summary.chars().count() + selected.chars().count());

    position_cursor(row, 1);
    print!("{}{}{summary}", Theme::bold(), Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", Theme::reset());
    print!("{}", " ".repeat(gap));
    print!("{}{selected}{}", Theme::fg(&theme.colors.checkbox_fg), Theme::reset());
    row + 1
}

/// Column headers, led by the select-all checkbox for the current page.
fn render_table_headers(row: usize, table: &TableView, theme: &Theme, cols: usize) -> usize {
    let title_width = table_title_width(cols);
    let line = format!(
        "{} {} {} {} {} {}",
        table.select_all.glyph(),
        pad("TITLE", title_width),
        pad("ISSN", ISSN_COLS),
        pad("IF", IMPACT_COLS),
        pad("CITESCORE", CITESCORE_COLS),
        pad("PUBLISHER", PUBLISHER_COLS),
    );

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{line}");
    print!("{}", " ".repeat(cols.saturating_sub(line.chars().count())));
    print!("{}", Theme::reset());
    row + 1
}

/// One record. The cursor row takes the selection colors across the full
/// width; query matches are highlighted in the title elsewhere.
fn render_table_row(row: usize, item: &TableRow, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let title_width = table_title_width(cols);

    if item.is_cursor {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    let checkbox = if item.is_checked { "[x] " } else { "[ ] " };
    if item.is_checked && !item.is_cursor {
        print!("{}{checkbox}{}", Theme::fg(&theme.colors.checkbox_fg), Theme::fg(&theme.colors.text_normal));
    } else {
        print!("{checkbox}");
    }

    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_cursor);
    print!("{}", " ".repeat(title_width.saturating_sub(item.title.chars().count())));

    let rest = format!(
        " {} {} {} {}",
        pad(&item.issn, ISSN_COLS),
        pad(&item.impact_factor, IMPACT_COLS),
        pad(&item.cite_score, CITESCORE_COLS),
        pad(&item.publisher, PUBLISHER_COLS),
    );
    print!("{rest}");

    let line_len = helpers::CHECKBOX_COLS + title_width + rest.chars().count();
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));
    print!("{}", Theme::reset());
    row + 1
}

fn render_page_indicator(row: usize, table: &TableView, theme: &Theme, cols: usize) -> usize {
    let prev = if table.page > 1 { "‹ " } else { "  " };
    let next = if table.page < table.page_count { " ›" } else { "  " };
    let text = format!("{prev}Page {} of {}{next}", table.page, table.page_count);
    let len = text.chars().count();
    let padding = cols.saturating_sub(len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}{text}", " ".repeat(padding));
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
    print!("{}", Theme::reset());
    row + 1
}
