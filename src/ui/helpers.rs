//! Shared rendering utilities.
//!
//! All widths and ranges here are in characters, not bytes, so journal titles
//! with accents or non-Latin scripts are cut and highlighted correctly.

use crate::ui::theme::Theme;

/// Width of the selection checkbox column in the table, `[x] `.
pub const CHECKBOX_COLS: usize = 4;
pub const ISSN_COLS: usize = 11;
pub const IMPACT_COLS: usize = 8;
pub const CITESCORE_COLS: usize = 9;
pub const PUBLISHER_COLS: usize = 20;
/// Columns of a table row besides the title, including separators and a
/// right margin.
pub const TABLE_FIXED_COLS: usize = CHECKBOX_COLS + ISSN_COLS + IMPACT_COLS + CITESCORE_COLS + PUBLISHER_COLS + 5;
const MIN_TITLE_COLS: usize = 12;

/// Title column width for a pane `cols` wide.
#[must_use]
pub const fn table_title_width(cols: usize) -> usize {
    let width = cols.saturating_sub(TABLE_FIXED_COLS);
    if width < MIN_TITLE_COLS {
        MIN_TITLE_COLS
    } else {
        width
    }
}

/// Moves the cursor to a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Cuts `text` to at most `width` characters, marking the cut with `...`.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut cut: String = text.chars().take(width - 3).collect();
    cut.push_str("...");
    cut
}

/// Left-aligns `text` in a column of `width` characters, truncating if needed.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let fill = width.saturating_sub(cut.chars().count());
    format!("{cut}{}", " ".repeat(fill))
}

/// Drops or shortens ranges that fall past `len` characters.
#[must_use]
pub fn clip_ranges(ranges: &[(usize, usize)], len: usize) -> Vec<(usize, usize)> {
    ranges
        .iter()
        .filter(|(start, _)| *start < len)
        .map(|&(start, end)| (start, end.min(len)))
        .collect()
}

/// Prints `text` with the given character ranges in match colors.
///
/// On the cursor row the selection colors win and no matches are drawn.
/// Ranges must be sorted and non-overlapping.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_cursor: bool) {
    if ranges.is_empty() || is_cursor {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in &clip_ranges(ranges, chars.len()) {
        if start < current_pos {
            continue;
        }
        if start > current_pos {
            let normal: String = chars[current_pos..start].iter().collect();
            print!("{normal}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted: String = chars[start..end].iter().collect();
        print!("{highlighted}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn truncates_by_characters() {
        assert_eq!(truncate("Nature", 10), "Nature");
        assert_eq!(truncate("Revue française de sociologie", 12), "Revue fra...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn pads_to_column_width() {
        assert_eq!(pad("IF", 5), "IF   ");
        assert_eq!(pad("Publisher", 6), "Pub...");
    }

    #[test]
    fn title_column_takes_remaining_width() {
        assert_eq!(table_title_width(120), 120 - TABLE_FIXED_COLS);
        assert_eq!(table_title_width(40), 12);
    }

    #[test]
    fn clips_ranges_to_visible_text() {
        assert_eq!(clip_ranges(&[(0, 2), (5, 9), (12, 14)], 7), vec![(0, 2), (5, 7)]);
    }
}
