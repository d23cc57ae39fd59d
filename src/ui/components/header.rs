//! Title bar.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title centered and the sort/layout summary right-aligned on
/// one line. The summary is dropped when the pane is too narrow for both.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = header.title.chars().count();
    let subtitle_len = header.subtitle.chars().count();
    let padding = cols.saturating_sub(title_len) / 2;
    let show_subtitle = padding + title_len + subtitle_len + 2 <= cols;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);

    let used = padding + title_len;
    if show_subtitle {
        print!("{}", " ".repeat(cols - used - subtitle_len - 1));
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{} ", header.subtitle);
    } else {
        print!("{}", " ".repeat(cols.saturating_sub(used)));
    }

    print!("{}", Theme::reset());
    row + 1
}
