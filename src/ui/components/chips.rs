//! Selected-filters strip.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ChipStrip;

const LABEL: &str = " Filters: ";

/// Renders chips left to right on one line. Chips that do not fit are
/// summarized as `+N`.
pub fn render_chips(row: usize, strip: &ChipStrip, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let label_color = if strip.focused {
        &theme.colors.focus_border
    } else {
        &theme.colors.text_dim
    };
    print!("{}{LABEL}{}", Theme::fg(label_color), Theme::reset());
    let mut used = LABEL.len();

    if strip.chips.is_empty() {
        let none = "none";
        print!("{}{none}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
        used += none.len();
    }

    for (i, chip) in strip.chips.iter().enumerate() {
        let text = if chip.removable {
            format!(" {} × ", chip.label)
        } else {
            format!(" {} ", chip.label)
        };
        let width = text.chars().count() + 1;
        let remaining = strip.chips.len() - i;
        if used + width + 4 > cols && remaining > 1 {
            let more = format!("+{remaining}");
            print!("{}{more}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
            used += more.len();
            break;
        }

        if chip.is_cursor {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.chip_fg));
            print!("{}", Theme::bg(&theme.colors.chip_bg));
        }
        print!("{text}");
        print!("{} ", Theme::reset());
        used += width;
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}
