//! Card list with incremental reveal.

use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardItem, CardsView};

/// Renders the summary, the on-screen cards, and a trailing line that either
/// announces more cards or marks the end of the results.
pub fn render_cards(row: usize, cards: &CardsView, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let summary = format!(" {}", cards.summary);
    print!("{}{}{summary}", Theme::bold(), Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", Theme::reset());
    print!("{}", " ".repeat(cols.saturating_sub(summary.chars().count())));

    let mut current_row = row + 1;
    for card in &cards.cards {
        current_row = render_card(current_row, card, theme, cols);
    }

    let trailer = if cards.more_below { " ▼ more" } else { " End of results" };
    position_cursor(current_row, 1);
    print!("{}{trailer}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
    print!("{}", " ".repeat(cols.saturating_sub(trailer.chars().count())));
    current_row + 1
}

/// A card is a title line, its detail lines, and a blank separator. The
/// cursor card is marked by a colored gutter.
fn render_card(row: usize, card: &CardItem, theme: &Theme, cols: usize) -> usize {
    let gutter = if card.is_cursor { " ▌ " } else { "   " };
    let gutter_color = if card.is_cursor {
        &theme.colors.selection_bg
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}{gutter}{}", Theme::fg(gutter_color), Theme::reset());
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal));
    helpers::render_highlighted_text(&card.title, &card.highlight_ranges, theme, false);
    print!("{}", Theme::reset());
    print!("{}", " ".repeat(cols.saturating_sub(3 + card.title.chars().count())));

    let mut current_row = row + 1;
    for line in &card.lines {
        position_cursor(current_row, 1);
        print!("{}{gutter}{}", Theme::fg(gutter_color), Theme::reset());
        print!("{}{line}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
        print!("{}", " ".repeat(cols.saturating_sub(3 + line.chars().count())));
        current_row += 1;
    }

    position_cursor(current_row, 1);
    print!("{}", " ".repeat(cols));
    current_row + 1
}
