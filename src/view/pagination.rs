//! Page strip rendering: previous, page numbers with ellipses, next

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::{ListingController, PageRangeItem};

pub fn render_page_strip(frame: &mut Frame, area: Rect, listing: &ListingController, sibling_count: u32) {
    let items = listing.page_strip(sibling_count);
    // Nothing to page through
    if items.is_empty() {
        return;
    }

    let total = listing.total_pages().unwrap_or(1);
    let line = page_strip_line(
        &items,
        listing.page().current_page.clamp(1, total),
        listing.has_previous_page(),
        listing.has_next_page(),
    );
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn page_strip_line(
    items: &[PageRangeItem],
    current_page: u32,
    has_previous: bool,
    has_next: bool,
) -> Line<'static> {
    let enabled = Style::default().fg(Color::White);
    let disabled = Style::default().fg(Color::DarkGray);

    let mut spans = vec![Span::styled(
        "‹ Prev",
        if has_previous { enabled } else { disabled },
    )];

    for item in items {
        spans.push(Span::raw("  "));
        match item {
            PageRangeItem::Page(page) if *page == current_page => spans.push(Span::styled(
                format!("[{}]", page),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            )),
            PageRangeItem::Page(page) => spans.push(Span::styled(page.to_string(), enabled)),
            PageRangeItem::Ellipsis => spans.push(Span::styled("…", disabled)),
        }
    }

    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        "Next ›",
        if has_next { enabled } else { disabled },
    ));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::page_range;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_strip_marks_current_page_and_ellipses() {
        let items = page_range(10, 5, 1);
        let line = page_strip_line(&items, 5, true, true);
        assert_eq!(text(&line), "‹ Prev  1  …  4  [5]  6  …  10  Next ›");
    }

    #[test]
    fn test_strip_dims_prev_on_first_page() {
        let items = page_range(3, 1, 1);
        let line = page_strip_line(&items, 1, false, true);
        assert_eq!(line.spans[0].style.fg, Some(Color::DarkGray));
        assert_eq!(line.spans.last().unwrap().style.fg, Some(Color::White));
    }
}
