//! Main content area rendering (product list and its loading, empty and failed states)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph, Wrap},
    Frame,
};
use ratatui::widgets::Padding;

use crate::config::{Currency, DisplayConfig};
use crate::model::{ActiveSection, ListingController, ListingStatus, Product, UiState};
use super::pagination::render_page_strip;
use super::utils::{
    calculate_num_width, currency_symbol, format_price, rating_stars, render_scrollable_list,
    truncate_string,
};

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    listing: &ListingController,
    ui_state: &UiState,
    display: &DisplayConfig,
) {
    let is_focused = ui_state.active_section == ActiveSection::Products;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Product list
            Constraint::Length(1), // Page strip
        ])
        .split(area);

    let title = match listing.results() {
        Some(results) if results.total_pages > 0 => format!(
            " Products (page {} of {}) ",
            listing.page().current_page.min(results.total_pages),
            results.total_pages
        ),
        _ => " Products ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1))
        .border_style(border_style);

    match listing.status() {
        ListingStatus::Idle => {
            let content = Paragraph::new("Starting up...")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(content, chunks[0]);
        }
        ListingStatus::Loading => {
            render_skeleton(frame, chunks[0], listing.page_size(), block);
        }
        ListingStatus::Failed(message) => {
            render_failure(frame, chunks[0], message, is_search_focused(ui_state), block);
        }
        ListingStatus::Ready => {
            let products = listing
                .results()
                .map(|r| r.products.as_slice())
                .unwrap_or_default();
            if products.is_empty() {
                let content = Paragraph::new("No products match your search and filters.\n\nTry a different search or category.")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block);
                frame.render_widget(content, chunks[0]);
            } else {
                render_product_list(
                    frame,
                    chunks[0],
                    products,
                    ui_state.product_selected,
                    is_focused,
                    display.currency(),
                    block,
                );
            }
        }
    }

    // Empty until the page count for the current filters is known
    render_page_strip(frame, chunks[1], listing, display.sibling_count);
}

/// Placeholder rows, one per expected product.
fn render_skeleton(frame: &mut Frame, area: Rect, page_size: u32, block: Block) {
    let bar = Style::default().fg(Color::DarkGray);
    let rows = (page_size as usize).min(area.height.saturating_sub(2) as usize);
    let mut lines = vec![Line::from(Span::styled(
        "Loading products...",
        Style::default().fg(Color::Yellow),
    ))];
    lines.extend((1..rows).map(|i| {
        // Vary the bar lengths a little
        let width = 24 + (i * 7) % 16;
        Line::from(vec![
            Span::styled("░".repeat(width), bar),
            Span::raw("   "),
            Span::styled("░".repeat(8), bar),
        ])
    }));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn is_search_focused(ui_state: &UiState) -> bool {
    ui_state.active_section == ActiveSection::Search
}

/// The search box takes `r` as text, so from there the hint points at Tab first.
fn retry_hint(search_focused: bool) -> Line<'static> {
    let key = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    if search_focused {
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("Tab", key),
            Span::raw(", then "),
            Span::styled("R", key),
            Span::raw(" to retry"),
        ])
    } else {
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("R", key),
            Span::raw(" to retry"),
        ])
    }
}

fn render_failure(frame: &mut Frame, area: Rect, message: &str, search_focused: bool, block: Block) {
    let lines = vec![
        Line::from(Span::styled(
            "Something went wrong",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Red))),
        Line::from(""),
        retry_hint(search_focused),
    ];
    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block.border_style(Style::default().fg(Color::Red)));
    frame.render_widget(content, area);
}

fn render_product_list(
    frame: &mut Frame,
    area: Rect,
    products: &[Product],
    selected_index: usize,
    is_focused: bool,
    currency: Currency,
    block: Block,
) {
    let content_width = area.width.saturating_sub(4) as usize;
    let num_width = calculate_num_width(products.len());
    let price_width = 12;
    let rating_width = 5;
    let category_width = 18;
    // " {num}  {title}  {category}  {rating}  {price}"
    let title_width = content_width
        .saturating_sub(1 + num_width + 2 + 2 + category_width + 2 + rating_width + 2 + price_width);

    let items: Vec<ListItem> = products
        .iter()
        .enumerate()
        .map(|(i, product)| {
            let style = if i == selected_index && is_focused {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if i == selected_index {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let price = format!("{}{}", currency_symbol(currency), format_price(product.price, currency));
            let text = format!(
                " {:>num_width$}  {}  {}  {}  {:>price_width$}",
                i + 1,
                truncate_string(&product.title, title_width),
                truncate_string(&product.category, category_width),
                rating_stars(product.rating.rate),
                price,
            );
            ListItem::new(text).style(style)
        })
        .collect();

    render_scrollable_list(frame, area, items, selected_index, block);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_retry_hint_follows_focus() {
        let mut ui_state = UiState::default();
        assert_eq!(text(&retry_hint(is_search_focused(&ui_state))), "Press Tab, then R to retry");

        ui_state.active_section = ActiveSection::Products;
        assert_eq!(text(&retry_hint(is_search_focused(&ui_state))), "Press R to retry");
    }
}
