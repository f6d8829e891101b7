//! Layout rendering (filter bar, status bar)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::config::Currency;
use crate::model::{ActiveSection, CartSummary, FilterField, ListingController, UiState};
use super::utils::{currency_symbol, format_price};

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    }
}

pub fn render_filter_bar(frame: &mut Frame, area: Rect, listing: &ListingController, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(42), // Category, sort field, sort order
        ])
        .split(area);

    let search_focused = ui_state.active_section == ActiveSection::Search;
    let applied = &listing.filters().search_text;

    let search_text = if ui_state.search_draft.is_empty() {
        Span::styled("Type to search, Enter to apply", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(ui_state.search_draft.clone(), focus_style(search_focused))
    };
    // Unsubmitted edits are marked
    let mut line = vec![search_text];
    if ui_state.search_draft.trim() != applied.as_str() {
        line.push(Span::styled("  (Enter)", Style::default().fg(Color::Yellow)));
    }

    let search = Paragraph::new(Line::from(line)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .padding(Padding::horizontal(1))
            .border_style(focus_style(search_focused)),
    );
    frame.render_widget(search, chunks[0]);

    let filters_focused = ui_state.active_section == ActiveSection::Filters;
    let filters = listing.filters();
    let category = if filters.category.is_empty() {
        "All"
    } else {
        filters.category.as_str()
    };
    let sort_field = if filters.sort_field.is_empty() {
        "Default"
    } else {
        filters.sort_field.as_str()
    };

    let field_span = |field: FilterField, label: &str, value: &str| -> Vec<Span<'static>> {
        let value_style = if filters_focused && ui_state.filter_field == field {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        vec![
            Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
            Span::styled(value.to_string(), value_style),
            Span::raw("  "),
        ]
    };

    let mut spans = Vec::new();
    spans.extend(field_span(FilterField::Category, "Cat", category));
    spans.extend(field_span(FilterField::SortBy, "Sort", sort_field));
    spans.extend(field_span(FilterField::SortOrder, "Order", filters.sort_direction.as_str()));

    let filter_widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Filters ")
            .padding(Padding::horizontal(1))
            .border_style(focus_style(filters_focused)),
    );
    frame.render_widget(filter_widget, chunks[1]);
}

pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    listing: &ListingController,
    cart: &CartSummary,
    currency: Currency,
) {
    let dim = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::Cyan);

    let mut spans = vec![
        Span::styled("Layout ", dim),
        Span::styled(listing.breakpoint().label(), value),
        Span::styled("  Per page ", dim),
        Span::styled(listing.page_size().to_string(), value),
    ];

    if let Some(results) = listing.results() {
        spans.push(Span::styled("  Products ", dim));
        spans.push(Span::styled(results.total_products.to_string(), value));
    }
    if listing.is_loading() {
        spans.push(Span::styled("  Loading...", Style::default().fg(Color::Yellow)));
    } else if let Some(updated_at) = listing.updated_at() {
        spans.push(Span::styled("  Updated ", dim));
        spans.push(Span::styled(updated_at.format("%H:%M:%S").to_string(), value));
    }

    spans.push(Span::styled("  Cart ", dim));
    spans.push(Span::styled(
        format!(
            "{} items, {}{}",
            cart.item_count,
            currency_symbol(currency),
            format_price(cart.total_price, currency)
        ),
        Style::default().fg(Color::Green),
    ));
    spans.push(Span::styled("  h: help", dim));

    let status = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(status, area);
}
