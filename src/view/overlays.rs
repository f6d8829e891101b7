//! Overlay rendering (error notification, help, product detail, cart)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::config::Currency;
use crate::model::{CartSummary, Product, UiState};
use super::utils::{currency_symbol, format_price, rating_stars, truncate_string};

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    if let Some(ref error_msg) = ui_state.error_message {
        let area = frame.area();

        // Fixed width popup (responsive to screen size)
        let popup_width = 52.min(area.width.saturating_sub(4));
        let inner_width = popup_width.saturating_sub(4).max(1) as usize; // account for borders

        // Calculate how many lines the error message will take when wrapped
        let error_line_count = error_msg.chars().count().div_ceil(inner_width) as u16;

        // Height: top border (1) + error lines + bottom border (1)
        let popup_height = (2 + error_line_count.max(1)).min(area.height.saturating_sub(4));
        let popup_area = centered(area, popup_width, popup_height);

        // Clear the area behind the popup first
        frame.render_widget(Clear, popup_area);

        let error_widget = Paragraph::new(error_msg.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Error (Esc to dismiss) ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(Color::Black)),
            );

        frame.render_widget(error_widget, popup_area);
    }
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let keybindings = vec![
        ("", "── Navigation ──"),
        ("Tab / Shift+Tab", "Cycle search, filters, products"),
        ("/ or S", "Focus search"),
        ("F", "Focus filters"),
        ("", ""),
        ("", "── Search ──"),
        ("Type", "Edit search text"),
        ("Enter", "Apply search"),
        ("Esc", "Clear search"),
        ("", ""),
        ("", "── Filters ──"),
        ("← / →", "Pick category, sort, order"),
        ("↑ / ↓", "Change value"),
        ("", ""),
        ("", "── Products ──"),
        ("↑ / ↓", "Move selection"),
        ("← / → PgUp/PgDn", "Previous / next page"),
        ("Home / End", "First / last page"),
        ("Enter", "Product details"),
        ("A", "Add to cart"),
        ("R", "Retry failed load"),
        ("", ""),
        ("", "── Cart ──"),
        ("C", "Open / close cart"),
        ("+ / -", "Change quantity"),
        ("Delete", "Remove item"),
        ("X", "Empty cart"),
        ("", ""),
        ("", "── General ──"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4));
    let popup_area = centered(area, 62, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}

pub fn render_product_detail(frame: &mut Frame, product: &Product, in_cart: u32, currency: Currency) {
    let area = frame.area();
    let popup_area = centered(area, 70, 20.min(area.height.saturating_sub(2)));
    frame.render_widget(Clear, popup_area);

    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            product.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Price     ", label),
            Span::styled(
                format!("{}{}", currency_symbol(currency), format_price(product.price, currency)),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Category  ", label),
            Span::raw(product.category.clone()),
        ]),
        Line::from(vec![
            Span::styled("Rating    ", label),
            Span::styled(rating_stars(product.rating.rate), Style::default().fg(Color::Yellow)),
            Span::raw(format!(" {:.1} ({} reviews)", product.rating.rate, product.rating.count)),
        ]),
    ];
    if in_cart > 0 {
        lines.push(Line::from(vec![
            Span::styled("In cart   ", label),
            Span::raw(in_cart.to_string()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(product.description.clone()));

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Product (A add to cart, Esc close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(detail, popup_area);
}

pub fn render_cart(frame: &mut Frame, ui_state: &UiState, cart: &CartSummary, currency: Currency) {
    let area = frame.area();
    let popup_height = (cart.items.len() as u16 + 5).clamp(7, area.height.saturating_sub(4).max(7));
    let popup_area = centered(area, 64, popup_height);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Cart (+/- qty, Del remove, X empty, Esc close) ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .title_bottom(Line::from(format!(
            " {} items  Total {}{} ",
            cart.item_count,
            currency_symbol(currency),
            format_price(cart.total_price, currency)
        )))
        .style(Style::default().bg(Color::Black));

    if cart.items.is_empty() {
        let empty = Paragraph::new("Your cart is empty.\n\nPress A on a product to add it.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, popup_area);
        return;
    }

    let title_width = popup_area.width.saturating_sub(4 + 6 + 14) as usize;
    let items: Vec<ListItem> = cart
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == ui_state.cart_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let subtotal = format!(
                "{}{}",
                currency_symbol(currency),
                format_price(item.subtotal(), currency)
            );
            let text = format!(
                "{} x{:<3} {:>13}",
                truncate_string(&item.product.title, title_width),
                item.quantity,
                subtotal
            );
            ListItem::new(text).style(style)
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(ui_state.cart_selected));
    frame.render_stateful_widget(List::new(items).block(block), popup_area, &mut list_state);
}
