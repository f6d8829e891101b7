//! Utility functions for rendering UI components

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, List, ListItem, ListState},
    Frame,
};

use crate::config::Currency;

pub fn render_scrollable_list(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem>,
    selected_index: usize,
    block: Block,
) {
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index));

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Format a price with thousands separators: two decimals for USD, none for JPY.
/// NaN and infinities render as `N/A`.
pub fn format_price(value: f64, currency: Currency) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }

    let formatted = match currency {
        Currency::Usd => format!("{:.2}", (value.abs() * 100.0).round() / 100.0),
        Currency::Jpy => format!("{:.0}", value.abs().round()),
    };
    let (whole, fraction) = match formatted.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::new();
    if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

pub fn currency_symbol(currency: Currency) -> &'static str {
    match currency {
        Currency::Usd => "$",
        Currency::Jpy => "¥",
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Calculate width needed for index column (log10(n) + padding)
pub fn calculate_num_width(item_count: usize) -> usize {
    if item_count == 0 {
        2
    } else {
        let digits = (item_count as f64).log10().floor() as usize + 1;
        digits + 1
    }
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_width)
    } else {
        format!("{:<width$}", s, width = max_width)
    }
}

/// A five-star bar for a 0-5 rating, e.g. `★★★★☆`
pub fn rating_stars(rate: f64) -> String {
    let filled = if rate.is_finite() {
        rate.round().clamp(0.0, 5.0) as usize
    } else {
        0
    };
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
