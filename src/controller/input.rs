//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::ActiveSection;
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Ctrl+C quits from anywhere
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            model.set_should_quit(true).await;
            return Ok(());
        }

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    model.clear_error().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') => {
                    model.hide_help_popup().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle product detail popup
        if model.is_product_detail_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => {
                    model.hide_product_detail().await;
                    Ok(())
                }
                KeyCode::Char('a') | KeyCode::Char('A') => {
                    drop(model);
                    self.add_selected_to_cart().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle cart overlay
        if model.is_cart_open().await {
            return match key.code {
                KeyCode::Up => {
                    model.cart_move_up().await;
                    Ok(())
                }
                KeyCode::Down => {
                    model.cart_move_down().await;
                    Ok(())
                }
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    drop(model);
                    self.increment_selected_cart_item().await;
                    Ok(())
                }
                KeyCode::Char('-') => {
                    drop(model);
                    self.decrement_selected_cart_item().await;
                    Ok(())
                }
                KeyCode::Delete | KeyCode::Backspace => {
                    drop(model);
                    self.remove_selected_cart_item().await;
                    Ok(())
                }
                KeyCode::Char('x') | KeyCode::Char('X') => {
                    drop(model);
                    self.clear_cart().await;
                    Ok(())
                }
                KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('C') => {
                    model.hide_cart().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        let ui_state = model.get_ui_state().await;

        match key.code {
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    model.cycle_section_backward().await;
                } else {
                    model.cycle_section_forward().await;
                }
                return Ok(());
            }
            KeyCode::BackTab => {
                model.cycle_section_backward().await;
                return Ok(());
            }
            _ => {}
        }

        // Search input swallows printable keys
        if ui_state.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Enter => {
                    drop(model);
                    self.submit_search().await;
                    return Ok(());
                }
                KeyCode::Esc => {
                    drop(model);
                    self.clear_search().await;
                    return Ok(());
                }
                KeyCode::Backspace => {
                    model.backspace_search().await;
                    return Ok(());
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    model.append_to_search(c).await;
                    return Ok(());
                }
                _ => {}
            }
        }

        if ui_state.active_section == ActiveSection::Filters {
            match key.code {
                KeyCode::Left => {
                    model.focus_previous_filter().await;
                    return Ok(());
                }
                KeyCode::Right => {
                    model.focus_next_filter().await;
                    return Ok(());
                }
                KeyCode::Up => {
                    drop(model);
                    self.cycle_filter_value(false).await;
                    return Ok(());
                }
                KeyCode::Down | KeyCode::Enter | KeyCode::Char(' ') => {
                    drop(model);
                    self.cycle_filter_value(true).await;
                    return Ok(());
                }
                _ => {}
            }
        }

        if ui_state.active_section == ActiveSection::Products {
            match key.code {
                KeyCode::Up => {
                    model.product_move_up().await;
                    return Ok(());
                }
                KeyCode::Down => {
                    model.product_move_down().await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    model.show_product_detail().await;
                    return Ok(());
                }
                KeyCode::Char('a') | KeyCode::Char('A') => {
                    drop(model);
                    self.add_selected_to_cart().await;
                    return Ok(());
                }
                _ => {}
            }
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Left | KeyCode::PageUp => {
                drop(model);
                self.previous_page().await;
            }
            KeyCode::Right | KeyCode::PageDown => {
                drop(model);
                self.next_page().await;
            }
            KeyCode::Home => {
                drop(model);
                self.first_page().await;
            }
            KeyCode::End => {
                drop(model);
                self.last_page().await;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                drop(model);
                self.retry().await;
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                model.show_cart().await;
            }
            KeyCode::Char('/') | KeyCode::Char('s') | KeyCode::Char('S') => {
                model.set_active_section(ActiveSection::Search).await;
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                model.set_active_section(ActiveSection::Filters).await;
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }
}
