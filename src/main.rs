mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::path::Path;
use std::sync::Arc;
use anyhow::Result;
use std::time::Duration;
use tokio::sync::Mutex;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use view::AppView;
use config::{DisplayConfig, ShopConfig};
use controller::AppController;
use model::{AppModel, CartStore, CatalogClient, ListingController};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== shop-rs starting ===");

    let config = ShopConfig::load(Path::new(config::CONFIG_FILE));
    tracing::info!(
        base_url = %config.api.base_url,
        timeout_secs = config.api.timeout_secs,
        sibling_count = config.display.sibling_count,
        "Configuration loaded"
    );

    let client = CatalogClient::new(&config.api.base_url, config.api.timeout())?;

    let cart = CartStore::new(&config.cart.path);
    if let Err(e) = cart.load_from_disk().await {
        tracing::warn!(error = %e, path = %cart.path().display(), "Could not load saved cart, starting empty");
    }

    let model = Arc::new(Mutex::new(AppModel::new(ListingController::new(), cart)));
    let controller = AppController::new(model.clone(), Arc::new(client), config.display.cell_width_px);

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // First layout pass sizes the page and loads page 1
    let (columns, _) = terminal::size()?;
    controller.mount(columns).await;

    let res = run_app(&mut terminal, model, controller, &config.display).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("shop-rs shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
    display: &DisplayConfig,
) -> io::Result<()> {
    loop {
        // Get current state
        let (listing, ui_state, cart, should_quit) = {
            let model_guard = model.lock().await;

            // Auto-clear old errors (after 5 seconds)
            model_guard.auto_clear_old_errors().await;

            (
                model_guard.get_listing().await,
                model_guard.get_ui_state().await,
                model_guard.get_cart_summary().await,
                model_guard.should_quit().await,
            )
        };

        if should_quit {
            break;
        }

        terminal.draw(|f| {
            AppView::render(f, &listing, &ui_state, &cart, display);
        })?;

        // Short poll keeps background fetch results showing up promptly
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if let Err(e) = controller.handle_key_event(key).await {
                        tracing::warn!(error = %e, "Key handling failed");
                    }
                }
                Event::Resize(columns, _) => {
                    controller.handle_resize(columns).await;
                }
                _ => {}
            }
        }
    }

    Ok(())
}
