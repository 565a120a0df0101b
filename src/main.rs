mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::Mutex;

use config::AppConfig;
use controller::AppController;
use model::{AppModel, BackendClient};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== nowNoise Client Starting ===");

    let app_config = AppConfig::from_env();
    let backend = BackendClient::new(&app_config.api_base_url);

    // Probe the backend in the background so a dead server shows up in the
    // logs without delaying the TUI.
    let backend_probe = backend.clone();
    tokio::spawn(async move {
        match backend_probe.health().await {
            Ok(()) => tracing::info!("Backend reachable"),
            Err(e) => tracing::warn!(error = %e, "Backend not reachable at startup"),
        }
    });

    let app_model = AppModel::new(backend, app_config.swipe);

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let model = Arc::new(Mutex::new(app_model));
    let controller = AppController::new(model.clone());

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("nowNoise client shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        let now = Instant::now();
        let viewport_cols = terminal.size()?.width as f32;

        // Advance animations and expire notices before drawing
        controller.tick(viewport_cols, now).await;

        let (state, should_quit) = {
            let model_guard = model.lock().await;
            (
                model_guard.render_state(viewport_cols).await,
                model_guard.should_quit().await,
            )
        };

        terminal.draw(|f| {
            AppView::render(f, &state);
        })?;

        // Handle input with a short poll time for smooth animation
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    let _ = controller
                        .handle_key_event(key, viewport_cols, Instant::now())
                        .await;
                }
                Event::Mouse(mouse) => {
                    let _ = controller
                        .handle_mouse_event(mouse, viewport_cols, Instant::now())
                        .await;
                }
                _ => {}
            }
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}
