use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use std::io::{self, Write};
use std::sync::Arc;
use tokio::sync::Mutex;  // Use tokio Mutex for async compatibility

mod app;
mod events;
mod plan;
mod ui;
mod utils;
mod wheel;

use app::App;
use events::{AppEvent, EventHandler};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    env_logger::init();

    if let Err(e) = setup_terminal().await {
        eprintln!("Failed to setup terminal: {:#}", e);
        return Err(e);
    }

    Ok(())
}

async fn setup_terminal() -> Result<()> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    terminal.clear()?;

    let app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            // Cleanup terminal before returning error
            cleanup_terminal(&mut terminal)?;
            return Err(e);
        }
    };

    // At least 10fps so springs stay smooth
    let tick_rate_ms = app.tick_rate_ms().clamp(1, 100);

    let app_state = Arc::new(Mutex::new(app));

    let event_handler = EventHandler::new(tick_rate_ms);

    let res = run_app(&mut terminal, app_state, event_handler).await;

    // Always cleanup terminal
    cleanup_terminal(&mut terminal)?;

    res
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app_state: Arc<Mutex<App>>,
    mut event_handler: EventHandler,
) -> Result<()> {
    {
        let mut app = app_state.lock().await;
        terminal.draw(|f| ui::render(f, &mut app))?;
        io::stdout().flush()?;
    }

    let mut needs_clear = false;

    loop {
        let event = event_handler.next().await;

        let (should_continue, redraw) = {
            let mut app = app_state.lock().await;
            match event {
                AppEvent::Input(crossterm_event) => {
                    // Resize invalidates the recorded wheel layout, redraw fully
                    if matches!(crossterm_event, CrosstermEvent::Resize(_, _)) {
                        needs_clear = true;
                    }
                    (app.handle_event(crossterm_event)?, true)
                }
                // Idle ticks leave the frame untouched
                AppEvent::Tick(elapsed) => (true, app.state.on_tick(elapsed.as_secs_f32())),
            }
        };

        if !should_continue {
            break;
        }
        if !redraw {
            continue;
        }

        if needs_clear {
            terminal.clear()?;
            needs_clear = false;
        }

        {
            let mut app = app_state.lock().await;
            terminal.draw(|f| ui::render(f, &mut app))?;
            io::stdout().flush()?;
        }
    }

    Ok(())
}
