mod app;
mod input;
mod message;
pub mod ui;

use crate::config::Config;
use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

pub use app::{App, FetchResult, ModalState, SPINNER_FRAMES};
pub use input::dispatch;
pub use message::Message;
pub use ui::report::{ReportRegion, TableFocus};

/// Run the interactive report. `project` preselects a project by id.
pub async fn run(config: Config, project: Option<String>) -> Result<()> {
    // Check if stdout is a terminal
    if !std::io::IsTerminal::is_terminal(&io::stdout()) {
        anyhow::bail!("sprintboard requires an interactive terminal (use `sprintboard export` instead)");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(config);

    // Initial fetches (non-blocking - UI shows immediately with loading state)
    app.start_project_fetch();
    if let Some(project_id) = project {
        app.select_project(&project_id);
    }

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let tick_rate = Duration::from_millis(app.config.ui.tick_rate_ms.max(16));
    let mut last_tick = std::time::Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Press {
                    let msg = input::dispatch(app, key);
                    if app.update(msg)? {
                        return Ok(()); // Quit requested
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick_spinner();

            // Poll for background fetch results (non-blocking)
            app.poll_fetches();

            last_tick = std::time::Instant::now();
        }
    }
}
