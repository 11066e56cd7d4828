//! FundStats TUI — fund statistics dashboard in the terminal.
//!
//! Usage: `fundstats-tui [CONFIG]`. Without a config path the default config
//! location is tried, then built-in defaults (`./data`).

use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use fundstats_core::{load_dataset, DashboardConfig};
use fundstats_pipeline::{Pipeline, SelectionController};
use fundstats_tui::{input, spawn_worker, ui, AppState, WorkerCommand};

fn main() -> Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = DashboardConfig::resolve(config_path.as_deref())?;
    init_logging(&config)?;

    // Load before touching the terminal so load errors print normally.
    let dataset = Arc::new(load_dataset(&config).with_context(|| {
        format!("loading dashboard data from {}", config.data_dir.display())
    })?);
    let controller = SelectionController::with_defaults(
        &dataset,
        config.default_fund_type.as_deref(),
        config.default_country.as_deref(),
    )
    .context("choosing the initial selection")?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let pipeline = Pipeline::new(dataset.clone(), config.parallel);
    let worker_handle = spawn_worker(pipeline, cmd_rx, resp_tx);

    let mut app = AppState::new(controller, &dataset, cmd_tx.clone(), resp_rx);
    app.request_initial();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("tui: exit");
    result
}

/// stderr belongs to the terminal UI, so log records go to a file.
fn init_logging(config: &DashboardConfig) -> Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("creating log file {}", config.log_file.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_worker_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
