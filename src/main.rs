use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use sirona_client::{ReportingApi, SironaClient};
use sirona_console::{
    config::{Overrides, Settings},
    data::{grid::counter_columns, CsvExporter, GridState},
    events,
    logging::init_logging,
    ui, App, AppOptions,
};

#[derive(Parser, Debug)]
#[command(name = "sirona-console")]
#[command(about = "Terminal console for the Sirona monitoring reporting API")]
struct Args {
    /// Base URL of the reporting REST services
    #[arg(short, long, env = "SIRONA_ENDPOINT")]
    endpoint: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page to open at startup (e.g., "/jvm", "/gauges/<name>")
    #[arg(long)]
    route: Option<String>,

    /// Polling interval of live pages (e.g., "4s", "500ms")
    #[arg(short, long)]
    refresh: Option<String>,

    /// Initial span of the query window (e.g., "24h", "30m")
    #[arg(short, long)]
    window: Option<String>,

    /// Per-request timeout (e.g., "10s")
    #[arg(long)]
    timeout: Option<String>,

    /// Unit to convert counters to (e.g., "ms")
    #[arg(long)]
    unit: Option<String>,

    /// Export the counters report to a CSV file and exit
    #[arg(long, value_name = "FILE")]
    export_csv: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            endpoint: self.endpoint.clone(),
            route: self.route.clone(),
            refresh: self.refresh.clone(),
            window: self.window.clone(),
            timeout: self.timeout.clone(),
            unit: self.unit.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref(), &args.overrides())?;

    // The terminal belongs to the UI; keep the guard so buffered lines get flushed
    let _log_guard = init_logging(&settings.log_dir, &settings.log_level)?;
    tracing::info!(endpoint = %settings.endpoint, route = %settings.route, "starting");

    let client = SironaClient::builder()
        .endpoint(settings.endpoint.clone())
        .timeout(settings.timeout)
        .build()
        .context("invalid endpoint")?;
    let api: Arc<dyn ReportingApi> = Arc::new(client);

    let rt = tokio::runtime::Runtime::new()?;

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export_csv {
        return rt.block_on(export_counters(api, &settings, &export_path));
    }

    // Fetch tasks are spawned from the UI thread
    let _enter = rt.enter();
    run_tui(api, AppOptions::from(&settings))
}

/// Run the TUI until the user quits
fn run_tui(api: Arc<dyn ReportingApi>, options: AppOptions) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    // Create app; the first page starts loading right away
    let mut app = App::new(api, options);

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "console stopped");
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        // Merge whatever the fetch tasks delivered since the last frame
        app.tick();

        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(
                    0,
                    (area.height / 2).saturating_sub(2),
                    area.width,
                    5.min(area.height),
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Page content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);
            ui::pages::render(frame, app, chunks[2]);
            ui::common::render_status_bar(frame, app, chunks[3]);

            // Render invocation form if open
            if app.form.is_some() {
                ui::jmx::render_form(frame, app, area);
            }

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Fetch the counters report once and write it as CSV
async fn export_counters(
    api: Arc<dyn ReportingApi>,
    settings: &Settings,
    export_path: &Path,
) -> Result<()> {
    let counters = api
        .counters(settings.counters_unit.as_deref())
        .await
        .context("failed to fetch counters")?;

    let grid = GridState::new(counter_columns());
    let rows = grid.visible(&counters);

    let dir = export_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let filename = export_path
        .file_name()
        .and_then(|f| f.to_str())
        .context("export path has no file name")?;
    let mut exporter = CsvExporter::new(dir, filename);
    let path = exporter.write(grid.fingerprint(0, &rows), || grid.export(&rows))?;

    println!("Exported {} counters to {}", rows.len(), path.display());
    Ok(())
}
