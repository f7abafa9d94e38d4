use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use risk_map::app::{App, Period};
use risk_map::data::{self, DataStore};
use risk_map::{report, ui};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "risk-map")]
#[command(about = "Regional malaria risk map of Senegal, month by month", long_about = None)]
struct Cli {
    /// Month to show first (1-based)
    #[arg(short, long, default_value_t = 1)]
    period: usize,

    /// Print the view as plain text and exit instead of opening the map
    #[arg(long)]
    report: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stay quiet by default while the TUI owns the screen
    init_tracing(if cli.report { "info" } else { "off" });

    let store = DataStore::senegal().context("probability data failed its integrity check")?;
    info!(
        regions = store.num_regions(),
        periods = store.num_periods(),
        "loaded risk data"
    );

    let period = Period::new(cli.period, store.num_periods()).ok_or_else(|| {
        anyhow!(
            "period {} is outside 1..={}",
            cli.period,
            store.num_periods()
        )
    })?;

    if cli.report {
        return report::write_report(&mut std::io::stdout().lock(), &store, period)
            .context("failed to write report");
    }

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, store, period);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Handle mouse events for hovering, clicking, panning and zooming
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved => app.set_mouse_pos(mouse.column, mouse.row),
        MouseEventKind::ScrollUp => app.zoom_in_at(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.zoom_out_at(mouse.column, mouse.row),
        MouseEventKind::ScrollLeft => app.pan(-15, 0),
        MouseEventKind::ScrollRight => app.pan(15, 0),
        MouseEventKind::Down(MouseButton::Left) => app.click(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => app.handle_drag(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.end_drag(),
        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal, store: DataStore, period: Period) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(store, period, size.width, size.height);

    let rings = data::load_basemap(&mut app.map_renderer).context("failed to load basemap")?;
    info!(rings, "loaded basemap");

    // Main loop
    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Handle events with ~60fps target
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                    // Time period control
                    KeyCode::Right | KeyCode::Char(']') | KeyCode::Char('>') => {
                        app.step_period(1)
                    }
                    KeyCode::Left | KeyCode::Char('[') | KeyCode::Char('<') => {
                        app.step_period(-1)
                    }
                    KeyCode::Home => app.first_period(),
                    KeyCode::End => app.last_period(),

                    // Pan with hjkl
                    KeyCode::Char('h') => app.pan(-10, 0),
                    KeyCode::Char('l') => app.pan(10, 0),
                    KeyCode::Up | KeyCode::Char('k') => app.pan(0, -6),
                    KeyCode::Down | KeyCode::Char('j') => app.pan(0, 6),

                    // Zoom
                    KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
                    KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),

                    // Layer toggles
                    KeyCode::Char('L') => app.map_renderer.toggle_labels(),
                    KeyCode::Char('b') | KeyCode::Char('B') => {
                        app.map_renderer.toggle_neighbors()
                    }

                    // Reset view
                    KeyCode::Char('r') | KeyCode::Char('0') => app.reset_view(),

                    _ => {}
                },
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
