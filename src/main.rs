// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
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
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

mod app;
mod config;
mod data;
mod events;
mod source;
mod ui;

use app::{App, View};
use config::{LoggingSettings, Settings, ThemeChoice, DEFAULT_CONFIG_FILE};
use data::{Fleet, SystemClock};
use source::{BuiltinSource, FileSource, FleetSource};
use ui::Theme;

#[derive(Parser, Debug)]
#[command(name = "ibox-overview")]
#[command(about = "Terminal dashboard for an ibox storage fleet")]
struct Args {
    /// Settings file (TOML). Missing file is fine.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Fleet JSON file (defaults to the built-in sample fleet)
    #[arg(short, long)]
    fixture: Option<PathBuf>,

    /// Colour theme
    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,

    /// Log filter directive (e.g. "debug", "ibox_overview=trace")
    #[arg(long)]
    log_level: Option<String>,

    /// Export the fleet to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

impl Args {
    /// Command-line flags win over every other settings layer.
    fn apply(self, mut settings: Settings) -> (Settings, Option<PathBuf>) {
        if self.fixture.is_some() {
            settings.fixture = self.fixture;
        }
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        if let Some(level) = self.log_level {
            settings.logging.level = level;
        }
        (settings, self.export)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::load(&args.config)?;
    let (settings, export) = args.apply(settings);

    let _guard = init_logging(&settings.logging)?;
    info!(?settings, "starting ibox-overview");

    let source: Box<dyn FleetSource> = match &settings.fixture {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(BuiltinSource::new()),
    };

    // Handle export mode (non-interactive)
    if let Some(export_path) = export {
        return export_to_file(source, &export_path);
    }

    run_tui(source, &settings)
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging(logging: &LoggingSettings) -> Result<WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let appender = file_appender(logging)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    Ok(guard)
}

/// Open the configured log file, creating its directory if needed.
fn file_appender(logging: &LoggingSettings) -> Result<RollingFileAppender> {
    let dir = logging
        .file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = logging
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ibox-overview.log".to_string());

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .with_context(|| format!("cannot open log file {}", logging.file.display()))
}

/// Run the TUI with the given fleet source
fn run_tui(source: Box<dyn FleetSource>, settings: &Settings) -> Result<()> {
    // Detect the theme before raw mode; detection queries the terminal
    let theme = Theme::from_choice(settings.theme);

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

    // Create app and load initial data
    let mut app = App::new(source, Box::new(SystemClock), theme)
        .with_export_path(settings.export_path.clone());
    if let Err(e) = app.reload_data() {
        tracing::error!(error = %e, "initial load failed");
    }

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

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 80;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

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
                    5u16.min(area.height),
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);

            match app.current_view {
                View::Fleet => ui::fleet::render(frame, app, chunks[2]),
                View::Events => ui::event_log::render(frame, app, chunks[2]),
            }

            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.show_detail_overlay {
                ui::detail::render_overlay(frame, app, area);
            }
            if app.editor_open() {
                ui::editor::render_overlay(frame, app, area);
            }
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    // Rows start after header (1) + tabs (1) + border (1) + table header
                    events::handle_mouse_event(app, mouse, 3);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    info!("exiting");
    Ok(())
}

/// Export the fleet straight from the source to a JSON file
fn export_to_file(mut source: Box<dyn FleetSource>, export_path: &Path) -> Result<()> {
    let snapshot = source.load().ok_or_else(|| {
        anyhow!(
            "{}: {}",
            source.description(),
            source.error().unwrap_or("no data")
        )
    })?;
    let fleet = Fleet::from_snapshot(snapshot)
        .with_context(|| format!("invalid fleet in {}", source.description()))?;

    app::write_export(&fleet, export_path)?;

    info!(path = %export_path.display(), nodes = fleet.len(), "fleet exported");
    println!("Exported fleet state to: {}", export_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging_at(file: PathBuf) -> LoggingSettings {
        LoggingSettings {
            file,
            ..LoggingSettings::default()
        }
    }

    #[test]
    fn test_file_appender_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("logs").join("overview.log");

        assert!(file_appender(&logging_at(file.clone())).is_ok());
        assert!(file.exists());
    }

    #[test]
    fn test_file_appender_unwritable_dir_is_error() {
        // A regular file cannot be the log directory
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let file = blocker.path().join("overview.log");

        let err = file_appender(&logging_at(file)).unwrap_err();
        assert!(err.to_string().contains("cannot open log file"));
    }
}
