mod app;
mod domain;
mod input;
mod logging;
mod notifications;
mod persistence;
mod ticker;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{format_clock, MoodLog, TaskList, TimerEngine};
use notifications::{AudioCue, DesktopNotifier, NoopNotifier, Notifier, SilentCue, TerminalBell};
use persistence::{ensure_data_dir, get_data_dir, init_local_data_dir, FileStore, Store, ALL_KEYS};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "focusflow")]
#[command(about = "A terminal focus widget: countdown timer, quick tasks and mood log", long_about = None)]
struct Cli {
    /// Data directory to use instead of the discovered .focusflow directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Disable the completion bell and desktop notifications
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .focusflow directory in the current directory
    Init,
    /// Print the stored timer, task and mood state
    Status,
    /// Delete all stored tasks, moods and timer settings
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            let data_dir = init_local_data_dir()?;
            println!("Initialized focusflow directory: {}", data_dir.display());
            println!();
            println!("FocusFlow will now use this local directory for its data.");
            println!("Run 'focusflow' to start.");
            Ok(())
        }
        Some(Commands::Status) => {
            let store = open_store(cli.data_dir)?;
            print_status(&store);
            Ok(())
        }
        Some(Commands::Reset) => {
            let store = open_store(cli.data_dir)?;
            for key in ALL_KEYS {
                store.remove(key);
            }
            println!("Stored tasks, moods and timer settings removed.");
            Ok(())
        }
        None => run_tui(cli.data_dir, cli.log_level, cli.quiet),
    }
}

fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match explicit {
        Some(dir) => dir,
        None => get_data_dir()?,
    };
    ensure_data_dir(&dir)?;
    Ok(dir)
}

fn open_store(explicit: Option<PathBuf>) -> Result<Store> {
    let dir = resolve_data_dir(explicit)?;
    Ok(Store::new(FileStore::new(dir)))
}

fn print_status(store: &Store) {
    let timer = TimerEngine::load(store.clone());
    let tasks = TaskList::load(store.clone());
    let moods = MoodLog::load(store.clone());

    println!("Timer: {} selected", format_clock(timer.selected_seconds()));

    let mood = moods.current();
    println!(
        "Mood:  {} {} ({} recent entries)",
        mood.symbol(),
        mood.label(),
        moods.entries().len()
    );

    let done = tasks.completed_count();
    println!("Tasks: {} open, {} done", tasks.len() - done, done);
    for task in tasks.tasks() {
        let checkbox = if task.done { "[x]" } else { "[ ]" };
        println!("  {} {}", checkbox, task.text);
    }
}

fn run_tui(data_dir: Option<PathBuf>, log_level: Option<String>, quiet: bool) -> Result<()> {
    // Without a usable data directory the session still runs, it just isn't saved
    let data_dir = match resolve_data_dir(data_dir) {
        Ok(dir) => Some(dir),
        Err(e) => {
            eprintln!("Warning: {:#}; changes will not be saved", e);
            None
        }
    };

    let level = log_level.unwrap_or_else(|| logging::default_log_level().to_string());
    let _logger = match data_dir.as_deref().map(|dir| logging::init_logging(&level, dir)) {
        Some(Ok(handle)) => Some(handle),
        Some(Err(e)) => {
            eprintln!("Warning: logging disabled: {:#}", e);
            None
        }
        None => None,
    };

    let (notifier, audio): (Box<dyn Notifier>, Box<dyn AudioCue>) = if quiet {
        (Box::new(NoopNotifier), Box::new(SilentCue))
    } else {
        (Box::new(DesktopNotifier), Box::new(TerminalBell))
    };

    let store = match data_dir {
        Some(dir) => Store::new(FileStore::new(dir)),
        None => Store::in_memory(),
    };
    let mut app = AppState::new(store, notifier, audio);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("event=app_exit ok={}", result.is_ok());

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Wake up in time for the next countdown tick
        let timeout = app.next_wake(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_key(app, key) {
                        return Ok(());
                    }
                }
                Event::FocusGained => app.set_focus(true),
                Event::FocusLost => app.set_focus(false),
                _ => {}
            }
        }

        app.tick();
    }
}
