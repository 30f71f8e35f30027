use std::path::PathBuf;

use crossterm::event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::engine::RodioEngine;
use crate::library::{DirectoryIndex, Library};

mod event_loop;
mod logging;
mod session;
mod settings;

use session::Session;

pub fn run(dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_problem) = settings::load_settings();
    let log_file = logging::init(&settings.logging);
    if let Some(problem) = config_problem {
        eprintln!("arcplay: {problem}");
        warn!("{problem}");
    }
    let index = DirectoryIndex::new(&dir, settings.library.clone());
    info!(root = %index.root().display(), log = ?log_file, "starting");

    let library = Library::load(&index);
    if let Err(e) = &library {
        warn!(error = %e, "library unavailable");
    }
    let mut app = App::new(library, &settings.seek);

    let mut session = Session::new(RodioEngine::new()?);
    if settings.playback.loop_on_start {
        session.sync.toggle_loop();
    }
    session.sync_into(&mut app);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut session, &index);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    session.shutdown();
    info!("bye");
    run_result
}
