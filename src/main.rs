// cellscript: spreadsheet formula language with a terminal grid editor

use std::fs::File;
use std::io;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use cellscript::config::Cli;
use cellscript::session::Session;
use cellscript::ui::App;

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let session = Session::new(cli.session_config());
    tracing::info!(
        rows = cli.rows,
        cols = cli.cols,
        max_depth = cli.max_depth,
        headless = cli.is_headless(),
        "session started"
    );

    if cli.is_headless() {
        return Ok(run_headless(session, &cli.eval, cli.canonical));
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

/// Log to `--log-file` when given, to stderr in headless mode, and nowhere
/// otherwise since the TUI owns the terminal.
fn init_tracing(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "cellscript=info".into())
    };

    if let Some(path) = &cli.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if cli.is_headless() {
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(io::stderr)
            .init();
    }

    Ok(())
}

/// Evaluate each formula in one shared session, stopping at the first failure
fn run_headless(mut session: Session, formulas: &[String], canonical: bool) -> ExitCode {
    for formula in formulas {
        if canonical {
            match session.canonical(formula) {
                Ok(text) => println!("{}", text),
                Err(err) => {
                    eprintln!("Error: {}", err);
                    return ExitCode::FAILURE;
                }
            }
        }

        match session.evaluate_formula(formula) {
            Ok(outcome) => println!("{}", outcome),
            Err(err) => {
                eprintln!("Error: {}", err);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
