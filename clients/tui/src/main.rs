use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::time::{Duration, Instant};
use std::{error::Error, io, thread};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use blackjack::GameState;

mod app;
use app::App;

mod config;
use config::Cli;

mod slider;

mod tui_logger;
use tui_logger::TuiLogger;

mod ui;

const REDRAW_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let rules = cli.table_rules()?;

    // Records go to the log panel; stdout belongs to the terminal UI
    let (logger, log_buffer) = TuiLogger::new(cli.log_level);
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(cli.log_level);

    let game = GameState::new(rules)?;
    log::info!(
        "Table open: min bet {}, dealer draws every {}ms",
        rules.min_bet,
        rules.dealer_tick_ms
    );

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, rx) = mpsc::unbounded_channel();
    spawn_input_reader(tx);

    let app = App::new(game, log_buffer);
    let res = run_app(&mut terminal, app, rx).await;

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}")
    }

    Ok(())
}

/// crossterm's reader blocks, so it gets its own thread.
fn spawn_input_reader(tx: UnboundedSender<Event>) {
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(e) => {
                log::error!("Terminal input failed: {e}");
                break;
            }
        }
    });
}

async fn dealer_due(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut events: UnboundedReceiver<Event>,
) -> Result<(), Box<dyn Error>>
where
    B::Error: 'static,
{
    let mut redraw = tokio::time::interval(REDRAW_INTERVAL);

    loop {
        app.sync_logs();
        terminal.draw(|f| ui::draw(f, &app))?;

        if app.should_quit {
            return Ok(());
        }

        let deadline = app.game.dealer_deadline();
        tokio::select! {
            input = events.recv() => match input {
                Some(Event::Key(key)) if key.kind == KeyEventKind::Press => app.on_key(key.code)?,
                Some(Event::Mouse(mouse)) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                    app.on_click()?
                }
                Some(_) => {}
                None => return Ok(()),
            },
            _ = dealer_due(deadline) => {}
            _ = redraw.tick() => {}
        }

        app.on_tick(Instant::now())?;
    }
}
