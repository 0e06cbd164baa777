mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use handtype::{
    app::{App, Control},
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    ChallengeType, Configuration, HandMode, SessionEngine,
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};

use crate::ui::SessionView;

/// typing speed trainer with hand-focused word banks
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Practice typing with words biased towards the left hand, the right hand or both, against a word count or a clock, with live wpm and accuracy."
)]
pub struct Cli {
    /// which hand the practice words favour
    #[clap(long, value_enum, default_value_t = HandMode::Both)]
    hand: HandMode,

    /// end the challenge after a number of words or a number of seconds
    #[clap(short = 'm', long, value_enum, default_value_t = ChallengeType::Words)]
    mode: ChallengeType,

    /// words (words mode) or seconds (time mode); defaults to 50 words or 60 seconds
    #[clap(short = 'n', long)]
    length: Option<u32>,

    /// seed for reproducible challenge text
    #[clap(long)]
    seed: Option<u64>,

    /// print the generated challenge text and exit
    #[clap(long)]
    print_text: bool,

    /// print the final summary as json when the session ends
    #[clap(long)]
    json: bool,
}

impl Cli {
    fn to_configuration(&self) -> handtype::Result<Configuration> {
        Configuration::new(
            self.hand,
            self.mode,
            self.length.unwrap_or_else(|| self.mode.default_length()),
        )
    }

    fn build_engine(&self) -> handtype::Result<SessionEngine> {
        let config = self.to_configuration()?;
        match self.seed {
            Some(seed) => SessionEngine::with_rng(config, StdRng::seed_from_u64(seed)),
            None => SessionEngine::new(config),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let engine = match cli.build_engine() {
        Ok(engine) => engine,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, e.to_string()).exit();
        }
    };

    if cli.print_text {
        println!("{}", engine.text());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(engine);
    let outcome = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    outcome?;

    if cli.json {
        if let Some(result) = app.engine().final_result() {
            println!("{}", serde_json::to_string(&result)?);
        }
    }

    Ok(())
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::per_second());

    loop {
        terminal.draw(|f| f.render_widget(SessionView(app), f.area()))?;

        let was_armed = app.engine().is_timer_armed();
        if app.handle(runner.step()) == Control::Quit {
            break;
        }
        // the first keystroke arms the timer; ticks count from that moment
        if !was_armed && app.engine().is_timer_armed() {
            runner.restart_clock();
        }
    }

    Ok(())
}
