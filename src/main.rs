//! taqs — bilingual weather widget for the terminal.
//!
//! Startup picks a city (CLI override, then the saved choice, then
//! geolocation with a fixed fallback), fetches its current weather, and
//! renders a localized card. Changing the city cancels any fetch still in
//! flight before starting the next one.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use taqs::action::Action;
use taqs::api::WeatherApi;
use taqs::catalog::{self, CITIES};
use taqs::components::{CityPicker, CityPickerProps, Component, WeatherCard, WeatherCardProps};
use taqs::effect::{handle_effect, EffectContext};
use taqs::i18n::Lang;
use taqs::persist::SavedCity;
use taqs::poller::{spawn_event_poller, RawEvent};
use taqs::reducer::reducer;
use taqs::resolver::Locator;
use taqs::state::{AppState, TICK_MS};
use taqs::store::Store;
use taqs::tasks::TaskPool;

#[derive(Parser, Debug)]
#[command(name = "taqs")]
#[command(about = "Bilingual Arabic/English weather widget for the terminal")]
struct Args {
    /// City id from the built-in catalog (skips saved choice and geolocation)
    #[arg(long, short)]
    city: Option<String>,

    /// Display language: ar or en
    #[arg(long, short, default_value = "ar")]
    lang: String,

    /// OpenWeatherMap API key (falls back to OPENWEATHER_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Append tracing output to this file (the terminal belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let Some(language) = Lang::from_id(&args.lang) else {
        eprintln!("Unsupported language '{}'. Use 'ar' or 'en'.", args.lang);
        return ExitCode::from(2);
    };

    let Some(api_key) = args
        .api_key
        .clone()
        .or_else(|| std::env::var("OPENWEATHER_API_KEY").ok())
    else {
        eprintln!("Missing API key. Pass --api-key or set OPENWEATHER_API_KEY.");
        return ExitCode::from(2);
    };

    // Validate the override before touching the terminal.
    let cli_city = match args.city.as_deref() {
        Some(id) => match catalog::find(id) {
            Some(city) => Some(city.id),
            None => {
                eprintln!("Unknown city '{}'. Available cities:", id);
                for city in &CITIES {
                    eprintln!("  {}", city.id);
                }
                return ExitCode::from(2);
            }
        },
        None => None,
    };

    if let Some(path) = &args.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("Could not open log file {}: {}", path.display(), e);
            return ExitCode::from(2);
        }
    }

    match run(api_key, language, cli_city) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn run(api_key: String, language: Lang, cli_city: Option<&'static str>) -> io::Result<()> {
    let api = WeatherApi::new(api_key).map_err(io::Error::other)?;
    let locator = Locator::new().map_err(io::Error::other)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, api, locator, language, cli_city).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Top-level UI: the card, with the picker overlaid when open.
struct Ui {
    card: WeatherCard,
    picker: CityPicker,
}

impl Ui {
    fn new() -> Self {
        Self {
            card: WeatherCard,
            picker: CityPicker::new(),
        }
    }

    fn render(&mut self, frame: &mut ratatui::Frame, state: &AppState) {
        let area = frame.area();
        self.card.render(frame, area, WeatherCardProps { state });
        if state.picker_open {
            self.picker.render(
                frame,
                area,
                CityPickerProps {
                    language: state.language,
                    selected: state.picker_index,
                },
            );
        }
    }

    fn map_key(&mut self, key: &KeyEvent, state: &AppState) -> Vec<Action> {
        if state.picker_open {
            self.picker.handle_key(
                key,
                CityPickerProps {
                    language: state.language,
                    selected: state.picker_index,
                },
            )
        } else {
            self.card.handle_key(key, WeatherCardProps { state })
        }
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    api: WeatherApi,
    locator: Locator,
    language: Lang,
    cli_city: Option<&'static str>,
) -> io::Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let mut tasks = TaskPool::new(action_tx.clone());
    let saved = SavedCity::default_location();

    let mut store = Store::new(AppState::new(language), reducer);

    // Initial city: CLI override, then a valid saved choice, then geolocation.
    let saved_city = saved
        .as_ref()
        .and_then(|s| s.load())
        .and_then(|id| catalog::find(&id).map(|city| city.id));
    let initial = match cli_city.or(saved_city) {
        Some(id) => Action::CitySelect(id),
        None => Action::LocateStart,
    };
    let _ = action_tx.send(initial);

    // Spinner animation while a fetch or the geolocation lookup runs.
    tasks.interval("tick", Duration::from_millis(TICK_MS), || Action::Tick);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _poller = spawn_event_poller(
        event_tx,
        Duration::from_millis(10),
        Duration::from_millis(16),
        cancel_token.clone(),
    );

    let mut ui = Ui::new();
    let mut should_render = true;

    loop {
        if should_render {
            let state = store.state();
            terminal.draw(|frame| ui.render(frame, state))?;
            should_render = false;
        }

        tokio::select! {
            Some(raw_event) = event_rx.recv() => {
                match raw_event {
                    RawEvent::Resize(_, _) => should_render = true,
                    RawEvent::Key(key) => {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        for action in ui.map_key(&key, store.state()) {
                            let _ = action_tx.send(action);
                        }
                    }
                }
            }

            Some(action) = action_rx.recv() => {
                if matches!(action, Action::Quit) {
                    break;
                }

                let result = store.dispatch(action);
                if result.has_effects() {
                    let mut ctx = EffectContext {
                        tasks: &mut tasks,
                        api: &api,
                        locator: &locator,
                        saved: saved.as_ref(),
                    };
                    for effect in result.effects {
                        handle_effect(effect, &mut ctx);
                    }
                }
                if result.changed {
                    should_render = true;
                }
            }

            else => break,
        }
    }

    cancel_token.cancel();
    tasks.cancel_all();
    Ok(())
}
