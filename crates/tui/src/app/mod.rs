use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyEvent};
use engine::{CategoryTotals, EntryStore, FileKeyValue, KeyedEntryStore, Summary};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui::{self, keymap::AppAction},
};

/// Everything the stats screen draws.
#[derive(Debug, Default)]
pub struct AppState {
    pub summary: Summary,
    pub totals: CategoryTotals,
    pub store_path: String,
    pub last_refresh: Option<DateTime<Local>>,
}

impl AppState {
    /// Replaces the statistics with a fresh aggregation of `store`.
    pub fn reload<S: EntryStore + ?Sized>(&mut self, store: &S) {
        let (summary, totals) = engine::aggregate(store);
        tracing::debug!(entries = summary.count, "reloaded statistics");
        self.summary = summary;
        self.totals = totals;
        self.last_refresh = Some(Local::now());
    }
}

pub struct App {
    store: KeyedEntryStore<FileKeyValue>,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let store = KeyedEntryStore::with_key(
            FileKeyValue::new(&config.store.path),
            config.store.key.as_str(),
        );
        let mut state = AppState {
            store_path: config.store.path,
            ..Default::default()
        };
        state.reload(&store);

        Self {
            store,
            state,
            should_quit: false,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        ui::restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match ui::keymap::map_key(key) {
            AppAction::Quit => self.should_quit = true,
            AppAction::Refresh => self.state.reload(&self.store),
            AppAction::None => {}
        }
    }
}
