use crossterm::event::{KeyCode, KeyEvent};

use crate::engine::derive;
use crate::error::FETCH_NOTICE;
use crate::refresh::RefreshEvent;
use crate::selection::ToggleOutcome;
use crate::types::{MarketRecord, SortField};
use crate::view::{CompareOutcome, ViewState};

// ---------------------------------------------------------------------------
// App — UI-loop-owned state: view parameters, current batch, flags
// ---------------------------------------------------------------------------

pub const SELECTION_FULL_NOTICE: &str = "You can compare only up to 4 currencies.";
pub const COMPARE_TOO_FEW_NOTICE: &str = "Select at least 2 cryptocurrencies for comparison.";

/// What the event loop must do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Currency or page changed — publish new fetch params (the refresher
    /// fires immediately on the change).
    PublishParams,
    /// Manual refresh with unchanged params.
    RefreshNow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Keystrokes edit the search term until Esc/Enter.
    Search,
}

pub struct App {
    pub view: ViewState,
    /// Last good batch. A failed fetch never clears it.
    pub batch: Vec<MarketRecord>,
    pub loading: bool,
    /// Fetch-failure notice, shown alongside the last good batch.
    pub error: Option<String>,
    /// Local rejection notices (selection bound, comparison precondition).
    pub notice: Option<String>,
    /// Cursor into the derived display sequence.
    pub cursor: usize,
    pub input_mode: InputMode,
}

impl App {
    pub fn new() -> Self {
        Self {
            view: ViewState::default(),
            batch: Vec::new(),
            loading: true,
            error: None,
            notice: None,
            cursor: 0,
            input_mode: InputMode::Normal,
        }
    }

    /// The exact sequence of records to render, re-derived from scratch.
    pub fn displayed(&self) -> Vec<&MarketRecord> {
        derive(
            &self.batch,
            self.view.sort,
            self.view.time_window,
            &self.view.search_term,
        )
    }

    /// Apply a refresh event. A successful batch replaces the prior one
    /// wholesale (last write wins); a failure leaves batch and view state
    /// untouched and raises the retryable notice.
    pub fn apply_refresh(&mut self, event: RefreshEvent) {
        match event {
            RefreshEvent::Started => {
                self.loading = true;
            }
            RefreshEvent::Finished(outcome) => {
                self.loading = false;
                match outcome.result {
                    Ok(batch) => {
                        self.batch = batch;
                        self.error = None;
                    }
                    Err(e) if e.is_fetch_failure() => {
                        self.error = Some(FETCH_NOTICE.to_string());
                    }
                    Err(e) => {
                        self.error = Some(e.to_string());
                    }
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        match self.input_mode {
            InputMode::Search => self.handle_search_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.view.search_term.pop();
                self.cursor = 0;
            }
            KeyCode::Char(c) => {
                self.view.search_term.push(c);
                self.cursor = 0;
            }
            _ => {}
        }
        None
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Option<Command> {
        self.notice = None;
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return Some(Command::Quit),
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Search;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => return Some(Command::RefreshNow),
            KeyCode::Char('c') => {
                self.view.cycle_currency();
                return Some(Command::PublishParams);
            }
            KeyCode::Char('t') => {
                self.view.cycle_time_window();
            }
            KeyCode::Char('n') => {
                self.view.next_page();
                self.cursor = 0;
                return Some(Command::PublishParams);
            }
            KeyCode::Char('p') => {
                let before = self.view.page;
                self.view.prev_page();
                if self.view.page != before {
                    self.cursor = 0;
                    return Some(Command::PublishParams);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.displayed().len().saturating_sub(1);
                self.cursor = (self.cursor + 1).min(max);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Char(' ') => self.toggle_cursored(),
            KeyCode::Enter => {
                let requested = !self.view.comparison_active;
                if self.view.set_comparison_active(requested) == CompareOutcome::RejectedTooFew {
                    self.notice = Some(COMPARE_TOO_FEW_NOTICE.to_string());
                }
            }
            KeyCode::Char('0') => self.view.handle_sort(SortField::MarketCapRank),
            KeyCode::Char('1') => self.view.handle_sort(SortField::Name),
            KeyCode::Char('2') => self.view.handle_sort(SortField::CurrentPrice),
            KeyCode::Char('3') => self.view.handle_sort(SortField::PriceChange),
            KeyCode::Char('4') => self.view.handle_sort(SortField::MarketCap),
            KeyCode::Char('5') => self.view.handle_sort(SortField::TotalVolume),
            _ => {}
        }
        None
    }

    fn toggle_cursored(&mut self) {
        let record = match self.displayed().get(self.cursor) {
            Some(&r) => r.clone(),
            None => return,
        };
        if self.view.toggle_selection(&record) == ToggleOutcome::RejectedFull {
            self.notice = Some(SELECTION_FULL_NOTICE.to_string());
        }
    }
}
