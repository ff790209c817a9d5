//! Application state and event loop.
//!
//! The app owns the current rate table as an immutable value and recomputes
//! the pay slip on every keystroke; the only asynchronous work is the rate
//! fetch, whose completion is delivered over a channel and picked up between
//! input events. Refresh is ignored while a fetch is in flight, and results
//! carrying a stale sequence number are discarded, so a slow response can
//! never overwrite a newer table.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use paye_core::Period;
use paye_core::calculations::NetPayCalculator;
use paye_core::models::{PaySlip, RateTable};
use paye_rates::RateTableProvider;

use crate::utils::parse_income;
use crate::views;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const MAX_INCOME_CHARS: usize = 15;

/// Start the TUI. Resolves when the user quits.
pub async fn run() -> Result<()> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("failed to initialize terminal")?;

    let mut app = App::new(RateTableProvider::from_env());
    app.start_fetch();
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(anyhow::anyhow!("failed to enter alternate screen: {e}"));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Outcome of one rate fetch, tagged with the sequence number it answers.
struct FetchOutcome {
    seq: u64,
    table: RateTable,
}

pub struct App {
    pub(crate) income_input: String,
    pub(crate) period: Period,
    pub(crate) rates: RateTable,
    pub(crate) slip: PaySlip,
    pub(crate) loading: bool,
    fetch_seq: u64,
    provider: Arc<RateTableProvider>,
    tx: UnboundedSender<FetchOutcome>,
    rx: UnboundedReceiver<FetchOutcome>,
}

impl App {
    pub fn new(provider: RateTableProvider) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let rates = RateTable::ghana_default();
        let slip = NetPayCalculator::new(&rates).calculate(rust_decimal::Decimal::ZERO);
        Self {
            income_input: String::new(),
            period: Period::Monthly,
            rates,
            slip,
            loading: false,
            fetch_seq: 0,
            provider: Arc::new(provider),
            tx,
            rx,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        let mut needs_redraw = true;
        loop {
            if self.poll_fetches() {
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|frame| views::draw(frame, self))
                    .context("terminal draw error")?;
                needs_redraw = false;
            }

            if !event::poll(POLL_INTERVAL).context("event poll error")? {
                continue;
            }

            match event::read().context("event read error")? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => needs_redraw = true,
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles one key press; returns `true` to quit.
    fn handle_key(
        &mut self,
        code: KeyCode,
    ) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('r') => self.start_fetch(),
            KeyCode::Char('p') | KeyCode::Tab => {
                self.period = self.period.toggled();
                self.recompute();
            }
            KeyCode::Backspace => {
                self.income_input.pop();
                self.recompute();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == ',' => {
                if self.income_input.len() < MAX_INCOME_CHARS {
                    self.income_input.push(c);
                    self.recompute();
                }
            }
            _ => {}
        }
        false
    }

    /// Kicks off a rate fetch unless one is already in flight.
    fn start_fetch(&mut self) {
        if self.loading {
            debug!("refresh ignored, fetch already in flight");
            return;
        }
        self.loading = true;
        self.fetch_seq += 1;

        let seq = self.fetch_seq;
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let table = provider.fetch_current().await;
            let _ = tx.send(FetchOutcome { seq, table });
        });
    }

    /// Applies any completed fetches; returns `true` if state changed.
    fn poll_fetches(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.rx.try_recv() {
            if outcome.seq != self.fetch_seq {
                debug!(seq = outcome.seq, "discarding stale rate fetch result");
                continue;
            }
            self.loading = false;
            self.rates = outcome.table;
            self.recompute();
            changed = true;
        }
        changed
    }

    fn recompute(&mut self) {
        let gross = parse_income(&self.income_input);
        let monthly = self.period.monthly_gross(gross);
        self.slip = NetPayCalculator::new(&self.rates).calculate(monthly);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn offline_app() -> App {
        App::new(RateTableProvider::offline())
    }

    fn type_income(
        app: &mut App,
        text: &str,
    ) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    #[tokio::test]
    async fn typing_income_recomputes_the_slip() {
        let mut app = offline_app();

        type_income(&mut app, "5,000");

        assert_eq!(app.slip.gross_income, dec!(5000));
        assert_eq!(app.slip.net_income, dec!(3944.75000));
    }

    #[tokio::test]
    async fn backspace_recomputes_from_shorter_input() {
        let mut app = offline_app();
        type_income(&mut app, "5000");

        app.handle_key(KeyCode::Backspace);

        assert_eq!(app.slip.gross_income, dec!(500));
    }

    #[tokio::test]
    async fn annual_period_divides_entry_by_twelve() {
        let mut app = offline_app();
        type_income(&mut app, "60000");

        app.handle_key(KeyCode::Char('p'));

        assert_eq!(app.period, Period::Annual);
        assert_eq!(app.slip.gross_income, dec!(5000));
    }

    #[tokio::test]
    async fn non_numeric_keys_are_ignored() {
        let mut app = offline_app();

        type_income(&mut app, "abc");

        assert_eq!(app.income_input, "");
        assert_eq!(app.slip.gross_income, dec!(0));
    }

    #[tokio::test]
    async fn quit_keys_signal_exit() {
        let mut app = offline_app();

        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.handle_key(KeyCode::Esc));
        assert!(!app.handle_key(KeyCode::Char('5')));
    }

    #[tokio::test]
    async fn refresh_is_ignored_while_fetch_in_flight() {
        let mut app = offline_app();

        app.start_fetch();
        let seq_after_first = app.fetch_seq;
        app.handle_key(KeyCode::Char('r'));

        assert_eq!(app.fetch_seq, seq_after_first);
        assert!(app.loading);
    }

    #[tokio::test]
    async fn completed_fetch_replaces_the_table() {
        let mut app = offline_app();
        app.start_fetch();

        while !app.poll_fetches() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        assert!(!app.loading);
        assert_eq!(app.rates, RateTable::ghana_default());
    }

    #[tokio::test]
    async fn stale_fetch_results_are_discarded() {
        let mut app = offline_app();
        app.start_fetch();
        while !app.poll_fetches() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        // A result from an older request must not overwrite current state.
        let mut stale = RateTable::ghana_default();
        stale.period_label = "1999".to_string();
        app.tx
            .send(FetchOutcome {
                seq: app.fetch_seq - 1,
                table: stale,
            })
            .unwrap();

        assert!(!app.poll_fetches());
        assert_eq!(app.rates.period_label, "2023");
    }
}
