//! Application state and event handling

pub mod config;
pub mod events;
mod router;
mod state;

pub use config::TuiConfig;
pub use events::{Event, EventHandler};
pub use router::{Navigator, Route, Router};
pub use state::{AppState, Screen};

use std::time::{Duration, Instant};

use ampere_core::{InvoicesStore, PaymentStatus, StoreEvent, TransactionsStore, UnitsStore};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use tokio::runtime::Handle;

use crate::ui;
use crate::ui::components::notification::Notification;
use crate::ui::components::qr_scanner::ScanEvent;
use crate::ui::screens::{node_qr_scanner, open_channel, payment_request, send, sending};

/// Application result type
pub type AppResult<T> = anyhow::Result<T>;

/// Animation and notification tick
const TICK_RATE: Duration = Duration::from_millis(100);

/// Main application struct
pub struct App {
    /// Application state
    pub state: AppState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Tick counter for animations
    pub tick: u64,

    /// Last tick time
    last_tick: Instant,

    /// Terminal input and store completions
    events: EventHandler,
}

impl App {
    /// Create a new application instance
    pub fn new(config: TuiConfig, runtime: Handle) -> AppResult<Self> {
        let events = EventHandler::new(TICK_RATE);
        let state = AppState::new(config, runtime, events.sender())?;

        Ok(Self {
            state,
            should_quit: false,
            tick: 0,
            last_tick: Instant::now(),
            events,
        })
    }

    /// Start decoding `payment_request` and show the invoice screen
    pub fn open_invoice(&mut self, payment_request: &str) {
        self.state.invoices.get_pay_req(payment_request);
        self.state.router.navigate(Route::PaymentRequest);
        self.state.sync_entered();
    }

    /// Run the application main loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> AppResult<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, &self.state, self.tick))?;

            match self.events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Paste(text) => self.handle_paste(&text),
                Event::Store(event) => self.handle_store_event(event),
                Event::Tick => {}
            }

            if self.last_tick.elapsed() >= TICK_RATE {
                self.on_tick();
            }
        }

        Ok(())
    }

    /// Advance animations and expire notifications
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.state.notifications.tick();
        self.last_tick = Instant::now();
    }

    /// Drain store events that are already waiting
    pub fn drain_store_events(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.events.try_recv() {
            self.handle_store_event(event);
            handled += 1;
        }
        handled
    }

    /// Apply a completed decode or payment
    pub fn handle_store_event(&mut self, event: StoreEvent) {
        if self.state.invoices.handle_event(&event) {
            return;
        }

        if self.state.transactions.handle_event(&event) {
            match self.state.transactions.payment_status() {
                PaymentStatus::Succeeded { .. } => {
                    self.state.notifications.push(Notification::success("Payment sent"));
                }
                PaymentStatus::Failed { reason } => {
                    let message = format!("Payment failed: {}", reason);
                    self.state.notifications.push(Notification::error(message));
                }
                _ => {}
            }
        }
    }

    /// Handle key press events
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global quit handler
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // An open alert captures all input
        if self.state.alerts.is_active() {
            self.handle_alert_key(key.code);
            return;
        }

        match self.state.current_screen() {
            Screen::Send => self.handle_send_key(key),
            Screen::PaymentRequest => self.handle_payment_request_key(key),
            Screen::SendingLightning => self.handle_sending_key(key),
            Screen::OpenChannel => self.handle_open_channel_key(key),
            Screen::NodeQrScanner => self.handle_scanner_key(key),
        }

        self.state.sync_entered();
    }

    /// Route pasted text to the active input
    pub fn handle_paste(&mut self, text: &str) {
        if self.state.alerts.is_active() {
            return;
        }

        match self.state.current_screen() {
            Screen::Send => self.state.send_input.insert_str(text.trim()),
            Screen::PaymentRequest => self.state.payment_request.paste_amount(text),
            Screen::OpenChannel => self.state.open_channel.focused_mut().insert_str(text.trim()),
            Screen::NodeQrScanner => {
                let event = self.state.scanner.handle_paste(text);
                self.apply_scan(event);
            }
            Screen::SendingLightning => {}
        }

        self.state.sync_entered();
    }

    fn handle_alert_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.state.alerts.acknowledge();
            }
            KeyCode::Esc => {
                self.state.alerts.cancel();
            }
            _ => {}
        }
    }

    fn handle_send_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Enter => {
                let state = &mut self.state;
                send::submit(&state.send_input, &mut state.invoices, &mut state.router);
            }
            // 'o' never occurs in a bech32 payment request
            KeyCode::Char('o') | KeyCode::Char('O') => {
                self.state.router.navigate(Route::OpenChannel(None));
            }
            KeyCode::Char('u') if ctrl => {
                self.state.send_input.clear();
            }
            KeyCode::Backspace => {
                self.state.send_input.backspace();
            }
            KeyCode::Char(c) if !ctrl => {
                self.state.send_input.push(c);
            }
            _ => {}
        }
    }

    fn handle_payment_request_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            payment_request::go_back(&mut self.state.router);
            return;
        }

        // Controls only exist once an invoice is decoded
        let ready = !self.state.invoices.loading()
            && self.state.invoices.pay_req_error().is_none()
            && self.state.invoices.pay_req().is_some();
        if !ready {
            return;
        }

        let state = &mut self.state;
        match key.code {
            KeyCode::Char('c') => state.payment_request.toggle_amount_mode(),
            KeyCode::Char('u') => state.units.change_units(),
            KeyCode::Enter => {
                let request = state.invoices.payment_request().to_string();
                state
                    .payment_request
                    .confirm(&request, &mut state.transactions, &mut state.router);
            }
            KeyCode::Backspace => state.payment_request.backspace_amount(),
            KeyCode::Char(c) => {
                state.payment_request.push_amount_char(c);
            }
            _ => {}
        }
    }

    fn handle_sending_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => sending::go_back(&mut self.state.router),
            _ => {}
        }
    }

    fn handle_open_channel_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.state.router.navigate(Route::Send);
            }
            KeyCode::Char('s') if ctrl => {
                open_channel::scan(&mut self.state.router);
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.state.open_channel.switch_focus();
            }
            KeyCode::Enter => self.submit_open_channel(),
            KeyCode::Backspace => {
                self.state.open_channel.focused_mut().backspace();
            }
            KeyCode::Char(c) if !ctrl => {
                self.state.open_channel.focused_mut().push(c);
            }
            _ => {}
        }
    }

    fn submit_open_channel(&mut self) {
        match self.state.open_channel.address() {
            Some(address) => {
                tracing::info!(%address, "open channel requested");
                self.state
                    .notifications
                    .push(Notification::info(format!("Channel peer set to {}", address)));
            }
            None => {
                self.state.notifications.push(Notification::warning(
                    "Node public key and host are required",
                ));
            }
        }
    }

    fn handle_scanner_key(&mut self, key: KeyEvent) {
        let event = self.state.scanner.handle_key(key);
        self.apply_scan(event);
    }

    fn apply_scan(&mut self, event: ScanEvent) {
        let state = &mut self.state;
        match event {
            ScanEvent::Scanned(data) => {
                node_qr_scanner::handle_node_scanned(&data, &mut state.router, &mut state.alerts);
            }
            ScanEvent::Back => node_qr_scanner::go_back(&mut state.router),
            ScanEvent::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampere_core::{BackendConfig, Settings};

    const REGTEST_21_SATS: &str = "lnbcrt210n1pjg6mqhpp5pza5wzh0csjjuvfpjpv4zdjmg30vedj9ycv5tyfes9x7dp8axy0sdqqcqzzsxqyz5vqsp5vtxg4c5tw2s2zxxya2a7an0psn9mcfmlqctxzntm3sngnpyk3muq9qyyssqf8z5f90yu3wrmsufnnza25qjlnvc6ukdr094ckzn63ktcy6z5fw5mxf9skndpg2p4648gfjfvvx4qg2lqvlryyycg5k7x9h4dw70t4qq37pegm";

    fn app(fail: bool) -> App {
        let config = TuiConfig {
            settings: Settings {
                backend: BackendConfig::Simulated { delay_ms: 0, fail },
                ..Settings::default()
            },
            log_file: None,
        };
        App::new(config, Handle::current()).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    /// Wait for `count` store events to arrive and apply them
    async fn settle(app: &mut App, count: usize) {
        let mut handled = 0;
        for _ in 0..200 {
            handled += app.drain_store_events();
            if handled >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("store events did not arrive");
    }

    #[tokio::test]
    async fn test_starts_on_send_and_escape_quits() {
        let mut app = app(false);
        assert_eq!(app.state.current_screen(), Screen::Send);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_pay_invoice_flow() {
        let mut app = app(false);

        app.handle_paste(REGTEST_21_SATS);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.current_screen(), Screen::PaymentRequest);
        assert!(app.state.invoices.loading());

        settle(&mut app, 1).await;
        let pay_req = app.state.invoices.pay_req().unwrap();
        assert_eq!(pay_req.num_satoshis, Some(21));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.current_screen(), Screen::SendingLightning);
        assert!(app.state.transactions.payment_status().is_in_flight());

        settle(&mut app, 1).await;
        assert!(matches!(
            app.state.transactions.payment_status(),
            PaymentStatus::Succeeded { .. }
        ));
        assert_eq!(app.state.notifications.active().len(), 1);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.current_screen(), Screen::Send);
        assert_eq!(app.state.send_input.value(), "");
    }

    #[tokio::test]
    async fn test_failed_payment_still_navigates() {
        let mut app = app(true);
        app.open_invoice(REGTEST_21_SATS);
        settle(&mut app, 1).await;

        press(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "500");
        assert_eq!(app.state.payment_request.custom_amount(), "500");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.current_screen(), Screen::SendingLightning);

        settle(&mut app, 1).await;
        assert!(matches!(
            app.state.transactions.payment_status(),
            PaymentStatus::Failed { .. }
        ));
    }

    #[tokio::test]
    async fn test_invoice_controls_wait_for_decode() {
        let mut app = app(false);
        app.open_invoice("lnbc-not-an-invoice");
        settle(&mut app, 1).await;
        assert!(app.state.invoices.pay_req_error().is_some());

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.current_screen(), Screen::PaymentRequest);
        assert_eq!(app.state.transactions.payment_status(), &PaymentStatus::Idle);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.current_screen(), Screen::Send);
    }

    #[tokio::test]
    async fn test_reentering_invoice_resets_amount_mode() {
        let mut app = app(false);
        app.open_invoice(REGTEST_21_SATS);
        settle(&mut app, 1).await;

        press(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "42");
        press(&mut app, KeyCode::Esc);

        app.open_invoice(REGTEST_21_SATS);
        assert_eq!(app.state.payment_request.custom_amount(), "");
        assert_eq!(app.state.payment_request.toggle_label(), "Pay custom amount");
    }

    #[tokio::test]
    async fn test_scan_valid_node_prefills_form() {
        let mut app = app(false);
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.state.current_screen(), Screen::OpenChannel);

        ctrl(&mut app, 's');
        assert_eq!(app.state.current_screen(), Screen::NodeQrScanner);

        app.handle_paste("03abc...@10.0.0.5:9735");
        assert_eq!(app.state.current_screen(), Screen::OpenChannel);
        assert_eq!(app.state.open_channel.pubkey.value(), "03abc...");
        assert_eq!(app.state.open_channel.host.value(), "10.0.0.5:9735");
        assert!(!app.state.alerts.is_active());
    }

    #[tokio::test]
    async fn test_scanned_long_host_is_kept_whole() {
        let mut app = app(false);
        app.state.router.navigate(Route::NodeQrScanner);
        app.state.sync_entered();

        let host = format!("{}.onion:9735", "a".repeat(300));
        app.handle_paste(&format!("03abc@{}", host));

        assert_eq!(app.state.current_screen(), Screen::OpenChannel);
        assert_eq!(app.state.open_channel.pubkey.value(), "03abc");
        assert_eq!(app.state.open_channel.host.value(), host);
        assert!(app.state.open_channel.address().is_some());
    }

    #[tokio::test]
    async fn test_scanner_ignores_control_chords() {
        let mut app = app(false);
        app.state.router.navigate(Route::NodeQrScanner);
        app.state.sync_entered();

        ctrl(&mut app, 'v');
        ctrl(&mut app, 's');
        assert_eq!(app.state.scanner.buffer(), "");
        assert_eq!(app.state.current_screen(), Screen::NodeQrScanner);
    }

    #[tokio::test]
    async fn test_scan_invalid_node_blocks_until_acknowledged() {
        let mut app = app(false);
        app.state.router.navigate(Route::NodeQrScanner);
        app.state.sync_entered();

        type_text(&mut app, "not-a-valid-code");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state.current_screen(), Screen::OpenChannel);
        assert_eq!(app.state.open_channel.pubkey.value(), "");
        assert!(app.state.alerts.is_active());

        // Non-cancelable: Esc is swallowed and does not leave the screen
        press(&mut app, KeyCode::Esc);
        assert!(app.state.alerts.is_active());
        assert_eq!(app.state.current_screen(), Screen::OpenChannel);

        press(&mut app, KeyCode::Enter);
        assert!(!app.state.alerts.is_active());
    }

    #[tokio::test]
    async fn test_scanner_escape_returns_to_empty_form() {
        let mut app = app(false);
        app.state.router.navigate(Route::OpenChannel(None));
        app.state.sync_entered();
        type_text(&mut app, "03ff");

        ctrl(&mut app, 's');
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.state.current_screen(), Screen::OpenChannel);
        assert_eq!(app.state.open_channel.pubkey.value(), "");
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_anywhere() {
        let mut app = app(false);
        app.state.router.navigate(Route::NodeQrScanner);
        app.state.sync_entered();
        ctrl(&mut app, 'c');
        assert!(app.should_quit);
    }
}
