//! Application state

use ampere_core::{InvoiceStore, PaymentDispatcher, StoreEvent, UnitStore};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::config::TuiConfig;
use super::router::{Route, Router};
use crate::ui::components::alert::AlertQueue;
use crate::ui::components::notification::NotificationManager;
use crate::ui::components::qr_scanner::QrScanner;
use crate::ui::components::text_input::{InputFilter, TextInput};
use crate::ui::screens::open_channel::OpenChannelForm;
use crate::ui::screens::payment_request::PaymentRequestScreen;
use crate::ui::Theme;

/// Longest payment request accepted on the send screen
const MAX_PAYMENT_REQUEST_LEN: usize = 4096;

/// Current screen/view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Payment request entry
    #[default]
    Send,

    /// Decoded invoice details
    PaymentRequest,

    /// Payment progress
    SendingLightning,

    /// Open channel form
    OpenChannel,

    /// Node QR intake
    NodeQrScanner,
}

/// Application state
pub struct AppState {
    /// Navigation history
    pub router: Router,

    /// Loaded configuration
    pub config: TuiConfig,

    /// Invoices store
    pub invoices: InvoiceStore,

    /// Transactions store
    pub transactions: PaymentDispatcher,

    /// Units store
    pub units: UnitStore,

    /// Send screen input buffer
    pub send_input: TextInput,

    /// Node scanner input
    pub scanner: QrScanner,

    /// Invoice screen amount mode
    pub payment_request: PaymentRequestScreen,

    /// Open channel form
    pub open_channel: OpenChannelForm,

    /// Pending alerts
    pub alerts: AlertQueue,

    /// Toasts
    pub notifications: NotificationManager,
}

impl AppState {
    /// Build state and stores from the configuration
    pub fn new(
        config: TuiConfig,
        runtime: Handle,
        events: mpsc::UnboundedSender<StoreEvent>,
    ) -> ampere_core::Result<Self> {
        let backend = config.settings.backend.build()?;
        tracing::info!(backend = %config.settings.backend, "payment backend ready");

        let mut state = Self {
            router: Router::default(),
            invoices: InvoiceStore::with_background(runtime.clone(), events.clone()),
            transactions: PaymentDispatcher::new(backend, runtime, events),
            units: UnitStore::from_settings(&config.settings),
            send_input: TextInput::new(InputFilter::Any, MAX_PAYMENT_REQUEST_LEN),
            scanner: QrScanner::new(),
            payment_request: PaymentRequestScreen::new(),
            open_channel: OpenChannelForm::default(),
            alerts: AlertQueue::new(),
            notifications: NotificationManager::new(),
            config,
        };
        state.sync_entered();
        Ok(state)
    }

    /// Theme for the current settings
    pub fn theme(&self) -> Theme {
        Theme::from_settings(&self.config)
    }

    /// Screen currently shown
    pub fn current_screen(&self) -> Screen {
        self.router.current_screen()
    }

    /// Reset per-screen state for a freshly entered route
    pub fn enter(&mut self, route: Route) {
        match route {
            Route::Send => self.send_input.clear(),
            Route::PaymentRequest => self.payment_request.reset(),
            Route::SendingLightning => {}
            Route::OpenChannel(address) => {
                self.open_channel = OpenChannelForm::from_params(address.as_ref());
            }
            Route::NodeQrScanner => self.scanner.reset(),
        }
    }

    /// Apply any navigation that happened since the last call
    pub fn sync_entered(&mut self) {
        if let Some(route) = self.router.take_entered() {
            self.enter(route);
        }
    }
}
