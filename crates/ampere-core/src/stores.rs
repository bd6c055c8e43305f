//! Store interfaces consumed by the screens, and their implementations
//!
//! Each screen is written against the narrow trait it needs rather than a
//! shared application object. Asynchronous work started by a store reports
//! back through [`StoreEvent`]s which the UI thread feeds into the store
//! again, so stores are only ever mutated from one thread.

use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::invoice::PayReq;
use crate::payment::{PaymentOutcome, PaymentStatus};
use crate::settings::Settings;
use crate::units::{format_amount, FiatRate, Units};

/// Completion of work a store started in the background
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// A payment request finished decoding
    PayReqDecoded {
        payment_request: String,
        result: std::result::Result<PayReq, String>,
    },
    /// A payment attempt finished
    PaymentFinished(PaymentOutcome),
}

/// Read access to the decoded payment request
pub trait InvoicesStore {
    /// Decoded request, once available
    fn pay_req(&self) -> Option<&PayReq>;
    /// The request string exactly as entered
    fn payment_request(&self) -> &str;
    /// Decode failure, if the last decode failed
    fn pay_req_error(&self) -> Option<&str>;
    /// Whether a decode is in progress
    fn loading(&self) -> bool;
    /// Start decoding a new request, replacing the previous one
    fn get_pay_req(&mut self, payment_request: &str);
}

/// Payment dispatch
pub trait TransactionsStore {
    /// Fire-and-forget payment; the outcome lands in `payment_status`
    fn send_payment(&mut self, payment_request: &str, custom_amount: Option<&str>);
    /// State of the most recent payment
    fn payment_status(&self) -> &PaymentStatus;
}

/// Amount formatting
pub trait UnitsStore {
    fn units(&self) -> Units;
    /// Cycle to the next display unit
    fn change_units(&mut self);
    /// Format a satoshi amount in the current unit
    fn get_amount(&self, sats: u64) -> String;
}

/// Access to user settings
pub trait SettingsStore {
    fn settings(&self) -> &Settings;
}

impl SettingsStore for Settings {
    fn settings(&self) -> &Settings {
        self
    }
}

/// Invoices store backed by `lightning-invoice`
///
/// Without a runtime, decoding happens inline. With one, decoding runs on a
/// blocking task and the result arrives as [`StoreEvent::PayReqDecoded`].
#[derive(Debug, Default)]
pub struct InvoiceStore {
    pay_req: Option<PayReq>,
    payment_request: String,
    error: Option<String>,
    loading: bool,
    background: Option<(Handle, mpsc::UnboundedSender<StoreEvent>)>,
}

impl InvoiceStore {
    /// Store that decodes inline
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that decodes on `runtime` and reports through `events`
    pub fn with_background(runtime: Handle, events: mpsc::UnboundedSender<StoreEvent>) -> Self {
        Self {
            background: Some((runtime, events)),
            ..Self::default()
        }
    }

    /// Reset state for a new request and mark it loading
    pub fn begin(&mut self, payment_request: &str) {
        self.payment_request = payment_request.to_string();
        self.pay_req = None;
        self.error = None;
        self.loading = true;
    }

    /// Apply a decode result; results for a superseded request are dropped
    pub fn resolve(&mut self, payment_request: &str, result: std::result::Result<PayReq, String>) {
        if payment_request != self.payment_request {
            tracing::debug!("dropping decode result for superseded payment request");
            return;
        }

        self.loading = false;
        match result {
            Ok(pay_req) => {
                self.pay_req = Some(pay_req);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("Failed to decode payment request: {}", e);
                self.pay_req = None;
                self.error = Some(e);
            }
        }
    }

    /// Feed a store event back in; returns false if it was not for this store
    pub fn handle_event(&mut self, event: &StoreEvent) -> bool {
        match event {
            StoreEvent::PayReqDecoded {
                payment_request,
                result,
            } => {
                self.resolve(payment_request, result.clone());
                true
            }
            _ => false,
        }
    }
}

impl InvoicesStore for InvoiceStore {
    fn pay_req(&self) -> Option<&PayReq> {
        self.pay_req.as_ref()
    }

    fn payment_request(&self) -> &str {
        &self.payment_request
    }

    fn pay_req_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn loading(&self) -> bool {
        self.loading
    }

    fn get_pay_req(&mut self, payment_request: &str) {
        self.begin(payment_request);

        match &self.background {
            Some((runtime, events)) => {
                let events = events.clone();
                let request = payment_request.to_string();
                runtime.spawn_blocking(move || {
                    let result = PayReq::decode(&request).map_err(|e| e.to_string());
                    let event = StoreEvent::PayReqDecoded {
                        payment_request: request,
                        result,
                    };
                    if events.send(event).is_err() {
                        tracing::debug!("event receiver closed before decode finished");
                    }
                });
            }
            None => {
                let result = PayReq::decode(payment_request).map_err(|e| e.to_string());
                self.resolve(payment_request, result);
            }
        }
    }
}

/// Units store with optional fiat conversion
#[derive(Debug, Clone, Default)]
pub struct UnitStore {
    units: Units,
    fiat: Option<FiatRate>,
}

impl UnitStore {
    pub fn new(units: Units, fiat: Option<FiatRate>) -> Self {
        // Fiat without a rate would silently show sats
        let units = if units == Units::Fiat && fiat.is_none() {
            Units::Sats
        } else {
            units
        };
        Self { units, fiat }
    }

    /// Build from the user's settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.units, settings.fiat.clone())
    }
}

impl UnitsStore for UnitStore {
    fn units(&self) -> Units {
        self.units
    }

    fn change_units(&mut self) {
        self.units = self.units.next(self.fiat.is_some());
        tracing::debug!(units = self.units.label(), "changed display units");
    }

    fn get_amount(&self, sats: u64) -> String {
        format_amount(sats, self.units, self.fiat.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_decode_failure_sets_error() {
        let mut store = InvoiceStore::new();
        store.get_pay_req("definitely not an invoice");

        assert!(!store.loading());
        assert!(store.pay_req().is_none());
        assert!(store.pay_req_error().is_some());
        assert_eq!(store.payment_request(), "definitely not an invoice");
    }

    #[test]
    fn test_resolve_replaces_previous_request() {
        let mut store = InvoiceStore::new();
        store.begin("first");
        store.resolve("first", Ok(PayReq::default()));
        assert!(store.pay_req().is_some());

        store.begin("second");
        assert!(store.loading());
        assert!(store.pay_req().is_none());
        assert!(store.pay_req_error().is_none());
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let mut store = InvoiceStore::new();
        store.begin("first");
        store.begin("second");
        store.resolve("first", Err("boom".to_string()));

        assert!(store.loading());
        assert!(store.pay_req_error().is_none());
    }

    #[tokio::test]
    async fn test_background_decode_reports_event() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut store = InvoiceStore::with_background(Handle::current(), tx);

        store.get_pay_req("garbage");
        assert!(store.loading());

        let event = rx.recv().await.unwrap();
        assert!(store.handle_event(&event));
        assert!(!store.loading());
        assert!(store.pay_req_error().is_some());
    }

    #[test]
    fn test_unit_store_cycles_and_formats() {
        let mut units = UnitStore::new(Units::Sats, None);
        assert_eq!(units.get_amount(2_100), "2,100 sats");

        units.change_units();
        assert_eq!(units.units(), Units::Btc);
        assert_eq!(units.get_amount(2_100), "₿0.00002100");

        units.change_units();
        assert_eq!(units.units(), Units::Sats);
    }

    #[test]
    fn test_unit_store_fiat_requires_rate() {
        assert_eq!(UnitStore::new(Units::Fiat, None).units(), Units::Sats);

        let rate = FiatRate {
            code: "EUR".to_string(),
            btc_price: 40_000.0,
        };
        let mut units = UnitStore::new(Units::Btc, Some(rate));
        units.change_units();
        assert_eq!(units.units(), Units::Fiat);
        assert_eq!(units.get_amount(50_000), "20.00 EUR");
    }
}
