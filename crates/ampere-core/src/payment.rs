//! Payment dispatch and status tracking

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::backend::{PaymentBackend, PaymentReceipt};
use crate::stores::{StoreEvent, TransactionsStore};
use crate::{Error, Result};

/// State of the most recent payment
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Nothing sent yet
    #[default]
    Idle,
    /// Waiting on the backend
    InFlight { payment_request: String },
    /// Backend reported success
    Succeeded { receipt: PaymentReceipt },
    /// Payment was rejected or failed
    Failed { reason: String },
}

impl PaymentStatus {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, PaymentStatus::InFlight { .. })
    }
}

/// Backend result for one payment attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOutcome {
    pub payment_request: String,
    pub result: std::result::Result<PaymentReceipt, String>,
}

/// Parse a user-entered custom amount in satoshis
///
/// Accepts positive integers, ignoring surrounding whitespace and `,` or `_`
/// digit separators.
pub fn parse_custom_amount(input: &str) -> Result<u64> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();

    match cleaned.parse::<u64>() {
        Ok(0) => Err(Error::InvalidAmount("amount must be greater than zero".to_string())),
        Ok(sats) => Ok(sats),
        Err(_) => Err(Error::InvalidAmount(format!("{:?} is not a whole number of satoshis", input))),
    }
}

/// Transactions store that hands payments to a backend
pub struct PaymentDispatcher {
    backend: Arc<dyn PaymentBackend>,
    runtime: Handle,
    events: mpsc::UnboundedSender<StoreEvent>,
    status: PaymentStatus,
}

impl PaymentDispatcher {
    pub fn new(
        backend: Arc<dyn PaymentBackend>,
        runtime: Handle,
        events: mpsc::UnboundedSender<StoreEvent>,
    ) -> Self {
        Self {
            backend,
            runtime,
            events,
            status: PaymentStatus::Idle,
        }
    }

    /// Name of the backend in use
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Apply a finished payment
    ///
    /// Outcomes for anything other than the in-flight request are ignored.
    pub fn record_outcome(&mut self, outcome: PaymentOutcome) {
        match &self.status {
            PaymentStatus::InFlight { payment_request }
                if *payment_request == outcome.payment_request => {}
            _ => {
                tracing::debug!("ignoring outcome for a payment that is no longer in flight");
                return;
            }
        }

        self.status = match outcome.result {
            Ok(receipt) => {
                tracing::info!(payment_hash = ?receipt.payment_hash, "payment succeeded");
                PaymentStatus::Succeeded { receipt }
            }
            Err(reason) => {
                tracing::warn!("Payment failed: {}", reason);
                PaymentStatus::Failed { reason }
            }
        };
    }

    /// Feed a store event back in; returns false if it was not for this store
    pub fn handle_event(&mut self, event: &StoreEvent) -> bool {
        match event {
            StoreEvent::PaymentFinished(outcome) => {
                self.record_outcome(outcome.clone());
                true
            }
            _ => false,
        }
    }
}

impl TransactionsStore for PaymentDispatcher {
    fn send_payment(&mut self, payment_request: &str, custom_amount: Option<&str>) {
        let amount_sat = match custom_amount.map(parse_custom_amount).transpose() {
            Ok(amount) => amount,
            Err(e) => {
                tracing::warn!("Rejected payment: {}", e);
                self.status = PaymentStatus::Failed {
                    reason: e.to_string(),
                };
                return;
            }
        };

        tracing::info!(
            backend = self.backend.name(),
            ?amount_sat,
            "dispatching payment"
        );
        self.status = PaymentStatus::InFlight {
            payment_request: payment_request.to_string(),
        };

        let backend = Arc::clone(&self.backend);
        let events = self.events.clone();
        let request = payment_request.to_string();
        self.runtime.spawn(async move {
            let result = backend
                .pay_invoice(&request, amount_sat)
                .await
                .map_err(|e| e.to_string());
            let outcome = PaymentOutcome {
                payment_request: request,
                result,
            };
            if events.send(StoreEvent::PaymentFinished(outcome)).is_err() {
                tracing::debug!("event receiver closed before payment finished");
            }
        });
    }

    fn payment_status(&self) -> &PaymentStatus {
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::backend::SimulatedBackend;

    fn dispatcher(fail: bool) -> (PaymentDispatcher, mpsc::UnboundedReceiver<StoreEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let backend = Arc::new(SimulatedBackend::new(Duration::ZERO, fail));
        (PaymentDispatcher::new(backend, Handle::current(), tx), rx)
    }

    #[test]
    fn test_parse_custom_amount() {
        assert_eq!(parse_custom_amount("500").unwrap(), 500);
        assert_eq!(parse_custom_amount(" 1,000 ").unwrap(), 1_000);
        assert_eq!(parse_custom_amount("2_100").unwrap(), 2_100);
        assert!(parse_custom_amount("0").is_err());
        assert!(parse_custom_amount("-5").is_err());
        assert!(parse_custom_amount("12.5").is_err());
        assert!(parse_custom_amount("abc").is_err());
        assert!(parse_custom_amount("").is_err());
    }

    #[tokio::test]
    async fn test_successful_payment_round_trip() {
        let (mut dispatcher, mut rx) = dispatcher(false);

        dispatcher.send_payment("lnbc1", None);
        assert!(dispatcher.payment_status().is_in_flight());

        let event = rx.recv().await.unwrap();
        assert!(dispatcher.handle_event(&event));
        assert!(matches!(
            dispatcher.payment_status(),
            PaymentStatus::Succeeded { .. }
        ));
    }

    #[tokio::test]
    async fn test_backend_failure_is_recorded() {
        let (mut dispatcher, mut rx) = dispatcher(true);

        dispatcher.send_payment("lnbc1", Some("500"));
        let event = rx.recv().await.unwrap();
        dispatcher.handle_event(&event);

        match dispatcher.payment_status() {
            PaymentStatus::Failed { reason } => assert!(reason.contains("simulated failure")),
            other => panic!("unexpected status: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_custom_amount_fails_without_dispatch() {
        let (mut dispatcher, mut rx) = dispatcher(false);

        dispatcher.send_payment("lnbc1", Some("lots"));
        assert!(matches!(
            dispatcher.payment_status(),
            PaymentStatus::Failed { .. }
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_stale_outcome_is_ignored() {
        let (mut dispatcher, _rx) = dispatcher(false);

        dispatcher.send_payment("second", None);
        dispatcher.record_outcome(PaymentOutcome {
            payment_request: "first".to_string(),
            result: Err("late".to_string()),
        });
        assert!(dispatcher.payment_status().is_in_flight());
    }
}
