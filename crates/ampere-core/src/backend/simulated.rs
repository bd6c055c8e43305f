use std::time::Duration;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use super::{PaymentBackend, PaymentReceipt};
use crate::{Error, Result};

/// Backend that pretends to pay after a delay
///
/// The preimage is the SHA-256 of the payment request so repeated runs are
/// reproducible.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    delay: Duration,
    fail: bool,
}

impl SimulatedBackend {
    pub fn new(delay: Duration, fail: bool) -> Self {
        Self { delay, fail }
    }
}

#[async_trait]
impl PaymentBackend for SimulatedBackend {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn pay_invoice(
        &self,
        payment_request: &str,
        amount_sat: Option<u64>,
    ) -> Result<PaymentReceipt> {
        tracing::debug!(?amount_sat, "simulating payment");
        tokio::time::sleep(self.delay).await;

        if self.fail {
            return Err(Error::PaymentFailed("simulated failure".to_string()));
        }

        let preimage = Sha256::digest(payment_request.as_bytes());
        let payment_hash = Sha256::digest(preimage);

        Ok(PaymentReceipt {
            payment_hash: Some(hex::encode(payment_hash)),
            preimage: Some(hex::encode(preimage)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_success_is_deterministic() {
        let backend = SimulatedBackend::new(Duration::ZERO, false);
        let first = backend.pay_invoice("lnbc1", None).await.unwrap();
        let second = backend.pay_invoice("lnbc1", Some(500)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.preimage.as_ref().map(|p| p.len()), Some(64));
    }

    #[tokio::test]
    async fn test_simulated_failure() {
        let backend = SimulatedBackend::new(Duration::ZERO, true);
        let err = backend.pay_invoice("lnbc1", None).await.unwrap_err();
        assert!(matches!(err, Error::PaymentFailed(_)));
    }
}
