//! Payment backends
//!
//! The wallet screens never talk to a node directly. Payments go through a
//! [`PaymentBackend`] selected in the settings.

mod lnbits;
mod simulated;

pub use lnbits::LnbitsBackend;
pub use simulated::SimulatedBackend;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Result of a successful payment
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// Hex payment hash reported by the backend
    pub payment_hash: Option<String>,
    /// Hex preimage, when the backend returns it
    pub preimage: Option<String>,
}

/// Something that can pay a BOLT11 payment request
#[async_trait]
pub trait PaymentBackend: Send + Sync {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    /// Pay `payment_request`, optionally overriding the amount in satoshis
    async fn pay_invoice(
        &self,
        payment_request: &str,
        amount_sat: Option<u64>,
    ) -> Result<PaymentReceipt>;
}

/// Backend selection stored in the settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackendConfig {
    /// Local stand-in that never touches the network
    Simulated {
        #[serde(default = "default_delay_ms")]
        delay_ms: u64,
        #[serde(default)]
        fail: bool,
    },
    /// LNbits wallet reached over its REST API
    Lnbits { url: String, admin_key: String },
}

fn default_delay_ms() -> u64 {
    1500
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig::Simulated {
            delay_ms: default_delay_ms(),
            fail: false,
        }
    }
}

impl fmt::Display for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simulated { delay_ms, fail } => {
                write!(f, "simulated (delay {}ms, fail: {})", delay_ms, fail)
            }
            Self::Lnbits { url, .. } => write!(f, "lnbits ({})", url),
        }
    }
}

impl BackendConfig {
    /// Construct the configured backend
    pub fn build(&self) -> Result<Arc<dyn PaymentBackend>> {
        Ok(match self {
            Self::Simulated { delay_ms, fail } => Arc::new(SimulatedBackend::new(
                Duration::from_millis(*delay_ms),
                *fail,
            )),
            Self::Lnbits { url, admin_key } => Arc::new(LnbitsBackend::new(admin_key, url)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_config_json() {
        let json = r#"{"type":"lnbits","url":"https://lnbits.example.com/","admin_key":"k"}"#;
        let config: BackendConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            config,
            BackendConfig::Lnbits {
                url: "https://lnbits.example.com/".to_string(),
                admin_key: "k".to_string(),
            }
        );

        let config: BackendConfig = serde_json::from_str(r#"{"type":"simulated"}"#).unwrap();
        assert_eq!(config, BackendConfig::default());
    }

    #[test]
    fn test_build_backends() {
        assert_eq!(BackendConfig::default().build().unwrap().name(), "simulated");

        let lnbits = BackendConfig::Lnbits {
            url: "https://lnbits.example.com/".to_string(),
            admin_key: "k".to_string(),
        };
        assert_eq!(lnbits.build().unwrap().name(), "lnbits");

        let broken = BackendConfig::Lnbits {
            url: "not a url".to_string(),
            admin_key: "k".to_string(),
        };
        assert!(broken.build().is_err());
    }
}
