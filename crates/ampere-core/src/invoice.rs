//! Decoded Lightning payment requests

use std::str::FromStr;

use chrono::{DateTime, Local};
use lightning_invoice::{Bolt11Invoice, Bolt11InvoiceDescription};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, LIGHTNING_SCHEME};

/// Fields of a decoded BOLT11 payment request
///
/// Every field is optional. Empty strings and zero values are stored as
/// `None` so that screens can treat "absent" and "falsy" the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayReq {
    /// Requested amount in satoshis
    pub num_satoshis: Option<u64>,
    /// Seconds after `timestamp` until the request expires
    pub expiry: Option<u64>,
    /// Minimum final CLTV expiry delta
    pub cltv_expiry: Option<u64>,
    /// Hex-encoded payee node id
    pub destination: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    /// Hex-encoded payment hash
    pub payment_hash: Option<String>,
    /// Creation time in unix seconds
    pub timestamp: Option<u64>,
}

/// Strip whitespace and an optional `lightning:` scheme from user input
pub fn normalize_payment_request(encoded: &str) -> &str {
    let trimmed = encoded.trim();
    match trimmed.get(..LIGHTNING_SCHEME.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(LIGHTNING_SCHEME) => {
            trimmed[LIGHTNING_SCHEME.len()..].trim_start()
        }
        _ => trimmed,
    }
}

impl PayReq {
    /// Decode a BOLT11 string
    pub fn decode(encoded: &str) -> Result<Self> {
        let normalized = normalize_payment_request(encoded);
        if normalized.is_empty() {
            return Err(Error::EmptyPaymentRequest);
        }

        let invoice = Bolt11Invoice::from_str(normalized)?;
        Ok(Self::from_invoice(&invoice))
    }

    /// Extract the displayed fields from a parsed invoice
    pub fn from_invoice(invoice: &Bolt11Invoice) -> Self {
        let description = match invoice.description() {
            Bolt11InvoiceDescription::Direct(description) => {
                Some(description.clone().into_inner().0)
            }
            Bolt11InvoiceDescription::Hash(_) => None,
        };

        Self {
            num_satoshis: invoice.amount_milli_satoshis().map(|msat| msat / 1000),
            expiry: Some(invoice.expiry_time().as_secs()),
            cltv_expiry: Some(invoice.min_final_cltv_expiry_delta()),
            destination: Some(invoice.recover_payee_pub_key().to_string()),
            description,
            payment_hash: Some(invoice.payment_hash().to_string()),
            timestamp: Some(invoice.duration_since_epoch().as_secs()),
        }
        .normalized()
    }

    /// Replace empty strings and zero numbers with `None`
    pub fn normalized(self) -> Self {
        fn text(value: Option<String>) -> Option<String> {
            value.filter(|s| !s.is_empty())
        }
        fn number(value: Option<u64>) -> Option<u64> {
            value.filter(|n| *n != 0)
        }

        Self {
            num_satoshis: number(self.num_satoshis),
            expiry: number(self.expiry),
            cltv_expiry: number(self.cltv_expiry),
            destination: text(self.destination),
            description: text(self.description),
            payment_hash: text(self.payment_hash),
            timestamp: number(self.timestamp),
        }
    }

    /// All detail rows in display order, present or not
    pub fn labelled_fields(&self) -> [(&'static str, Option<String>); 6] {
        [
            ("Description", self.description.clone()),
            ("Timestamp", self.timestamp.map(format_timestamp)),
            ("Expiry", self.expiry.map(|e| e.to_string())),
            ("CLTV Expiry", self.cltv_expiry.map(|c| c.to_string())),
            ("Destination", self.destination.clone()),
            ("Payment Hash", self.payment_hash.clone()),
        ]
    }

    /// Detail rows that have a value
    pub fn present_fields(&self) -> Vec<(&'static str, String)> {
        self.labelled_fields()
            .into_iter()
            .filter_map(|(label, value)| value.map(|v| (label, v)))
            .collect()
    }

    /// Unix time at which the request stops being payable
    pub fn expires_at(&self) -> Option<u64> {
        Some(self.timestamp?.saturating_add(self.expiry?))
    }

    /// Whether the request has expired at `now` (unix seconds)
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expires_at().map(|at| now >= at).unwrap_or(false)
    }
}

/// Render a unix timestamp in local time
pub fn format_timestamp(ts: u64) -> String {
    i64::try_from(ts)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| {
            dt.with_timezone(&Local)
                .format("%a %b %d %Y %H:%M:%S %Z")
                .to_string()
        })
        .unwrap_or_else(|| ts.to_string())
}
