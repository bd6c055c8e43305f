//! Display units for amounts

use serde::{Deserialize, Serialize};

use crate::SATS_PER_BTC;

/// Unit used to display amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Sats,
    Btc,
    Fiat,
}

impl Units {
    /// The unit that follows this one when cycling
    ///
    /// `Fiat` is skipped unless a fiat rate is available.
    pub fn next(self, fiat_enabled: bool) -> Self {
        match self {
            Units::Sats => Units::Btc,
            Units::Btc if fiat_enabled => Units::Fiat,
            Units::Btc | Units::Fiat => Units::Sats,
        }
    }

    /// Short label for status lines
    pub fn label(&self) -> &'static str {
        match self {
            Units::Sats => "sats",
            Units::Btc => "BTC",
            Units::Fiat => "fiat",
        }
    }
}

/// Fiat conversion rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiatRate {
    /// Currency code, e.g. "USD"
    pub code: String,
    /// Price of one bitcoin in this currency
    pub btc_price: f64,
}

/// Format satoshis with thousands separators
pub fn format_sats(sats: u64) -> String {
    let digits = sats.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if sats == 1 {
        format!("{} sat", grouped)
    } else {
        format!("{} sats", grouped)
    }
}

/// Format satoshis as bitcoin with 8 decimals
pub fn format_btc(sats: u64) -> String {
    format!("₿{}.{:08}", sats / SATS_PER_BTC, sats % SATS_PER_BTC)
}

/// Format satoshis in the rate's currency with 2 decimals
pub fn format_fiat(sats: u64, rate: &FiatRate) -> String {
    let value = sats as f64 / SATS_PER_BTC as f64 * rate.btc_price;
    format!("{:.2} {}", value, rate.code)
}

/// Format an amount in the given unit
///
/// Falls back to satoshis when `Fiat` is requested without a rate.
pub fn format_amount(sats: u64, units: Units, rate: Option<&FiatRate>) -> String {
    match (units, rate) {
        (Units::Sats, _) => format_sats(sats),
        (Units::Btc, _) => format_btc(sats),
        (Units::Fiat, Some(rate)) => format_fiat(sats, rate),
        (Units::Fiat, None) => format_sats(sats),
    }
}
