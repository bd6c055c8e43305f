use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use super::{PaymentBackend, PaymentReceipt};
use crate::{Error, Result};

const PAYMENTS_ENDPOINT: &str = "api/v1/payments";

/// LNbits wallet reached with its admin key
#[derive(Clone)]
pub struct LnbitsBackend {
    admin_key: String,
    lnbits_url: Url,
    reqwest_client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct PayInvoiceResponse {
    payment_hash: String,
}

impl LnbitsBackend {
    pub fn new(admin_key: &str, lnbits_url: &str) -> Result<Self> {
        let lnbits_url = Url::parse(lnbits_url)?;
        let reqwest_client = reqwest::Client::builder().build()?;

        Ok(Self {
            admin_key: admin_key.to_string(),
            lnbits_url,
            reqwest_client,
        })
    }

    async fn make_post(&self, endpoint: &str, body: &serde_json::Value) -> Result<String> {
        let url = self.lnbits_url.join(endpoint)?;
        let response = self
            .reqwest_client
            .post(url)
            .header("X-Api-Key", &self.admin_key)
            .json(body)
            .send()
            .await?;

        match response.status() {
            reqwest::StatusCode::NOT_FOUND => return Err(Error::NotFound),
            reqwest::StatusCode::UNAUTHORIZED => return Err(Error::Unauthorized),
            status if !status.is_success() => {
                let text = response.text().await.unwrap_or_default();
                return Err(Error::Backend(format!("{}: {}", status, text)));
            }
            _ => {}
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl PaymentBackend for LnbitsBackend {
    fn name(&self) -> &'static str {
        "lnbits"
    }

    async fn pay_invoice(
        &self,
        payment_request: &str,
        amount_sat: Option<u64>,
    ) -> Result<PaymentReceipt> {
        if amount_sat.is_some() {
            return Err(Error::AmountOverrideUnsupported(self.name()));
        }

        let body = self
            .make_post(
                PAYMENTS_ENDPOINT,
                &serde_json::json!({ "out": true, "bolt11": payment_request }),
            )
            .await?;

        let response: PayInvoiceResponse = serde_json::from_str(&body)?;
        Ok(PaymentReceipt {
            payment_hash: Some(response.payment_hash),
            preimage: None,
        })
    }
}
