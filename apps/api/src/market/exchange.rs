use std::collections::BTreeMap;

use reqwest::Client;
use serde::Deserialize;

use super::{check_status, MarketError};

const EXCHANGE_API_BASE: &str = "https://v6.exchangerate-api.com/v6";

#[derive(Debug, Deserialize)]
struct LatestRates {
    result: String,
    #[serde(default)]
    conversion_rates: BTreeMap<String, f64>,
}

/// ExchangeRate-API client.
#[derive(Clone)]
pub struct ExchangeClient {
    client: Client,
    api_key: Option<String>,
}

impl ExchangeClient {
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    /// Latest conversion rates from `base` to every supported currency.
    pub async fn latest(&self, base: &str) -> Result<BTreeMap<String, f64>, MarketError> {
        let api_key = self.api_key.as_deref().ok_or(MarketError::NotConfigured)?;

        let response = self
            .client
            .get(format!("{EXCHANGE_API_BASE}/{api_key}/latest/{}", base.to_uppercase()))
            .send()
            .await?;
        check_status(&response)?;

        let body: LatestRates = response.json().await?;
        rates_from(body)
    }
}

fn rates_from(body: LatestRates) -> Result<BTreeMap<String, f64>, MarketError> {
    if body.result == "success" {
        Ok(body.conversion_rates)
    } else {
        Err(MarketError::Payload(format!("result was '{}'", body.result)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_payload_yields_rates() {
        let body: LatestRates = serde_json::from_str(
            r#"{"result": "success", "base_code": "USD", "conversion_rates": {"USD": 1, "INR": 83.2}}"#,
        )
        .unwrap();
        let rates = rates_from(body).unwrap();
        assert_eq!(rates["INR"], 83.2);
    }

    #[test]
    fn test_error_payload_is_rejected() {
        let body: LatestRates =
            serde_json::from_str(r#"{"result": "error", "error-type": "invalid-key"}"#).unwrap();
        assert!(matches!(rates_from(body), Err(MarketError::Payload(_))));
    }
}
