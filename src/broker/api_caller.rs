use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;

use super::{response, source::HistoricalDataSource};
use crate::http::client::{self, RequestError};
use crate::model::{Candle, Contract, HistoricalQuery};

// Path of the historical bars endpoint, relative to the gateway base URL.
const HISTORICAL_DATA_PATH: &str = "v1/historical_data";

// Checks the status returned from the gateway and returns an error if the status is not "ok".
fn check_status(s: &str, err: &Option<String>) -> Result<(), RequestError> {
    match s {
        "ok" => Ok(()),
        "no_data" => Err(RequestError::Other("No data".into())),
        "error" => Err(RequestError::Other(
            err.clone().unwrap_or_else(|| "Unknown error".into()),
        )),
        _ => Err(RequestError::Other("Unknown status".into())),
    }
}

/// HTTP client for the local broker gateway.
pub struct GatewayClient {
    client: reqwest::Client,
    base: Url,
}

impl GatewayClient {
    pub fn new(mut base: Url, timeout: Duration) -> Result<Self, RequestError> {
        // Url::join drops the last path segment unless it ends with '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(GatewayClient {
            client: client::build_client(timeout)?,
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }
}

fn query_params(contract: &Contract, query: &HistoricalQuery) -> Vec<(&'static str, String)> {
    vec![
        ("symbol", contract.symbol.clone()),
        ("sec_type", contract.sec_type.to_string()),
        ("exchange", contract.exchange.to_string()),
        ("currency", contract.currency.clone()),
        ("end_date_time", query.end_datetime.clone()),
        ("duration", query.duration.clone()),
        ("bar_size", query.bar_size.as_str().to_string()),
        ("what_to_show", query.what_to_show.as_str().to_string()),
        ("use_rth", if query.use_rth { "1" } else { "0" }.to_string()),
    ]
}

#[async_trait]
impl HistoricalDataSource for GatewayClient {
    /// Fetches historical bars for a contract from the gateway.
    async fn historical_data(
        &self,
        contract: &Contract,
        query: &HistoricalQuery,
    ) -> Result<Vec<Candle>, RequestError> {
        let resp = client::get::<response::HistoricalBars>(
            &self.client,
            &self.base,
            HISTORICAL_DATA_PATH,
            &query_params(contract, query),
        )
        .await?;
        check_status(&resp.s, &resp.errmsg)?;

        log::debug!(
            "gateway returned {} bars for {}.{}",
            resp.bars.len(),
            contract.symbol,
            contract.currency
        );
        Ok(resp.bars)
    }
}
