use async_trait::async_trait;

use crate::{
    http::client::RequestError,
    model::{Candle, Contract, HistoricalQuery},
};

/// Anything that can answer a historical bar request for a contract.
#[async_trait]
pub trait HistoricalDataSource: Send + Sync {
    async fn historical_data(
        &self,
        contract: &Contract,
        query: &HistoricalQuery,
    ) -> Result<Vec<Candle>, RequestError>;
}
