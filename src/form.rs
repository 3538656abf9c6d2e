//! Snapshots of the two dashboard forms, taken when a submit button fires.

use serde::Deserialize;

use crate::{
    constants,
    model::{
        self, BarSize, Contract, CurrencyPair, DurationUnit, HistoricalQuery, TradeAction,
        TradeRequest, WhatToShow,
    },
};

/// Values of the historical data form at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoricalForm {
    pub currency: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub duration_num: String,
    #[serde(default)]
    pub duration_unit: DurationUnit,
    #[serde(default)]
    pub bar_size: BarSize,
    #[serde(default)]
    pub what_to_show: WhatToShow,
    #[serde(default)]
    pub use_rth: String,
}

impl Default for HistoricalForm {
    fn default() -> Self {
        HistoricalForm {
            currency: constants::DEFAULT_CURRENCY_PAIR.into(),
            end_date: String::new(),
            duration_num: constants::DEFAULT_DURATION_NUM.into(),
            duration_unit: DurationUnit::default(),
            bar_size: BarSize::default(),
            what_to_show: WhatToShow::default(),
            use_rth: constants::RTH_YES.into(),
        }
    }
}

impl HistoricalForm {
    /// "Yes" means regular trading hours only; any other label means all hours.
    pub fn rth_flag(&self) -> bool {
        self.use_rth == constants::RTH_YES
    }

    /// Duration in the broker's "<number> <unit>" form. The number is not checked.
    pub fn duration(&self) -> String {
        format!("{} {}", self.duration_num, self.duration_unit.as_str())
    }

    /// Builds the contract and query this snapshot describes.
    pub fn to_request(&self) -> model::Result<(Contract, HistoricalQuery)> {
        let pair = CurrencyPair::parse(&self.currency)?;
        let contract = Contract::fx(&pair);
        let query = HistoricalQuery {
            base_currency: pair.base,
            quote_currency: pair.quote,
            end_datetime: self.end_date.clone(),
            duration: self.duration(),
            bar_size: self.bar_size,
            what_to_show: self.what_to_show,
            use_rth: self.rth_flag(),
        };
        Ok((contract, query))
    }
}

/// Values of the trade form at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TradeForm {
    pub action: TradeAction,
    #[serde(default)]
    pub trade_currency: String,
    #[serde(default)]
    pub trade_amt: String,
}

impl Default for TradeForm {
    fn default() -> Self {
        TradeForm {
            action: TradeAction::default(),
            trade_currency: constants::DEFAULT_TRADE_CURRENCY.into(),
            trade_amt: constants::DEFAULT_TRADE_AMOUNT.into(),
        }
    }
}

impl TradeForm {
    pub fn to_trade_request(&self) -> model::Result<TradeRequest> {
        TradeRequest::new(
            self.action,
            self.trade_currency.clone(),
            self.trade_amt.clone(),
        )
    }
}
