use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{constants, http::client, store::trade_order::StoreError};

pub type Result<T> = std::result::Result<T, DashboardError>;

/// Every way a dashboard request can fail. None of these are recovered from;
/// the web layer turns them into a generic error page.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("malformed currency pair {0:?}, expected BASE.QUOTE")]
    MalformedPair(String),
    #[error("trade field '{0}' is empty")]
    EmptyTradeField(&'static str),
    #[error("historical data fetch failed: {0}")]
    Fetch(#[from] client::RequestError),
    #[error("trade order store failed: {0}")]
    Store(#[from] StoreError),
}

/// Side of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TradeAction {
    #[default]
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
}

impl TradeAction {
    pub const ALL: [TradeAction; 2] = [TradeAction::Buy, TradeAction::Sell];

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => "BUY",
            TradeAction::Sell => "SELL",
        }
    }
}

impl Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The order written to disk on every trade submit.
///
/// `trade_amt` is kept exactly as typed; it is never parsed as a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRequest {
    pub action: TradeAction,
    pub trade_currency: String,
    pub trade_amt: String,
}

impl TradeRequest {
    /// Builds a request, refusing an empty currency or amount. Whitespace is
    /// kept as typed.
    pub fn new(action: TradeAction, trade_currency: String, trade_amt: String) -> Result<Self> {
        if trade_currency.is_empty() {
            return Err(DashboardError::EmptyTradeField("trade_currency"));
        }
        if trade_amt.is_empty() {
            return Err(DashboardError::EmptyTradeField("trade_amt"));
        }
        Ok(TradeRequest {
            action,
            trade_currency,
            trade_amt,
        })
    }

    /// Message shown back to the user, e.g. "BUY 20000 AUDCAD".
    pub fn confirmation(&self) -> String {
        format!("{} {} {}", self.action, self.trade_amt, self.trade_currency)
    }
}

/// Base and quote currency split out of a "BASE.QUOTE" string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    /// Splits on the first separator. Only the first two segments are used,
    /// so "EUR.USD.X" still yields ("EUR", "USD"). Input without a separator
    /// (including the empty string) is an error. Codes are not checked.
    pub fn parse(input: &str) -> Result<Self> {
        let mut parts = input.split(constants::PAIR_SEPARATOR);
        match (parts.next(), parts.next()) {
            (Some(base), Some(quote)) => Ok(CurrencyPair {
                base: base.to_string(),
                quote: quote.to_string(),
            }),
            _ => Err(DashboardError::MalformedPair(input.to_string())),
        }
    }
}

/// Broker-side descriptor of the instrument being queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    pub symbol: String,
    pub sec_type: &'static str,
    pub exchange: &'static str,
    pub currency: String,
}

impl Contract {
    /// Spot FX contract: base currency as symbol, quote as currency.
    pub fn fx(pair: &CurrencyPair) -> Self {
        Contract {
            symbol: pair.base.clone(),
            sec_type: constants::FX_SEC_TYPE,
            exchange: constants::FX_EXCHANGE,
            currency: pair.quote.clone(),
        }
    }
}

/// Unit of the duration radio group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum DurationUnit {
    S,
    #[default]
    D,
    W,
    M,
    Y,
}

impl DurationUnit {
    pub const ALL: [DurationUnit; 5] = [
        DurationUnit::S,
        DurationUnit::D,
        DurationUnit::W,
        DurationUnit::M,
        DurationUnit::Y,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationUnit::S => "S",
            DurationUnit::D => "D",
            DurationUnit::W => "W",
            DurationUnit::M => "M",
            DurationUnit::Y => "Y",
        }
    }
}

/// Bar sizes offered in the dropdown, in the broker's own spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum BarSize {
    #[serde(rename = "1 secs")]
    Secs1,
    #[serde(rename = "5 secs")]
    Secs5,
    #[serde(rename = "10 secs")]
    Secs10,
    #[serde(rename = "15 secs")]
    Secs15,
    #[serde(rename = "30 secs")]
    Secs30,
    #[serde(rename = "1 min")]
    Min1,
    #[serde(rename = "2 mins")]
    Mins2,
    #[serde(rename = "3 mins")]
    Mins3,
    #[serde(rename = "5 mins")]
    Mins5,
    #[serde(rename = "10 mins")]
    Mins10,
    #[serde(rename = "15 mins")]
    Mins15,
    #[serde(rename = "20 mins")]
    Mins20,
    #[serde(rename = "30 mins")]
    Mins30,
    #[serde(rename = "1 hour")]
    Hour1,
    #[serde(rename = "2 hours")]
    Hours2,
    #[serde(rename = "3 hours")]
    Hours3,
    #[serde(rename = "4 hours")]
    Hours4,
    #[serde(rename = "8 hours")]
    Hours8,
    #[default]
    #[serde(rename = "1 day")]
    Day1,
    #[serde(rename = "1 week")]
    Week1,
    #[serde(rename = "1 month")]
    Month1,
}

impl BarSize {
    pub const ALL: [BarSize; 21] = [
        BarSize::Secs1,
        BarSize::Secs5,
        BarSize::Secs10,
        BarSize::Secs15,
        BarSize::Secs30,
        BarSize::Min1,
        BarSize::Mins2,
        BarSize::Mins3,
        BarSize::Mins5,
        BarSize::Mins10,
        BarSize::Mins15,
        BarSize::Mins20,
        BarSize::Mins30,
        BarSize::Hour1,
        BarSize::Hours2,
        BarSize::Hours3,
        BarSize::Hours4,
        BarSize::Hours8,
        BarSize::Day1,
        BarSize::Week1,
        BarSize::Month1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BarSize::Secs1 => "1 secs",
            BarSize::Secs5 => "5 secs",
            BarSize::Secs10 => "10 secs",
            BarSize::Secs15 => "15 secs",
            BarSize::Secs30 => "30 secs",
            BarSize::Min1 => "1 min",
            BarSize::Mins2 => "2 mins",
            BarSize::Mins3 => "3 mins",
            BarSize::Mins5 => "5 mins",
            BarSize::Mins10 => "10 mins",
            BarSize::Mins15 => "15 mins",
            BarSize::Mins20 => "20 mins",
            BarSize::Mins30 => "30 mins",
            BarSize::Hour1 => "1 hour",
            BarSize::Hours2 => "2 hours",
            BarSize::Hours3 => "3 hours",
            BarSize::Hours4 => "4 hours",
            BarSize::Hours8 => "8 hours",
            BarSize::Day1 => "1 day",
            BarSize::Week1 => "1 week",
            BarSize::Month1 => "1 month",
        }
    }
}

/// Which price series the broker should aggregate into bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum WhatToShow {
    #[default]
    #[serde(rename = "MIDPOINT")]
    Midpoint,
    #[serde(rename = "TRADES")]
    Trades,
    #[serde(rename = "BID")]
    Bid,
    #[serde(rename = "ASK")]
    Ask,
}

impl WhatToShow {
    pub const ALL: [WhatToShow; 4] = [
        WhatToShow::Midpoint,
        WhatToShow::Trades,
        WhatToShow::Bid,
        WhatToShow::Ask,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WhatToShow::Midpoint => "MIDPOINT",
            WhatToShow::Trades => "TRADES",
            WhatToShow::Bid => "BID",
            WhatToShow::Ask => "ASK",
        }
    }
}

/// Parameters of one historical data request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricalQuery {
    pub base_currency: String,
    pub quote_currency: String,
    /// Passed through untouched; the broker expects "YYYYMMDD HH:MM:SS" or "".
    pub end_datetime: String,
    /// Number and unit joined by a space, e.g. "30 D".
    pub duration: String,
    pub bar_size: BarSize,
    pub what_to_show: WhatToShow,
    pub use_rth: bool,
}

/// One OHLC bar as returned by the broker gateway.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Candle {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}
