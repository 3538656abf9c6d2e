use serde::Deserialize;

use crate::model::Candle;

#[derive(Debug, Deserialize)]
pub struct HistoricalBars {
    pub s: String,
    #[serde(default)]
    pub bars: Vec<Candle>,
    pub errmsg: Option<String>,
}
