// Contract fields for spot FX on the broker's IDEALPRO venue.
pub const FX_SEC_TYPE: &str = "CASH";
pub const FX_EXCHANGE: &str = "IDEALPRO";

// Separator between base and quote in the pair input, e.g. "AUD.CAD".
pub const PAIR_SEPARATOR: char = '.';

/// Label of the RTH radio that maps to `true`. Anything else maps to `false`.
pub const RTH_YES: &str = "Yes";
pub const RTH_NO: &str = "No";

// Form defaults shown on first load.
pub const DEFAULT_CURRENCY_PAIR: &str = "AUD.CAD";
pub const DEFAULT_DURATION_NUM: &str = "30";
pub const DEFAULT_TRADE_CURRENCY: &str = "AUDCAD";
pub const DEFAULT_TRADE_AMOUNT: &str = "20000";

pub const INITIAL_STATUS: &str = "Enter a currency code";

pub const FX_PAIRS_URL: &str =
    "https://www.interactivebrokers.com/en/index.php?f=2222&exch=ibfxpro&showcategories=FX";

// Chart canvas size in px.
pub const CHART_WIDTH: u32 = 960;
pub const CHART_HEIGHT: u32 = 480;

// Process defaults, overridable from the command line or environment.
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8050;
pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:5000/";
pub const DEFAULT_TRADE_ORDER_PATH: &str = "trade_order.bin";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
