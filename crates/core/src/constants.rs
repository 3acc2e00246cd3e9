use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Minimum number of dates two price series must share before a correlation is computed
pub const MIN_ALIGNED_PRICE_POINTS: usize = 10;

/// Minimum number of valid paired daily returns for a correlation
pub const MIN_RETURN_PAIRS: usize = 5;

/// Maximum number of symbols the correlation service will fetch and pair up
pub const MAX_CORRELATION_SYMBOLS: usize = 30;

/// Trading days used to annualize daily return statistics
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Simulation step count per year (monthly steps)
pub const MONTHS_PER_YEAR: u32 = 12;

/// Percentiles reported in every simulation result
pub const SIMULATION_PERCENTILES: [u8; 7] = [5, 10, 25, 50, 75, 90, 95];

/// Percentiles for which a full simulated trajectory is returned
pub const REPRESENTATIVE_PATH_PERCENTILES: [u8; 5] = [10, 25, 50, 75, 90];

/// Simulation counts below this are considered low confidence
pub const LOW_CONFIDENCE_SIMULATION_COUNT: u32 = 100;

/// Default number of simulated paths
pub const DEFAULT_SIMULATION_COUNT: u32 = 1000;

/// Default projection horizon in years
pub const DEFAULT_SIMULATION_YEARS: u32 = 10;

/// Group label for symbols without a sector/region/currency assignment
pub const UNKNOWN_GROUP: &str = "Unknown";

/// Drift reported for a held position whose target weight is zero
pub const ZERO_TARGET_DRIFT_PCT: Decimal = dec!(-100);
