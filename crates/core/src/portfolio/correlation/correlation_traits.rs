use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::Result;
use crate::portfolio::returns::PricePoint;

use super::{CorrelationMatrix, Lookback};

/// Host-side source of daily closes, valued in the portfolio's base currency.
///
/// Caching and currency conversion are the implementor's concern.
#[async_trait]
pub trait PriceHistoryProviderTrait: Send + Sync {
    async fn get_price_history(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>>;
}

/// Trait for correlation service.
#[async_trait]
pub trait CorrelationServiceTrait: Send + Sync {
    /// Computes the correlation matrix for `symbols` over the lookback window ending on `as_of`.
    async fn get_correlation_matrix(
        &self,
        symbols: &[String],
        lookback: Lookback,
        as_of: NaiveDate,
    ) -> Result<CorrelationMatrix>;
}
