//! Service for computing correlation matrices from provider price history.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::join_all;
use log::{debug, warn};

use crate::constants::MAX_CORRELATION_SYMBOLS;
use crate::errors::Result;
use crate::portfolio::returns::PricePoint;

use super::{
    build_correlation_matrix, CorrelationMatrix, CorrelationServiceTrait, Lookback,
    PriceHistoryProviderTrait,
};

pub struct CorrelationService {
    price_provider: Arc<dyn PriceHistoryProviderTrait>,
}

impl CorrelationService {
    pub fn new(price_provider: Arc<dyn PriceHistoryProviderTrait>) -> Self {
        CorrelationService { price_provider }
    }

    /// Drops duplicates (keeping first occurrence) and caps the list size.
    fn prepare_symbols(symbols: &[String]) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut unique: Vec<String> = symbols
            .iter()
            .filter(|s| seen.insert(s.as_str()))
            .cloned()
            .collect();

        if unique.len() > MAX_CORRELATION_SYMBOLS {
            warn!(
                "Correlation requested for {} symbols, truncating to {}",
                unique.len(),
                MAX_CORRELATION_SYMBOLS
            );
            unique.truncate(MAX_CORRELATION_SYMBOLS);
        }

        unique
    }
}

#[async_trait]
impl CorrelationServiceTrait for CorrelationService {
    async fn get_correlation_matrix(
        &self,
        symbols: &[String],
        lookback: Lookback,
        as_of: NaiveDate,
    ) -> Result<CorrelationMatrix> {
        let symbols = Self::prepare_symbols(symbols);
        let start_date = lookback.start_date(as_of);

        debug!(
            "Fetching price history for {} symbols from {} to {}",
            symbols.len(),
            start_date,
            as_of
        );

        let provider = &self.price_provider;
        let fetches = symbols.iter().map(|symbol| async move {
            let result = provider.get_price_history(symbol, start_date, as_of).await;
            (symbol, result)
        });

        let mut histories: HashMap<String, Vec<PricePoint>> = HashMap::new();
        for (symbol, result) in join_all(fetches).await {
            match result {
                Ok(mut history) => {
                    history.sort_by_key(|p| p.date);
                    histories.insert(symbol.clone(), history);
                }
                Err(e) => {
                    // Cells for this symbol degrade to None
                    warn!("Failed to load price history for {}: {}", symbol, e);
                }
            }
        }

        Ok(build_correlation_matrix(&symbols, &histories))
    }
}
