pub mod dynamodb;

use async_trait::async_trait;

use crate::errors::SourceError;
use crate::restaurant::Restaurant;

/// A bounded read against the restaurant catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanQuery {
    /// Upper bound on items evaluated by a single scan.
    pub limit: usize,
    /// Keep only restaurants whose themes contain this value.
    pub theme: Option<String>,
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait RestaurantSource: Send + Sync {
    async fn scan(&self, query: ScanQuery) -> Result<Vec<Restaurant>, SourceError>;
}
