//! Stats Model

use serde::{Deserialize, Serialize};

use super::Product;

/// Maximum length of the best-seller ranking
pub const BEST_SELLERS_CAP: usize = 100;
/// Maximum length of the new-arrivals list
pub const NEW_ARRIVALS_CAP: usize = 20;
/// Maximum number of products per list in a stats report
pub const STATS_REPORT_LIMIT: usize = 10;

/// Persisted id lists, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub best_sellers: Vec<u64>,
    #[serde(default)]
    pub new_arrivals: Vec<u64>,
    #[serde(default)]
    pub featured: Vec<u64>,
}

impl Stats {
    /// Drop a product id from the curated lists.
    ///
    /// `best_sellers` is left alone: only order placement writes it, and
    /// ids of deleted products are skipped when the report is built.
    pub fn forget_curated(&mut self, product_id: u64) {
        self.new_arrivals.retain(|id| *id != product_id);
        self.featured.retain(|id| *id != product_id);
    }
}

/// Response of `GET /api/stats`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsReport {
    pub best_sellers: Vec<Product>,
    pub new_arrivals: Vec<Product>,
    pub featured: Vec<Product>,
}

/// Payload of `PUT /api/stats/featured`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturedUpdate {
    pub featured: Vec<u64>,
}
