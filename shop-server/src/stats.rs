//! Stats reporter
//!
//! Resolves the id lists kept under `stats` into product records for
//! `GET /api/stats`, and curates the `featured` list.

use std::collections::HashMap;

use shared::models::{Product, STATS_REPORT_LIMIT, StatsReport};

use crate::db::{Database, Snapshot};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Map ids to products in list order, skip ids without a product, keep the first 10.
///
/// Repeated ids resolve to repeated entries.
fn resolve(ids: &[u64], by_id: &HashMap<u64, &Product>) -> Vec<Product> {
    ids.iter()
        .filter_map(|id| by_id.get(id).map(|p| (*p).clone()))
        .take(STATS_REPORT_LIMIT)
        .collect()
}

/// Build the stats report from one snapshot
pub fn build_report(snapshot: &Snapshot) -> StatsReport {
    let by_id: HashMap<u64, &Product> = snapshot.catalogue.iter().map(|p| (p.id, p)).collect();
    StatsReport {
        best_sellers: resolve(&snapshot.stats.best_sellers, &by_id),
        new_arrivals: resolve(&snapshot.stats.new_arrivals, &by_id),
        featured: resolve(&snapshot.stats.featured, &by_id),
    }
}

/// Current stats report
pub async fn get_stats(db: &Database) -> AppResult<StatsReport> {
    let snapshot = db.read().await?;
    Ok(build_report(&snapshot))
}

/// Replace the curated `featured` list. Every id must name a product;
/// duplicates are collapsed keeping the first occurrence.
pub async fn set_featured(db: &Database, ids: Vec<u64>) -> AppResult<Vec<u64>> {
    db.write(|snap| {
        if let Some(missing) = ids.iter().find(|id| snap.product(**id).is_none()) {
            return Err(AppError::new(ErrorCode::ProductNotFound).with_detail("product_id", *missing));
        }
        let mut featured = Vec::with_capacity(ids.len());
        for id in ids {
            if !featured.contains(&id) {
                featured.push(id);
            }
        }
        snap.stats.featured = featured.clone();
        Ok(featured)
    })
    .await
}
