//! Order Repository

use shared::models::{Order, OrderCreate, OrderUpdate};

use super::BaseRepository;
use crate::db::Database;
use crate::orders::{OrderAccess, OrderError, place_order};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

fn not_found(id: u64) -> AppError {
    AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", id)
}

fn empty_address() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl OrderRepository {
    pub fn new(db: Database) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Place an order as one unit of work.
    ///
    /// An empty item list is rejected before the document is loaded.
    pub async fn place(
        &self,
        user_id: u64,
        data: OrderCreate,
        now_secs: i64,
    ) -> Result<Order, OrderError> {
        if data.items.is_empty() {
            return Err(OrderError::NoItems);
        }
        let address = data.address.unwrap_or_else(empty_address);

        self.base
            .db()
            .write(|snap| place_order(snap, user_id, &data.items, address, now_secs))
            .await
    }

    /// Orders visible under `access`, in ledger order
    pub async fn find_visible(&self, access: OrderAccess) -> AppResult<Vec<Order>> {
        let snap = self.base.db().read().await?;
        Ok(snap
            .orders
            .into_iter()
            .filter(|o| access.can_read(o))
            .collect())
    }

    pub async fn find_by_id(&self, id: u64) -> AppResult<Option<Order>> {
        let snap = self.base.db().read().await?;
        Ok(snap.orders.into_iter().find(|o| o.id == id))
    }

    /// Change status and/or address. Items, total and ownership stay fixed.
    pub async fn update(&self, id: u64, data: OrderUpdate) -> AppResult<Order> {
        self.base
            .db()
            .write(|snap| {
                let order = snap
                    .orders
                    .iter_mut()
                    .find(|o| o.id == id)
                    .ok_or_else(|| not_found(id))?;
                if let Some(status) = data.status {
                    order.status = status;
                }
                if let Some(address) = data.address {
                    order.address = address;
                }
                tracing::info!(order_id = id, status = ?order.status, "Order updated");
                Ok(order.clone())
            })
            .await
    }

    /// Remove an order from the ledger. Its id is never handed out again.
    pub async fn delete(&self, id: u64) -> AppResult<()> {
        self.base
            .db()
            .write(|snap| {
                let before = snap.orders.len();
                snap.orders.retain(|o| o.id != id);
                if snap.orders.len() == before {
                    return Err(not_found(id));
                }
                tracing::info!(order_id = id, "Order deleted");
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryStore, Snapshot, SnapshotStore};
    use rust_decimal::Decimal;
    use shared::models::{OrderItemInput, OrderStatus, Product};
    use std::sync::Arc;

    fn snapshot_with_stock(stock: u32) -> Snapshot {
        let mut snap = Snapshot::default();
        snap.catalogue.push(Product {
            id: 1,
            title: "Lamp".into(),
            description: String::new(),
            price: Decimal::new(2500, 2),
            stock,
            category_id: 1,
            likes: 0,
            views: 0,
            created_at: 0,
            images: vec![],
        });
        snap
    }

    fn one_unit() -> OrderCreate {
        OrderCreate {
            items: vec![OrderItemInput {
                product_id: 1,
                quantity: Some(1),
            }],
            address: None,
        }
    }

    #[tokio::test]
    async fn test_failed_placement_commits_nothing() {
        let store = Arc::new(MemoryStore::new(snapshot_with_stock(0)));
        let repo = OrderRepository::new(Database::new(store.clone()));

        let err = repo.place(1, one_unit(), 0).await.unwrap_err();
        assert!(matches!(err, OrderError::InsufficientStock(1)));
        assert_eq!(store.commit_count(), 0);

        let err = repo.place(1, OrderCreate::default(), 0).await.unwrap_err();
        assert!(matches!(err, OrderError::NoItems));
        assert_eq!(store.commit_count(), 0);
    }

    #[tokio::test]
    async fn test_placement_persists_once() {
        let store = Arc::new(MemoryStore::new(snapshot_with_stock(2)));
        let repo = OrderRepository::new(Database::new(store.clone()));

        let order = repo.place(3, one_unit(), 10).await.unwrap();
        assert_eq!(order.address, serde_json::json!({}));
        assert_eq!(store.commit_count(), 1);

        let snap = store.load_snapshot().await.unwrap();
        assert_eq!(snap.product(1).unwrap().stock, 1);
        assert_eq!(snap.orders.len(), 1);
        assert_eq!(snap.stats.best_sellers, vec![1]);
    }

    #[tokio::test]
    async fn test_concurrent_orders_never_oversell() {
        const STOCK: u32 = 5;
        let repo = OrderRepository::new(Database::in_memory(snapshot_with_stock(STOCK)));

        let mut handles = Vec::new();
        for user in 0..20u64 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move { repo.place(user, one_unit(), 0).await }));
        }
        let mut ok = 0;
        let mut short = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(_) => ok += 1,
                Err(OrderError::InsufficientStock(1)) => short += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(ok, STOCK);
        assert_eq!(short, 20 - STOCK);

        let snap = repo.base.db().read().await.unwrap();
        assert_eq!(snap.product(1).unwrap().stock, 0);
        let mut ids: Vec<u64> = snap.orders.iter().map(|o| o.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), STOCK as usize);
    }

    #[tokio::test]
    async fn test_update_only_touches_status_and_address() {
        let repo = OrderRepository::new(Database::in_memory(snapshot_with_stock(3)));
        let placed = repo.place(1, one_unit(), 0).await.unwrap();

        let updated = repo
            .update(
                placed.id,
                OrderUpdate {
                    status: Some(OrderStatus::Shipped),
                    address: Some(serde_json::json!({"city": "Lyon"})),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Shipped);
        assert_eq!(updated.address["city"], "Lyon");
        assert_eq!(updated.total, placed.total);
        assert_eq!(updated.items, placed.items);

        let err = repo.update(999, OrderUpdate::default()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[tokio::test]
    async fn test_ids_keep_increasing_after_deleting_newest() {
        let repo = OrderRepository::new(Database::in_memory(snapshot_with_stock(10)));
        let a = repo.place(1, one_unit(), 0).await.unwrap();
        let b = repo.place(1, one_unit(), 0).await.unwrap();
        repo.delete(b.id).await.unwrap();
        let c = repo.place(1, one_unit(), 0).await.unwrap();
        assert!(a.id < b.id && b.id < c.id);

        assert_eq!(repo.delete(b.id).await.unwrap_err().code, ErrorCode::OrderNotFound);
    }

    #[tokio::test]
    async fn test_visibility() {
        let repo = OrderRepository::new(Database::in_memory(snapshot_with_stock(10)));
        repo.place(1, one_unit(), 0).await.unwrap();
        repo.place(2, one_unit(), 0).await.unwrap();

        assert_eq!(repo.find_visible(OrderAccess::Own(1)).await.unwrap().len(), 1);
        assert_eq!(repo.find_visible(OrderAccess::Own(3)).await.unwrap().len(), 0);
        assert_eq!(repo.find_visible(OrderAccess::Unrestricted).await.unwrap().len(), 2);
    }
}
