//! Order processor
//!
//! Runs inside one `Database::write` unit of work. The validation pass only
//! reads the snapshot; if it fails the snapshot is untouched and the unit of
//! work commits nothing.

use std::collections::HashMap;

use rust_decimal::Decimal;
use shared::models::{Order, OrderItem, OrderItemInput, OrderStatus};

use super::OrderError;
use super::money::{line_total, round_money};
use super::ranking;
use crate::db::Snapshot;

/// A validated order line
struct ResolvedLine {
    /// Index into `snapshot.catalogue`
    index: usize,
    item: OrderItem,
}

/// Place an order against `snapshot`.
///
/// All-or-nothing: on `Err` no stock, ledger or ranking change has been made.
pub fn place_order(
    snapshot: &mut Snapshot,
    user_id: u64,
    items: &[OrderItemInput],
    address: serde_json::Value,
    now_secs: i64,
) -> Result<Order, OrderError> {
    if items.is_empty() {
        return Err(OrderError::NoItems);
    }

    let (lines, total) = validate(snapshot, items)?;

    // Mutation pass
    for line in &lines {
        let product = &mut snapshot.catalogue[line.index];
        product.stock = match product.stock.checked_sub(line.item.quantity) {
            Some(left) => left,
            None => {
                tracing::error!(
                    product_id = product.id,
                    stock = product.stock,
                    requested = line.item.quantity,
                    "Stock would go negative after validation, clamping at 0"
                );
                0
            }
        };
    }

    // Ledger append
    let order_items: Vec<OrderItem> = lines.iter().map(|l| l.item).collect();
    let order = Order {
        id: snapshot.next_order_id(),
        user_id,
        status: OrderStatus::Pending,
        items: order_items,
        total: round_money(total),
        address,
        created_at: now_secs,
    };
    snapshot.orders.push(order.clone());

    ranking::record_sale(&mut snapshot.stats.best_sellers, &order.items);

    tracing::info!(
        order_id = order.id,
        user_id,
        items = order.items.len(),
        total = %order.total,
        "Order placed"
    );
    Ok(order)
}

/// Validation pass: resolve products, check cumulative stock, sum the total.
fn validate(
    snapshot: &Snapshot,
    items: &[OrderItemInput],
) -> Result<(Vec<ResolvedLine>, Decimal), OrderError> {
    let mut requested: HashMap<u64, u64> = HashMap::with_capacity(items.len());
    let mut lines = Vec::with_capacity(items.len());
    let mut total = Decimal::ZERO;

    for input in items {
        let pid = input.product_id;
        let quantity = input.quantity();
        if quantity == 0 {
            return Err(OrderError::InvalidQuantity(pid));
        }

        let index = snapshot
            .catalogue
            .iter()
            .position(|p| p.id == pid)
            .ok_or(OrderError::ProductNotFound(pid))?;
        let product = &snapshot.catalogue[index];

        // same product on several lines: check the running sum
        let wanted = requested.entry(pid).or_insert(0);
        *wanted += u64::from(quantity);
        if u64::from(product.stock) < *wanted {
            return Err(OrderError::InsufficientStock(pid));
        }

        total += line_total(product.price, quantity);
        lines.push(ResolvedLine {
            index,
            item: OrderItem {
                product_id: pid,
                quantity,
            },
        });
    }

    Ok((lines, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{BEST_SELLERS_CAP, Product};

    fn product(id: u64, price: Decimal, stock: u32) -> Product {
        Product {
            id,
            title: format!("Product {id}"),
            description: String::new(),
            price,
            stock,
            category_id: 1,
            likes: 0,
            views: 0,
            created_at: 0,
            images: vec![],
        }
    }

    fn item(product_id: u64, quantity: u32) -> OrderItemInput {
        OrderItemInput {
            product_id,
            quantity: Some(quantity),
        }
    }

    /// {1: price 10, stock 5}, {2: price 20, stock 1}
    fn catalog() -> Snapshot {
        let mut snap = Snapshot::default();
        snap.catalogue = vec![
            product(1, Decimal::new(10, 0), 5),
            product(2, Decimal::new(20, 0), 1),
        ];
        snap
    }

    fn stock(snap: &Snapshot, id: u64) -> u32 {
        snap.product(id).unwrap().stock
    }

    fn place(snap: &mut Snapshot, items: &[OrderItemInput]) -> Result<Order, OrderError> {
        place_order(snap, 7, items, serde_json::json!({}), 1_700_000_000)
    }

    #[test]
    fn test_successful_order() {
        let mut snap = catalog();
        let order = place(&mut snap, &[item(1, 1), item(2, 1)]).unwrap();

        assert_eq!(order.total, Decimal::new(3000, 2));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.user_id, 7);
        assert_eq!(order.created_at, 1_700_000_000);
        assert_eq!(stock(&snap, 1), 4);
        assert_eq!(stock(&snap, 2), 0);
        assert_eq!(&snap.stats.best_sellers[..2], &[2, 1]);
        assert_eq!(snap.orders, vec![order]);
    }

    #[test]
    fn test_insufficient_stock_single_item() {
        let mut snap = Snapshot::default();
        snap.catalogue = vec![product(1, Decimal::new(1000, 2), 2)];
        let before = snap.clone();

        let err = place(&mut snap, &[item(1, 3)]).unwrap_err();
        assert!(matches!(err, OrderError::InsufficientStock(1)));
        assert_eq!(stock(&snap, 1), 2);
        assert_eq!(snap, before);
    }

    #[test]
    fn test_no_partial_deduction() {
        let mut snap = catalog();
        let before = snap.clone();

        let err = place(&mut snap, &[item(1, 2), item(2, 5)]).unwrap_err();
        assert!(matches!(err, OrderError::InsufficientStock(2)));
        assert_eq!(stock(&snap, 1), 5);
        assert!(snap.orders.is_empty());
        assert_eq!(snap, before);
    }

    #[test]
    fn test_unknown_product_aborts_everything() {
        let mut snap = catalog();
        let before = snap.clone();

        let err = place(&mut snap, &[item(1, 1), item(99, 1)]).unwrap_err();
        assert!(matches!(err, OrderError::ProductNotFound(99)));
        assert_eq!(snap, before);
    }

    #[test]
    fn test_empty_items() {
        let mut snap = catalog();
        assert!(matches!(place(&mut snap, &[]), Err(OrderError::NoItems)));
        assert_eq!(snap.sequences.orders, 0);
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let mut snap = catalog();
        let err = place(&mut snap, &[item(1, 0)]).unwrap_err();
        assert!(matches!(err, OrderError::InvalidQuantity(1)));
        assert_eq!(stock(&snap, 1), 5);
    }

    #[test]
    fn test_missing_quantity_means_one() {
        let mut snap = catalog();
        let order = place(
            &mut snap,
            &[OrderItemInput {
                product_id: 1,
                quantity: None,
            }],
        )
        .unwrap();
        assert_eq!(order.items[0].quantity, 1);
        assert_eq!(stock(&snap, 1), 4);
    }

    #[test]
    fn test_repeated_product_checks_cumulative_quantity() {
        let mut snap = catalog();
        let before = snap.clone();

        // 3 + 3 > 5 even though each line alone fits
        let err = place(&mut snap, &[item(1, 3), item(1, 3)]).unwrap_err();
        assert!(matches!(err, OrderError::InsufficientStock(1)));
        assert_eq!(snap, before);

        let order = place(&mut snap, &[item(1, 3), item(1, 2)]).unwrap();
        assert_eq!(order.items.len(), 2);
        assert_eq!(stock(&snap, 1), 0);
    }

    #[test]
    fn test_stock_decrements_match_quantities() {
        let mut snap = Snapshot::default();
        snap.catalogue = (1..=4)
            .map(|id| product(id, Decimal::new(199, 2), 10))
            .collect();
        let before: u32 = snap.catalogue.iter().map(|p| p.stock).sum();

        let items = [item(1, 3), item(2, 1), item(4, 10), item(1, 2)];
        let order = place(&mut snap, &items).unwrap();

        let after: u32 = snap.catalogue.iter().map(|p| p.stock).sum();
        let requested: u32 = order.items.iter().map(|i| i.quantity).sum();
        assert_eq!(before - after, requested);
        assert_eq!(stock(&snap, 1), 5);
        assert_eq!(stock(&snap, 2), 9);
        assert_eq!(stock(&snap, 3), 10);
        assert_eq!(stock(&snap, 4), 0);
    }

    #[test]
    fn test_total_is_rounded_to_cents() {
        let mut snap = Snapshot::default();
        snap.catalogue = vec![
            product(1, Decimal::new(3333, 3), 10), // 3.333
            product(2, Decimal::new(1, 1), 10),    // 0.1
        ];
        // 3.333 × 3 + 0.1 × 3 = 10.299 → 10.30
        let order = place(&mut snap, &[item(1, 3), item(2, 3)]).unwrap();
        assert_eq!(order.total, Decimal::new(1030, 2));
    }

    #[test]
    fn test_order_ids_increase_and_are_not_reused() {
        let mut snap = catalog();
        snap.catalogue[0].stock = 100;
        let a = place(&mut snap, &[item(1, 1)]).unwrap();
        let b = place(&mut snap, &[item(1, 1)]).unwrap();
        assert!(b.id > a.id);

        snap.orders.retain(|o| o.id != b.id);
        let c = place(&mut snap, &[item(1, 1)]).unwrap();
        assert!(c.id > b.id);
    }

    #[test]
    fn test_best_sellers_cap_and_head() {
        let mut snap = catalog();
        snap.catalogue[0].stock = 1_000;
        for _ in 0..30 {
            place(&mut snap, &[item(1, 4)]).unwrap();
        }
        snap.catalogue[1].stock = 1;
        place(&mut snap, &[item(2, 1)]).unwrap();

        assert_eq!(snap.stats.best_sellers.len(), BEST_SELLERS_CAP);
        assert_eq!(snap.stats.best_sellers[0], 2);
    }

    #[test]
    fn test_price_read_at_validation_time() {
        let mut snap = catalog();
        let order = place(&mut snap, &[item(1, 2)]).unwrap();
        snap.product_mut(1).unwrap().price = Decimal::new(99, 0);
        assert_eq!(order.total, Decimal::new(20, 0));
        assert_eq!(snap.orders[0].total, Decimal::new(20, 0));
    }
}
