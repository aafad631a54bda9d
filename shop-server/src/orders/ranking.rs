//! Best-seller ranking
//!
//! `best_sellers` is a most-recent-first list of product ids with one entry
//! per sold unit, capped at [`BEST_SELLERS_CAP`]. Duplicates are expected.

use shared::models::{BEST_SELLERS_CAP, OrderItem};

/// Prepend one id per sold unit, in item order, then cap the list.
///
/// Items are walked in request order, so the last unit of the last item
/// ends up at index 0.
pub fn record_sale(best_sellers: &mut Vec<u64>, items: &[OrderItem]) {
    let units: usize = items.iter().map(|i| i.quantity as usize).sum();
    let mut fresh = Vec::with_capacity(units.min(BEST_SELLERS_CAP));
    for item in items.iter().rev() {
        for _ in 0..item.quantity {
            if fresh.len() == BEST_SELLERS_CAP {
                break;
            }
            fresh.push(item.product_id);
        }
    }

    fresh.extend(best_sellers.iter().copied());
    fresh.truncate(BEST_SELLERS_CAP);
    *best_sellers = fresh;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: u64, quantity: u32) -> OrderItem {
        OrderItem {
            product_id,
            quantity,
        }
    }

    #[test]
    fn test_last_item_lands_first() {
        let mut list = vec![7];
        record_sale(&mut list, &[item(1, 1), item(2, 1)]);
        assert_eq!(list, vec![2, 1, 7]);
    }

    #[test]
    fn test_one_entry_per_unit() {
        let mut list = Vec::new();
        record_sale(&mut list, &[item(1, 2), item(3, 3)]);
        assert_eq!(list, vec![3, 3, 3, 1, 1]);
    }

    #[test]
    fn test_capped_at_limit() {
        let mut list: Vec<u64> = (1000..1100).collect();
        record_sale(&mut list, &[item(5, 3)]);
        assert_eq!(list.len(), BEST_SELLERS_CAP);
        assert_eq!(&list[..4], &[5, 5, 5, 1000]);
        assert_eq!(*list.last().unwrap(), 1096);
    }

    #[test]
    fn test_huge_quantity_does_not_overflow_cap() {
        let mut list = vec![1];
        record_sale(&mut list, &[item(9, 1_000_000)]);
        assert_eq!(list.len(), BEST_SELLERS_CAP);
        assert!(list.iter().all(|id| *id == 9));
    }
}
