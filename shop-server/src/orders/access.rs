//! Order authorization policy
//!
//! Kept apart from the processor: placement never looks at roles.

use shared::models::Order;

use crate::auth::CurrentUser;

/// What the caller may do with orders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAccess {
    /// Read and change every order
    Unrestricted,
    /// Read own orders only
    Own(u64),
}

impl OrderAccess {
    pub fn for_user(user: &CurrentUser) -> Self {
        if user.is_admin() {
            OrderAccess::Unrestricted
        } else {
            OrderAccess::Own(user.id)
        }
    }

    pub fn can_read(&self, order: &Order) -> bool {
        match self {
            OrderAccess::Unrestricted => true,
            OrderAccess::Own(user_id) => order.user_id == *user_id,
        }
    }

    /// Status/address changes and deletions
    pub fn can_manage(&self) -> bool {
        matches!(self, OrderAccess::Unrestricted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{OrderStatus, Role};

    fn user(id: u64, role: Role) -> CurrentUser {
        CurrentUser {
            id,
            email: format!("u{id}@example.com"),
            role,
        }
    }

    fn order(user_id: u64) -> Order {
        Order {
            id: 1,
            user_id,
            status: OrderStatus::Pending,
            items: vec![],
            total: Decimal::ZERO,
            address: serde_json::json!({}),
            created_at: 0,
        }
    }

    #[test]
    fn test_admin_is_unrestricted() {
        let access = OrderAccess::for_user(&user(1, Role::Admin));
        assert_eq!(access, OrderAccess::Unrestricted);
        assert!(access.can_read(&order(42)));
        assert!(access.can_manage());
    }

    #[test]
    fn test_user_sees_own_orders_only() {
        let access = OrderAccess::for_user(&user(5, Role::User));
        assert!(access.can_read(&order(5)));
        assert!(!access.can_read(&order(6)));
        assert!(!access.can_manage());
    }
}
