//! Checkout and order history.
//!
//! # Usage
//!
//! ```bash
//! fitkart checkout
//! fitkart orders
//! ```

use fitkart_core::{Order, Price};
use fitkart_storefront::Store;
use fitkart_storefront::storage::KeyValueStore;
use tracing::info;

use super::cart::log_bill;
use super::{CommandError, require_user};

/// Place an order for everything in the cart.
///
/// # Errors
///
/// Returns `CommandError::LoginRequired` when signed out and
/// `CommandError::EmptyCart` when there is nothing to buy.
pub fn checkout<S: KeyValueStore>(store: &mut Store<S>) -> Result<Order, CommandError> {
    require_user(store)?;
    if store.cart().is_empty() {
        return Err(CommandError::EmptyCart);
    }

    log_bill(&store.bill());
    let order = store.place_order();
    info!(
        order_id = %order.id,
        "Order placed successfully! {} ({} units, {})",
        order.id,
        order.unit_count(),
        order.total(),
    );
    Ok(order)
}

/// List past orders, newest first.
///
/// # Errors
///
/// Returns `CommandError::LoginRequired` when signed out.
pub fn list<S: KeyValueStore>(store: &Store<S>) -> Result<(), CommandError> {
    require_user(store)?;

    let orders = store.orders();
    if orders.is_empty() {
        info!("No orders yet");
        return Ok(());
    }

    info!("My Orders ({})", orders.len());
    for order in orders {
        info!(
            "  {} {} {} {}",
            order.id,
            order.date.format("%Y-%m-%d %H:%M"),
            order.status,
            order.total(),
        );
        for item in &order.items {
            info!(
                "    {} x{} = {}",
                item.product.name,
                item.quantity,
                Price::inr(item.line_total()),
            );
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fitkart_core::{Email, OrderStatus, ProductId};
    use rust_decimal::Decimal;

    use super::super::test_support::{product, store_with};
    use super::*;

    #[test]
    fn test_checkout_requires_login() {
        let mut store = store_with(vec![product("p1", 100, 100)]);
        let p1 = store.product(&ProductId::new("p1")).cloned().unwrap();
        store.add(&p1);

        assert!(matches!(checkout(&mut store), Err(CommandError::LoginRequired)));
        assert_eq!(store.cart().len(), 1);
        assert!(store.orders().is_empty());
    }

    #[test]
    fn test_checkout_rejects_empty_cart() {
        let mut store = store_with(Vec::new());
        store.login(Email::parse("riya@gmail.com").unwrap());

        assert!(matches!(checkout(&mut store), Err(CommandError::EmptyCart)));
        assert!(store.orders().is_empty());
    }

    #[test]
    fn test_checkout_places_order() {
        let mut store = store_with(vec![product("p1", 500, 600), product("p2", 600, 600)]);
        store.login(Email::parse("riya@gmail.com").unwrap());
        let p1 = store.product(&ProductId::new("p1")).cloned().unwrap();
        let p2 = store.product(&ProductId::new("p2")).cloned().unwrap();
        store.add(&p1);
        store.add(&p1);
        store.add(&p2);

        let order = checkout(&mut store).unwrap();
        assert_eq!(order.total_amount, Decimal::from(1600));
        assert_eq!(order.unit_count(), 3);
        assert_eq!(order.status, OrderStatus::Delivered);
        assert!(store.cart().is_empty());
        assert_eq!(store.orders().first().map(|o| &o.id), Some(&order.id));
    }

    #[test]
    fn test_list_requires_login() {
        let store = store_with(Vec::new());
        assert!(matches!(list(&store), Err(CommandError::LoginRequired)));
    }
}
