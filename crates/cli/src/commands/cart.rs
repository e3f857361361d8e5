//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! fitkart cart add p1
//! fitkart cart qty p1 -1
//! fitkart cart remove p1
//! fitkart cart show
//! fitkart cart clear
//! ```

use fitkart_core::{Bill, Price, ProductId};
use fitkart_storefront::Store;
use fitkart_storefront::storage::KeyValueStore;
use tracing::info;

use super::{CommandError, find_product};

/// Print the cart and its bill.
pub fn show<S: KeyValueStore>(store: &Store<S>) {
    let cart = store.cart();
    if cart.is_empty() {
        info!("Your cart is empty");
        return;
    }

    info!("My Cart ({} items)", cart.total_quantity());
    for item in cart.items() {
        info!(
            "  {:<8} {} x{} = {}",
            item.product.id.as_str(),
            item.product.name,
            item.quantity,
            Price::inr(item.line_total()),
        );
    }
    log_bill(&store.bill());
}

/// Log the bill breakdown.
pub(crate) fn log_bill(bill: &Bill) {
    info!("Bill details:");
    info!("  Item total:    {}", Price::inr(bill.item_total));
    if bill.free_delivery() {
        info!("  Delivery fee:  FREE");
    } else {
        info!("  Delivery fee:  {}", Price::inr(bill.delivery_fee));
    }
    info!("  Platform fee:  {}", Price::inr(bill.platform_fee));
    info!("  GST (18%):     {}", Price::inr(bill.gst));
    info!("  To pay:        {}", Price::inr(bill.total));
}

/// Add one unit of a catalog product.
///
/// # Errors
///
/// Returns `CommandError::ProductNotFound` if the id is not in the catalog.
pub fn add<S: KeyValueStore>(store: &mut Store<S>, id: &ProductId) -> Result<(), CommandError> {
    let product = find_product(store, id)?.clone();
    store.add(&product);
    info!(
        "Added {} to cart (quantity {})",
        product.name,
        store.cart_quantity(id)
    );
    Ok(())
}

/// Remove a product from the cart.
pub fn remove<S: KeyValueStore>(store: &mut Store<S>, id: &ProductId) {
    let had = store.cart_quantity(id) > 0;
    store.remove(id);
    if had {
        info!("Removed {id} from cart");
    } else {
        info!("{id} is not in your cart");
    }
}

/// Change a line's quantity by `delta`.
pub fn change_quantity<S: KeyValueStore>(store: &mut Store<S>, id: &ProductId, delta: i64) {
    store.change_quantity(id, delta);
    match store.cart_quantity(id) {
        0 => info!("{id} is no longer in your cart"),
        quantity => info!("{id} quantity is now {quantity}"),
    }
}

/// Empty the cart.
pub fn clear<S: KeyValueStore>(store: &mut Store<S>) {
    store.clear_cart();
    info!("Cart cleared");
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{product, store_with};
    use super::*;

    #[test]
    fn test_add_requires_catalog_product() {
        let mut store = store_with(vec![product("p1", 100, 100)]);

        assert!(matches!(
            add(&mut store, &ProductId::new("ghost")),
            Err(CommandError::ProductNotFound(_))
        ));
        assert!(store.cart().is_empty());

        assert!(add(&mut store, &ProductId::new("p1")).is_ok());
        assert_eq!(store.cart_quantity(&ProductId::new("p1")), 1);
    }

    #[test]
    fn test_remove_after_catalog_delete() {
        let mut store = store_with(vec![product("p1", 100, 100)]);
        let id = ProductId::new("p1");
        assert!(add(&mut store, &id).is_ok());
        store.delete_product(&id);

        remove(&mut store, &id);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_change_quantity_to_zero() {
        let mut store = store_with(vec![product("p1", 100, 100)]);
        let id = ProductId::new("p1");
        assert!(add(&mut store, &id).is_ok());

        change_quantity(&mut store, &id, 2);
        assert_eq!(store.cart_quantity(&id), 3);
        change_quantity(&mut store, &id, -3);
        assert!(store.cart().is_empty());
    }
}
