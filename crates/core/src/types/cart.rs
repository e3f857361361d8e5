//! Shopping cart: an ordered list of products with quantities.
//!
//! The cart holds at most one line per product id and never holds a line with
//! quantity zero. Every operation is total: unknown ids are ignored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bill::Bill;
use super::id::ProductId;
use super::product::Product;

/// A product in the cart together with its quantity.
///
/// Serialized flat (the product's fields plus `quantity`), so a cart line is
/// a product record with one extra field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// Price times quantity, saturating at the `Decimal` range.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Sum of line totals, saturating at the `Decimal` range.
    #[must_use]
    pub fn total_of(items: &[Self]) -> Decimal {
        items
            .iter()
            .map(Self::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}

/// The shopper's in-progress selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the line for a product.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.product.id == product_id)
    }

    /// Quantity of a product in the cart, zero when absent.
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.get(product_id).map_or(0, |item| item.quantity)
    }

    /// Add one unit of a product.
    ///
    /// An existing line is incremented by one and keeps its stored product
    /// data; otherwise a new line with quantity 1 is appended.
    pub fn add(&mut self, product: &Product) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product.id == product.id)
        {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(CartItem {
                product: product.clone(),
                quantity: 1,
            });
        }
    }

    /// Remove the line for a product. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.product.id != product_id);
        self.items.len() != before
    }

    /// Adjust a line's quantity by `delta`, clamping at zero.
    ///
    /// A line whose quantity reaches zero is removed. Returns the new
    /// quantity, or `None` when the product is not in the cart.
    pub fn change_quantity(&mut self, product_id: &ProductId, delta: i64) -> Option<u32> {
        let item = self
            .items
            .iter_mut()
            .find(|item| &item.product.id == product_id)?;

        let next = i64::from(item.quantity)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX));
        let next = u32::try_from(next).unwrap_or(u32::MAX);
        if next == 0 {
            self.remove(product_id);
        } else {
            item.quantity = next;
        }
        Some(next)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn item_total(&self) -> Decimal {
        CartItem::total_of(&self.items)
    }

    /// Checkout bill for the current contents.
    #[must_use]
    pub fn bill(&self) -> Bill {
        Bill::for_items(self.item_total(), !self.is_empty())
    }

    /// Take the lines out, leaving the cart empty.
    pub fn take_items(&mut self) -> Vec<CartItem> {
        std::mem::take(&mut self.items)
    }
}

impl From<Vec<CartItem>> for Cart {
    /// Build a cart from persisted lines.
    ///
    /// Lines are kept as stored; zero quantities and duplicate ids in a
    /// hand-edited record are not repaired.
    fn from(items: Vec<CartItem>) -> Self {
        Self { items }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::product::fixtures::product;

    #[test]
    fn test_add_inserts_then_increments() {
        let mut cart = Cart::new();
        let whey = product("p1", 500, 600);

        for expected in 1..=5 {
            cart.add(&whey);
            assert_eq!(cart.quantity_of(&whey.id), expected);
        }
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&product("p2", 100, 100));
        cart.add(&product("p1", 100, 100));
        cart.add(&product("p2", 100, 100));

        let ids: Vec<_> = cart.items().iter().map(|i| i.product.id.as_str()).collect();
        assert_eq!(ids, ["p2", "p1"]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 100, 100));

        assert!(!cart.remove(&ProductId::new("nope")));
        assert_eq!(cart.len(), 1);
        assert!(cart.remove(&ProductId::new("p1")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_add_add_decrement() {
        let mut cart = Cart::new();
        let p1 = product("p1", 100, 100);
        cart.add(&p1);
        cart.add(&p1);

        assert_eq!(cart.change_quantity(&p1.id, -1), Some(1));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(&p1.id), 1);
    }

    #[test]
    fn test_change_quantity_to_zero_removes() {
        let mut cart = Cart::new();
        let p1 = product("p1", 100, 100);
        cart.add(&p1);

        assert_eq!(cart.change_quantity(&p1.id, -1), Some(0));
        assert!(cart.get(&p1.id).is_none());
    }

    #[test]
    fn test_change_quantity_clamps_below_zero() {
        let mut cart = Cart::new();
        let p1 = product("p1", 100, 100);
        cart.add(&p1);
        cart.add(&p1);

        assert_eq!(cart.change_quantity(&p1.id, -10), Some(0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_positive_delta() {
        let mut cart = Cart::new();
        let p1 = product("p1", 100, 100);
        cart.add(&p1);

        assert_eq!(cart.change_quantity(&p1.id, 4), Some(5));
    }

    #[test]
    fn test_change_quantity_extreme_deltas() {
        let mut cart = Cart::new();
        let p1 = product("p1", 100, 100);
        cart.add(&p1);

        assert_eq!(cart.change_quantity(&p1.id, i64::MAX), Some(u32::MAX));
        assert_eq!(cart.quantity_of(&p1.id), u32::MAX);
        assert_eq!(cart.change_quantity(&p1.id, i64::MAX), Some(u32::MAX));

        assert_eq!(cart.change_quantity(&p1.id, i64::MIN), Some(0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_unknown_id() {
        let mut cart = Cart::new();
        assert_eq!(cart.change_quantity(&ProductId::new("p1"), 3), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        let p1 = product("p1", 500, 600);
        let p2 = product("p2", 120, 150);
        cart.add(&p1);
        cart.add(&p1);
        cart.add(&p2);

        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.item_total(), Decimal::from(1120));
    }

    #[test]
    fn test_totals_saturate_at_decimal_max() {
        let mut cart = Cart::new();
        let mut huge = product("p1", 0, 0);
        huge.price = Decimal::MAX;
        huge.original_price = Decimal::MAX;
        cart.add(&huge);
        cart.add(&huge);
        cart.add(&product("p2", 100, 100));

        assert_eq!(cart.item_total(), Decimal::MAX);
        let bill = cart.bill();
        assert!(bill.free_delivery());
        assert_eq!(bill.total, Decimal::MAX);
    }

    #[test]
    fn test_take_items_empties_cart() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 100, 100));

        let items = cart.take_items();
        assert_eq!(items.len(), 1);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_serializes_as_flat_lines() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 500, 600));

        let value = serde_json::to_value(&cart).unwrap();
        let line = &value.as_array().unwrap()[0];
        assert_eq!(line["id"], "p1");
        assert_eq!(line["quantity"], 1);
        assert!(line["price"].is_number());

        let parsed: Cart = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, cart);
    }
}
