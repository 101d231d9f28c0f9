//! Cart
//!
//! The in-progress, per-session product selection. A cart is owned by one
//! session and passed explicitly; it has no persistence of its own and is
//! converted into a quote when finalised.

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    money::round_currency,
    pricing::LineEntry,
    products::{Product, ProductUuid},
};

/// A product selection in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    product: Product,
    quantity: u32,
    variant: Option<String>,
    added_at: Timestamp,
}

impl CartItem {
    /// Product snapshot for this entry.
    #[must_use]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Units selected, always at least one.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Selected variant name, if any.
    #[must_use]
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// When the entry was first added.
    #[must_use]
    pub fn added_at(&self) -> Timestamp {
        self.added_at
    }

    /// Effective unit price × quantity, unrounded.
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.product
            .effective_price()
            .saturating_mul(Decimal::from(self.quantity))
    }

    fn is_product(&self, product: ProductUuid) -> bool {
        self.product.uuid == product
    }

    fn is_exact(&self, product: ProductUuid, variant: Option<&str>) -> bool {
        self.is_product(product) && self.variant.as_deref() == variant
    }
}

/// Derived view over a cart, computed on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary<'a> {
    /// Items in insertion order.
    pub items: &'a [CartItem],

    /// Sum of quantities.
    pub total_items: u64,

    /// Sum of effective price × quantity.
    pub total_value: Decimal,
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of a product, merging with an existing entry of
    /// the same product and variant.
    ///
    /// Adding zero units is a no-op.
    pub fn add(&mut self, product: Product, quantity: u32, variant: Option<String>) {
        if quantity == 0 {
            return;
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.is_exact(product.uuid, variant.as_deref()))
        {
            item.quantity = item.quantity.saturating_add(quantity);
            return;
        }

        self.items.push(CartItem {
            product,
            quantity,
            variant,
            added_at: Timestamp::now(),
        });
    }

    /// Remove the entry for exactly this product and variant. `None` matches
    /// only the entry without a variant.
    pub fn remove_exact(&mut self, product: ProductUuid, variant: Option<&str>) {
        self.items.retain(|item| !item.is_exact(product, variant));
    }

    /// Remove every entry of a product, whatever its variant.
    pub fn remove_all(&mut self, product: ProductUuid) {
        self.items.retain(|item| !item.is_product(product));
    }

    /// Overwrite the quantity of exactly this product and variant. Zero
    /// removes the entry.
    pub fn set_quantity_exact(&mut self, product: ProductUuid, variant: Option<&str>, quantity: u32) {
        if quantity == 0 {
            self.remove_exact(product, variant);
            return;
        }

        self.items
            .iter_mut()
            .filter(|item| item.is_exact(product, variant))
            .for_each(|item| item.quantity = quantity);
    }

    /// Overwrite the quantity of every entry of a product. Zero removes them
    /// all.
    pub fn set_quantity_all(&mut self, product: ProductUuid, quantity: u32) {
        if quantity == 0 {
            self.remove_all(product);
            return;
        }

        self.items
            .iter_mut()
            .filter(|item| item.is_product(product))
            .for_each(|item| item.quantity = quantity);
    }

    /// Replace the stored snapshot of a product after a catalog change.
    pub fn sync_product(&mut self, product: &Product) {
        self.items
            .iter_mut()
            .filter(|item| item.is_product(product.uuid))
            .for_each(|item| item.product = product.clone());
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Summarise the cart from the current product snapshots.
    #[must_use]
    pub fn summary(&self) -> CartSummary<'_> {
        let total_items = self
            .items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum();

        let total_value = self
            .items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.value()));

        CartSummary {
            items: &self.items,
            total_items,
            total_value: round_currency(total_value),
        }
    }

    /// Whether any entry of the product is in the cart.
    #[must_use]
    pub fn is_in_cart(&self, product: ProductUuid) -> bool {
        self.items.iter().any(|item| item.is_product(product))
    }

    /// Whether exactly this product and variant is in the cart.
    #[must_use]
    pub fn is_in_cart_exact(&self, product: ProductUuid, variant: Option<&str>) -> bool {
        self.items.iter().any(|item| item.is_exact(product, variant))
    }

    /// Units of a product across all its variants.
    #[must_use]
    pub fn item_quantity(&self, product: ProductUuid) -> u64 {
        self.items
            .iter()
            .filter(|item| item.is_product(product))
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// Units of exactly this product and variant.
    #[must_use]
    pub fn item_quantity_exact(&self, product: ProductUuid, variant: Option<&str>) -> u32 {
        self.items
            .iter()
            .find(|item| item.is_exact(product, variant))
            .map_or(0, CartItem::quantity)
    }

    /// Pricing entries for the current selection, in cart order.
    #[must_use]
    pub fn entries(&self) -> Vec<LineEntry> {
        self.items
            .iter()
            .map(|item| LineEntry::from_product(&item.product, item.quantity))
            .collect()
    }

    /// Iterate over the items in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn product(price: Decimal) -> Product {
        Product::new(ProductUuid::new(), "Smartwatch", price)
    }

    #[test]
    fn adding_same_identity_merges_quantities() {
        let mut cart = Cart::new();
        let watch = product(dec!(100));

        for variant in [None, Some("Black")] {
            cart.add(watch.clone(), 2, variant.map(str::to_string));
            cart.add(watch.clone(), 3, variant.map(str::to_string));

            assert_eq!(cart.item_quantity_exact(watch.uuid, variant), 5);
        }

        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn different_variants_are_separate_entries() {
        let mut cart = Cart::new();
        let watch = product(dec!(100));

        cart.add(watch.clone(), 1, Some("Black".to_string()));
        cart.add(watch.clone(), 2, Some("Silver".to_string()));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_quantity(watch.uuid), 3);
        assert!(cart.is_in_cart_exact(watch.uuid, Some("Silver")));
        assert!(!cart.is_in_cart_exact(watch.uuid, None));
    }

    #[test]
    fn adding_zero_units_is_ignored() {
        let mut cart = Cart::new();

        cart.add(product(dec!(1)), 0, None);

        assert!(cart.is_empty());
    }

    #[test]
    fn zero_quantity_is_equivalent_to_removal() {
        let watch = product(dec!(100));

        let mut by_quantity = Cart::new();
        by_quantity.add(watch.clone(), 2, None);

        let mut by_removal = by_quantity.clone();

        by_quantity.set_quantity_all(watch.uuid, 0);
        by_removal.remove_all(watch.uuid);

        assert!(!by_quantity.is_in_cart(watch.uuid));
        assert_eq!(by_quantity, by_removal);
    }

    #[test]
    fn remove_all_sweeps_every_variant() {
        let mut cart = Cart::new();
        let watch = product(dec!(100));
        let other = product(dec!(5));

        cart.add(watch.clone(), 1, Some("Black".to_string()));
        cart.add(watch.clone(), 1, Some("Silver".to_string()));
        cart.add(watch.clone(), 1, None);
        cart.add(other.clone(), 1, None);

        cart.remove_all(watch.uuid);

        assert!(!cart.is_in_cart(watch.uuid));
        assert!(cart.is_in_cart(other.uuid));
    }

    #[test]
    fn remove_exact_only_touches_matching_variant() {
        let mut cart = Cart::new();
        let watch = product(dec!(100));

        cart.add(watch.clone(), 1, Some("Black".to_string()));
        cart.add(watch.clone(), 1, None);

        cart.remove_exact(watch.uuid, None);

        assert!(cart.is_in_cart_exact(watch.uuid, Some("Black")));
        assert!(!cart.is_in_cart_exact(watch.uuid, None));
    }

    #[test]
    fn set_quantity_exact_overwrites_one_entry() {
        let mut cart = Cart::new();
        let watch = product(dec!(100));

        cart.add(watch.clone(), 1, Some("Black".to_string()));
        cart.add(watch.clone(), 1, Some("Silver".to_string()));

        cart.set_quantity_exact(watch.uuid, Some("Black"), 4);

        assert_eq!(cart.item_quantity_exact(watch.uuid, Some("Black")), 4);
        assert_eq!(cart.item_quantity_exact(watch.uuid, Some("Silver")), 1);

        cart.set_quantity_exact(watch.uuid, Some("Black"), 0);

        assert!(!cart.is_in_cart_exact(watch.uuid, Some("Black")));
        assert!(cart.is_in_cart(watch.uuid));
    }

    #[test]
    fn set_quantity_all_overwrites_every_variant() {
        let mut cart = Cart::new();
        let watch = product(dec!(100));

        cart.add(watch.clone(), 1, Some("Black".to_string()));
        cart.add(watch.clone(), 5, Some("Silver".to_string()));

        cart.set_quantity_all(watch.uuid, 2);

        assert_eq!(cart.item_quantity(watch.uuid), 4);
    }

    #[test]
    fn summary_recomputes_from_current_prices() {
        let mut cart = Cart::new();
        let mut watch = product(dec!(100));

        cart.add(watch.clone(), 2, None);

        assert_eq!(cart.summary().total_value, dec!(200));

        watch.promotional_price = Some(dec!(80));
        cart.sync_product(&watch);

        let summary = cart.summary();

        assert_eq!(summary.total_value, dec!(160));
        assert_eq!(summary.total_items, 2);
        assert_eq!(summary.items.len(), 1);
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut cart = Cart::new();

        cart.add(product(dec!(1)), 1, None);
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.summary().total_items, 0);
        assert_eq!(cart.summary().total_value, Decimal::ZERO);
    }

    #[test]
    fn entries_follow_cart_order_and_prices() {
        let mut cart = Cart::new();
        let first = product(dec!(10));
        let second = product(dec!(20));

        cart.add(first.clone(), 1, None);
        cart.add(second.clone(), 3, None);

        let entries = cart.entries();

        assert_eq!(
            entries
                .iter()
                .map(|entry| (entry.product_uuid, entry.quantity, entry.unit_price()))
                .collect::<Vec<_>>(),
            vec![(first.uuid, 1, dec!(10)), (second.uuid, 3, dec!(20))]
        );
    }
}
