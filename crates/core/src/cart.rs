//! Shopping cart state.
//!
//! A [`Cart`] is an immutable value: every transition builds a new cart and
//! leaves the old one untouched. [`CartStore`] holds the current cart behind
//! an [`Arc`] and swaps it on change, so holders of an earlier snapshot can
//! detect a change with [`Arc::ptr_eq`] or by comparing [`CartStore::revision`].
//!
//! # Invariants
//!
//! - Every line item has a quantity of at least 1.
//! - No two line items share a product id; adding an existing product merges
//!   into its line item instead of appending a duplicate.
//! - Items keep the order in which their products were first added.
//!
//! Operations never fail. Input that would break an invariant (a zero
//! quantity, an unknown product id) leaves the cart unchanged.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductId};

/// A product paired with the quantity being bought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product: Product,
    pub quantity: u32,
}

impl LineItem {
    #[must_use]
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Price of a single unit, honouring any active sale.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.product.effective_price()
    }

    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }
}

/// A line item as found in a saved cart.
///
/// Saved carts may come from older clients that never guarded the quantity,
/// so it is read as a signed integer and clamped when building the cart.
#[derive(Deserialize)]
struct SavedLineItem {
    product: Product,
    quantity: i64,
}

impl SavedLineItem {
    /// `None` for quantities below 1; values past `u32::MAX` are clamped.
    fn into_line_item(self) -> Option<LineItem> {
        if self.quantity < 1 {
            return None;
        }
        Some(LineItem {
            product: self.product,
            quantity: u32::try_from(self.quantity).unwrap_or(u32::MAX),
        })
    }
}

/// A user action against the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    Add { product: Product, quantity: u32 },
    Remove { product_id: ProductId },
    UpdateQuantity { product_id: ProductId, quantity: u32 },
    Clear,
}

/// An ordered set of line items, unique by product id.
///
/// Serializes as a plain JSON array of `{product, quantity}` objects.
/// Deserialization normalizes its input (see [`Cart::from_items`]) and drops
/// line items whose quantity is below 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<SavedLineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from arbitrary line items, restoring the invariants.
    ///
    /// Items with a zero quantity are dropped. Repeated product ids are merged
    /// into the first occurrence with their quantities summed.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut merged: Vec<LineItem> = Vec::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            match merged
                .iter_mut()
                .find(|existing| existing.product_id() == item.product_id())
            {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => merged.push(item),
            }
        }
        Self { items: merged }
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product_id() == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Sum of every line total.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Sum of every quantity.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Apply an action, returning the new cart or `None` if nothing changed.
    #[must_use]
    pub fn apply(&self, action: &CartAction) -> Option<Self> {
        match action {
            CartAction::Add { product, quantity } => self.with_added(product, *quantity),
            CartAction::Remove { product_id } => self.without(*product_id),
            CartAction::UpdateQuantity {
                product_id,
                quantity,
            } => self.with_quantity(*product_id, *quantity),
            CartAction::Clear => (!self.is_empty()).then(Self::new),
        }
    }

    fn with_added(&self, product: &Product, quantity: u32) -> Option<Self> {
        if quantity == 0 {
            return None;
        }

        let mut items = self.items.clone();
        match items.iter_mut().find(|item| item.product_id() == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => items.push(LineItem {
                product: product.clone(),
                quantity,
            }),
        }
        Some(Self { items })
    }

    fn without(&self, product_id: ProductId) -> Option<Self> {
        self.get(product_id)?;
        let items = self
            .items
            .iter()
            .filter(|item| item.product_id() != product_id)
            .cloned()
            .collect();
        Some(Self { items })
    }

    fn with_quantity(&self, product_id: ProductId, quantity: u32) -> Option<Self> {
        if quantity == 0 {
            return None;
        }
        let current = self.get(product_id)?;
        if current.quantity == quantity {
            return None;
        }

        let items = self
            .items
            .iter()
            .map(|item| {
                if item.product_id() == product_id {
                    LineItem {
                        product: item.product.clone(),
                        quantity,
                    }
                } else {
                    item.clone()
                }
            })
            .collect();
        Some(Self { items })
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(items: Vec<LineItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<Vec<SavedLineItem>> for Cart {
    fn from(items: Vec<SavedLineItem>) -> Self {
        Self::from_items(items.into_iter().filter_map(SavedLineItem::into_line_item))
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

/// Holder of the current cart.
///
/// Each state-changing operation replaces the shared [`Cart`] and bumps the
/// revision. Operations return `true` when the cart changed.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    cart: Arc<Cart>,
    revision: u64,
}

impl CartStore {
    /// Create a store holding an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `cart`.
    #[must_use]
    pub fn with_cart(cart: Cart) -> Self {
        Self {
            cart: Arc::new(cart),
            revision: 0,
        }
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Shared handle to the current cart.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Cart> {
        Arc::clone(&self.cart)
    }

    /// Number of changes applied since the store was created.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply `action`, replacing the cart if it changed.
    pub fn dispatch(&mut self, action: &CartAction) -> bool {
        match self.cart.apply(action) {
            Some(next) => {
                self.set(next);
                true
            }
            None => false,
        }
    }

    /// Replace the cart wholesale. Always counts as a change.
    pub fn replace(&mut self, cart: Cart) {
        self.set(cart);
    }

    /// Add `quantity` units of `product`, merging with an existing line item.
    pub fn add_to_cart(&mut self, product: &Product, quantity: u32) -> bool {
        self.dispatch(&CartAction::Add {
            product: product.clone(),
            quantity,
        })
    }

    /// Remove the line item for `product_id`, if any.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> bool {
        self.dispatch(&CartAction::Remove { product_id })
    }

    /// Set the quantity of an existing line item. Zero is ignored.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u32) -> bool {
        self.dispatch(&CartAction::UpdateQuantity {
            product_id,
            quantity,
        })
    }

    pub fn clear_cart(&mut self) -> bool {
        self.dispatch(&CartAction::Clear)
    }

    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.cart.total()
    }

    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        self.cart.item_count()
    }

    fn set(&mut self, cart: Cart) {
        self.cart = Arc::new(cart);
        self.revision += 1;
    }
}
