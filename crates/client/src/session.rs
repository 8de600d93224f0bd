//! Cart session: a [`CartStore`] kept in sync with a [`KeyValueStore`].
//!
//! # Lifecycle
//!
//! 1. [`CartSession::new`] creates an un-hydrated session. Storage writes are
//!    disabled so the initial empty cart can never overwrite a saved one.
//! 2. [`CartSession::hydrate`] loads the snapshot under [`CART_STORAGE_KEY`]
//!    and enables writes. It runs at most once.
//! 3. Every cart change after hydration writes the full cart back.
//!
//! Storage and decoding problems are logged and absorbed: the worst outcome
//! for the shopper is an empty cart, never an error.

use std::sync::Arc;

use blogbox_core::{Cart, CartAction, CartStore, KeyValueStore, Product, ProductId};
use rust_decimal::Decimal;
use tracing::{debug, error, warn};

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "cart";

/// What [`CartSession::hydrate`] found in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydration {
    /// A saved cart was loaded.
    Restored { items: usize },
    /// Nothing was saved; the session keeps its in-memory cart.
    Fresh,
    /// A saved cart existed but could not be read; the session starts empty.
    Discarded,
    /// The session had already been hydrated; nothing happened.
    AlreadyHydrated,
}

/// A cart bound to a storage backend.
#[derive(Debug)]
pub struct CartSession<S> {
    store: CartStore,
    storage: S,
    hydrated: bool,
}

impl<S: KeyValueStore> CartSession<S> {
    /// Create a session with an empty cart and persistence disabled.
    pub fn new(storage: S) -> Self {
        Self {
            store: CartStore::new(),
            storage,
            hydrated: false,
        }
    }

    /// Create a session and immediately hydrate it from `storage`.
    pub fn open(storage: S) -> Self {
        let mut session = Self::new(storage);
        session.hydrate();
        session
    }

    /// Load the saved cart and enable persistence.
    ///
    /// A valid snapshot replaces the in-memory cart. Without a snapshot the
    /// in-memory cart is kept (and saved, if it is not empty). An unreadable
    /// snapshot is logged and replaced by an empty cart on the next write.
    pub fn hydrate(&mut self) -> Hydration {
        if self.hydrated {
            debug!("Cart session already hydrated");
            return Hydration::AlreadyHydrated;
        }
        self.hydrated = true;

        let raw = match self.storage.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No saved cart found");
                if !self.store.cart().is_empty() {
                    self.persist();
                }
                return Hydration::Fresh;
            }
            Err(e) => {
                error!(error = %e, "Error loading cart from storage");
                self.store.replace(Cart::new());
                return Hydration::Discarded;
            }
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => {
                let items = cart.len();
                debug!(items, "Loaded cart from storage");
                self.store.replace(cart);
                Hydration::Restored { items }
            }
            Err(e) => {
                warn!(error = %e, "Saved cart is not valid JSON, starting with an empty cart");
                self.store.replace(Cart::new());
                Hydration::Discarded
            }
        }
    }

    #[must_use]
    pub const fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        self.store.cart()
    }

    /// Shared handle to the current cart, for change detection.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Cart> {
        self.store.snapshot()
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Apply `action` and persist the cart if it changed.
    pub fn dispatch(&mut self, action: &CartAction) -> bool {
        let changed = self.store.dispatch(action);
        if changed {
            debug!(?action, revision = self.store.revision(), "Cart updated");
            self.persist();
        } else {
            debug!(?action, "Cart action had no effect");
        }
        changed
    }

    pub fn add_to_cart(&mut self, product: &Product, quantity: u32) -> bool {
        self.dispatch(&CartAction::Add {
            product: product.clone(),
            quantity,
        })
    }

    pub fn remove_from_cart(&mut self, product_id: ProductId) -> bool {
        self.dispatch(&CartAction::Remove { product_id })
    }

    /// Set a line item's quantity. Quantities below 1 are ignored.
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
        self.store.cart_total()
    }

    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        self.store.cart_item_count()
    }

    fn persist(&mut self) {
        if !self.hydrated {
            debug!("Skipping cart save before hydration");
            return;
        }

        let serialized = match serde_json::to_string(self.store.cart()) {
            Ok(serialized) => serialized,
            Err(e) => {
                error!(error = %e, "Error serializing cart");
                return;
            }
        };

        match self.storage.set(CART_STORAGE_KEY, &serialized) {
            Ok(()) => debug!(bytes = serialized.len(), "Saved cart to storage"),
            Err(e) => error!(error = %e, "Error saving cart to storage"),
        }
    }
}
