//! Client-side shopping bag.
//!
//! The cart is a local collaborator: it holds pieces the user has picked up
//! during this browsing session and is consumed by the checkout form. It is
//! cheap to clone (shared interior) so UI layers and the intent replay engine
//! can hold the same bag.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::models::Product;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

#[derive(Clone, Default)]
pub struct Cart {
    items: Arc<Mutex<Vec<CartItem>>>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a piece to the bag. Quantity is capped at the piece's
    /// stock; most catalog pieces are one-offs, so adding twice is a no-op,
    /// and a sold-out piece is never added at all.
    pub fn add(&self, product: Product) {
        let mut items = self.items.lock().expect("cart lock poisoned");
        if let Some(item) = items.iter_mut().find(|i| i.product.id == product.id) {
            if item.quantity < item.product.stock {
                item.quantity += 1;
            }
        } else if product.stock > 0 {
            items.push(CartItem {
                product,
                quantity: 1,
            });
        }
    }

    pub fn remove(&self, product_id: &str) {
        self.items
            .lock()
            .expect("cart lock poisoned")
            .retain(|i| i.product.id != product_id);
    }

    /// Set the quantity for a piece already in the bag, clamped to
    /// `1..=stock`. Unknown ids are ignored.
    pub fn update_quantity(&self, product_id: &str, quantity: u32) {
        let mut items = self.items.lock().expect("cart lock poisoned");
        if let Some(item) = items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity.clamp(1, item.product.stock.max(1));
        }
    }

    pub fn items(&self) -> Vec<CartItem> {
        self.items.lock().expect("cart lock poisoned").clone()
    }

    /// Total number of units across all pieces.
    pub fn item_count(&self) -> u32 {
        self.items
            .lock()
            .expect("cart lock poisoned")
            .iter()
            .map(|i| i.quantity)
            .sum()
    }

    /// Bag total in whole currency units.
    pub fn total(&self) -> u64 {
        self.items
            .lock()
            .expect("cart lock poisoned")
            .iter()
            .map(|i| i.product.price * u64::from(i.quantity))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().expect("cart lock poisoned").is_empty()
    }

    pub fn clear(&self) {
        self.items.lock().expect("cart lock poisoned").clear();
    }
}
