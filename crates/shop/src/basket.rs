//! Basket aggregate: the set of selected catalog items.

use serde::{Deserialize, Serialize};

use storefront_core::ProductId;

use crate::catalog::Product;
use crate::event::{ShopBus, ShopEvent};

/// One basket entry, owning a copy of its product.
///
/// At most one item exists per product id; the basket has no quantity notion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketItem {
    product: Product,
}

impl BasketItem {
    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Price of this item, treating "priceless" as 0.
    pub fn price(&self) -> u64 {
        self.product.price.unwrap_or(0)
    }
}

/// Derived basket snapshot, the `basket:changed` payload.
///
/// Recomputed on demand, never stored independently of the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketState {
    /// Product ids in insertion order.
    pub items: Vec<ProductId>,
    pub total: u64,
}

/// Aggregate root: the basket.
///
/// All mutation goes through [`add`](Basket::add), [`remove`](Basket::remove)
/// and [`clear`](Basket::clear); each call terminates in exactly one
/// `basket:changed` emission — never zero, never more than one — so
/// subscribers can treat the basket as always-consistent after each call
/// returns. Calls that leave the sequence unchanged (duplicate add, absent
/// remove) still notify.
#[derive(Debug)]
pub struct Basket {
    items: Vec<BasketItem>,
    bus: ShopBus,
}

impl Basket {
    pub fn new(bus: ShopBus) -> Self {
        Self {
            items: Vec::new(),
            bus,
        }
    }

    /// Add `product` unless an item with its id is already present.
    pub fn add(&mut self, product: Product) {
        if !self.contains(product.id) {
            tracing::debug!(product = %product.id, "basket add");
            self.items.push(BasketItem { product });
        }
        self.notify();
    }

    /// Remove the item with `product_id`, if present.
    pub fn remove(&mut self, product_id: ProductId) {
        self.items.retain(|item| item.id() != product_id);
        self.notify();
    }

    /// Drop every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.notify();
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|item| item.id() == product_id)
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of item prices, "priceless" counting 0.
    pub fn total(&self) -> u64 {
        self.items.iter().map(BasketItem::price).sum()
    }

    /// Defensive copy of the current item sequence.
    pub fn items(&self) -> Vec<BasketItem> {
        self.items.clone()
    }

    /// Ids of items with a positive price, in insertion order.
    ///
    /// Checkout snapshots exactly these into the order draft; priceless
    /// items never reach a submission.
    pub fn payable_items(&self) -> Vec<ProductId> {
        self.items
            .iter()
            .filter(|item| item.price() > 0)
            .map(BasketItem::id)
            .collect()
    }

    /// Current derived snapshot.
    pub fn state(&self) -> BasketState {
        BasketState {
            items: self.items.iter().map(BasketItem::id).collect(),
            total: self.total(),
        }
    }

    fn notify(&self) {
        self.bus.emit(ShopEvent::BasketChanged(self.state()));
    }
}
