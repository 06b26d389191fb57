//! Basket panel: the indexed item list with total and checkout button.

use std::cell::RefCell;

use storefront_core::ProductId;
use storefront_shop::event::{ShopBus, ShopEvent};

use crate::view::View;

/// One rendered basket row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketEntry {
    pub id: ProductId,
    pub title: String,
    pub price_label: String,
}

#[derive(Debug, Default)]
struct PanelState {
    entries: Vec<BasketEntry>,
    total_label: String,
    checkout_enabled: bool,
}

/// Partial snapshot of the panel's display fields.
#[derive(Debug, Clone, Default)]
pub struct BasketPanelSnapshot {
    pub entries: Option<Vec<BasketEntry>>,
    pub total: Option<u64>,
}

#[derive(Debug)]
pub struct BasketPanelView {
    bus: ShopBus,
    state: RefCell<PanelState>,
}

impl BasketPanelView {
    pub fn new(bus: ShopBus) -> Self {
        Self {
            bus,
            state: RefCell::new(PanelState {
                entries: Vec::new(),
                total_label: "0".into(),
                checkout_enabled: false,
            }),
        }
    }

    /// Checkout button clicked. Ignored while the affordance is disabled.
    pub fn checkout(&self) {
        let enabled = self.state.borrow().checkout_enabled;
        if enabled {
            self.bus.emit(ShopEvent::BasketCheckout);
        }
    }

    /// Row delete button clicked.
    pub fn remove_entry(&self, id: ProductId) {
        self.bus.emit(ShopEvent::ProductRemove(id));
        self.bus.emit(ShopEvent::BasketQuantityChange);
    }

    pub fn entries(&self) -> Vec<BasketEntry> {
        self.state.borrow().entries.clone()
    }

    /// Rendered rows, numbered from 1.
    pub fn rows(&self) -> Vec<String> {
        self.state
            .borrow()
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("{}. {} - {}", i + 1, entry.title, entry.price_label))
            .collect()
    }

    pub fn total_label(&self) -> String {
        self.state.borrow().total_label.clone()
    }

    pub fn checkout_enabled(&self) -> bool {
        self.state.borrow().checkout_enabled
    }
}

impl View for BasketPanelView {
    type Snapshot = BasketPanelSnapshot;

    fn update(&self, snapshot: &BasketPanelSnapshot) {
        let mut state = self.state.borrow_mut();
        if let Some(entries) = &snapshot.entries {
            state.entries = entries.clone();
        }
        if let Some(total) = snapshot.total {
            state.total_label = total.to_string();
        }
        // An empty or all-priceless basket cannot be checked out.
        state.checkout_enabled = !state.entries.is_empty() && state.total_label != "0";
    }
}
