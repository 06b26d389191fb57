//! Success panel shown after an accepted order.

use std::cell::RefCell;

use storefront_shop::event::{ShopBus, ShopEvent};

use crate::view::View;

#[derive(Debug, Clone, Default)]
pub struct SuccessSnapshot {
    /// Amount charged, from the order result.
    pub total: Option<u64>,
}

#[derive(Debug)]
pub struct SuccessView {
    bus: ShopBus,
    description: RefCell<String>,
}

impl SuccessView {
    pub fn new(bus: ShopBus) -> Self {
        Self {
            bus,
            description: RefCell::new(String::new()),
        }
    }

    /// Close button clicked.
    pub fn dismiss(&self) {
        self.bus.emit(ShopEvent::SuccessSubmit);
    }

    pub fn description(&self) -> String {
        self.description.borrow().clone()
    }
}

impl View for SuccessView {
    type Snapshot = SuccessSnapshot;

    fn update(&self, snapshot: &SuccessSnapshot) {
        if let Some(total) = snapshot.total {
            *self.description.borrow_mut() = format!("Charged {total} synapses");
        }
    }
}
