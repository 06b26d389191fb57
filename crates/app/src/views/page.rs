//! Main page: the catalog gallery and the basket button.

use std::cell::RefCell;

use storefront_shop::event::{ShopBus, ShopEvent};

use crate::view::View;

#[derive(Debug, Default)]
struct PageState {
    catalog: Vec<String>,
    basket_counter: String,
}

/// Partial snapshot of the main page's display fields.
#[derive(Debug, Clone, Default)]
pub struct PageSnapshot {
    /// Card labels for the gallery.
    pub catalog: Option<Vec<String>>,
    /// Item count for the basket button badge.
    pub basket_count: Option<usize>,
}

#[derive(Debug)]
pub struct PageView {
    bus: ShopBus,
    state: RefCell<PageState>,
}

impl PageView {
    pub fn new(bus: ShopBus) -> Self {
        Self {
            bus,
            state: RefCell::new(PageState {
                catalog: Vec::new(),
                basket_counter: "0".into(),
            }),
        }
    }

    /// Basket button clicked.
    pub fn open_basket(&self) {
        self.bus.emit(ShopEvent::BasketOpen);
    }

    pub fn catalog(&self) -> Vec<String> {
        self.state.borrow().catalog.clone()
    }

    pub fn basket_counter(&self) -> String {
        self.state.borrow().basket_counter.clone()
    }
}

impl View for PageView {
    type Snapshot = PageSnapshot;

    fn update(&self, snapshot: &PageSnapshot) {
        let mut state = self.state.borrow_mut();
        if let Some(catalog) = &snapshot.catalog {
            state.catalog = catalog.clone();
        }
        if let Some(count) = snapshot.basket_count {
            state.basket_counter = count.to_string();
        }
    }
}
