//! Product card: catalog tile and preview surface.

use std::cell::RefCell;

use storefront_core::ProductId;
use storefront_shop::catalog::Product;
use storefront_shop::event::{ShopBus, ShopEvent};

use crate::view::View;

/// Price label shown on cards and panels.
pub fn format_price(price: Option<u64>) -> String {
    match price {
        Some(value) => format!("{value} synapses"),
        None => "Priceless".into(),
    }
}

#[derive(Debug, Default)]
struct CardState {
    id: Option<ProductId>,
    title: String,
    description: String,
    category_label: String,
    price_label: String,
    in_basket: bool,
}

/// Partial snapshot of a card's display fields.
#[derive(Debug, Clone, Default)]
pub struct CardSnapshot {
    pub product: Option<Product>,
    pub in_basket: Option<bool>,
}

#[derive(Debug)]
pub struct ProductCardView {
    bus: ShopBus,
    state: RefCell<CardState>,
}

impl ProductCardView {
    pub fn new(bus: ShopBus) -> Self {
        Self {
            bus,
            state: RefCell::new(CardState::default()),
        }
    }

    /// Card clicked: ask for the preview of this product.
    pub fn select(&self) {
        let id = self.state.borrow().id;
        if let Some(id) = id {
            self.bus.emit(ShopEvent::ProductSelect(id));
        }
    }

    /// Basket button clicked: add or remove depending on the current flag.
    pub fn toggle_basket(&self) {
        let (id, in_basket) = {
            let state = self.state.borrow();
            (state.id, state.in_basket)
        };
        let Some(id) = id else { return };
        if in_basket {
            self.bus.emit(ShopEvent::ProductRemove(id));
        } else {
            self.bus.emit(ShopEvent::ProductAdd(id));
        }
        self.state.borrow_mut().in_basket = !in_basket;
    }

    pub fn id(&self) -> Option<ProductId> {
        self.state.borrow().id
    }

    pub fn title(&self) -> String {
        self.state.borrow().title.clone()
    }

    pub fn description(&self) -> String {
        self.state.borrow().description.clone()
    }

    pub fn price_label(&self) -> String {
        self.state.borrow().price_label.clone()
    }

    pub fn category_label(&self) -> String {
        self.state.borrow().category_label.clone()
    }

    pub fn in_basket(&self) -> bool {
        self.state.borrow().in_basket
    }

    pub fn button_label(&self) -> &'static str {
        if self.in_basket() {
            "Remove from basket"
        } else {
            "Add to basket"
        }
    }
}

impl View for ProductCardView {
    type Snapshot = CardSnapshot;

    fn update(&self, snapshot: &CardSnapshot) {
        let mut state = self.state.borrow_mut();
        if let Some(product) = &snapshot.product {
            state.id = Some(product.id);
            state.title = product.title.clone();
            state.description = product.description.clone();
            state.category_label = product.category.label().into();
            state.price_label = format_price(product.price);
        }
        if let Some(in_basket) = snapshot.in_basket {
            state.in_basket = in_basket;
        }
    }
}
