//! `storefront-shop` — the storefront domain layer.
//!
//! Everything here communicates through the event bus: views publish user
//! intents, the aggregates ([`Basket`], [`OrderDraft`]) mutate their state and
//! publish derived snapshots, and no component holds a reference to another.
//!
//! The event vocabulary lives in [`event`]: a tagged union with one payload
//! type per event, dispatched under a closed [`event::Topic`] enum whose
//! string form reproduces the storefront's public event-name seam verbatim.

pub mod basket;
pub mod catalog;
pub mod event;
pub mod order;
pub mod validation;

pub use basket::{Basket, BasketItem, BasketState};
pub use catalog::{CatalogSnapshot, CatalogStore, Category, Product};
pub use event::{AddressFormData, ContactsFormData, ShopBus, ShopEvent, Topic};
pub use order::{
    CheckoutStage, OrderDraft, OrderResult, OrderStatus, OrderSubmission, PaymentMethod,
};
pub use validation::{Field, ValidationErrors, ValidationRule, ValidationRules, Validator};
