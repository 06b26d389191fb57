//! The application event vocabulary.
//!
//! One tagged union ([`ShopEvent`]) with a typed payload per event, dispatched
//! under a closed topic enum ([`Topic`]). The topic's string form is the
//! public seam between UI and core and must stay stable; subscribing to a
//! topic that does not exist is a compile error rather than a silent no-op.

use storefront_core::ProductId;
use storefront_events::{BusEvent, EventBus};

use crate::basket::BasketState;
use crate::catalog::Product;
use crate::order::{OrderResult, PaymentMethod};
use crate::validation::Field;

/// The bus every storefront component is wired to.
pub type ShopBus = EventBus<ShopEvent>;

/// Subscription keys, one per seam event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    BasketChanged,
    BasketOpen,
    BasketCheckout,
    BasketQuantityChange,
    ProductSelect,
    ProductAdd,
    ProductRemove,
    OrderChanged,
    OrderChangedForm,
    OrderChangedContacts,
    OrderChangedButton,
    OrderSubmit,
    ContactsSubmit,
    OrderCreated,
    OrderError,
    CatalogLoaded,
    CatalogError,
    SuccessSubmit,
}

impl Topic {
    /// Stable wire name of this event on the UI seam.
    pub const fn as_str(self) -> &'static str {
        match self {
            Topic::BasketChanged => "basket:changed",
            Topic::BasketOpen => "basket:open",
            Topic::BasketCheckout => "basket:checkout",
            Topic::BasketQuantityChange => "basket:quantity-change",
            Topic::ProductSelect => "product:select",
            Topic::ProductAdd => "product:add",
            Topic::ProductRemove => "product:remove",
            Topic::OrderChanged => "order:changed",
            Topic::OrderChangedForm => "order:changed-form",
            Topic::OrderChangedContacts => "order:changed-contacts",
            Topic::OrderChangedButton => "order:changed-button",
            Topic::OrderSubmit => "order:submit",
            Topic::ContactsSubmit => "contacts:submit",
            Topic::OrderCreated => "order:created",
            Topic::OrderError => "order:error",
            Topic::CatalogLoaded => "catalog:loaded",
            Topic::CatalogError => "catalog:error",
            Topic::SuccessSubmit => "success:submit",
        }
    }
}

impl core::fmt::Display for Topic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of `order:changed-form` / `order:submit` — the address step's
/// current values, reported whole on every input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressFormData {
    pub payment: Option<PaymentMethod>,
    pub address: String,
}

impl AddressFormData {
    /// Field/value pairs for rule evaluation, in form order.
    pub fn field_values(&self) -> Vec<(Field, String)> {
        vec![
            (
                Field::Payment,
                self.payment.map(|p| p.as_str().to_string()).unwrap_or_default(),
            ),
            (Field::Address, self.address.clone()),
        ]
    }
}

/// Payload of `order:changed-contacts` / `contacts:submit`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactsFormData {
    pub email: String,
    pub phone: String,
}

impl ContactsFormData {
    /// Field/value pairs for rule evaluation, in form order.
    pub fn field_values(&self) -> Vec<(Field, String)> {
        vec![
            (Field::Email, self.email.clone()),
            (Field::Phone, self.phone.clone()),
        ]
    }
}

/// Every event crossing the storefront bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopEvent {
    /// Derived basket snapshot after a mutating basket call.
    BasketChanged(BasketState),
    BasketOpen,
    BasketCheckout,
    BasketQuantityChange,
    ProductSelect(ProductId),
    ProductAdd(ProductId),
    ProductRemove(ProductId),
    /// One-line validation feedback; empty message means "currently valid".
    OrderChanged { message: String },
    OrderChangedForm(AddressFormData),
    OrderChangedContacts(ContactsFormData),
    OrderChangedButton { valid: bool },
    OrderSubmit(AddressFormData),
    ContactsSubmit(ContactsFormData),
    OrderCreated(OrderResult),
    OrderError { message: String },
    CatalogLoaded { items: Vec<Product> },
    CatalogError { message: String },
    SuccessSubmit,
}

impl BusEvent for ShopEvent {
    type Topic = Topic;

    fn topic(&self) -> Topic {
        match self {
            ShopEvent::BasketChanged(_) => Topic::BasketChanged,
            ShopEvent::BasketOpen => Topic::BasketOpen,
            ShopEvent::BasketCheckout => Topic::BasketCheckout,
            ShopEvent::BasketQuantityChange => Topic::BasketQuantityChange,
            ShopEvent::ProductSelect(_) => Topic::ProductSelect,
            ShopEvent::ProductAdd(_) => Topic::ProductAdd,
            ShopEvent::ProductRemove(_) => Topic::ProductRemove,
            ShopEvent::OrderChanged { .. } => Topic::OrderChanged,
            ShopEvent::OrderChangedForm(_) => Topic::OrderChangedForm,
            ShopEvent::OrderChangedContacts(_) => Topic::OrderChangedContacts,
            ShopEvent::OrderChangedButton { .. } => Topic::OrderChangedButton,
            ShopEvent::OrderSubmit(_) => Topic::OrderSubmit,
            ShopEvent::ContactsSubmit(_) => Topic::ContactsSubmit,
            ShopEvent::OrderCreated(_) => Topic::OrderCreated,
            ShopEvent::OrderError { .. } => Topic::OrderError,
            ShopEvent::CatalogLoaded { .. } => Topic::CatalogLoaded,
            ShopEvent::CatalogError { .. } => Topic::CatalogError,
            ShopEvent::SuccessSubmit => Topic::SuccessSubmit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_names_match_the_public_seam() {
        let expected = [
            (Topic::BasketChanged, "basket:changed"),
            (Topic::BasketOpen, "basket:open"),
            (Topic::BasketCheckout, "basket:checkout"),
            (Topic::BasketQuantityChange, "basket:quantity-change"),
            (Topic::ProductSelect, "product:select"),
            (Topic::ProductAdd, "product:add"),
            (Topic::ProductRemove, "product:remove"),
            (Topic::OrderChanged, "order:changed"),
            (Topic::OrderChangedForm, "order:changed-form"),
            (Topic::OrderChangedContacts, "order:changed-contacts"),
            (Topic::OrderChangedButton, "order:changed-button"),
            (Topic::OrderSubmit, "order:submit"),
            (Topic::ContactsSubmit, "contacts:submit"),
            (Topic::OrderCreated, "order:created"),
            (Topic::OrderError, "order:error"),
            (Topic::CatalogLoaded, "catalog:loaded"),
            (Topic::CatalogError, "catalog:error"),
            (Topic::SuccessSubmit, "success:submit"),
        ];
        for (topic, name) in expected {
            assert_eq!(topic.as_str(), name);
            assert_eq!(topic.to_string(), name);
        }
    }

    #[test]
    fn address_form_reports_payment_and_address_fields() {
        let form = AddressFormData {
            payment: Some(PaymentMethod::Cash),
            address: "Main St 1".into(),
        };
        assert_eq!(
            form.field_values(),
            vec![
                (Field::Payment, "cash".to_string()),
                (Field::Address, "Main St 1".to_string()),
            ]
        );
    }

    #[test]
    fn unchosen_payment_reports_an_empty_value() {
        let form = AddressFormData::default();
        assert_eq!(form.field_values()[0], (Field::Payment, String::new()));
    }
}
