//! Order draft aggregate: checkout state across the two form steps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, OrderId, ProductId};

use crate::event::{ShopBus, ShopEvent};
use crate::validation::{Field, Validator};

/// How the order will be paid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Online,
    Cash,
}

impl PaymentMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Online => "online",
            PaymentMethod::Cash => "cash",
        }
    }
}

impl core::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conceptual checkout stage.
///
/// Never stored: always recomputed from the current field values, so the
/// stage and the data cannot disagree.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CheckoutStage {
    Empty,
    Address,
    Contacts,
    Submittable,
}

/// Order lifecycle status as reported by the order service.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Created,
    Processing,
    Completed,
    Cancelled,
}

/// Result of a submission, the `order:created` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    pub id: OrderId,
    pub total: u64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub items: Vec<ProductId>,
}

/// Read-only consumption form of a submittable draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub payment: PaymentMethod,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub total: u64,
    pub items: Vec<ProductId>,
}

/// Aggregate root: the in-progress order.
///
/// Exactly one instance exists; the two checkout forms write disjoint field
/// subsets onto it, so switching between steps never discards values entered
/// in the other step. Validation feedback goes out as `order:changed` events
/// carrying a single one-line message (empty when the checked values pass),
/// matching the forms' one-line error display.
#[derive(Debug)]
pub struct OrderDraft {
    payment: Option<PaymentMethod>,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    total: u64,
    items: Vec<ProductId>,
    validator: Validator,
    bus: ShopBus,
}

impl OrderDraft {
    pub fn new(bus: ShopBus, validator: Validator) -> Self {
        Self {
            payment: None,
            email: None,
            phone: None,
            address: None,
            total: 0,
            items: Vec::new(),
            validator,
            bus,
        }
    }

    pub fn payment(&self) -> Option<PaymentMethod> {
        self.payment
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn items(&self) -> &[ProductId] {
        &self.items
    }

    pub fn set_payment(&mut self, payment: Option<PaymentMethod>) {
        self.payment = payment;
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = Some(address.into());
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = Some(email.into());
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = Some(phone.into());
    }

    /// Snapshot basket contents into the draft at checkout entry.
    pub fn begin_checkout(&mut self, total: u64, items: Vec<ProductId>) {
        tracing::debug!(total, count = items.len(), "checkout started");
        self.total = total;
        self.items = items;
    }

    /// Evaluate one field and publish its one-line feedback.
    ///
    /// Returns whether the value passed.
    pub fn validate_field(&self, field: Field, value: &str) -> bool {
        let message = self.validator.validate_field(field, value);
        let passed = message.is_none();
        self.bus.emit(ShopEvent::OrderChanged {
            message: message.unwrap_or_default().to_string(),
        });
        passed
    }

    /// Evaluate a form's field subset and publish the aggregated one-line
    /// feedback (the most recently evaluated failing field's message, empty
    /// when none fail).
    ///
    /// Returns whether zero errors were found; forms use this to toggle
    /// their submit affordance.
    pub fn validate_form(&self, fields: &[(Field, String)]) -> bool {
        let errors = self.validator.validate_form(fields);
        let message = fields
            .iter()
            .rev()
            .find_map(|(field, _)| errors.get(field))
            .cloned()
            .unwrap_or_default();
        self.bus.emit(ShopEvent::OrderChanged { message });
        errors.is_empty()
    }

    /// The checkout-completion predicate, the gate before remote submission.
    ///
    /// Stricter than the incremental pattern checks: it also requires a
    /// positive total and a non-empty item snapshot.
    pub fn validate(&self) -> bool {
        self.total > 0
            && !self.items.is_empty()
            && self.has_payment()
            && self.has_email()
            && self.has_phone()
            && self.has_address()
    }

    /// Recompute the conceptual stage from current field values.
    pub fn stage(&self) -> CheckoutStage {
        let address_step = self.has_payment() || self.has_address();
        let contacts_step = self.has_email() || self.has_phone();
        if self.has_payment() && self.has_address() && self.has_email() && self.has_phone() {
            CheckoutStage::Submittable
        } else if contacts_step {
            CheckoutStage::Contacts
        } else if address_step {
            CheckoutStage::Address
        } else {
            CheckoutStage::Empty
        }
    }

    /// Reset every field to its default.
    pub fn clear(&mut self) {
        self.payment = None;
        self.email = None;
        self.phone = None;
        self.address = None;
        self.total = 0;
        self.items.clear();
    }

    /// Produce the read-only submission form of the draft.
    ///
    /// Fails with an invariant violation when the completion predicate does
    /// not hold; callers are expected to gate on [`validate`](Self::validate)
    /// first.
    pub fn submission(&self) -> DomainResult<OrderSubmission> {
        if !self.validate() {
            return Err(DomainError::invariant("order draft is not submittable"));
        }
        let (Some(payment), Some(email), Some(phone), Some(address)) = (
            self.payment,
            self.email.clone(),
            self.phone.clone(),
            self.address.clone(),
        ) else {
            return Err(DomainError::invariant("order draft is not submittable"));
        };
        Ok(OrderSubmission {
            payment,
            email,
            phone,
            address,
            total: self.total,
            items: self.items.clone(),
        })
    }

    fn has_payment(&self) -> bool {
        self.payment.is_some()
    }

    fn has_email(&self) -> bool {
        self.email.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    fn has_phone(&self) -> bool {
        self.phone.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    fn has_address(&self) -> bool {
        self.address.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}
