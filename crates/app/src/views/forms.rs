//! Checkout forms: the address/payment step and the contacts step.
//!
//! Both forms report their whole field subset on every input and follow the
//! same feedback shape: a one-line error and a submit affordance, driven by
//! `order:changed` and `order:changed-button`.

use std::cell::RefCell;

use storefront_shop::event::{AddressFormData, ContactsFormData, ShopBus, ShopEvent};
use storefront_shop::order::PaymentMethod;

use crate::view::View;

/// Partial snapshot shared by both checkout forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFeedback {
    /// One-line error text; empty means "currently valid".
    pub error: Option<String>,
    pub submit_enabled: Option<bool>,
}

#[derive(Debug, Default)]
struct AddressState {
    payment: Option<PaymentMethod>,
    address: String,
    error: String,
    submit_enabled: bool,
}

/// Payment-and-address step.
#[derive(Debug)]
pub struct AddressFormView {
    bus: ShopBus,
    state: RefCell<AddressState>,
}

impl AddressFormView {
    pub fn new(bus: ShopBus) -> Self {
        Self {
            bus,
            state: RefCell::new(AddressState::default()),
        }
    }

    /// Payment button clicked.
    pub fn choose_payment(&self, method: PaymentMethod) {
        self.state.borrow_mut().payment = Some(method);
        self.report_change();
    }

    /// Address input edited.
    pub fn input_address(&self, text: &str) {
        self.state.borrow_mut().address = text.to_string();
        self.report_change();
    }

    /// Submit clicked. Ignored while the affordance is disabled.
    pub fn submit(&self) {
        let enabled = self.state.borrow().submit_enabled;
        if enabled {
            let data = self.form_data();
            self.bus.emit(ShopEvent::OrderSubmit(data));
        }
    }

    /// Fresh form, as when the step is first presented.
    pub fn reset(&self) {
        *self.state.borrow_mut() = AddressState::default();
    }

    pub fn payment(&self) -> Option<PaymentMethod> {
        self.state.borrow().payment
    }

    pub fn address(&self) -> String {
        self.state.borrow().address.clone()
    }

    pub fn error(&self) -> String {
        self.state.borrow().error.clone()
    }

    pub fn submit_enabled(&self) -> bool {
        self.state.borrow().submit_enabled
    }

    fn form_data(&self) -> AddressFormData {
        let state = self.state.borrow();
        AddressFormData {
            payment: state.payment,
            address: state.address.clone(),
        }
    }

    fn report_change(&self) {
        let data = self.form_data();
        self.bus.emit(ShopEvent::OrderChangedForm(data));
    }
}

impl View for AddressFormView {
    type Snapshot = FormFeedback;

    fn update(&self, snapshot: &FormFeedback) {
        let mut state = self.state.borrow_mut();
        if let Some(error) = &snapshot.error {
            state.error = error.clone();
        }
        if let Some(enabled) = snapshot.submit_enabled {
            state.submit_enabled = enabled;
        }
    }
}

#[derive(Debug, Default)]
struct ContactsState {
    email: String,
    phone: String,
    error: String,
    submit_enabled: bool,
}

/// Email-and-phone step.
#[derive(Debug)]
pub struct ContactsFormView {
    bus: ShopBus,
    state: RefCell<ContactsState>,
}

impl ContactsFormView {
    pub fn new(bus: ShopBus) -> Self {
        Self {
            bus,
            state: RefCell::new(ContactsState::default()),
        }
    }

    /// Email input edited.
    pub fn input_email(&self, text: &str) {
        self.state.borrow_mut().email = text.to_string();
        self.report_change();
    }

    /// Phone input edited.
    pub fn input_phone(&self, text: &str) {
        self.state.borrow_mut().phone = text.to_string();
        self.report_change();
    }

    /// Submit clicked. Ignored while the affordance is disabled.
    pub fn submit(&self) {
        let enabled = self.state.borrow().submit_enabled;
        if enabled {
            let data = self.form_data();
            self.bus.emit(ShopEvent::ContactsSubmit(data));
        }
    }

    /// Fresh form, as when the step is first presented.
    pub fn reset(&self) {
        *self.state.borrow_mut() = ContactsState::default();
    }

    pub fn email(&self) -> String {
        self.state.borrow().email.clone()
    }

    pub fn phone(&self) -> String {
        self.state.borrow().phone.clone()
    }

    pub fn error(&self) -> String {
        self.state.borrow().error.clone()
    }

    pub fn submit_enabled(&self) -> bool {
        self.state.borrow().submit_enabled
    }

    fn form_data(&self) -> ContactsFormData {
        let state = self.state.borrow();
        ContactsFormData {
            email: state.email.clone(),
            phone: state.phone.clone(),
        }
    }

    fn report_change(&self) {
        let data = self.form_data();
        self.bus.emit(ShopEvent::OrderChangedContacts(data));
    }
}

impl View for ContactsFormView {
    type Snapshot = FormFeedback;

    fn update(&self, snapshot: &FormFeedback) {
        let mut state = self.state.borrow_mut();
        if let Some(error) = &snapshot.error {
            state.error = error.clone();
        }
        if let Some(enabled) = snapshot.submit_enabled {
            state.submit_enabled = enabled;
        }
    }
}
