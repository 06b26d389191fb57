//! Application wiring: the composition root.
//!
//! Everything is constructed exactly once here and connected only through
//! the bus. Handles are passed to the registration call sites that need
//! them; nothing is reached through global lookup.
//!
//! Borrow discipline replacing locks: an aggregate emits its derived-state
//! event while its own `RefCell` is still mutably borrowed, so handlers of
//! `basket:changed` (and of the other derived events) read the event payload
//! and never reach back into the emitting aggregate.

use std::cell::RefCell;
use std::rc::Rc;

use storefront_core::DomainResult;
use storefront_shop::basket::Basket;
use storefront_shop::catalog::CatalogStore;
use storefront_shop::event::{ShopBus, ShopEvent, Topic};
use storefront_shop::order::OrderDraft;
use storefront_shop::validation::Validator;

use crate::gateway::{CatalogSource, OrderTransport};
use crate::view::View;
use crate::views::{
    AddressFormView, BasketEntry, BasketPanelSnapshot, BasketPanelView, CardSnapshot,
    ContactsFormView, FormFeedback, NotificationView, PageSnapshot, PageView, ProductCardView,
    SuccessSnapshot, SuccessView, format_price,
};

/// The assembled storefront.
pub struct App {
    bus: ShopBus,
    catalog: Rc<RefCell<CatalogStore>>,
    basket: Rc<RefCell<Basket>>,
    order: Rc<RefCell<OrderDraft>>,
    page: Rc<PageView>,
    preview: Rc<ProductCardView>,
    basket_panel: Rc<BasketPanelView>,
    address_form: Rc<AddressFormView>,
    contacts_form: Rc<ContactsFormView>,
    success: Rc<SuccessView>,
    notifications: Rc<NotificationView>,
    catalog_source: Rc<dyn CatalogSource>,
    order_transport: Rc<dyn OrderTransport>,
}

impl App {
    pub fn new(
        catalog_source: Rc<dyn CatalogSource>,
        order_transport: Rc<dyn OrderTransport>,
    ) -> DomainResult<Self> {
        let bus = ShopBus::new();
        let validator = Validator::standard()?;

        let app = Self {
            catalog: Rc::new(RefCell::new(CatalogStore::new(bus.clone()))),
            basket: Rc::new(RefCell::new(Basket::new(bus.clone()))),
            order: Rc::new(RefCell::new(OrderDraft::new(bus.clone(), validator))),
            page: Rc::new(PageView::new(bus.clone())),
            preview: Rc::new(ProductCardView::new(bus.clone())),
            basket_panel: Rc::new(BasketPanelView::new(bus.clone())),
            address_form: Rc::new(AddressFormView::new(bus.clone())),
            contacts_form: Rc::new(ContactsFormView::new(bus.clone())),
            success: Rc::new(SuccessView::new(bus.clone())),
            notifications: Rc::new(NotificationView::new()),
            catalog_source,
            order_transport,
            bus,
        };
        app.register_handlers();
        Ok(app)
    }

    /// Bootstrap the catalog: one-shot fetch, or a surfaced error event.
    pub fn start(&self) {
        tracing::info!("bootstrapping catalog");
        match self.catalog_source.fetch_catalog() {
            Ok(snapshot) => self.catalog.borrow_mut().load(snapshot),
            Err(err) => {
                tracing::error!(error = %err, "catalog bootstrap failed");
                self.bus.emit(ShopEvent::CatalogError {
                    message: err.to_string(),
                });
            }
        }
    }

    fn register_handlers(&self) {
        self.register_catalog_handlers();
        self.register_basket_handlers();
        self.register_checkout_handlers();
        self.register_submission_handlers();
        self.register_failure_handlers();
    }

    fn register_catalog_handlers(&self) {
        // Catalog loaded: the gallery renders from the payload.
        {
            let page = Rc::clone(&self.page);
            self.bus.on(Topic::CatalogLoaded, move |event| {
                if let ShopEvent::CatalogLoaded { items } = event {
                    page.update(&PageSnapshot {
                        catalog: Some(items.iter().map(|p| p.title.clone()).collect()),
                        basket_count: None,
                    });
                }
            });
        }

        // Product selected: render the preview with its in-basket flag.
        {
            let catalog = Rc::clone(&self.catalog);
            let basket = Rc::clone(&self.basket);
            let preview = Rc::clone(&self.preview);
            self.bus.on(Topic::ProductSelect, move |event| {
                if let ShopEvent::ProductSelect(id) = event {
                    let product = catalog.borrow().product(*id).clone();
                    let in_basket = basket.borrow().contains(*id);
                    preview.update(&CardSnapshot {
                        product: Some(product),
                        in_basket: Some(in_basket),
                    });
                }
            });
        }
    }

    fn register_basket_handlers(&self) {
        // Add/remove intents mutate the basket; the preview flag follows.
        {
            let catalog = Rc::clone(&self.catalog);
            let basket = Rc::clone(&self.basket);
            let preview = Rc::clone(&self.preview);
            self.bus.on(Topic::ProductAdd, move |event| {
                if let ShopEvent::ProductAdd(id) = event {
                    let product = catalog.borrow().product(*id).clone();
                    basket.borrow_mut().add(product);
                    preview.update(&CardSnapshot {
                        product: None,
                        in_basket: Some(true),
                    });
                }
            });
        }
        {
            let basket = Rc::clone(&self.basket);
            let preview = Rc::clone(&self.preview);
            self.bus.on(Topic::ProductRemove, move |event| {
                if let ShopEvent::ProductRemove(id) = event {
                    basket.borrow_mut().remove(*id);
                    preview.update(&CardSnapshot {
                        product: None,
                        in_basket: Some(false),
                    });
                }
            });
        }

        // Basket changed: panel and page counter re-render from the payload
        // (the basket itself is still mid-mutation here).
        {
            let catalog = Rc::clone(&self.catalog);
            let basket_panel = Rc::clone(&self.basket_panel);
            let page = Rc::clone(&self.page);
            self.bus.on(Topic::BasketChanged, move |event| {
                if let ShopEvent::BasketChanged(state) = event {
                    let entries: Vec<BasketEntry> = {
                        let catalog = catalog.borrow();
                        state
                            .items
                            .iter()
                            .map(|id| {
                                let product = catalog.product(*id);
                                BasketEntry {
                                    id: *id,
                                    title: product.title.clone(),
                                    price_label: format_price(product.price),
                                }
                            })
                            .collect()
                    };
                    basket_panel.update(&BasketPanelSnapshot {
                        entries: Some(entries),
                        total: Some(state.total),
                    });
                    page.update(&PageSnapshot {
                        catalog: None,
                        basket_count: Some(state.items.len()),
                    });
                }
            });
        }

        // Opening the basket (or a row deletion) refreshes the panel from
        // the aggregate's current snapshot.
        let refresh = {
            let catalog = Rc::clone(&self.catalog);
            let basket = Rc::clone(&self.basket);
            let basket_panel = Rc::clone(&self.basket_panel);
            move |_: &ShopEvent| {
                let state = basket.borrow().state();
                let entries: Vec<BasketEntry> = {
                    let catalog = catalog.borrow();
                    state
                        .items
                        .iter()
                        .map(|id| {
                            let product = catalog.product(*id);
                            BasketEntry {
                                id: *id,
                                title: product.title.clone(),
                                price_label: format_price(product.price),
                            }
                        })
                        .collect()
                };
                basket_panel.update(&BasketPanelSnapshot {
                    entries: Some(entries),
                    total: Some(state.total),
                });
            }
        };
        self.bus.on(Topic::BasketOpen, refresh.clone());
        self.bus.on(Topic::BasketQuantityChange, refresh);
    }

    fn register_checkout_handlers(&self) {
        // Checkout entry: reset the draft, snapshot the basket into it,
        // present a fresh address form.
        {
            let basket = Rc::clone(&self.basket);
            let order = Rc::clone(&self.order);
            let address_form = Rc::clone(&self.address_form);
            self.bus.on(Topic::BasketCheckout, move |_| {
                let (total, items) = {
                    let basket = basket.borrow();
                    (basket.total(), basket.payable_items())
                };
                {
                    let mut order = order.borrow_mut();
                    order.clear();
                    order.begin_checkout(total, items);
                }
                address_form.reset();
            });
        }

        // Address step: evaluate, store the subset, publish validity.
        {
            let order = Rc::clone(&self.order);
            let bus = self.bus.clone();
            self.bus.on(Topic::OrderChangedForm, move |event| {
                if let ShopEvent::OrderChangedForm(form) = event {
                    let valid = order.borrow().validate_form(&form.field_values());
                    {
                        let mut order = order.borrow_mut();
                        order.set_payment(form.payment);
                        order.set_address(form.address.clone());
                    }
                    bus.emit(ShopEvent::OrderChangedButton { valid });
                }
            });
        }

        // Contacts step: same shape, disjoint fields.
        {
            let order = Rc::clone(&self.order);
            let bus = self.bus.clone();
            self.bus.on(Topic::OrderChangedContacts, move |event| {
                if let ShopEvent::OrderChangedContacts(form) = event {
                    let valid = order.borrow().validate_form(&form.field_values());
                    {
                        let mut order = order.borrow_mut();
                        order.set_email(form.email.clone());
                        order.set_phone(form.phone.clone());
                    }
                    bus.emit(ShopEvent::OrderChangedButton { valid });
                }
            });
        }

        // One-line validation feedback lands on both form surfaces.
        {
            let address_form = Rc::clone(&self.address_form);
            let contacts_form = Rc::clone(&self.contacts_form);
            self.bus.on(Topic::OrderChanged, move |event| {
                if let ShopEvent::OrderChanged { message } = event {
                    let feedback = FormFeedback {
                        error: Some(message.clone()),
                        submit_enabled: None,
                    };
                    address_form.update(&feedback);
                    contacts_form.update(&feedback);
                }
            });
        }

        // Submit affordances follow the latest validity verdict.
        {
            let address_form = Rc::clone(&self.address_form);
            let contacts_form = Rc::clone(&self.contacts_form);
            self.bus.on(Topic::OrderChangedButton, move |event| {
                if let ShopEvent::OrderChangedButton { valid } = event {
                    let feedback = FormFeedback {
                        error: None,
                        submit_enabled: Some(*valid),
                    };
                    address_form.update(&feedback);
                    contacts_form.update(&feedback);
                }
            });
        }

        // Address submitted: persist the subset, present a fresh contacts
        // form for the next step.
        {
            let order = Rc::clone(&self.order);
            let contacts_form = Rc::clone(&self.contacts_form);
            self.bus.on(Topic::OrderSubmit, move |event| {
                if let ShopEvent::OrderSubmit(form) = event {
                    {
                        let mut order = order.borrow_mut();
                        order.set_payment(form.payment);
                        order.set_address(form.address.clone());
                    }
                    contacts_form.reset();
                }
            });
        }
    }

    fn register_submission_handlers(&self) {
        // Contacts submitted: gate on the completion predicate, then
        // exchange with the order service.
        {
            let order = Rc::clone(&self.order);
            let transport = Rc::clone(&self.order_transport);
            let bus = self.bus.clone();
            self.bus.on(Topic::ContactsSubmit, move |event| {
                if let ShopEvent::ContactsSubmit(form) = event {
                    let submission = {
                        let mut order = order.borrow_mut();
                        order.set_email(form.email.clone());
                        order.set_phone(form.phone.clone());
                        if order.validate() {
                            order.submission().ok()
                        } else {
                            None
                        }
                    };
                    let Some(submission) = submission else {
                        return;
                    };
                    match transport.submit_order(&submission) {
                        Ok(result) => {
                            tracing::info!(order = %result.id, total = result.total, "order accepted");
                            bus.emit(ShopEvent::OrderCreated(result));
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "order submission failed");
                            bus.emit(ShopEvent::OrderError {
                                message: err.to_string(),
                            });
                        }
                    }
                }
            });
        }

        // Order created: show the success panel, then release basket and
        // draft.
        {
            let basket = Rc::clone(&self.basket);
            let order = Rc::clone(&self.order);
            let success = Rc::clone(&self.success);
            self.bus.on(Topic::OrderCreated, move |event| {
                if let ShopEvent::OrderCreated(result) = event {
                    success.update(&SuccessSnapshot {
                        total: Some(result.total),
                    });
                    basket.borrow_mut().clear();
                    order.borrow_mut().clear();
                }
            });
        }

        // Success dismissed: the draft stays cleared.
        {
            let order = Rc::clone(&self.order);
            self.bus.on(Topic::SuccessSubmit, move |_| {
                order.borrow_mut().clear();
            });
        }
    }

    fn register_failure_handlers(&self) {
        {
            let notifications = Rc::clone(&self.notifications);
            self.bus.on(Topic::OrderError, move |event| {
                if let ShopEvent::OrderError { message } = event {
                    tracing::error!(%message, "order error");
                    notifications.update(message);
                }
            });
        }
        {
            let notifications = Rc::clone(&self.notifications);
            self.bus.on(Topic::CatalogError, move |event| {
                if let ShopEvent::CatalogError { message } = event {
                    tracing::error!(%message, "catalog error");
                    notifications.update(message);
                }
            });
        }
    }

    pub fn bus(&self) -> ShopBus {
        self.bus.clone()
    }

    pub fn catalog(&self) -> Rc<RefCell<CatalogStore>> {
        Rc::clone(&self.catalog)
    }

    pub fn basket(&self) -> Rc<RefCell<Basket>> {
        Rc::clone(&self.basket)
    }

    pub fn order(&self) -> Rc<RefCell<OrderDraft>> {
        Rc::clone(&self.order)
    }

    pub fn page(&self) -> Rc<PageView> {
        Rc::clone(&self.page)
    }

    pub fn preview(&self) -> Rc<ProductCardView> {
        Rc::clone(&self.preview)
    }

    pub fn basket_panel(&self) -> Rc<BasketPanelView> {
        Rc::clone(&self.basket_panel)
    }

    pub fn address_form(&self) -> Rc<AddressFormView> {
        Rc::clone(&self.address_form)
    }

    pub fn contacts_form(&self) -> Rc<ContactsFormView> {
        Rc::clone(&self.contacts_form)
    }

    pub fn success(&self) -> Rc<SuccessView> {
        Rc::clone(&self.success)
    }

    pub fn notifications(&self) -> Rc<NotificationView> {
        Rc::clone(&self.notifications)
    }
}
