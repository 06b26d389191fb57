//! Black-box flows against the fully assembled application.

use std::cell::RefCell;
use std::rc::Rc;

use storefront_app::app::App;
use storefront_app::gateway::{CatalogSource, InMemoryGateway, OrderTransport};
use storefront_core::ProductId;
use storefront_shop::catalog::{CatalogSnapshot, Category, Product};
use storefront_shop::event::{ShopEvent, Topic};
use storefront_shop::order::PaymentMethod;

fn product(title: &str, price: Option<u64>) -> Product {
    Product {
        id: ProductId::new(),
        title: title.into(),
        description: format!("{title} description"),
        image: format!("/{title}.svg"),
        category: Category::Other,
        price,
    }
}

fn fixture_products() -> Vec<Product> {
    vec![
        product("book", Some(100)),
        product("lamp", Some(200)),
        product("gift", None),
    ]
}

fn build_app(gateway: &Rc<InMemoryGateway>) -> App {
    let catalog_source: Rc<dyn CatalogSource> = Rc::clone(gateway) as Rc<dyn CatalogSource>;
    let order_transport: Rc<dyn OrderTransport> = Rc::clone(gateway) as Rc<dyn OrderTransport>;
    App::new(catalog_source, order_transport).expect("app wiring")
}

fn started_app() -> (App, Rc<InMemoryGateway>, Vec<Product>) {
    let products = fixture_products();
    let gateway = Rc::new(InMemoryGateway::new(CatalogSnapshot {
        total: products.len() as u64,
        items: products.clone(),
    }));
    let app = build_app(&gateway);
    app.start();
    (app, gateway, products)
}

fn count_basket_changes(app: &App) -> Rc<RefCell<usize>> {
    let changes: Rc<RefCell<usize>> = Rc::new(RefCell::new(0));
    {
        let changes = Rc::clone(&changes);
        app.bus().on(Topic::BasketChanged, move |_| {
            *changes.borrow_mut() += 1;
        });
    }
    changes
}

fn fill_checkout(app: &App) {
    app.basket_panel().checkout();

    let address_form = app.address_form();
    address_form.choose_payment(PaymentMethod::Cash);
    address_form.input_address("Main St 1");
    address_form.submit();

    let contacts_form = app.contacts_form();
    contacts_form.input_email("a@b.co");
    contacts_form.input_phone("+79991234567");
    contacts_form.submit();
}

#[test]
fn full_purchase_clears_basket_and_draft() {
    let (app, gateway, products) = started_app();
    let changes = count_basket_changes(&app);

    app.bus().emit(ShopEvent::ProductAdd(products[0].id));
    app.bus().emit(ShopEvent::ProductAdd(products[1].id));
    assert_eq!(*changes.borrow(), 2);
    assert_eq!(app.basket().borrow().total(), 300);

    app.page().open_basket();
    assert_eq!(app.basket_panel().entries().len(), 2);
    assert_eq!(app.basket_panel().total_label(), "300");

    app.basket_panel().checkout();
    assert_eq!(app.order().borrow().total(), 300);

    let address_form = app.address_form();
    address_form.choose_payment(PaymentMethod::Cash);
    assert!(!address_form.submit_enabled());
    assert_eq!(address_form.error(), "Enter a delivery address");

    address_form.input_address("Main St 1");
    assert!(address_form.submit_enabled());
    assert_eq!(address_form.error(), "");
    address_form.submit();

    let contacts_form = app.contacts_form();
    contacts_form.input_email("a@b.co");
    assert!(!contacts_form.submit_enabled());
    contacts_form.input_phone("+79991234567");
    assert!(contacts_form.submit_enabled());
    contacts_form.submit();

    let submissions = gateway.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].total, 300);
    assert_eq!(submissions[0].items, vec![products[0].id, products[1].id]);
    assert_eq!(submissions[0].payment, PaymentMethod::Cash);

    // Transport success released both the basket and the draft.
    assert_eq!(app.basket().borrow().count(), 0);
    assert_eq!(app.page().basket_counter(), "0");
    assert!(!app.order().borrow().validate());
    assert_eq!(app.success().description(), "Charged 300 synapses");

    app.success().dismiss();
    assert!(!app.order().borrow().validate());
}

#[test]
fn catalog_loads_onto_the_page() {
    let (app, _, products) = started_app();
    assert_eq!(app.catalog().borrow().len(), products.len());
    assert_eq!(
        app.page().catalog(),
        vec!["book".to_string(), "lamp".to_string(), "gift".to_string()]
    );
}

#[test]
fn duplicate_add_keeps_a_single_item_but_still_notifies() {
    let (app, _, products) = started_app();
    let changes = count_basket_changes(&app);

    app.bus().emit(ShopEvent::ProductAdd(products[0].id));
    app.bus().emit(ShopEvent::ProductAdd(products[0].id));

    assert_eq!(app.basket().borrow().count(), 1);
    assert_eq!(app.basket().borrow().total(), 100);
    assert_eq!(*changes.borrow(), 2);
}

#[test]
fn preview_toggle_adds_and_removes_through_the_bus() {
    let (app, _, products) = started_app();

    app.bus().emit(ShopEvent::ProductSelect(products[0].id));
    let preview = app.preview();
    assert!(!preview.in_basket());
    assert_eq!(preview.price_label(), "100 synapses");

    preview.toggle_basket();
    assert!(app.basket().borrow().contains(products[0].id));
    assert!(preview.in_basket());

    preview.toggle_basket();
    assert!(app.basket().borrow().is_empty());
    assert!(!preview.in_basket());
}

#[test]
fn row_deletion_refreshes_panel_and_counter() {
    let (app, _, products) = started_app();
    app.bus().emit(ShopEvent::ProductAdd(products[0].id));
    app.bus().emit(ShopEvent::ProductAdd(products[1].id));
    app.page().open_basket();
    assert_eq!(app.basket_panel().entries().len(), 2);

    app.basket_panel().remove_entry(products[0].id);

    assert_eq!(app.basket().borrow().count(), 1);
    assert_eq!(app.basket_panel().entries().len(), 1);
    assert_eq!(app.basket_panel().total_label(), "200");
    assert_eq!(app.page().basket_counter(), "1");
}

#[test]
fn priceless_items_never_reach_a_submission() {
    let (app, gateway, products) = started_app();
    app.bus().emit(ShopEvent::ProductAdd(products[1].id));
    app.bus().emit(ShopEvent::ProductAdd(products[2].id));

    app.page().open_basket();
    assert_eq!(app.basket_panel().entries().len(), 2);
    assert_eq!(app.basket_panel().total_label(), "200");

    fill_checkout(&app);

    let submissions = gateway.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].items, vec![products[1].id]);
    assert_eq!(submissions[0].total, 200);
}

#[test]
fn transport_failure_preserves_the_draft_for_retry() {
    let (app, gateway, products) = started_app();
    app.bus().emit(ShopEvent::ProductAdd(products[0].id));

    gateway.fail_next_submission();
    fill_checkout(&app);

    assert!(gateway.submissions().is_empty());
    let message = app.notifications().message().expect("a surfaced error");
    assert!(message.contains("order service is unreachable"), "{message}");

    // Everything entered is still there; the same gesture retries.
    assert!(app.order().borrow().validate());
    assert_eq!(app.basket().borrow().count(), 1);
    app.contacts_form().submit();

    assert_eq!(gateway.submissions().len(), 1);
    assert_eq!(app.basket().borrow().count(), 0);
    assert!(!app.order().borrow().validate());
}

#[test]
fn checkout_reentry_snapshots_the_current_basket() {
    let (app, _, products) = started_app();
    app.bus().emit(ShopEvent::ProductAdd(products[0].id));
    app.basket_panel().checkout();
    assert_eq!(app.order().borrow().total(), 100);

    // Going back for one more item re-enters checkout with a fresh snapshot.
    app.bus().emit(ShopEvent::ProductAdd(products[1].id));
    app.basket_panel().checkout();
    assert_eq!(app.order().borrow().total(), 300);
    assert_eq!(app.order().borrow().items().len(), 2);
}

#[test]
fn catalog_bootstrap_failure_is_surfaced_not_fatal() {
    let products = fixture_products();
    let gateway = Rc::new(InMemoryGateway::new(CatalogSnapshot {
        total: products.len() as u64,
        items: products,
    }));
    gateway.fail_next_catalog_fetch();
    let app = build_app(&gateway);

    app.start();

    let message = app.notifications().message().expect("a surfaced error");
    assert!(message.contains("catalog service is unreachable"), "{message}");
    assert!(app.catalog().borrow().is_empty());
    assert!(app.page().catalog().is_empty());

    // A later start succeeds and recovers.
    app.start();
    assert_eq!(app.catalog().borrow().len(), 3);
}
