//! Headless demo: load the fixture catalog and walk a full purchase.

use std::rc::Rc;

use storefront_app::app::App;
use storefront_app::gateway::{CatalogSource, InMemoryGateway, OrderTransport};
use storefront_shop::catalog::Product;
use storefront_shop::event::ShopEvent;
use storefront_shop::order::PaymentMethod;

fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let gateway = Rc::new(InMemoryGateway::with_sample_catalog()?);
    let catalog_source: Rc<dyn CatalogSource> = Rc::clone(&gateway) as Rc<dyn CatalogSource>;
    let order_transport: Rc<dyn OrderTransport> = Rc::clone(&gateway) as Rc<dyn OrderTransport>;

    let app = App::new(catalog_source, order_transport)?;
    app.start();

    // Browse: preview and add the first two priced products.
    let picks: Vec<Product> = {
        let catalog = app.catalog();
        let catalog = catalog.borrow();
        catalog
            .products()
            .iter()
            .filter(|product| product.price.is_some())
            .take(2)
            .cloned()
            .collect()
    };
    for product in &picks {
        app.bus().emit(ShopEvent::ProductSelect(product.id));
        app.preview().toggle_basket();
    }

    app.page().open_basket();
    tracing::info!(
        rows = app.basket_panel().entries().len(),
        total = %app.basket_panel().total_label(),
        "basket open"
    );

    // Checkout: address step, then contacts, then submit.
    app.basket_panel().checkout();

    let address_form = app.address_form();
    address_form.choose_payment(PaymentMethod::Online);
    address_form.input_address("12 Synapse Way");
    address_form.submit();

    let contacts_form = app.contacts_form();
    contacts_form.input_email("shopper@example.com");
    contacts_form.input_phone("+79991234567");
    contacts_form.submit();

    tracing::info!(message = %app.success().description(), "order placed");
    app.success().dismiss();

    tracing::info!(
        submitted = gateway.submissions().len(),
        basket_count = app.basket().borrow().count(),
        "done"
    );
    Ok(())
}
