//! Catalog snapshot: read-only product data supplied by the catalog source.

use serde::{Deserialize, Serialize};

use storefront_core::ProductId;

use crate::event::{ShopBus, ShopEvent};

/// Product category, a closed set.
///
/// The serde renames are the wire labels served by the upstream catalog
/// service; CSS-class mapping for them is a presentation concern and lives
/// outside the core.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "софт-скил")]
    SoftSkill,
    #[serde(rename = "хард-скил")]
    HardSkill,
    #[serde(rename = "дополнительное")]
    Additional,
    #[serde(rename = "кнопка")]
    Button,
    #[serde(rename = "другое")]
    Other,
}

impl Category {
    /// The label shown on product cards (the wire label, unmapped).
    pub const fn label(self) -> &'static str {
        match self {
            Category::SoftSkill => "софт-скил",
            Category::HardSkill => "хард-скил",
            Category::Additional => "дополнительное",
            Category::Button => "кнопка",
            Category::Other => "другое",
        }
    }
}

/// A catalog product. Immutable once loaded.
///
/// `price` is `None` for "priceless" products, which can be browsed and even
/// carried in the basket but contribute nothing to totals and are excluded
/// from order submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub image: String,
    pub category: Category,
    pub price: Option<u64>,
}

/// The one-shot read produced by the catalog source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub total: u64,
    pub items: Vec<Product>,
}

/// Owner of the loaded catalog snapshot.
///
/// Loaded once at bootstrap; announces `catalog:loaded` with the product list
/// so subscribers render from the payload instead of reaching back into the
/// store mid-dispatch.
#[derive(Debug)]
pub struct CatalogStore {
    items: Vec<Product>,
    bus: ShopBus,
}

impl CatalogStore {
    pub fn new(bus: ShopBus) -> Self {
        Self {
            items: Vec::new(),
            bus,
        }
    }

    /// Replace the catalog contents and announce `catalog:loaded`.
    pub fn load(&mut self, snapshot: CatalogSnapshot) {
        self.items = snapshot.items;
        tracing::debug!(count = self.items.len(), "catalog loaded");
        self.bus.emit(ShopEvent::CatalogLoaded {
            items: self.items.clone(),
        });
    }

    pub fn products(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.items.iter().find(|product| product.id == id)
    }

    /// Look up a product that must exist.
    ///
    /// Panics when `id` is not part of the loaded snapshot: ids reaching this
    /// call come from the snapshot itself, so a miss is caller misuse, not
    /// user input.
    pub fn product(&self, id: ProductId) -> &Product {
        self.get(id)
            .unwrap_or_else(|| panic!("unknown product id: {id}"))
    }

    /// Price of a product, treating "priceless" as 0.
    pub fn price_of(&self, id: ProductId) -> u64 {
        self.product(id).price.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use storefront_events::BusEvent;

    use crate::event::Topic;

    fn product(title: &str, price: Option<u64>) -> Product {
        Product {
            id: ProductId::new(),
            title: title.into(),
            description: String::new(),
            image: format!("/{title}.svg"),
            category: Category::Other,
            price,
        }
    }

    #[test]
    fn load_announces_the_product_list() {
        let bus = ShopBus::new();
        let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            bus.on(Topic::CatalogLoaded, move |event| {
                if let ShopEvent::CatalogLoaded { items } = event {
                    seen.borrow_mut().push(items.len());
                }
            });
        }

        let mut store = CatalogStore::new(bus);
        store.load(CatalogSnapshot {
            total: 2,
            items: vec![product("a", Some(10)), product("b", None)],
        });

        assert_eq!(*seen.borrow(), vec![2]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn lookup_by_id_and_price_defaulting() {
        let mut store = CatalogStore::new(ShopBus::new());
        let priced = product("priced", Some(150));
        let priceless = product("priceless", None);
        let (priced_id, priceless_id) = (priced.id, priceless.id);
        store.load(CatalogSnapshot {
            total: 2,
            items: vec![priced, priceless],
        });

        assert_eq!(store.get(priced_id).map(|p| p.title.as_str()), Some("priced"));
        assert_eq!(store.price_of(priced_id), 150);
        assert_eq!(store.price_of(priceless_id), 0);
    }

    #[test]
    #[should_panic(expected = "unknown product id")]
    fn unknown_id_lookup_is_a_programmer_error() {
        let store = CatalogStore::new(ShopBus::new());
        let _ = store.product(ProductId::new());
    }

    #[test]
    fn products_deserialize_from_the_upstream_wire_shape() {
        let raw = r#"{
            "total": 1,
            "items": [{
                "id": "854cef69-976d-4c2a-a18c-2aa45046c390",
                "title": "бэм-пылесос",
                "description": "Чтобы пылесосить магазин.",
                "image": "/5_Dots.svg",
                "category": "софт-скил",
                "price": 100
            }]
        }"#;
        let snapshot: CatalogSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].category, Category::SoftSkill);
        assert_eq!(snapshot.items[0].price, Some(100));
    }

    #[test]
    fn priceless_products_deserialize_from_null() {
        let raw = r#"{
            "id": "b06cde61-912f-4663-9751-09956c0eed67",
            "title": "Мамка-таймер",
            "description": "Будет стоять над душой.",
            "image": "/Shell.svg",
            "category": "другое",
            "price": null
        }"#;
        let product: Product = serde_json::from_str(raw).unwrap();
        assert_eq!(product.price, None);
        assert_eq!(product.category, Category::Other);
    }

    #[test]
    fn event_carries_the_catalog_loaded_topic() {
        let event = ShopEvent::CatalogLoaded { items: Vec::new() };
        assert_eq!(event.topic(), Topic::CatalogLoaded);
    }
}
