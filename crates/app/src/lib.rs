//! `storefront-app` — presentation bindings and application wiring.
//!
//! Views here are **headless presenters**: display state is plain strings,
//! markup and styling belong to whatever template layer hosts them. Each view
//! satisfies the [`View`] contract (idempotent partial-snapshot updates) and
//! turns user gestures into bus emissions; none of them ever calls an
//! aggregate directly.
//!
//! [`App`] is the composition root: it constructs the bus, the aggregates,
//! the views and the gateways exactly once and registers every handler.

pub mod app;
pub mod gateway;
pub mod view;
pub mod views;

pub use app::App;
pub use gateway::{CatalogSource, InMemoryGateway, OrderTransport, TransportError};
pub use view::View;
