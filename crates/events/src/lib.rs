//! `storefront-events` — synchronous publish/subscribe dispatch.
//!
//! Domain-agnostic: the dispatcher is generic over the message type, so the
//! application layer decides the event vocabulary and payload shapes.

pub mod bus;
pub mod event;

pub use bus::{EventBus, HandlerId};
pub use event::BusEvent;
