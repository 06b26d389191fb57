use core::fmt;
use core::hash::Hash;

/// A message carried by the [`EventBus`](crate::EventBus).
///
/// Events are:
/// - **immutable** (handlers receive them by shared reference)
/// - **typed** (the payload is the event value itself, not an untyped blob)
/// - addressed by a **topic**, a cheap copyable key used for subscription
///
/// The topic is an associated type rather than a string so that subscribing
/// to a misspelled event name is a compile error, not a silent no-op.
pub trait BusEvent: Clone + fmt::Debug + 'static {
    /// Subscription key for this event family (typically a fieldless enum).
    type Topic: Copy + Eq + Hash + fmt::Debug + 'static;

    /// The topic this event value is dispatched under.
    fn topic(&self) -> Self::Topic;
}
