//! Synchronous event dispatch (mechanics only).
//!
//! This module provides the **event bus pattern** for a single-threaded,
//! cooperative application: views publish user intents, aggregates publish
//! derived state, and nobody holds a reference to anybody else.
//!
//! ## Design Philosophy
//!
//! The bus is intentionally **synchronous and in-process**:
//!
//! - **Same-stack delivery**: `emit` invokes every matching handler before it
//!   returns. There is no queue and no thread hop.
//! - **Registration order**: handlers for a topic run in the order they were
//!   registered.
//! - **Depth-first re-entrancy**: a handler may itself `emit`; the nested
//!   dispatch runs to completion before the outer dispatch resumes with its
//!   remaining handlers. Checkout validation relies on this ordering.
//! - **No error handling**: handler panics are not caught and propagate to
//!   the `emit` call site. Callers isolate handler failures themselves if
//!   they need to.
//!
//! ## Dispatch snapshot
//!
//! The handler list is snapshotted when `emit` starts: a handler registered
//! during dispatch does not observe the in-flight event, and a handler
//! deregistered during dispatch still runs for it. This keeps nested
//! subscription changes from invalidating the iteration.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::event::BusEvent;

/// Identity token for a registered handler.
///
/// Closures are not comparable, so deregistration goes through the token
/// returned at registration time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler<E> = Rc<dyn Fn(&E)>;

struct Registration<E> {
    id: HandlerId,
    handler: Handler<E>,
}

struct Registry<E: BusEvent> {
    exact: RefCell<HashMap<E::Topic, Vec<Registration<E>>>>,
    wildcard: RefCell<Vec<Registration<E>>>,
    next_id: Cell<u64>,
}

/// Synchronous publish/subscribe dispatcher.
///
/// `EventBus` is a cheaply cloneable handle: clones share one registry, so
/// the composition root can hand the same bus to every component it wires
/// up. The handle is single-threaded by construction (`Rc` interior); the
/// application model is cooperative, not parallel.
pub struct EventBus<E: BusEvent> {
    registry: Rc<Registry<E>>,
}

impl<E: BusEvent> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<E: BusEvent> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: BusEvent> core::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let exact: usize = self.registry.exact.borrow().values().map(Vec::len).sum();
        f.debug_struct("EventBus")
            .field("exact_handlers", &exact)
            .field("wildcard_handlers", &self.registry.wildcard.borrow().len())
            .finish()
    }
}

impl<E: BusEvent> EventBus<E> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(Registry {
                exact: RefCell::new(HashMap::new()),
                wildcard: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    fn next_id(&self) -> HandlerId {
        let id = self.registry.next_id.get();
        self.registry.next_id.set(id + 1);
        HandlerId(id)
    }

    /// Register `handler` for events dispatched under `topic`.
    pub fn on(&self, topic: E::Topic, handler: impl Fn(&E) + 'static) -> HandlerId {
        let id = self.next_id();
        self.registry
            .exact
            .borrow_mut()
            .entry(topic)
            .or_default()
            .push(Registration {
                id,
                handler: Rc::new(handler),
            });
        id
    }

    /// Remove one registration. Returns whether anything was removed.
    pub fn off(&self, topic: E::Topic, id: HandlerId) -> bool {
        let mut exact = self.registry.exact.borrow_mut();
        let Some(registrations) = exact.get_mut(&topic) else {
            return false;
        };
        let before = registrations.len();
        registrations.retain(|r| r.id != id);
        registrations.len() != before
    }

    /// Register `handler` for **every** event, regardless of topic.
    ///
    /// Wildcard handlers run after the exact-match handlers of each emission;
    /// the event value carries its own topic for inspection.
    pub fn on_any(&self, handler: impl Fn(&E) + 'static) -> HandlerId {
        let id = self.next_id();
        self.registry.wildcard.borrow_mut().push(Registration {
            id,
            handler: Rc::new(handler),
        });
        id
    }

    /// Remove one wildcard registration. Returns whether anything was removed.
    pub fn off_any(&self, id: HandlerId) -> bool {
        let mut wildcard = self.registry.wildcard.borrow_mut();
        let before = wildcard.len();
        wildcard.retain(|r| r.id != id);
        wildcard.len() != before
    }

    /// Dispatch `event` to every matching handler, synchronously.
    ///
    /// Emitting with no subscribers is a no-op, never an error.
    pub fn emit(&self, event: E) {
        let topic = event.topic();
        tracing::trace!(?topic, "dispatching event");

        // Snapshot before invoking: handlers may re-enter the registry.
        let exact: Vec<Handler<E>> = {
            let registry = self.registry.exact.borrow();
            registry
                .get(&topic)
                .map(|rs| rs.iter().map(|r| Rc::clone(&r.handler)).collect())
                .unwrap_or_default()
        };
        for handler in exact {
            handler(&event);
        }

        let wildcard: Vec<Handler<E>> = self
            .registry
            .wildcard
            .borrow()
            .iter()
            .map(|r| Rc::clone(&r.handler))
            .collect();
        for handler in wildcard {
            handler(&event);
        }
    }

    /// Adapt a UI callback into a bus emission.
    ///
    /// Returns a callable that builds an event from its argument via `make`
    /// and emits it. The emitter never learns about the bus.
    pub fn trigger<P, F>(&self, make: F) -> impl Fn(P) + 'static
    where
        F: Fn(P) -> E + 'static,
    {
        let bus = self.clone();
        move |payload: P| bus.emit(make(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Probe {
        Ping(u32),
        Pong(u32),
    }

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    enum ProbeTopic {
        Ping,
        Pong,
    }

    impl BusEvent for Probe {
        type Topic = ProbeTopic;

        fn topic(&self) -> ProbeTopic {
            match self {
                Probe::Ping(_) => ProbeTopic::Ping,
                Probe::Pong(_) => ProbeTopic::Pong,
            }
        }
    }

    fn recording_log() -> Rc<RefCell<Vec<String>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let bus = EventBus::<Probe>::new();
        let log = recording_log();

        for tag in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            bus.on(ProbeTopic::Ping, move |_| log.borrow_mut().push(tag.into()));
        }

        bus.emit(Probe::Ping(1));
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn emitting_without_subscribers_is_a_noop() {
        let bus = EventBus::<Probe>::new();
        bus.emit(Probe::Ping(1));
    }

    #[test]
    fn nested_emission_runs_depth_first() {
        let bus = EventBus::<Probe>::new();
        let log = recording_log();

        {
            let log = Rc::clone(&log);
            let nested = bus.clone();
            bus.on(ProbeTopic::Ping, move |_| {
                log.borrow_mut().push("ping:a".into());
                nested.emit(Probe::Pong(0));
            });
        }
        {
            let log = Rc::clone(&log);
            bus.on(ProbeTopic::Ping, move |_| log.borrow_mut().push("ping:b".into()));
        }
        {
            let log = Rc::clone(&log);
            bus.on(ProbeTopic::Pong, move |_| log.borrow_mut().push("pong".into()));
        }

        bus.emit(Probe::Ping(1));

        // The nested Pong dispatch completes before Ping's second handler.
        assert_eq!(*log.borrow(), vec!["ping:a", "pong", "ping:b"]);
    }

    #[test]
    fn off_removes_a_single_registration() {
        let bus = EventBus::<Probe>::new();
        let log = recording_log();

        let keep = {
            let log = Rc::clone(&log);
            bus.on(ProbeTopic::Ping, move |_| log.borrow_mut().push("keep".into()))
        };
        let drop = {
            let log = Rc::clone(&log);
            bus.on(ProbeTopic::Ping, move |_| log.borrow_mut().push("drop".into()))
        };

        assert!(bus.off(ProbeTopic::Ping, drop));
        assert!(!bus.off(ProbeTopic::Ping, drop));
        assert_ne!(keep, drop);

        bus.emit(Probe::Ping(1));
        assert_eq!(*log.borrow(), vec!["keep"]);
    }

    #[test]
    fn handler_registered_during_dispatch_misses_the_inflight_event() {
        let bus = EventBus::<Probe>::new();
        let log = recording_log();

        {
            let log = Rc::clone(&log);
            let registrar = bus.clone();
            bus.on(ProbeTopic::Ping, move |_| {
                log.borrow_mut().push("outer".into());
                let log = Rc::clone(&log);
                registrar.on(ProbeTopic::Ping, move |_| log.borrow_mut().push("late".into()));
            });
        }

        bus.emit(Probe::Ping(1));
        assert_eq!(*log.borrow(), vec!["outer"]);

        bus.emit(Probe::Ping(2));
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn handler_removed_during_dispatch_still_runs_for_the_inflight_event() {
        let bus = EventBus::<Probe>::new();
        let log = recording_log();
        let victim_slot: Rc<RefCell<Option<HandlerId>>> = Rc::new(RefCell::new(None));

        {
            let remover = bus.clone();
            let victim_slot = Rc::clone(&victim_slot);
            bus.on(ProbeTopic::Ping, move |_| {
                if let Some(id) = *victim_slot.borrow() {
                    remover.off(ProbeTopic::Ping, id);
                }
            });
        }
        let victim = {
            let log = Rc::clone(&log);
            bus.on(ProbeTopic::Ping, move |_| log.borrow_mut().push("victim".into()))
        };
        *victim_slot.borrow_mut() = Some(victim);

        bus.emit(Probe::Ping(1));
        assert_eq!(*log.borrow(), vec!["victim"]);

        bus.emit(Probe::Ping(2));
        assert_eq!(*log.borrow(), vec!["victim"]);
    }

    #[test]
    fn wildcard_handlers_observe_every_topic_after_exact_handlers() {
        let bus = EventBus::<Probe>::new();
        let log = recording_log();

        {
            let log = Rc::clone(&log);
            bus.on_any(move |event| log.borrow_mut().push(format!("any:{:?}", event.topic())));
        }
        {
            let log = Rc::clone(&log);
            bus.on(ProbeTopic::Ping, move |_| log.borrow_mut().push("exact".into()));
        }

        bus.emit(Probe::Ping(1));
        bus.emit(Probe::Pong(2));

        assert_eq!(
            *log.borrow(),
            vec!["exact", "any:Ping", "any:Pong"]
        );
    }

    #[test]
    fn off_any_removes_a_wildcard_registration() {
        let bus = EventBus::<Probe>::new();
        let log = recording_log();

        let id = {
            let log = Rc::clone(&log);
            bus.on_any(move |_| log.borrow_mut().push("any".into()))
        };
        assert!(bus.off_any(id));
        assert!(!bus.off_any(id));

        bus.emit(Probe::Ping(1));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn trigger_adapts_a_callback_into_an_emission() {
        let bus = EventBus::<Probe>::new();
        let log = recording_log();

        {
            let log = Rc::clone(&log);
            bus.on(ProbeTopic::Pong, move |event| {
                if let Probe::Pong(value) = event {
                    log.borrow_mut().push(format!("pong:{value}"));
                }
            });
        }

        let callback = bus.trigger(Probe::Pong);
        callback(7);

        assert_eq!(*log.borrow(), vec!["pong:7"]);
    }
}
