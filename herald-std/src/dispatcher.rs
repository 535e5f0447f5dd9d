//! The named-event dispatcher.
//!
//! # Dispatch Policy
//!
//! Every pass works on a snapshot of the membership taken when the pass
//! begins, and the internal lock is released before any handler runs. A
//! snapshotted handler is re-checked right before it is called:
//!
//! - handlers registered during a pass first run on the next emission;
//! - handlers removed during a pass (by an earlier handler, by a nested
//!   emission, or by single-shot retirement) are skipped for the rest of it.
//!
//! Handlers may therefore register, unregister and emit re-entrantly without
//! deadlocking. Unbounded re-entrant emission is not guarded against.
//!
//! A single-shot handler is claimed under the lock before it runs, so
//! concurrent or nested emissions never invoke it a second time. The claim
//! is released by retiring the handler once its call finishes, whether it
//! returned normally, returned an error or panicked.

use crate::config::DispatcherConfig;
use herald_core::{EventName, Handler, HandlerError, HandlerId, Payload, UniversalHandler};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::fmt;

/// A handler registered under a resolved name.
struct Entry<P: Payload> {
    handler: Handler<P>,
    /// Retire after the next invocation.
    once: bool,
    /// A single-shot entry already claimed by a running emission.
    firing: bool,
}

impl<P: Payload> Entry<P> {
    fn new(handler: &Handler<P>, once: bool) -> Self {
        Self {
            handler: handler.clone(),
            once,
            firing: false,
        }
    }
}

type HandlerSet<P> = IndexMap<HandlerId, Entry<P>>;

struct State<P: Payload> {
    named: IndexMap<String, HandlerSet<P>>,
    universal: IndexMap<HandlerId, UniversalHandler<P>>,
}

impl<P: Payload> Default for State<P> {
    fn default() -> Self {
        Self {
            named: IndexMap::new(),
            universal: IndexMap::new(),
        }
    }
}

/// A synchronous publish/subscribe dispatcher for named events.
///
/// All methods take `&self`, so handlers holding a reference to the
/// dispatcher can modify it while an emission is in flight. Mutating
/// methods return `&Self` for chaining.
///
/// # Example
/// ```
/// use herald_std::{Dispatcher, Handler};
///
/// let dispatcher = Dispatcher::with_prefix("jobs", true);
/// let done = Handler::new(|id: &u64| println!("job {id} finished"));
///
/// dispatcher
///     .register("done", &done)
///     .emit("done", &42)
///     .unwrap();
/// assert_eq!(dispatcher.listener_count("done"), 1);
/// ```
pub struct Dispatcher<P: Payload> {
    config: DispatcherConfig,
    state: Mutex<State<P>>,
}

impl<P: Payload> Dispatcher<P> {
    /// Create a dispatcher without a namespace prefix.
    pub fn new() -> Self {
        Self::with_config(DispatcherConfig::default())
    }

    /// Create a dispatcher from explicit settings.
    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            config,
            state: Mutex::new(State::default()),
        }
    }

    /// Create a dispatcher scoped behind `prefix`.
    pub fn with_prefix(prefix: impl Into<String>, auto_prefix: bool) -> Self {
        Self::with_config(
            DispatcherConfig::new()
                .with_name_prefix(prefix)
                .with_auto_prefix(auto_prefix),
        )
    }

    /// The settings this dispatcher was built with.
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// The namespace prefix, empty when unscoped.
    pub fn name_prefix(&self) -> &str {
        &self.config.name_prefix
    }

    /// Whether registration applies the prefix by default.
    pub fn auto_prefix(&self) -> bool {
        self.config.auto_prefix
    }

    /// Resolve a name the way registration and removal do.
    pub fn resolve_name<'a>(&self, name: impl Into<EventName<'a>>) -> String {
        name.into()
            .resolve(&self.config.name_prefix, self.config.auto_prefix)
            .into_owned()
    }

    // ------------------------------------------------------------------
    // Named handlers
    // ------------------------------------------------------------------

    /// Add `handler` to the set for `name`. Registering a handle that is
    /// already present has no effect.
    pub fn register<'a>(&self, name: impl Into<EventName<'a>>, handler: &Handler<P>) -> &Self {
        self.insert(self.resolve_name(name), handler, false);
        self
    }

    /// Add `handler` to the set for `name` and retire it after its next
    /// invocation.
    pub fn register_once<'a>(
        &self,
        name: impl Into<EventName<'a>>,
        handler: &Handler<P>,
    ) -> &Self {
        self.insert(self.resolve_name(name), handler, true);
        self
    }

    /// Replace every handler for `name` with `handler` alone. Pending
    /// single-shot marks for `name` are discarded with the old set.
    pub fn register_exclusive<'a>(
        &self,
        name: impl Into<EventName<'a>>,
        handler: &Handler<P>,
    ) -> &Self {
        let name = self.resolve_name(name);

        #[cfg(feature = "tracing")]
        tracing::trace!(event = %name, handler = ?handler.id(), "exclusive handler registered");

        let mut set = HandlerSet::new();
        set.insert(handler.id(), Entry::new(handler, false));
        let previous = self.state.lock().named.insert(name, set);
        // Dropped after the guard: captured state may call back in.
        drop(previous);
        self
    }

    /// Remove `handler` from the set for `name`. Unknown names and absent
    /// handlers are ignored.
    pub fn unregister<'a>(&self, name: impl Into<EventName<'a>>, handler: &Handler<P>) -> &Self {
        let name = self.resolve_name(name);
        let removed = self
            .state
            .lock()
            .named
            .get_mut(&name)
            .and_then(|set| set.shift_remove(&handler.id()));
        if removed.is_some() {
            #[cfg(feature = "tracing")]
            tracing::trace!(event = %name, handler = ?handler.id(), "handler unregistered");
        }
        self
    }

    /// Remove every handler registered for `name`.
    pub fn unregister_all<'a>(&self, name: impl Into<EventName<'a>>) -> &Self {
        let name = self.resolve_name(name);
        let previous = self
            .state
            .lock()
            .named
            .get_mut(&name)
            .map(std::mem::take);
        drop(previous);
        self
    }

    fn insert(&self, name: String, handler: &Handler<P>, once: bool) {
        #[cfg(feature = "tracing")]
        tracing::trace!(event = %name, handler = ?handler.id(), once, "handler registered");

        self.state
            .lock()
            .named
            .entry(name)
            .or_default()
            .entry(handler.id())
            .and_modify(|entry| entry.once |= once)
            .or_insert_with(|| Entry::new(handler, once));
    }

    // ------------------------------------------------------------------
    // Universal handlers
    // ------------------------------------------------------------------

    /// Add a handler that observes every emission.
    pub fn register_universal(&self, handler: &UniversalHandler<P>) -> &Self {
        self.state
            .lock()
            .universal
            .entry(handler.id())
            .or_insert_with(|| handler.clone());
        self
    }

    /// Remove a universal handler. Absent handlers are ignored.
    pub fn unregister_universal(&self, handler: &UniversalHandler<P>) -> &Self {
        let removed = self.state.lock().universal.shift_remove(&handler.id());
        drop(removed);
        self
    }

    /// Drop all named and universal handlers.
    pub fn clear(&self) -> &Self {
        let previous = std::mem::take(&mut *self.state.lock());
        drop(previous);
        self
    }

    // ------------------------------------------------------------------
    // Emission
    // ------------------------------------------------------------------

    /// Notify universal handlers with `name`, then every handler registered
    /// under the prefixed form of `name`.
    ///
    /// The prefix is always applied here, independent of `auto_prefix`.
    /// The first handler error aborts the pass and is returned unchanged;
    /// a panicking handler unwinds through this call.
    pub fn emit(&self, name: &str, payload: &P) -> Result<&Self, HandlerError> {
        let resolved = self.resolve_name(EventName::prefixed(name));

        let universal = self.universal_snapshot();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            event = %name,
            resolved = %resolved,
            universal = universal.len(),
            "emitting event"
        );

        for handler in universal {
            if !self.is_universal(handler.id()) {
                continue;
            }
            handler.call(name, payload)?;
        }

        for handler in self.named_snapshot(&resolved) {
            let Some(once) = self.claim(&resolved, handler.id()) else {
                continue;
            };
            let _retire = once.then(|| Retire {
                dispatcher: self,
                name: &resolved,
                id: handler.id(),
            });
            handler.call(payload)?;
        }

        Ok(self)
    }

    fn universal_snapshot(&self) -> Vec<UniversalHandler<P>> {
        self.state.lock().universal.values().cloned().collect()
    }

    fn named_snapshot(&self, name: &str) -> Vec<Handler<P>> {
        self.state
            .lock()
            .named
            .get(name)
            .map(|set| set.values().map(|entry| entry.handler.clone()).collect())
            .unwrap_or_default()
    }

    fn is_universal(&self, id: HandlerId) -> bool {
        self.state.lock().universal.contains_key(&id)
    }

    /// Whether the handler may run now, and if so whether it is single-shot.
    ///
    /// `None` when the handler is no longer registered under `name`, or when
    /// it is single-shot and another emission has already claimed it.
    fn claim(&self, name: &str, id: HandlerId) -> Option<bool> {
        let mut state = self.state.lock();
        let entry = state.named.get_mut(name)?.get_mut(&id)?;
        if entry.once {
            if entry.firing {
                return None;
            }
            entry.firing = true;
        }
        Some(entry.once)
    }

    fn retire(&self, name: &str, id: HandlerId) {
        let removed = {
            let mut state = self.state.lock();
            let Some(set) = state.named.get_mut(name) else {
                return;
            };
            // Re-registered as exclusive while running: no longer single-shot.
            if !set.get(&id).is_some_and(|entry| entry.once) {
                return;
            }
            set.shift_remove(&id)
        };
        drop(removed);

        #[cfg(feature = "tracing")]
        tracing::trace!(event = %name, handler = ?id, "single-shot handler retired");
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Number of handlers registered for `name`.
    pub fn listener_count<'a>(&self, name: impl Into<EventName<'a>>) -> usize {
        let name = self.resolve_name(name);
        self.state.lock().named.get(&name).map_or(0, |set| set.len())
    }

    /// Whether any handler is registered for `name`.
    pub fn has_listeners<'a>(&self, name: impl Into<EventName<'a>>) -> bool {
        self.listener_count(name) > 0
    }

    /// Resolved names with at least one handler, in first registration order.
    pub fn event_names(&self) -> Vec<String> {
        self.state
            .lock()
            .named
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Number of universal handlers.
    pub fn universal_count(&self) -> usize {
        self.state.lock().universal.len()
    }
}

/// Retires a claimed single-shot handler when its call ends, including by
/// error return or unwinding.
struct Retire<'d, P: Payload> {
    dispatcher: &'d Dispatcher<P>,
    name: &'d str,
    id: HandlerId,
}

impl<P: Payload> Drop for Retire<'_, P> {
    fn drop(&mut self) {
        self.dispatcher.retire(self.name, self.id);
    }
}

impl<P: Payload> Default for Dispatcher<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Payload> fmt::Debug for Dispatcher<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("events", &state.named.len())
            .field("universal", &state.universal.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    fn counting(count: &Arc<AtomicUsize>) -> Handler<u32> {
        let count = count.clone();
        Handler::new(move |_: &u32| {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_register_and_emit() {
        let count = Arc::new(AtomicUsize::new(0));
        let dispatcher = Dispatcher::new();
        dispatcher.register("tick", &counting(&count));

        dispatcher.emit("tick", &1).unwrap();
        dispatcher.emit("tock", &1).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_duplicate_registration_is_ignored() {
        let count = Arc::new(AtomicUsize::new(0));
        let handler = counting(&count);
        let dispatcher = Dispatcher::new();
        dispatcher.register("tick", &handler).register("tick", &handler);

        dispatcher.emit("tick", &1).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(dispatcher.listener_count("tick"), 1);
    }

    #[test]
    fn test_once_retires_after_first_call() {
        let count = Arc::new(AtomicUsize::new(0));
        let dispatcher = Dispatcher::new();
        dispatcher.register_once("tick", &counting(&count));

        dispatcher.emit("tick", &1).unwrap().emit("tick", &2).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(dispatcher.listener_count("tick"), 0);
    }

    #[test]
    fn test_plain_register_keeps_once_mark() {
        let count = Arc::new(AtomicUsize::new(0));
        let handler = counting(&count);
        let dispatcher = Dispatcher::new();
        dispatcher
            .register_once("tick", &handler)
            .register("tick", &handler);

        dispatcher.emit("tick", &1).unwrap().emit("tick", &1).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_exclusive_clears_once_marks() {
        let count = Arc::new(AtomicUsize::new(0));
        let handler = counting(&count);
        let dispatcher = Dispatcher::new();
        dispatcher
            .register_once("tick", &handler)
            .register_exclusive("tick", &handler);

        dispatcher.emit("tick", &1).unwrap().emit("tick", &1).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_emptied_names_are_not_listed() {
        let handler = Handler::new(|_: &u32| {});
        let dispatcher = Dispatcher::new();
        dispatcher
            .register("a", &handler)
            .register("b", &handler)
            .unregister("a", &handler);

        assert_eq!(dispatcher.event_names(), vec!["b".to_string()]);
        assert!(!dispatcher.has_listeners("a"));
    }

    #[test]
    fn test_shared_across_threads() {
        let count = Arc::new(AtomicUsize::new(0));
        let dispatcher = Dispatcher::new();
        dispatcher.register("tick", &counting(&count));

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for n in 0..25 {
                        dispatcher.emit("tick", &n).unwrap();
                    }
                });
            }
        });

        assert_eq!(count.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn test_once_fires_once_under_concurrent_emit() {
        let count = Arc::new(AtomicUsize::new(0));
        let hits = count.clone();
        let slow = Handler::new(move |_: &u32| {
            hits.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(200));
        });

        let dispatcher = Dispatcher::new();
        dispatcher.register_once("x", &slow);

        std::thread::scope(|s| {
            s.spawn(|| dispatcher.emit("x", &1).map(|_| ()));
            std::thread::sleep(Duration::from_millis(50));
            s.spawn(|| dispatcher.emit("x", &2).map(|_| ()));
        });

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(dispatcher.listener_count("x"), 0);
    }

    #[test]
    fn test_panicking_once_handler_is_retired() {
        let dispatcher = Dispatcher::new();
        let fragile = Handler::new(|n: &u32| {
            if *n == 0 {
                panic!("refused zero");
            }
        });
        dispatcher.register_once("x", &fragile);

        let unwound = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = dispatcher.emit("x", &0);
        }));

        assert!(unwound.is_err());
        assert_eq!(dispatcher.listener_count("x"), 0);
    }

    #[test]
    fn test_clear_drops_everything() {
        let dispatcher = Dispatcher::<u32>::new();
        dispatcher
            .register("a", &Handler::new(|_: &u32| {}))
            .register_universal(&UniversalHandler::new(|_: &str, _: &u32| {}))
            .clear();

        assert!(dispatcher.event_names().is_empty());
        assert_eq!(dispatcher.universal_count(), 0);
    }
}
