//! Region event dispatch
//!
//! Scripted handlers register for a named region's hooks at load time.
//! Dispatch consults the table in a fixed priority order (object-specific,
//! then room, then global) and fires the first handler found, mirroring
//! the fallback chain content scripts expect.

use std::collections::HashMap;

use log::trace;

use crate::character::CharacterId;

/// Which occupancy edge a handler is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionHook {
    /// Enter on the blocking pass
    Enter,
    /// Exit on the blocking pass
    Exit,
    /// Enter on the background pass
    EnterBackground,
    /// Exit on the background pass
    ExitBackground,
}

/// Registration scope, also the dispatch priority (object first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HandlerScope {
    Object,
    Room,
    Global,
}

impl HandlerScope {
    const PRIORITY: [HandlerScope; 3] = [Self::Object, Self::Room, Self::Global];
}

/// The payload handed to a region handler.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionEvent {
    pub region: String,
    pub character: CharacterId,
    pub hook: RegionHook,
}

type Handler = Box<dyn Fn(&RegionEvent) + Send + Sync>;

/// Explicit registration table: (region, hook, scope) to handler.
/// One handler per slot; re-registering a slot replaces it.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: HashMap<(String, RegionHook, HandlerScope), Handler>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a region hook at a scope.
    pub fn register<F>(&mut self, region: impl Into<String>, hook: RegionHook, scope: HandlerScope, handler: F)
    where
        F: Fn(&RegionEvent) + Send + Sync + 'static,
    {
        self.handlers
            .insert((region.into(), hook, scope), Box::new(handler));
    }

    /// Remove a registration. Returns whether one existed.
    pub fn unregister(&mut self, region: &str, hook: RegionHook, scope: HandlerScope) -> bool {
        self.handlers
            .remove(&(region.to_string(), hook, scope))
            .is_some()
    }

    pub fn has_handler(&self, region: &str, hook: RegionHook) -> bool {
        HandlerScope::PRIORITY
            .iter()
            .any(|&scope| self.handlers.contains_key(&(region.to_string(), hook, scope)))
    }

    /// Fire the highest-priority handler registered for the event's region
    /// and hook. Returns whether any handler ran.
    pub fn dispatch(&self, event: &RegionEvent) -> bool {
        for &scope in &HandlerScope::PRIORITY {
            let key = (event.region.clone(), event.hook, scope);
            if let Some(handler) = self.handlers.get(&key) {
                trace!(
                    "dispatching {:?} for region '{}' at {:?} scope",
                    event.hook,
                    event.region,
                    scope
                );
                handler(event);
                return true;
            }
        }
        false
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("registrations", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn event(region: &str, hook: RegionHook) -> RegionEvent {
        RegionEvent {
            region: region.to_string(),
            character: CharacterId(0),
            hook,
        }
    }

    #[test]
    fn test_dispatch_calls_handler() {
        let count = Arc::new(AtomicU32::new(0));
        let count_clone = count.clone();

        let mut dispatcher = EventDispatcher::new();
        dispatcher.register("swamp", RegionHook::Enter, HandlerScope::Room, move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(dispatcher.dispatch(&event("swamp", RegionHook::Enter)));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // Different hook or region: nothing fires
        assert!(!dispatcher.dispatch(&event("swamp", RegionHook::Exit)));
        assert!(!dispatcher.dispatch(&event("cave", RegionHook::Enter)));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_object_scope_shadows_room_and_global() {
        let hits = Arc::new(AtomicU32::new(0));

        let mut dispatcher = EventDispatcher::new();
        for (scope, marker) in [
            (HandlerScope::Global, 100),
            (HandlerScope::Room, 10),
            (HandlerScope::Object, 1),
        ] {
            let hits_clone = hits.clone();
            dispatcher.register("door", RegionHook::Enter, scope, move |_| {
                hits_clone.fetch_add(marker, Ordering::SeqCst);
            });
        }

        assert!(dispatcher.dispatch(&event("door", RegionHook::Enter)));
        // Only the object-scope handler ran
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fallback_to_global() {
        let hits = Arc::new(AtomicU32::new(0));
        let hits_clone = hits.clone();

        let mut dispatcher = EventDispatcher::new();
        dispatcher.register("door", RegionHook::Exit, HandlerScope::Global, move |_| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(dispatcher.dispatch(&event("door", RegionHook::Exit)));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unregister() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register("door", RegionHook::Enter, HandlerScope::Room, |_| {});
        assert!(dispatcher.has_handler("door", RegionHook::Enter));
        assert!(dispatcher.unregister("door", RegionHook::Enter, HandlerScope::Room));
        assert!(!dispatcher.has_handler("door", RegionHook::Enter));
        assert!(!dispatcher.dispatch(&event("door", RegionHook::Enter)));
    }
}
