//! Room behavior registry
//!
//! Rooms can carry a scripted behavior object whose implementation may be
//! replaced at runtime (live script iteration) while its data survives.
//! Behaviors are constructed through a name-keyed factory registry, and
//! state moves between old and new instances through an explicit
//! serialization contract rather than field reflection.

use std::collections::HashMap;

use log::info;
use serde_json::Value;

use crate::error::{Result, RoomError};

/// A scripted behavior attached to a room.
///
/// `save_state`/`load_state` define the hot-swap contract: whatever the
/// behavior returns from `save_state` must be accepted by `load_state` on
/// a freshly constructed instance of the replacement implementation.
pub trait RoomBehavior: Send {
    /// Registry name of this behavior's type.
    fn type_name(&self) -> &str;

    /// Serialize the fields that should survive a swap.
    fn save_state(&self) -> Result<Value>;

    /// Restore previously saved fields. Unknown fields should be ignored
    /// so old and new implementations can disagree on shape.
    fn load_state(&mut self, state: Value) -> Result<()>;
}

type BehaviorFactory = Box<dyn Fn() -> Box<dyn RoomBehavior> + Send + Sync>;

/// Name-keyed factory table for room behaviors.
#[derive(Default)]
pub struct BehaviorRegistry {
    factories: HashMap<String, BehaviorFactory>,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under a stable name. Re-registering a name
    /// replaces the factory, which is the normal path when a script is
    /// recompiled.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn RoomBehavior> + Send + Sync + 'static,
    {
        let name = name.into();
        info!("behavior '{}' registered", name);
        self.factories.insert(name, Box::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Construct a fresh behavior instance by name.
    pub fn create(&self, name: &str) -> Result<Box<dyn RoomBehavior>> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory()),
            None => Err(RoomError::BehaviorNotRegistered(name.to_string())),
        }
    }

    /// Replace a live behavior with a freshly constructed instance of
    /// `replacement`, carrying the old instance's saved state across.
    pub fn hot_swap(
        &self,
        old: &dyn RoomBehavior,
        replacement: &str,
    ) -> Result<Box<dyn RoomBehavior>> {
        let state = old.save_state()?;
        let mut fresh = self.create(replacement)?;
        fresh.load_state(state)?;
        info!(
            "behavior '{}' hot-swapped to '{}'",
            old.type_name(),
            replacement
        );
        Ok(fresh)
    }
}

impl std::fmt::Debug for BehaviorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorRegistry")
            .field("registered", &self.factories.len())
            .finish()
    }
}
