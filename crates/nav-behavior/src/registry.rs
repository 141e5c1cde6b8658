//! String-keyed discovery of modulation types.

use rustc_hash::FxHashMap;

use crate::{BehaviorError, BehaviorResult, Modulation};

type Factory = Box<dyn Fn() -> Box<dyn Modulation>>;

/// Name-to-factory map for modulation types.
///
/// Populated once at startup by whoever links the concrete modulation
/// crates; hosts that configure agents from text (scenario files, CLI) look
/// types up here by name.  There is no global instance and no reflective
/// machinery — the registry is a value the host owns and threads around.
///
/// ```rust,ignore
/// let mut registry = ModulationRegistry::new();
/// registry.register("FollowLeader", || Box::new(FollowLeaderModulation::new()))?;
/// let modulation = registry.create("FollowLeader")?;
/// ```
#[derive(Default)]
pub struct ModulationRegistry {
    factories: FxHashMap<&'static str, Factory>,
}

impl ModulationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `name`.
    ///
    /// Re-registering a name is a configuration error: two crates claiming
    /// the same name would make text-driven setup ambiguous.
    pub fn register<F>(&mut self, name: &'static str, factory: F) -> BehaviorResult<()>
    where
        F: Fn() -> Box<dyn Modulation> + 'static,
    {
        if self.factories.contains_key(name) {
            return Err(BehaviorError::DuplicateModulation(name.to_owned()));
        }
        self.factories.insert(name, Box::new(factory));
        Ok(())
    }

    /// Instantiate the modulation type registered under `name`.
    pub fn create(&self, name: &str) -> BehaviorResult<Box<dyn Modulation>> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| BehaviorError::UnknownModulation(name.to_owned()))
    }

    /// All registered type names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }
}
