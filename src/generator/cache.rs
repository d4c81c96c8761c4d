/*
cache.rs

Copyright 2025 Hervé Quatremain

This file is part of X-Ray.

X-Ray is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

X-Ray is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
X-Ray. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Cache of the generated rulesets.
//!
//! Generating a ruleset is costly, and all the modules that share a seed must share the same
//! rules. [`RuleCache`] builds each ruleset once, on first request, and then returns the same
//! [`Arc`] to every caller.
//!
//! The seed map is protected by a mutex. Each seed owns its own slot, also behind a mutex, so
//! that concurrent requests for the same seed wait for a single build, while requests for
//! different seeds build in parallel.
//!
//! A cache holds the rulesets of a single generator configuration, given when the cache is
//! created (see [`RuleCache::with_config`]). The X-Ray rules have no parameters.

use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::config::{ConfigError, GeneratorConfig};
use super::not_xray_rules::{NotXRayGenerator, NotXRayRules};
use super::xray_rules::{self, XRayRules};

/// Slot of a seed: empty until the ruleset is built.
type Slot<T> = Arc<Mutex<Option<Arc<T>>>>;

/// Seed-keyed cache of rulesets.
#[derive(Debug)]
pub struct RuleCache<T> {
    /// Generator parameters of all the cached rulesets.
    config: GeneratorConfig,

    /// Ruleset slots by seed.
    slots: Mutex<HashMap<i32, Slot<T>>>,
}

impl<T> Default for RuleCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RuleCache<T> {
    /// Create an empty [`RuleCache`] object for the default configuration.
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Create an empty [`RuleCache`] object for the given configuration.
    ///
    /// # Errors
    ///
    /// The method returns an error if the configuration is invalid.
    pub fn with_config(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            slots: Mutex::new(HashMap::new()),
        })
    }

    /// Generator parameters of the cached rulesets.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Lock the seed map. The map only ever holds fully inserted slots, so a poisoned lock is
    /// still consistent.
    fn lock_slots(&self) -> MutexGuard<'_, HashMap<i32, Slot<T>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the ruleset for the given seed, building it with `build` if needed.
    ///
    /// `build` runs at most once per seed, unless it fails: a failed build does not keep the
    /// seed in the cache, and the next request tries again.
    ///
    /// # Errors
    ///
    /// The method returns the error of the `build` function.
    pub fn get_or_try_build<F>(&self, seed: i32, build: F) -> Result<Arc<T>, ConfigError>
    where
        F: FnOnce() -> Result<T, ConfigError>,
    {
        let slot: Slot<T> = Arc::clone(self.lock_slots().entry(seed).or_default());

        // Only the slot stays locked during the build
        let mut rules = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(r) = rules.as_ref() {
            debug!("Rules for seed {seed} found in the cache");
            return Ok(Arc::clone(r));
        }

        debug!("Building rules for seed {seed}");
        let built: Arc<T> = match build() {
            Ok(r) => Arc::new(r),
            Err(e) => {
                drop(rules);
                self.forget_empty_slot(seed, &slot);
                return Err(e);
            }
        };
        *rules = Some(Arc::clone(&built));
        Ok(built)
    }

    /// Remove the slot of a failed build from the seed map.
    ///
    /// The slot stays if another request is building into it, or already did.
    fn forget_empty_slot(&self, seed: i32, slot: &Slot<T>) {
        let mut slots = self.lock_slots();
        let empty: bool = slots.get(&seed).is_some_and(|s| {
            Arc::ptr_eq(s, slot) && s.try_lock().map(|r| r.is_none()).unwrap_or(false)
        });
        if empty {
            slots.remove(&seed);
        }
    }

    /// Return the ruleset for the given seed, if it has been built.
    pub fn get(&self, seed: i32) -> Option<Arc<T>> {
        let slot: Slot<T> = Arc::clone(self.lock_slots().get(&seed)?);
        let rules = slot.lock().unwrap_or_else(PoisonError::into_inner);
        rules.as_ref().map(Arc::clone)
    }

    /// Number of seeds with a built ruleset.
    pub fn len(&self) -> usize {
        let slots: Vec<Slot<T>> = self.lock_slots().values().cloned().collect();
        slots
            .iter()
            .filter(|s| s.lock().unwrap_or_else(PoisonError::into_inner).is_some())
            .count()
    }

    /// Whether no ruleset has been built yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RuleCache<NotXRayRules> {
    /// Return the Not X-Ray ruleset for the given seed, with the configuration of the cache.
    ///
    /// # Errors
    ///
    /// The method returns an error for negative seeds.
    pub fn not_xray(&self, seed: i32) -> Result<Arc<NotXRayRules>, ConfigError> {
        self.get_or_try_build(seed, || {
            NotXRayGenerator::new(self.config.clone())?.generate(seed)
        })
    }
}

impl RuleCache<XRayRules> {
    /// Return the X-Ray ruleset for the given seed.
    ///
    /// # Errors
    ///
    /// The method returns an error for negative seeds.
    pub fn xray(&self, seed: i32) -> Result<Arc<XRayRules>, ConfigError> {
        self.get_or_try_build(seed, || xray_rules::generate(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn same_seed_returns_the_same_object() {
        let cache: RuleCache<NotXRayRules> = RuleCache::new();

        let first: Arc<NotXRayRules> = cache.not_xray(42).expect("valid seed");
        let second: Arc<NotXRayRules> = cache.not_xray(42).expect("valid seed");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        let other: Arc<NotXRayRules> = cache.not_xray(43).expect("valid seed");
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn rulesets_follow_the_cache_configuration() {
        let small: GeneratorConfig = GeneratorConfig {
            num_tables: 2,
            ..GeneratorConfig::default()
        };
        let default_cache: RuleCache<NotXRayRules> = RuleCache::new();
        let small_cache: RuleCache<NotXRayRules> =
            RuleCache::with_config(small.clone()).expect("valid configuration");
        assert_eq!(small_cache.config(), &small);

        let rules: Arc<NotXRayRules> = default_cache.not_xray(5).expect("valid seed");
        let small_rules: Arc<NotXRayRules> = small_cache.not_xray(5).expect("valid seed");
        assert_eq!(rules.tables.len(), 8);
        assert_eq!(small_rules.tables.len(), 2);
        assert_eq!(small_rules.mazes.len(), 2);
        assert!(!Arc::ptr_eq(&rules, &small_rules));
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let config: GeneratorConfig = GeneratorConfig {
            num_tables: 0,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            RuleCache::<NotXRayRules>::with_config(config),
            Err(ConfigError::NoTables)
        ));
    }

    #[test]
    fn failed_build_is_not_cached() {
        let cache: RuleCache<XRayRules> = RuleCache::new();
        assert_eq!(cache.xray(-1), Err(ConfigError::InvalidSeed(-1)));
        assert!(cache.get(-1).is_none());
        assert!(cache.is_empty());
        assert!(cache.lock_slots().is_empty());

        let rules: Arc<XRayRules> = cache
            .get_or_try_build(-1, || xray_rules::generate(5))
            .expect("valid build");
        assert_eq!(rules.seed, 5);
        assert!(cache.get(-1).is_some());
    }

    #[test]
    fn concurrent_requests_build_once() {
        let cache: Arc<RuleCache<XRayRules>> = Arc::new(RuleCache::new());
        let builds: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));

        let handles: Vec<thread::JoinHandle<Arc<XRayRules>>> = (0..8)
            .map(|_| {
                let cache: Arc<RuleCache<XRayRules>> = Arc::clone(&cache);
                let builds: Arc<AtomicUsize> = Arc::clone(&builds);
                thread::spawn(move || {
                    cache
                        .get_or_try_build(7, || {
                            builds.fetch_add(1, Ordering::SeqCst);
                            xray_rules::generate(7)
                        })
                        .expect("valid seed")
                })
            })
            .collect();

        let results: Vec<Arc<XRayRules>> = handles
            .into_iter()
            .map(|h| h.join().expect("thread completed"))
            .collect();
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        for r in &results {
            assert!(Arc::ptr_eq(r, &results[0]));
        }
    }
}
