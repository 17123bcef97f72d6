//! Per-key memoization of resolved handler bundles.

use crate::bind::BindingSource;
use crate::core::{BindingMask, HandlerBundle, StateKey};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Lazily built map of state key to resolved bundle.
///
/// Entries are created on first visit to a key and never evicted except
/// by an explicit [`clear`](BundleCache::clear). A cached bundle is
/// returned unchanged on every later visit: changes to the mask or to the
/// binding table after the first build are deliberately not picked up.
pub(crate) struct BundleCache<K: StateKey, O> {
    entries: BTreeMap<K, Arc<HandlerBundle<O>>>,
}

impl<K: StateKey, O> BundleCache<K, O> {
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Return the bundle for `key`, building and inserting it on miss.
    pub(crate) fn get_or_create(
        &mut self,
        key: &K,
        mask: BindingMask,
        source: &dyn BindingSource<K, O>,
    ) -> Arc<HandlerBundle<O>> {
        if let Some(bundle) = self.entries.get(key) {
            return Arc::clone(bundle);
        }

        debug!(key = key.name(), ?mask, "building handler bundle");
        let bundle = Arc::new(HandlerBundle::build(key, mask, source));
        self.entries.insert(key.clone(), Arc::clone(&bundle));
        bundle
    }

    /// Drop every cached bundle. Later lookups rebuild from scratch.
    pub(crate) fn clear(&mut self) {
        debug!(entries = self.entries.len(), "clearing bundle cache");
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::Bindings;
    use crate::core::{Binding, Slot};
    use crate::state_key;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc as StdArc;

    state_key! {
        enum TestKey {
            Idle,
            Run,
        }
    }

    struct Owner;

    /// Binding source wrapper counting resolver calls.
    struct CountingSource {
        inner: Bindings<TestKey, Owner>,
        resolves: StdArc<AtomicUsize>,
    }

    impl BindingSource<TestKey, Owner> for CountingSource {
        fn resolve(&self, key: &TestKey, slot: Slot) -> Option<Binding<Owner>> {
            self.resolves.fetch_add(1, Ordering::Relaxed);
            self.inner.resolve(key, slot)
        }
    }

    #[test]
    fn hit_returns_the_identical_bundle_instance() {
        let source = Bindings::new().on_enter(TestKey::Idle, |_: &mut Owner| {});
        let mut cache = BundleCache::new();

        let first = cache.get_or_create(&TestKey::Idle, BindingMask::default(), &source);
        let second = cache.get_or_create(&TestKey::Idle, BindingMask::default(), &source);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn resolution_happens_once_per_key_per_cache_lifetime() {
        let resolves = StdArc::new(AtomicUsize::new(0));
        let source = CountingSource {
            inner: Bindings::new(),
            resolves: StdArc::clone(&resolves),
        };
        let mut cache = BundleCache::new();

        cache.get_or_create(&TestKey::Idle, BindingMask::default(), &source);
        let after_first = resolves.load(Ordering::Relaxed);
        assert!(after_first > 0);

        cache.get_or_create(&TestKey::Idle, BindingMask::default(), &source);
        assert_eq!(resolves.load(Ordering::Relaxed), after_first);

        cache.get_or_create(&TestKey::Run, BindingMask::default(), &source);
        assert_eq!(resolves.load(Ordering::Relaxed), after_first * 2);
    }

    #[test]
    fn clear_forces_a_fresh_resolution() {
        let resolves = StdArc::new(AtomicUsize::new(0));
        let source = CountingSource {
            inner: Bindings::new(),
            resolves: StdArc::clone(&resolves),
        };
        let mut cache = BundleCache::new();

        cache.get_or_create(&TestKey::Idle, BindingMask::default(), &source);
        let after_first = resolves.load(Ordering::Relaxed);

        cache.clear();
        assert_eq!(cache.len(), 0);

        cache.get_or_create(&TestKey::Idle, BindingMask::default(), &source);
        assert_eq!(resolves.load(Ordering::Relaxed), after_first * 2);
    }
}
