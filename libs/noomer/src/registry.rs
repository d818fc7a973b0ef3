//! Shared instance cache of a family.
use std::sync::Arc;

use crate::{
    descriptor::{Effective, VariantId},
    Cache, Descriptor, Instance, KeyScope,
};

#[derive(Debug, PartialEq, Eq, Hash)]
struct Key {
    /// Set iff the family caches per variant.
    variant: Option<VariantId>,
    effective: Effective,
}

/// Cache of all instances of one family. Owned by the `Family`.
#[derive(Debug)]
pub(crate) struct Registry {
    scope: KeyScope,
    instances: Cache<Key, Arc<Instance>>,
}

impl Registry {
    pub(crate) fn new(scope: KeyScope) -> Self {
        Self {
            scope,
            instances: Cache::new(),
        }
    }

    /// Returns the instance for `effective`, constructing it on first use.
    pub(crate) fn fetch(&self, descriptor: &Arc<Descriptor>, effective: Effective) -> Arc<Instance> {
        let key = Key {
            variant: match self.scope {
                KeyScope::Variant => Some(descriptor.id()),
                KeyScope::Family => None,
            },
            effective: effective.clone(),
        };
        let mut fresh = false;
        let instance = self.instances.fetch(key, || {
            fresh = true;
            Arc::new(Instance::new(descriptor.clone(), effective.into_value()))
        });
        if fresh {
            tracing::trace!("{descriptor}: cached {instance:?}");
        } else {
            tracing::trace!("{descriptor}: reused {instance:?}");
        }
        if !instance.is(descriptor) {
            tracing::warn!("{descriptor}: key collides with {instance:?}");
        }
        instance
    }

    /// Number of distinct instances constructed so far.
    pub(crate) fn len(&self) -> usize {
        self.instances.len()
    }
}
