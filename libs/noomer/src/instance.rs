//! Constructed variant instances.
use std::{any::Any, fmt, sync::Arc};

use crate::{Descriptor, Family, Value};

/// Immutable instance of a variant.
///
/// Instances are only handed out by a [`Family`], as `Arc<Instance>`; equal
/// constructions share one allocation, so `Arc::ptr_eq` is the identity check.
pub struct Instance {
    descriptor: Arc<Descriptor>,
    value: Option<Value>,
}

impl Instance {
    pub(crate) fn new(descriptor: Arc<Descriptor>, value: Option<Value>) -> Self {
        Self { descriptor, value }
    }

    /// Variant this is an instance of.
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Name of the variant.
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// Associated value: the payload, or the discriminator.
    /// `None` for unit variants.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Associated value as a `T`, if it is one.
    pub fn value_as<T: Any>(&self) -> Option<&T> {
        self.value.as_ref()?.downcast_ref()
    }

    /// Whether this is an instance of the `variant`.
    pub fn is(&self, variant: &Descriptor) -> bool {
        self.descriptor.id() == variant.id()
    }

    /// Whether this is an instance of the variant named `name`.
    pub fn is_named(&self, name: &str) -> bool {
        self.descriptor.name() == name
    }

    /// Whether this is an instance of a variant of `family`.
    pub fn belongs_to(&self, family: &Family) -> bool {
        self.descriptor.id().family == family.id()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "{}({v:?})", self.descriptor),
            None => write!(f, "{}", self.descriptor),
        }
    }
}
