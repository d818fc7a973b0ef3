//! Type-erased associated values.
use std::{
    any::{self, Any, TypeId},
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

#[cfg(test)]
mod tests;

/// Object-safe view of a value that can be carried by a variant.
///
/// Implemented for every `'static` type with value equality and a stable hash.
/// Equality between payloads of different concrete types is always `false`.
pub trait Payload: Any + fmt::Debug + Send + Sync {
    /// Upcasts to `Any`, for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;
    /// Compares with another payload by the concrete type's `Eq`.
    fn eq_payload(&self, other: &dyn Payload) -> bool;
    /// Feeds the concrete type's `Hash` into `state`.
    fn hash_payload(&self, state: &mut dyn Hasher);
    /// Name of the concrete type, for error messages.
    fn payload_type(&self) -> PayloadType;
}

impl<T: Any + fmt::Debug + Eq + Hash + Send + Sync> Payload for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_payload(&self, other: &dyn Payload) -> bool {
        other.as_any().downcast_ref::<T>() == Some(self)
    }

    fn hash_payload(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }

    fn payload_type(&self) -> PayloadType {
        PayloadType::of::<T>()
    }
}

/// A type captured as a value: the required payload type of a variant.
#[derive(Clone, Copy)]
pub struct PayloadType {
    id: TypeId,
    name: &'static str,
}

impl PayloadType {
    /// Captures `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    /// Fully qualified name of the type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this is `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for PayloadType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PayloadType {}

impl fmt::Debug for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Immutable, cheaply clonable associated value of any [`Payload`] type.
///
/// Two values are equal iff they hold the same concrete type and the
/// contents are equal by that type's `Eq`; hashing is consistent with that.
#[derive(Clone)]
pub struct Value(Arc<dyn Payload>);

impl Value {
    /// Wraps `payload`. A `Value` is returned as is, never wrapped twice.
    pub fn new<T: Payload>(payload: T) -> Self {
        if let Some(v) = (&payload as &dyn Any).downcast_ref::<Value>() {
            return v.clone();
        }
        Self(Arc::new(payload))
    }

    /// Type of the wrapped payload.
    pub fn payload_type(&self) -> PayloadType {
        self.0.payload_type()
    }

    /// Whether the wrapped payload is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.as_any().is::<T>()
    }

    /// Borrows the wrapped payload as a `T`, if it is one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_payload(&*other.0)
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.payload_type().id.hash(state);
        self.0.hash_payload(state);
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::new(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::new(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::new(b)
    }
}
