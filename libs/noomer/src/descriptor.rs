//! Per-variant metadata.
use std::fmt;

use crate::{
    family::FamilyId,
    value::{PayloadType, Value},
    Error,
};

/// Identity of a variant: the family it belongs to and its declaration index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VariantId {
    /// Family which declared the variant.
    pub family: FamilyId,
    /// Position of the variant in the declaration order.
    pub index: usize,
}

/// What a variant carries.
#[derive(Clone, Debug)]
pub enum Kind {
    /// No associated value. The variant has exactly one instance.
    Unit,
    /// An associated value of exactly this type, supplied on construction.
    /// Typed as `Value`, any payload is accepted.
    Typed(PayloadType),
    /// A fixed value supplied at declaration time.
    Discriminator(Value),
}

/// Value a construction resolves to. Doubles as the cache key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Effective {
    /// The variant itself; unit variants have no value.
    Variant(VariantId),
    /// The associated value (supplied or fixed).
    Value(Value),
}

impl Effective {
    /// The value to store in the instance.
    pub(crate) fn into_value(self) -> Option<Value> {
        match self {
            Self::Variant(_) => None,
            Self::Value(v) => Some(v),
        }
    }
}

/// Declared variant of a family.
#[derive(Debug)]
pub struct Descriptor {
    id: VariantId,
    family_name: String,
    name: String,
    kind: Kind,
}

impl Descriptor {
    pub(crate) fn new(id: VariantId, family_name: &str, name: &str, kind: Kind) -> Self {
        Self {
            id,
            family_name: family_name.to_owned(),
            name: name.to_owned(),
            kind,
        }
    }

    /// Identity of the variant.
    pub fn id(&self) -> VariantId {
        self.id
    }

    /// Name the variant was declared under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What the variant carries.
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Required payload type, for typed variants.
    pub fn payload_type(&self) -> Option<PayloadType> {
        match &self.kind {
            Kind::Typed(t) => Some(*t),
            _ => None,
        }
    }

    /// Fixed value, for discriminator variants.
    pub fn discriminator(&self) -> Option<&Value> {
        match &self.kind {
            Kind::Discriminator(v) => Some(v),
            _ => None,
        }
    }

    /// Whether construction requires a value.
    pub fn takes_value(&self) -> bool {
        matches!(self.kind, Kind::Typed(_))
    }

    /// Resolves the value a construction with `arg` stands for.
    ///
    /// Typed variants require `arg` to be of the declared type; nothing else is
    /// checked. Unit and discriminator variants ignore `arg`.
    pub fn effective_value(&self, arg: Option<Value>) -> Result<Effective, Error> {
        match &self.kind {
            Kind::Typed(want) => {
                let Some(arg) = arg else {
                    return Err(Error::type_mismatch(self, want.name(), "nothing"));
                };
                let got = arg.payload_type();
                // A variant typed as `Value` accepts any payload.
                if got != *want && !want.is::<Value>() {
                    return Err(Error::type_mismatch(self, want.name(), got.name()));
                }
                Ok(Effective::Value(arg))
            }
            Kind::Discriminator(d) => {
                if let Some(arg) = arg {
                    // TODO: reject arguments which don't match the discriminator's type.
                    tracing::debug!("{self}: ignoring argument {arg:?}, discriminator is {d:?}");
                }
                Ok(Effective::Value(d.clone()))
            }
            Kind::Unit => {
                if let Some(arg) = arg {
                    tracing::debug!("{self}: ignoring argument {arg:?}");
                }
                Ok(Effective::Variant(self.id))
            }
        }
    }

    /// Effective value of a construction without an argument.
    /// `None` for typed variants, which require one.
    pub(crate) fn nullary_value(&self) -> Option<Effective> {
        match &self.kind {
            Kind::Typed(_) => None,
            Kind::Discriminator(d) => Some(Effective::Value(d.clone())),
            Kind::Unit => Some(Effective::Variant(self.id)),
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.family_name, self.name)
    }
}
