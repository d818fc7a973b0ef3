//! Declaration of variant families and construction of their instances.
use std::{
    any::Any,
    collections::HashMap,
    fmt,
    marker::PhantomData,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use crate::{
    descriptor::{Effective, Kind, VariantId},
    registry::Registry,
    Config, Descriptor, Error, Instance, KeyScope, Payload, PayloadType, Value,
};


static NEXT_FAMILY_ID: AtomicU64 = AtomicU64::new(0);

/// Process-wide unique identity of a family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FamilyId(u64);

impl FamilyId {
    fn next() -> Self {
        Self(NEXT_FAMILY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Declaration phase of a [`Family`].
///
/// Variants and constants are declared by chaining; [`FamilyBuilder::build`]
/// ends the declaration phase.
#[derive(Debug)]
pub struct FamilyBuilder {
    id: FamilyId,
    name: String,
    config: Config,
    variants: Vec<Arc<Descriptor>>,
    by_name: HashMap<String, usize>,
    constants: HashMap<String, Value>,
}

impl FamilyBuilder {
    fn new(name: &str) -> Self {
        Self {
            id: FamilyId::next(),
            name: name.to_owned(),
            config: Config::default(),
            variants: vec![],
            by_name: HashMap::new(),
            constants: HashMap::new(),
        }
    }

    /// Sets the options of the family.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Declares a variant without an associated value.
    pub fn unit(self, name: &str) -> Self {
        self.variant(name, Kind::Unit)
    }

    /// Declares a variant carrying a value of type `T`.
    /// With `T = Value` the variant accepts a payload of any type.
    pub fn typed<T: Payload>(self, name: &str) -> Self {
        self.variant(name, Kind::Typed(PayloadType::of::<T>()))
    }

    /// Declares a variant carrying the fixed value `discriminator`.
    pub fn discriminator(self, name: &str, discriminator: impl Into<Value>) -> Self {
        self.variant(name, Kind::Discriminator(discriminator.into()))
    }

    /// Declares a variant of the given kind.
    /// Redeclaring a name is not supported: the last declaration takes the name.
    pub fn variant(mut self, name: &str, kind: Kind) -> Self {
        let id = VariantId {
            family: self.id,
            index: self.variants.len(),
        };
        let descriptor = Descriptor::new(id, &self.name, name, kind);
        tracing::debug!("declared {descriptor}: {:?}", descriptor.kind());
        if self.by_name.insert(name.to_owned(), id.index).is_some() {
            tracing::warn!("{descriptor} redeclared, previous declaration is shadowed");
        }
        self.variants.push(Arc::new(descriptor));
        self
    }

    /// Declares an ordinary constant. Constants are not variants and
    /// cannot be constructed.
    pub fn constant(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.constants.insert(name.to_owned(), value.into());
        self
    }

    /// Ends the declaration phase.
    pub fn build(self) -> Family {
        for name in self.constants.keys() {
            if self.by_name.contains_key(name) {
                tracing::warn!("{}: {name} is both a constant and a variant", self.name);
            }
        }
        if self.config.key_scope == KeyScope::Family {
            let mut seen: HashMap<&Value, &Descriptor> = HashMap::new();
            for d in &self.variants {
                let Some(v) = d.discriminator() else { continue };
                if let Some(prev) = seen.insert(v, &**d) {
                    tracing::warn!("{d} and {prev} share the discriminator {v:?}");
                }
            }
        }
        tracing::debug!(
            "{}: {} variants, {} constants, {:?}",
            self.name,
            self.variants.len(),
            self.constants.len(),
            self.config,
        );
        Family {
            registry: Registry::new(self.config.key_scope),
            id: self.id,
            name: self.name,
            variants: self.variants,
            by_name: self.by_name,
            constants: self.constants,
        }
    }
}

/// Closed set of variants sharing one instance cache.
#[derive(Debug)]
pub struct Family {
    id: FamilyId,
    name: String,
    variants: Vec<Arc<Descriptor>>,
    by_name: HashMap<String, usize>,
    constants: HashMap<String, Value>,
    registry: Registry,
}

impl Family {
    /// Starts declaring a family.
    pub fn builder(name: &str) -> FamilyBuilder {
        FamilyBuilder::new(name)
    }

    /// Identity of the family.
    pub fn id(&self) -> FamilyId {
        self.id
    }

    /// Name of the family.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared variants, in declaration order.
    pub fn variants(&self) -> impl Iterator<Item = &Descriptor> {
        self.variants.iter().map(|d| &**d)
    }

    /// Variant declared under `name`.
    pub fn descriptor(&self, name: &str) -> Option<&Descriptor> {
        self.by_name.get(name).map(|i| &*self.variants[*i])
    }

    fn lookup(&self, name: &str) -> Result<&Arc<Descriptor>, Error> {
        match self.by_name.get(name) {
            Some(i) => Ok(&self.variants[*i]),
            None => Err(Error::UnknownVariant {
                family: self.name.clone(),
                name: name.to_owned(),
            }),
        }
    }

    /// Constant declared under `name`.
    pub fn constant(&self, name: &str) -> Option<&Value> {
        self.constants.get(name)
    }

    /// Constant declared under `name`, if it is a `T`.
    pub fn constant_as<T: Any>(&self, name: &str) -> Option<&T> {
        self.constant(name)?.downcast_ref()
    }

    /// Whether `instance` is an instance of one of this family's variants.
    pub fn contains(&self, instance: &Instance) -> bool {
        instance.belongs_to(self)
    }

    /// Number of distinct instances constructed so far.
    pub fn cached(&self) -> usize {
        self.registry.len()
    }

    /// Constructs the variant `name` from an untyped argument.
    ///
    /// Fails with [`Error::TypeMismatch`] if the variant is typed and `arg` is
    /// missing or of another type. Unit and discriminator variants ignore `arg`.
    #[tracing::instrument(level = "trace", skip(self), fields(family = %self.name))]
    pub fn construct(&self, name: &str, arg: Option<Value>) -> Result<Arc<Instance>, Error> {
        let descriptor = self.lookup(name)?;
        let effective = descriptor.effective_value(arg)?;
        Ok(self.registry.fetch(descriptor, effective))
    }

    /// Typed constructor of the variant `name`, which must carry a `T`.
    pub fn constructor<T: Payload>(&self, name: &str) -> Result<Constructor<'_, T>, Error> {
        let descriptor = self.lookup(name)?;
        let want = PayloadType::of::<T>();
        match descriptor.payload_type() {
            Some(got) if got == want => Ok(Constructor {
                family: self,
                descriptor,
                _payload: PhantomData,
            }),
            Some(got) => Err(Error::type_mismatch(descriptor, got.name(), want.name())),
            None => Err(Error::type_mismatch(descriptor, "nothing", want.name())),
        }
    }

    /// Constructor of the unit or discriminator variant `name`.
    pub fn nullary(&self, name: &str) -> Result<Nullary<'_>, Error> {
        let descriptor = self.lookup(name)?;
        let Some(effective) = descriptor.nullary_value() else {
            let want = descriptor.payload_type().map_or("a value", |t| t.name());
            return Err(Error::type_mismatch(descriptor, want, "nothing"));
        };
        Ok(Nullary {
            family: self,
            descriptor,
            effective,
        })
    }
}

/// Construction entry point of a variant carrying a `T`.
pub struct Constructor<'a, T> {
    family: &'a Family,
    descriptor: &'a Arc<Descriptor>,
    _payload: PhantomData<fn(T)>,
}

impl<T> Clone for Constructor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Constructor<'_, T> {}

impl<T> fmt::Debug for Constructor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constructor({})", self.descriptor)
    }
}

impl<T: Payload> Constructor<'_, T> {
    /// Variant this constructs.
    pub fn descriptor(&self) -> &Descriptor {
        self.descriptor
    }

    /// Returns the instance carrying `value`; equal values share an instance.
    pub fn call(&self, value: T) -> Arc<Instance> {
        self.family
            .registry
            .fetch(self.descriptor, Effective::Value(Value::new(value)))
    }
}

/// Construction entry point of a unit or discriminator variant.
#[derive(Clone)]
pub struct Nullary<'a> {
    family: &'a Family,
    descriptor: &'a Arc<Descriptor>,
    effective: Effective,
}

impl fmt::Debug for Nullary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nullary({})", self.descriptor)
    }
}

impl Nullary<'_> {
    /// Variant this constructs.
    pub fn descriptor(&self) -> &Descriptor {
        self.descriptor
    }

    /// Returns the one instance of the variant.
    pub fn call(&self) -> Arc<Instance> {
        self.family
            .registry
            .fetch(self.descriptor, self.effective.clone())
    }
}
