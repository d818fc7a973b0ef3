//! Errors returned by variant lookup and construction.
use crate::Descriptor;

/// Error returned when a variant cannot be constructed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The variant requires a value of another type (or a value at all).
    /// Nothing has been constructed or cached.
    #[error("{variant} expects {expected}, got {found}")]
    TypeMismatch {
        /// Qualified name of the variant, `Family::Variant`.
        variant: String,
        /// Type the variant was declared with.
        expected: &'static str,
        /// Type that was supplied.
        found: &'static str,
    },
    /// The family declares no variant with this name.
    #[error("{family} has no variant named {name:?}")]
    UnknownVariant {
        /// Name of the family.
        family: String,
        /// Requested name.
        name: String,
    },
}

impl Error {
    pub(crate) fn type_mismatch(
        variant: &Descriptor,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            variant: variant.to_string(),
            expected,
            found,
        }
    }
}
