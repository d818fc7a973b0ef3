//! Closed families of variants ("enum cases") with cached instances.
//!
//! A [`Family`] is declared once through a [`FamilyBuilder`] chain. Each variant
//! either carries no value, carries a value of one fixed type, or carries a fixed
//! discriminator supplied at declaration time. Constructing a variant twice from
//! equal inputs returns the same [`Instance`] (compare with `Arc::ptr_eq`), and
//! constructing a typed variant from a value of another type fails with
//! [`Error::TypeMismatch`].
//!
//! ```
//! use noomer::{Family, Value};
//!
//! let web_event = Family::builder("WebEvent")
//!     .unit("PageLoad")
//!     .typed::<String>("Paste")
//!     .build();
//!
//! let paste = web_event.constructor::<String>("Paste").unwrap();
//! let a = paste.call("copy".to_owned());
//! let b = paste.call("copy".to_owned());
//! assert!(std::sync::Arc::ptr_eq(&a, &b));
//!
//! assert!(web_event.construct("Paste", Some(Value::new(7_i64))).is_err());
//! ```

mod cache;
mod config;
mod descriptor;
mod error;
mod family;
mod instance;
mod registry;
pub mod testonly;
mod value;

pub use cache::Cache;
pub use config::{Config, KeyScope};
pub use descriptor::{Descriptor, Effective, Kind, VariantId};
pub use error::Error;
pub use family::{Constructor, Family, FamilyBuilder, FamilyId, Nullary};
pub use instance::Instance;
pub use value::{Payload, PayloadType, Value};
