//! CLI tools for noomer families declared in JSON files.
#![allow(missing_docs)]
mod config;
mod invoke;

#[cfg(test)]
mod tests;

pub use config::{
    decode_json, to_value, Coordinate, FamilyConfig, KeyScopeConfig, PayloadKind, VariantConfig,
};
pub use invoke::{Invocation, Session};
