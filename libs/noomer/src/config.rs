//! Per-family options.

/// Key space in which a family's instances are cached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyScope {
    /// Keys are qualified by the variant, so different variants never share
    /// an instance, even when their values compare equal.
    #[default]
    Variant,
    /// All variants of the family share one key space. If two variants
    /// produce equal keys (equal payloads of the same type, or equal
    /// discriminators), whichever is constructed first is returned for both.
    Family,
}

/// Options of a family, fixed at declaration time.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Key space of the family's cache.
    pub key_scope: KeyScope,
}
