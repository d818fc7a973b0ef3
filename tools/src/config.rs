//! Family declaration file.
use anyhow::Context as _;
use noomer::{Config, Family, KeyScope, Kind, PayloadType, Value};
use std::{collections::BTreeMap, fs, path::Path};

/// Decodes a JSON document, rejecting trailing characters.
pub fn decode_json<T: serde::de::DeserializeOwned>(json: &str) -> anyhow::Result<T> {
    let mut d = serde_json::Deserializer::from_str(json);
    let p = T::deserialize(&mut d)?;
    d.end()?;
    Ok(p)
}

/// Point on a plane, the one structured payload type the file format knows.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Coordinate {
    pub x: i64,
    pub y: i64,
}

/// Payload types that can be declared in a file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    String,
    Integer,
    Boolean,
    Coordinate,
}

impl PayloadKind {
    fn payload_type(self) -> PayloadType {
        match self {
            Self::String => PayloadType::of::<String>(),
            Self::Integer => PayloadType::of::<i64>(),
            Self::Boolean => PayloadType::of::<bool>(),
            Self::Coordinate => PayloadType::of::<Coordinate>(),
        }
    }
}

/// `KeyScope` as spelled in a file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyScopeConfig {
    #[default]
    Variant,
    Family,
}

impl From<KeyScopeConfig> for KeyScope {
    fn from(scope: KeyScopeConfig) -> Self {
        match scope {
            KeyScopeConfig::Variant => Self::Variant,
            KeyScopeConfig::Family => Self::Family,
        }
    }
}

/// Declaration of a single variant. At most one of `payload` and
/// `discriminator` may be set; with neither, the variant is a unit variant.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantConfig {
    pub name: String,
    pub payload: Option<PayloadKind>,
    pub discriminator: Option<serde_json::Value>,
}

impl VariantConfig {
    fn kind(&self) -> anyhow::Result<Kind> {
        Ok(match (&self.payload, &self.discriminator) {
            (None, None) => Kind::Unit,
            (Some(p), None) => Kind::Typed(p.payload_type()),
            (None, Some(d)) => Kind::Discriminator(to_value(d).context("discriminator")?),
            (Some(_), Some(_)) => {
                anyhow::bail!("payload and discriminator are mutually exclusive")
            }
        })
    }
}

/// Declaration of a family, as read from a JSON file.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilyConfig {
    pub name: String,
    #[serde(default)]
    pub key_scope: KeyScopeConfig,
    #[serde(default)]
    pub variants: Vec<VariantConfig>,
    #[serde(default)]
    pub constants: BTreeMap<String, serde_json::Value>,
}

impl FamilyConfig {
    /// Reads the declaration from `path`.
    #[tracing::instrument(level = "trace", ret)]
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path).with_context(|| path.display().to_string())?;
        decode_json(&json).context("decode_json()")
    }

    /// Declares the family.
    pub fn build(&self) -> anyhow::Result<Family> {
        let mut builder = Family::builder(&self.name).with_config(Config {
            key_scope: self.key_scope.into(),
        });
        for v in &self.variants {
            builder = builder.variant(&v.name, v.kind().with_context(|| v.name.clone())?);
        }
        for (name, value) in &self.constants {
            builder = builder.constant(name, to_value(value).with_context(|| name.clone())?);
        }
        Ok(builder.build())
    }
}

/// Converts untyped JSON input to a payload value.
///
/// Strings, integers and booleans map to `String`, `i64` and `bool`;
/// `{"x": .., "y": ..}` maps to a [`Coordinate`]. Anything else is rejected.
pub fn to_value(json: &serde_json::Value) -> anyhow::Result<Value> {
    use serde_json::Value as J;
    Ok(match json {
        J::String(s) => Value::new(s.clone()),
        J::Bool(b) => Value::new(*b),
        J::Number(n) => Value::new(n.as_i64().context("only integers are supported")?),
        J::Object(_) => Value::new(
            serde_json::from_value::<Coordinate>(json.clone()).context("not a coordinate")?,
        ),
        J::Null | J::Array(_) => anyhow::bail!("unsupported value {json}"),
    })
}
