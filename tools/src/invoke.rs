//! Invoking variants from the command line.
use crate::config::to_value;
use anyhow::Context as _;
use noomer::{Family, Instance};
use std::{fmt, str::FromStr, sync::Arc};

/// `Variant` or `Variant=<json>`.
#[derive(Clone, Debug, PartialEq)]
pub struct Invocation {
    pub variant: String,
    pub arg: Option<serde_json::Value>,
}

impl FromStr for Invocation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let (variant, arg) = match s.split_once('=') {
            Some((variant, arg)) => (variant, Some(serde_json::from_str(arg).context("arg")?)),
            None => (s, None),
        };
        anyhow::ensure!(!variant.is_empty(), "missing variant name");
        Ok(Self {
            variant: variant.to_owned(),
            arg,
        })
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.arg {
            Some(arg) => write!(f, "{}={arg}", self.variant),
            None => f.write_str(&self.variant),
        }
    }
}

/// Invokes variants of one family, numbering the distinct instances it
/// gets back in order of first appearance.
#[derive(Debug)]
pub struct Session<'a> {
    family: &'a Family,
    seen: Vec<Arc<Instance>>,
}

impl<'a> Session<'a> {
    pub fn new(family: &'a Family) -> Self {
        Self {
            family,
            seen: vec![],
        }
    }

    /// Constructs the invoked variant. Returns the instance number and the instance.
    pub fn invoke(&mut self, inv: &Invocation) -> anyhow::Result<(usize, Arc<Instance>)> {
        let arg = inv.arg.as_ref().map(to_value).transpose().context("arg")?;
        let instance = self.family.construct(&inv.variant, arg)?;
        let n = match self.seen.iter().position(|i| Arc::ptr_eq(i, &instance)) {
            Some(n) => n,
            None => {
                self.seen.push(instance.clone());
                self.seen.len() - 1
            }
        };
        tracing::debug!("{inv} -> #{n} {instance:?}");
        Ok((n, instance))
    }

    /// Number of distinct instances seen so far.
    pub fn distinct(&self) -> usize {
        self.seen.len()
    }
}
