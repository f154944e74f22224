//! Render context passed to templates
//!
//! A context is an ordered list of positional maps plus a set of named
//! values. Positional maps are merged first to last, so later maps override
//! earlier keys; named values override everything.

use minijinja::value::ValueKind;
use minijinja::{Error, ErrorKind, Value};
use serde::Serialize;
use std::collections::BTreeMap;

/// Arguments for a template render
///
/// # Examples
///
/// ```rust
/// use acton_views::template::RenderContext;
/// use minijinja::context;
///
/// let ctx = RenderContext::new()
///     .arg(context! { title => "Default", user => "ana" })
///     .with("title", "Profile");
///
/// let value = ctx.to_value().unwrap();
/// assert_eq!(value.get_attr("title").unwrap().as_str(), Some("Profile"));
/// assert_eq!(value.get_attr("user").unwrap().as_str(), Some("ana"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    args: Vec<Value>,
    vars: BTreeMap<String, Value>,
}

impl RenderContext {
    /// Empty context
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context holding a single serializable value as its positional map
    #[must_use]
    pub fn from_serialize<T: Serialize>(value: &T) -> Self {
        Self::new().arg(Value::from_serialize(value))
    }

    /// Append a positional map
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Add a named value, replacing any previous value for `key`
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a named value in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Whether the context carries no arguments
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.vars.is_empty()
    }

    /// Merge positional maps and named values into one map value
    ///
    /// Fails with [`ErrorKind::InvalidOperation`] when a positional
    /// argument is not a map.
    pub fn to_value(&self) -> Result<Value, Error> {
        let mut merged: BTreeMap<String, Value> = BTreeMap::new();

        for (index, arg) in self.args.iter().enumerate() {
            match arg.kind() {
                ValueKind::Map => {
                    for key in arg.try_iter()? {
                        let item = arg.get_item(&key)?;
                        let key = key
                            .as_str()
                            .map_or_else(|| key.to_string(), ToOwned::to_owned);
                        merged.insert(key, item);
                    }
                }
                ValueKind::None | ValueKind::Undefined => {}
                kind => {
                    return Err(Error::new(
                        ErrorKind::InvalidOperation,
                        format!("positional render argument {index} must be a map, got {kind:?}"),
                    ));
                }
            }
        }

        merged.extend(self.vars.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(Value::from_iter(merged))
    }
}

impl From<Value> for RenderContext {
    fn from(value: Value) -> Self {
        Self::new().arg(value)
    }
}
