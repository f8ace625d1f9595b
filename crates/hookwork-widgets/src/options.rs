//! Option Resolver
//!
//! Resolves raw `data-*` strings against a component schema. Every schema
//! key ends up with a value: absent keys take the default, present keys
//! run through the transform, and a transform that rejects its input falls
//! back to the default as well.

use hookwork_dom::DOMStringMap;

/// Typed option value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

/// Schema default, usable in `const` schemas
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionDefault {
    Bool(bool),
    Number(f64),
    Text(&'static str),
    List(&'static [&'static str]),
}

impl OptionDefault {
    fn to_value(self) -> Value {
        match self {
            OptionDefault::Bool(b) => Value::Bool(b),
            OptionDefault::Number(n) => Value::Number(n),
            OptionDefault::Text(s) => Value::Text(s.to_string()),
            OptionDefault::List(items) => Value::List(items.iter().map(|s| s.to_string()).collect()),
        }
    }
}

/// Raw string to typed value; `None` means "use the default"
pub type Transform = fn(&str) -> Option<Value>;

/// One schema entry
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub key: &'static str,
    pub default: OptionDefault,
    pub transform: Option<Transform>,
}

impl OptionSpec {
    /// Presence flag: any value, including empty, means true
    pub const fn flag(key: &'static str) -> Self {
        Self { key, default: OptionDefault::Bool(false), transform: Some(presence) }
    }

    pub const fn number(key: &'static str, default: f64) -> Self {
        Self { key, default: OptionDefault::Number(default), transform: Some(number) }
    }

    /// Number that must be finite and greater than zero
    pub const fn positive_number(key: &'static str, default: f64) -> Self {
        Self { key, default: OptionDefault::Number(default), transform: Some(positive_number) }
    }

    /// Raw string, untransformed
    pub const fn text(key: &'static str, default: &'static str) -> Self {
        Self { key, default: OptionDefault::Text(default), transform: None }
    }

    /// Comma separated list
    pub const fn list(key: &'static str, default: &'static [&'static str]) -> Self {
        Self { key, default: OptionDefault::List(default), transform: Some(list) }
    }

    fn resolve(&self, raw: Option<&str>) -> Value {
        let Some(raw) = raw else {
            return self.default.to_value();
        };
        match self.transform {
            Some(transform) => transform(raw).unwrap_or_else(|| {
                tracing::debug!("option {} rejected {:?}, using default", self.key, raw);
                self.default.to_value()
            }),
            None => Value::Text(raw.to_string()),
        }
    }
}

fn presence(_: &str) -> Option<Value> {
    Some(Value::Bool(true))
}

fn number(raw: &str) -> Option<Value> {
    raw.trim().parse::<f64>().ok()
        .filter(|n| n.is_finite())
        .map(Value::Number)
}

fn positive_number(raw: &str) -> Option<Value> {
    number(raw).filter(|v| matches!(v, Value::Number(n) if *n > 0.0))
}

fn list(raw: &str) -> Option<Value> {
    Some(Value::List(
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
    ))
}

/// Resolved options, one value per schema key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    values: Vec<(&'static str, Value)>,
}

impl Properties {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Boolean value; false when missing or not a flag
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.get(key), Some(Value::Bool(true)))
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key) {
            Some(Value::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(Value::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn list(&self, key: &str) -> &[String] {
        match self.get(key) {
            Some(Value::List(items)) => items,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }
}

/// Resolve `raw` against `schema`. Keys outside the schema are dropped.
pub fn resolve(schema: &[OptionSpec], raw: &DOMStringMap) -> Properties {
    Properties {
        values: schema.iter()
            .map(|spec| (spec.key, spec.resolve(raw.get(spec.key))))
            .collect(),
    }
}
