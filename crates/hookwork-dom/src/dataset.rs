//! DOMStringMap (dataset)
//!
//! Maps `data-*` attributes to camelCase keys, preserving attribute
//! order.

use crate::Attribute;

const DATA_PREFIX: &str = "data-";

/// DOMStringMap for data-* attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DOMStringMap {
    entries: Vec<(String, String)>,
}

impl DOMStringMap {
    /// Create empty string map
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Create from the `data-*` members of an attribute list
    pub fn from_attributes<'a>(attrs: impl IntoIterator<Item = &'a Attribute>) -> Self {
        let mut map = Self::new();
        for attr in attrs {
            if let Some(key) = attr.name.strip_prefix(DATA_PREFIX) {
                map.set(&to_camel_case(key), &attr.value);
            }
        }
        map
    }
    
    /// Get value by camelCase key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
    
    /// Set value by camelCase key
    pub fn set(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }
    
    /// Delete by key
    pub fn delete(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k != key);
        self.entries.len() != before
    }
    
    /// Check if key exists
    pub fn has(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }
    
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    
    /// Iterate `(key, value)` pairs in attribute order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
    
    /// Convert key to attribute name
    pub fn to_attribute_name(key: &str) -> String {
        format!("{DATA_PREFIX}{}", to_kebab_case(key))
    }
}

/// Convert kebab-case to camelCase
pub(crate) fn to_camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = false;
    
    for c in s.chars() {
        if c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }
    
    result
}

/// Convert camelCase to kebab-case
pub(crate) fn to_kebab_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            result.push('-');
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    
    result
}
