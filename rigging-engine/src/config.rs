use std::collections::HashMap;
use valu3::prelude::*;
use valu3::value::Value;

/// Coerces a raw string into its typed configuration value. Total: every
/// input produces a value, falling back to the unchanged string.
///
/// Priority order resolves the ambiguous cases: `"0"` is an integer, not a
/// boolean; `"true"` is a boolean, not a string; `"5.0"` has no fractional
/// remainder and is an integer. The empty string collapses to boolean
/// `false`, the store's falsy default for absent input.
pub fn coerce(input: &str) -> Value {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Value::from(false);
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "t" | "y" | "yes" | "on" => return Value::from(true),
        "false" | "f" | "n" | "no" | "off" => return Value::from(false),
        _ => {}
    }

    if let Ok(integer) = trimmed.parse::<i64>() {
        return Value::from(integer);
    }

    if let Ok(numeric) = trimmed.parse::<f64>() {
        if numeric.is_finite() {
            if numeric.fract() == 0.0 && numeric.abs() < i64::MAX as f64 {
                return Value::from(numeric as i64);
            }
            if trimmed.contains('.') {
                return Value::from(numeric);
            }
        }
    }

    Value::from(input)
}

/// Hierarchical configuration store. Settings are addressed by a
/// dot-delimited namespace plus a name; storage is a flat map keyed
/// `namespace + "." + name`, which is collision-free because both segments
/// are always present.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationStore {
    settings: HashMap<String, Value>,
}

impl ConfigurationStore {
    pub fn new() -> Self {
        Self {
            settings: HashMap::new(),
        }
    }

    fn address(namespace: &str, name: &str) -> String {
        format!("{}.{}", namespace, name)
    }

    /// Stores a setting, coercing string values into their typed form.
    /// Already-typed values (booleans, numbers, arrays, objects) pass
    /// through unchanged. Writes overwrite.
    pub fn set(&mut self, namespace: &str, name: &str, value: Value) {
        let stored = if value.is_string() {
            coerce(value.as_str())
        } else {
            value
        };

        self.settings.insert(Self::address(namespace, name), stored);
    }

    /// `None` is the explicit "not set" sentinel; reads never fail.
    pub fn get(&self, namespace: &str, name: &str) -> Option<&Value> {
        self.settings.get(&Self::address(namespace, name))
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// The whole hive as one flat object of `namespace.name` to typed
    /// value, the schema used for configuration persistence.
    pub fn to_value(&self) -> Value {
        self.settings.to_value()
    }

    /// Loads a flat `namespace.name` object back into the store, splitting
    /// each key on its last dot. Keys carrying no namespace segment are
    /// reported and skipped.
    pub fn absorb(&mut self, hive: &Value) {
        let Some(object) = hive.as_object() else {
            log::warn!("configuration hive is not an object, nothing absorbed");
            return;
        };

        for (key, value) in object.iter() {
            let qualified = key.to_string();
            match qualified.rsplit_once('.') {
                Some((namespace, name)) => self.set(namespace, name, value.clone()),
                None => {
                    log::warn!("configuration key '{}' has no namespace, skipped", qualified);
                }
            }
        }
    }
}
