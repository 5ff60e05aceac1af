use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use valu3::value::Value;

/// Contract for a business rule: a pure transform from `(inputData,
/// inputMetaData)` to `outputData`. Rules must tolerate empty input and
/// degrade to a defined default instead of panicking.
pub type RuleFn = Arc<dyn Fn(&Value, &Value) -> Value + Send + Sync>;

#[macro_export]
macro_rules! rule {
    ($call:expr) => {
        std::sync::Arc::new($call) as $crate::registry::RuleFn
    };
}

#[derive(Debug)]
pub enum RuleRegistryError {
    DuplicateRuleName(String),
    UnknownRuleName(String),
}

impl Display for RuleRegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleRegistryError::DuplicateRuleName(name) => {
                write!(f, "Duplicate rule name: {}", name)
            }
            RuleRegistryError::UnknownRuleName(name) => {
                write!(f, "Unknown rule name: {}", name)
            }
        }
    }
}

impl std::error::Error for RuleRegistryError {}

/// Table of named business rules. Framework rules and client rules share the
/// same namespace; registration is append-only and collisions are a startup
/// error, never a silent overwrite.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<String, RuleFn>,
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: &str, rule: RuleFn) -> Result<(), RuleRegistryError> {
        if self.rules.contains_key(name) {
            return Err(RuleRegistryError::DuplicateRuleName(name.to_string()));
        }
        self.rules.insert(name.to_string(), rule);
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Result<RuleFn, RuleRegistryError> {
        match self.rules.get(name) {
            Some(rule) => Ok(rule.clone()),
            None => Err(RuleRegistryError::UnknownRuleName(name.to_string())),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.rules.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
