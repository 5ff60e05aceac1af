use crate::registry::RuleRegistry;
use std::fmt::Display;
use valu3::value::Value;

#[derive(Debug)]
pub enum BrokerError {
    UnknownRuleName(String),
    MetadataLengthMismatch { rules: usize, metadata: usize },
}

impl Display for BrokerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrokerError::UnknownRuleName(name) => write!(f, "Unknown rule name: {}", name),
            BrokerError::MetadataLengthMismatch { rules, metadata } => write!(
                f,
                "Metadata length mismatch: {} rules, {} metadata entries",
                rules, metadata
            ),
        }
    }
}

impl std::error::Error for BrokerError {}

/// Metadata calling conventions for a rule chain: one value shared by every
/// step, or one value per step (the list length must match the chain length).
#[derive(Debug, Clone)]
pub enum RuleMetadata {
    Shared(Value),
    PerRule(Vec<Value>),
}

impl RuleMetadata {
    pub fn none() -> Self {
        RuleMetadata::Shared(Value::Null)
    }

    fn for_step(&self, index: usize) -> &Value {
        match self {
            RuleMetadata::Shared(value) => value,
            RuleMetadata::PerRule(values) => &values[index],
        }
    }
}

impl From<Value> for RuleMetadata {
    fn from(value: Value) -> Self {
        RuleMetadata::Shared(value)
    }
}

/// Applies an ordered list of rule names to `initial`, threading each rule's
/// output into the next rule's input. Names are resolved lazily, at the step
/// where they execute; the first unresolvable name fails the whole chain and
/// any partial result is discarded. Execution order is exactly the input
/// order, duplicates included.
pub fn process_rules(
    registry: &RuleRegistry,
    initial: Value,
    metadata: &RuleMetadata,
    rule_names: &[String],
) -> Result<Value, BrokerError> {
    if let RuleMetadata::PerRule(values) = metadata {
        if values.len() != rule_names.len() {
            return Err(BrokerError::MetadataLengthMismatch {
                rules: rule_names.len(),
                metadata: values.len(),
            });
        }
    }

    let mut data = initial;

    for (index, name) in rule_names.iter().enumerate() {
        let rule = registry
            .resolve(name)
            .map_err(|_| BrokerError::UnknownRuleName(name.to_string()))?;

        data = rule(&data, metadata.for_step(index));

        log::debug!("rule '{}' produced: {:?}", name, data);
    }

    Ok(data)
}
