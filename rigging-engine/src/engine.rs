use crate::broker::{self, BrokerError, RuleMetadata};
use crate::commands::{CommandFn, CommandRegistry, CommandRegistryError};
use crate::config::ConfigurationStore;
use crate::queue::{CommandQueue, CommandQueueEntry};
use crate::registry::{RuleFn, RuleRegistry, RuleRegistryError};
use valu3::value::Value;

/// The single context object owning all process-wide state: both
/// registries, the configuration store and the command queue. Created once
/// at bootstrap and passed by reference to every component that needs it;
/// there is no ambient global state.
#[derive(Clone, Default, Debug)]
pub struct Engine {
    pub rules: RuleRegistry,
    pub commands: CommandRegistry,
    pub config: ConfigurationStore,
    pub queue: CommandQueue,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            rules: RuleRegistry::new(),
            commands: CommandRegistry::new(),
            config: ConfigurationStore::new(),
            queue: CommandQueue::new(),
        }
    }

    pub fn register_rule(&mut self, name: &str, rule: RuleFn) -> Result<(), RuleRegistryError> {
        self.rules.register(name, rule)
    }

    pub fn register_command(
        &mut self,
        name: &str,
        command: CommandFn,
    ) -> Result<(), CommandRegistryError> {
        self.commands.register(name, command)
    }

    /// Runs a rule chain against the rule registry. See
    /// [`broker::process_rules`] for the chain semantics.
    pub fn process_rules(
        &self,
        initial: Value,
        metadata: &RuleMetadata,
        rule_names: &[String],
    ) -> Result<Value, BrokerError> {
        broker::process_rules(&self.rules, initial, metadata, rule_names)
    }

    pub fn enqueue_command(&mut self, name: &str, args: &[String]) {
        self.queue.enqueue(CommandQueueEntry::new(name, args));
    }

    pub fn enqueue_command_next(&mut self, name: &str, args: &[String]) {
        self.queue.enqueue_next(CommandQueueEntry::new(name, args));
    }

    pub fn is_command_queue_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn get_configuration_setting(&self, namespace: &str, name: &str) -> Option<&Value> {
        self.config.get(namespace, name)
    }

    pub fn set_configuration_setting(&mut self, namespace: &str, name: &str, value: Value) {
        self.config.set(namespace, name, value);
    }
}
