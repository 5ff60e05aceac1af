use crate::engine::Engine;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use valu3::value::Value;

/// Contract for a command: invoked with mutable access to the [`Engine`]
/// (configuration, rule chains, the command queue), the invocation array as
/// `inputData` and an `inputMetaData` value. Side effects are permitted.
pub type CommandFn = Arc<dyn Fn(&mut Engine, &Value, &Value) -> CommandOutput + Send + Sync>;

#[macro_export]
macro_rules! command {
    ($call:expr) => {
        std::sync::Arc::new($call) as $crate::commands::CommandFn
    };
}

/// Whether the host process keeps running after a command returns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Signal {
    Continue,
    Exit,
}

#[derive(Debug)]
pub struct CommandOutput {
    pub output: Value,
    pub signal: Signal,
}

impl CommandOutput {
    pub fn proceed(output: Value) -> Self {
        Self {
            output,
            signal: Signal::Continue,
        }
    }

    pub fn exit(output: Value) -> Self {
        Self {
            output,
            signal: Signal::Exit,
        }
    }
}

#[derive(Debug)]
pub enum CommandRegistryError {
    DuplicateCommandName(String),
    UnknownCommandName(String),
}

impl Display for CommandRegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandRegistryError::DuplicateCommandName(name) => {
                write!(f, "Duplicate command name: {}", name)
            }
            CommandRegistryError::UnknownCommandName(name) => {
                write!(f, "Unknown command name: {}", name)
            }
        }
    }
}

impl std::error::Error for CommandRegistryError {}

/// Table of named commands, same duplicate/unknown-name semantics as the
/// rule registry, in its own namespace.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandFn>,
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: &str, command: CommandFn) -> Result<(), CommandRegistryError> {
        if self.commands.contains_key(name) {
            return Err(CommandRegistryError::DuplicateCommandName(name.to_string()));
        }
        self.commands.insert(name.to_string(), command);
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Result<CommandFn, CommandRegistryError> {
        match self.commands.get(name) {
            Some(command) => Ok(command.clone()),
            None => Err(CommandRegistryError::UnknownCommandName(name.to_string())),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_register_and_resolve() {
        let mut registry = CommandRegistry::new();
        registry
            .register("noop", command!(|_engine: &mut Engine, _input: &Value, _meta: &Value| {
                CommandOutput::proceed(Value::from(true))
            }))
            .unwrap();

        assert!(registry.contains("noop"));
        assert!(registry.resolve("noop").is_ok());
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = CommandRegistry::new();
        let noop = command!(|_engine: &mut Engine, _input: &Value, _meta: &Value| {
            CommandOutput::proceed(Value::Null)
        });
        registry.register("noop", noop.clone()).unwrap();

        assert!(matches!(
            registry.register("noop", noop),
            Err(CommandRegistryError::DuplicateCommandName(_))
        ));
    }

    #[test]
    fn test_unknown_name_fails() {
        let registry = CommandRegistry::new();
        assert!(matches!(
            registry.resolve("doesNotExist"),
            Err(CommandRegistryError::UnknownCommandName(_))
        ));
    }
}
