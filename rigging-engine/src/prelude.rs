#![allow(ambiguous_glob_reexports)]

pub use crate::broker::{BrokerError, RuleMetadata};
pub use crate::commands::{CommandFn, CommandOutput, CommandRegistry, CommandRegistryError, Signal};
pub use crate::config::{coerce, ConfigurationStore};
pub use crate::dispatch::{DispatchLoop, SessionState};
pub use crate::engine::Engine;
pub use crate::queue::{CommandQueue, CommandQueueEntry, QueueError};
pub use crate::registry::{RuleFn, RuleRegistry, RuleRegistryError};
pub use crate::{command, rule};
pub use log;
pub use valu3::json;
pub use valu3::prelude::*;
