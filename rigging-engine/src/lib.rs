//! # rigging-engine - A Pluggable Rule/Command Dispatch Engine
//!
//! `rigging-engine` is the core of **Rigging**, a framework in which an
//! application's behavior is assembled at runtime from two dynamic
//! registries: a table of named **business rules** (pure transformation
//! functions) and a table of named **commands** (side-effectful functions
//! driven through a FIFO queue), both backed by a hierarchical, dotted-path
//! **configuration store**.
//!
//! ## Features
//! - **Named rule registry** with append-only registration and duplicate
//!   detection
//! - **Rule chains**: thread a value through an ordered list of rule names
//! - **Command queue** with FIFO ordering and head-priority insertion for
//!   workflow expansion
//! - **Dispatch loop** that drains the queue and survives unknown commands
//! - **Typed configuration store** with string-to-value coercion
//!
//! ## Example: running a rule chain
//!
//! ```rust
//! use rigging_engine::prelude::*;
//!
//! fn main() {
//!     let mut engine = Engine::new();
//!     engine
//!         .register_rule(
//!             "shout",
//!             rule!(|input: &Value, _meta: &Value| {
//!                 input.as_str().to_uppercase().to_value()
//!             }),
//!         )
//!         .unwrap();
//!
//!     let output = engine
//!         .process_rules(
//!             Value::from("quiet"),
//!             &RuleMetadata::Shared(Value::Null),
//!             &["shout".to_string()],
//!         )
//!         .unwrap();
//!
//!     assert_eq!(output, Value::from("QUIET"));
//! }
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - The context object owning registries, queue and store.
//! - [`registry`] - Name to rule-function table.
//! - [`broker`] - Sequential rule-chain execution.
//! - [`commands`] - Name to command-function table and the command contract.
//! - [`queue`] - The pending-command queue.
//! - [`dispatch`] - The queue-draining session loop.
//! - [`config`] - Hierarchical configuration store and value coercion.
//!
//! ## Architecture Overview
//!
//! Callers enqueue commands (directly, or from inside another command). The
//! dispatch loop pops one entry at a time, resolves the name in the command
//! registry and invokes it with mutable access to the [`engine::Engine`],
//! through which the command may read or write configuration, execute rule
//! chains, and enqueue further commands. The command's returned signal
//! decides whether the host process keeps running.
//!
//! Everything is single-threaded and synchronous: commands execute strictly
//! in queue order, rules within one chain strictly in list order.
pub mod broker;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod prelude;
pub mod queue;
pub mod registry;

pub use broker::RuleMetadata;
pub use commands::{CommandFn, CommandOutput, Signal};
pub use dispatch::DispatchLoop;
pub use engine::Engine;
pub use queue::CommandQueueEntry;
pub use registry::RuleFn;
