pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod loader;
pub mod log;
pub mod repl;
pub mod rules;
pub mod settings;

pub use bootstrap::{init_framework, ApplicationDescriptor};
pub use cli::Cli;
pub use settings::Settings;
