//! The framework-provided command catalog.
//!
//! Commands receive the full invocation array as `inputData` (index 0 is
//! the command's own name) and mutable access to the engine, through which
//! they read and write configuration, run rule chains and enqueue further
//! commands. User-facing output goes to stdout; failures are logged and
//! reported through a `false` output rather than halting the session.

use colored::Colorize;
use rigging_engine::prelude::*;
use std::io::Write;
use valu3::value::Value;

/// Registers the whole catalog. Called once at bootstrap, before client
/// commands.
pub fn register_framework_commands(engine: &mut Engine) -> Result<(), CommandRegistryError> {
    engine.register_command("echoCommand", command!(echo_command))?;
    engine.register_command("exit", command!(exit_command))?;
    engine.register_command("version", command!(version_command))?;
    engine.register_command("about", command!(about_command))?;
    engine.register_command("help", command!(help_command))?;
    engine.register_command("clearScreen", command!(clear_screen_command))?;
    engine.register_command("businessRule", command!(business_rule_command))?;
    engine.register_command("commandSequencer", command!(command_sequencer))?;
    engine.register_command("workflow", command!(workflow_command))?;
    engine.register_command("saveConfiguration", command!(save_configuration))?;
    engine.register_command(
        "changeConfigurationSetting",
        command!(change_configuration_setting),
    )?;
    engine.register_command("printConfiguration", command!(print_configuration))?;

    Ok(())
}

fn argument(input: &Value, index: usize) -> Option<String> {
    input
        .as_array()
        .and_then(|array| array.values.get(index))
        .map(|value| value.as_string())
}

fn arguments_from(input: &Value, start: usize) -> Vec<String> {
    match input.as_array() {
        Some(array) => array
            .values
            .iter()
            .skip(start)
            .map(|value| value.as_string())
            .collect(),
        None => Vec::new(),
    }
}

fn echo_command(_engine: &mut Engine, input: &Value, _meta: &Value) -> CommandOutput {
    let text = arguments_from(input, 1).join(" ");
    println!("{}", text);
    CommandOutput::proceed(text.to_value())
}

fn exit_command(engine: &mut Engine, _input: &Value, _meta: &Value) -> CommandOutput {
    let application = engine
        .get_configuration_setting("system", "applicationName")
        .map(|name| name.as_string())
        .unwrap_or_else(|| "rigging".to_string());
    println!("Exiting {}", application);

    CommandOutput::exit(Value::from(false))
}

fn version_command(engine: &mut Engine, _input: &Value, _meta: &Value) -> CommandOutput {
    let framework_version = env!("CARGO_PKG_VERSION");

    let line = match engine.get_configuration_setting("system", "applicationVersion") {
        Some(application_version) => format!(
            "{} (framework {})",
            application_version.as_string(),
            framework_version
        ),
        None => framework_version.to_string(),
    };
    println!("{}", line);

    CommandOutput::proceed(line.to_value())
}

fn about_command(engine: &mut Engine, _input: &Value, _meta: &Value) -> CommandOutput {
    let name = engine
        .get_configuration_setting("system", "applicationName")
        .map(|value| value.as_string())
        .unwrap_or_else(|| "rigging".to_string());
    let description = engine
        .get_configuration_setting("system", "applicationDescription")
        .map(|value| value.as_string())
        .unwrap_or_default();

    println!("{}  {}", name.bold(), description);

    CommandOutput::proceed(Value::from(true))
}

fn help_command(engine: &mut Engine, _input: &Value, _meta: &Value) -> CommandOutput {
    let mut names = engine.commands.names();
    names.sort();

    println!("{}", "Available commands:".bold());
    for name in &names {
        println!("  {}", name);
    }
    println!(
        "{} business rules registered; run: businessRule <ruleName> <input>",
        engine.rules.len()
    );

    CommandOutput::proceed(names.to_value())
}

fn clear_screen_command(_engine: &mut Engine, _input: &Value, _meta: &Value) -> CommandOutput {
    print!("\x1B[2J\x1B[1;1H");
    let _ = std::io::stdout().flush();

    CommandOutput::proceed(Value::from(true))
}

/// Invokes a single named business rule from the command line, the joined
/// remaining words being its input.
fn business_rule_command(engine: &mut Engine, input: &Value, _meta: &Value) -> CommandOutput {
    let Some(rule_name) = argument(input, 1) else {
        log::error!("businessRule requires a rule name");
        return CommandOutput::proceed(Value::from(false));
    };

    let rule_input = arguments_from(input, 2).join(" ");

    match engine.process_rules(
        Value::from(rule_input),
        &RuleMetadata::none(),
        &[rule_name.clone()],
    ) {
        Ok(output) => {
            println!("{}", output.to_json(JsonMode::Inline));
            CommandOutput::proceed(output)
        }
        Err(err) => {
            log::error!("{}", err);
            CommandOutput::proceed(Value::from(false))
        }
    }
}

/// Expands a comma-separated list of command lines at the head of the
/// queue, so the whole sequence runs before anything already pending.
fn command_sequencer(engine: &mut Engine, input: &Value, _meta: &Value) -> CommandOutput {
    let script = arguments_from(input, 1).join(" ");

    let entries: Vec<CommandQueueEntry> = script
        .split(',')
        .filter_map(CommandQueueEntry::parse)
        .collect();

    if entries.is_empty() {
        log::error!("commandSequencer received no commands to enqueue");
        return CommandOutput::proceed(Value::from(false));
    }

    engine.queue.enqueue_next_sequence(entries);

    CommandOutput::proceed(Value::from(true))
}

/// Expands a named workflow (an array of command lines in the `workflows`
/// configuration namespace) at the head of the queue.
fn workflow_command(engine: &mut Engine, input: &Value, _meta: &Value) -> CommandOutput {
    let Some(workflow_name) = argument(input, 1) else {
        log::error!("workflow requires a workflow name");
        return CommandOutput::proceed(Value::from(false));
    };

    let Some(definition) = engine.get_configuration_setting("workflows", &workflow_name) else {
        log::error!("Unknown workflow: {}", workflow_name);
        return CommandOutput::proceed(Value::from(false));
    };

    let Some(lines) = definition.as_array() else {
        log::error!("Workflow '{}' is not an array of command lines", workflow_name);
        return CommandOutput::proceed(Value::from(false));
    };

    let entries: Vec<CommandQueueEntry> = lines
        .values
        .iter()
        .filter_map(|line| CommandQueueEntry::parse(line.as_str()))
        .collect();

    engine.queue.enqueue_next_sequence(entries);

    CommandOutput::proceed(Value::from(true))
}

/// Persists the whole configuration hive as one flat JSON document under
/// `system.appConfigPath`, so user settings survive between sessions.
fn save_configuration(engine: &mut Engine, _input: &Value, _meta: &Value) -> CommandOutput {
    let directory = engine
        .get_configuration_setting("system", "appConfigPath")
        .or_else(|| engine.get_configuration_setting("system", "rootPath"))
        .map(|value| value.as_string())
        .unwrap_or_else(|| ".".to_string());

    let path = format!("{}/config.json", directory.trim_end_matches('/'));
    let document = engine.config.to_value().to_json(JsonMode::Indented);

    match std::fs::write(&path, document) {
        Ok(()) => {
            println!("Configuration saved to {}", path);
            CommandOutput::proceed(Value::from(true))
        }
        Err(err) => {
            log::error!("Could not save configuration to {}: {}", path, err);
            CommandOutput::proceed(Value::from(false))
        }
    }
}

/// `changeConfigurationSetting fully.qualified.path value` - the last path
/// segment is the setting name, the rest is its namespace; an optional
/// leading `configuration.` segment is stripped. The value is typed through
/// the `stringToDataType` rule chain before storage.
fn change_configuration_setting(engine: &mut Engine, input: &Value, _meta: &Value) -> CommandOutput {
    let Some(qualified) = argument(input, 1) else {
        log::error!("changeConfigurationSetting requires a path and a value");
        return CommandOutput::proceed(Value::from(false));
    };

    let raw_value = arguments_from(input, 2).join(" ");
    if raw_value.is_empty() {
        log::error!("changeConfigurationSetting requires a value to assign");
        return CommandOutput::proceed(Value::from(false));
    }

    let qualified = qualified
        .strip_prefix("configuration.")
        .unwrap_or(&qualified)
        .to_string();

    let Some((namespace, name)) = qualified.rsplit_once('.') else {
        log::error!(
            "Configuration path '{}' must contain a namespace and a name",
            qualified
        );
        return CommandOutput::proceed(Value::from(false));
    };

    let typed = engine
        .process_rules(
            Value::from(raw_value.clone()),
            &RuleMetadata::none(),
            &["stringToDataType".to_string()],
        )
        .unwrap_or_else(|_| Value::from(raw_value));

    engine.set_configuration_setting(namespace, name, typed);
    println!("{}.{} updated", namespace, name);

    CommandOutput::proceed(Value::from(true))
}

fn print_configuration(engine: &mut Engine, _input: &Value, _meta: &Value) -> CommandOutput {
    let hive = engine.config.to_value();
    println!("{}", hive.to_json(JsonMode::Indented));

    CommandOutput::proceed(hive)
}
