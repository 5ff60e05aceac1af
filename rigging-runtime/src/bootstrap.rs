use crate::commands::register_framework_commands;
use crate::loader;
use crate::rules::register_framework_rules;
use anyhow::Context;
use rigging_engine::prelude::*;
use std::path::PathBuf;
use valu3::value::Value;

/// Everything a client application hands the framework at startup: its
/// identity, where its resource files live, and its own rule and command
/// tables to merge with the framework catalogs.
#[derive(Default)]
pub struct ApplicationDescriptor {
    pub application_name: String,
    pub application_version: String,
    pub application_description: String,
    pub root_path: PathBuf,
    pub config_path: Option<PathBuf>,
    pub workflows_path: Option<PathBuf>,
    pub client_rules: Vec<(String, RuleFn)>,
    pub client_commands: Vec<(String, CommandFn)>,
}

/// Builds the engine for one session: framework catalogs first, then the
/// client tables (a name collision is a configuration error and aborts
/// startup), then the application identity and the resource files. The
/// returned engine is ready for the dispatch loop.
pub fn init_framework(descriptor: ApplicationDescriptor) -> anyhow::Result<Engine> {
    let mut engine = Engine::new();

    register_framework_rules(&mut engine).context("registering framework rules")?;
    for (name, rule) in &descriptor.client_rules {
        engine
            .register_rule(name, rule.clone())
            .with_context(|| format!("registering client rule '{}'", name))?;
    }

    register_framework_commands(&mut engine).context("registering framework commands")?;
    for (name, command) in &descriptor.client_commands {
        engine
            .register_command(name, command.clone())
            .with_context(|| format!("registering client command '{}'", name))?;
    }

    record_application_identity(&mut engine, &descriptor);

    if let Some(path) = &descriptor.config_path {
        let hive = loader::load_json_file(path).context("loading configuration")?;
        parse_loaded_configuration(&mut engine, &hive);

        if let Some(directory) = path.parent() {
            let directory = normalize_path(&engine, &directory.display().to_string());
            engine.set_configuration_setting("system", "appConfigPath", directory);
        }
    }

    if let Some(path) = &descriptor.workflows_path {
        let definitions = loader::load_json_file(path).context("loading workflows")?;
        parse_loaded_workflows(&mut engine, &definitions);
    }

    Ok(engine)
}

fn record_application_identity(engine: &mut Engine, descriptor: &ApplicationDescriptor) {
    let root_path = normalize_path(engine, &descriptor.root_path.display().to_string());

    engine.set_configuration_setting(
        "system",
        "applicationName",
        Value::from(descriptor.application_name.as_str()),
    );
    engine.set_configuration_setting(
        "system",
        "applicationVersion",
        Value::from(descriptor.application_version.as_str()),
    );
    engine.set_configuration_setting(
        "system",
        "applicationDescription",
        Value::from(descriptor.application_description.as_str()),
    );
    engine.set_configuration_setting("system", "rootPath", root_path);
}

/// Paths are stored forward-slashed regardless of platform, run through the
/// same rule chain the original path handling uses.
fn normalize_path(engine: &Engine, path: &str) -> Value {
    engine
        .process_rules(
            Value::from(path),
            &RuleMetadata::none(),
            &["swapBackSlashToForwardSlash".to_string()],
        )
        .unwrap_or_else(|_| Value::from(path))
}

/// The hive file is one flat object of `namespace.name` to value. String
/// values are typed through the `stringToDataType` rule chain before
/// storage; already-typed values go in as they are.
fn parse_loaded_configuration(engine: &mut Engine, hive: &Value) {
    let Some(object) = hive.as_object() else {
        log::warn!("configuration file is not a flat object, nothing loaded");
        return;
    };

    let chain = ["stringToDataType".to_string()];

    for (key, value) in object.iter() {
        let qualified = key.to_string();
        let Some((namespace, name)) = qualified.rsplit_once('.') else {
            log::warn!("configuration key '{}' has no namespace, skipped", qualified);
            continue;
        };

        let typed = if value.is_string() {
            engine
                .process_rules(value.clone(), &RuleMetadata::none(), &chain)
                .unwrap_or_else(|_| value.clone())
        } else {
            value.clone()
        };

        engine.set_configuration_setting(namespace, name, typed);
    }
}

/// Workflow definitions are an object of workflow name to an array of
/// command lines; each lands in the `workflows` configuration namespace.
fn parse_loaded_workflows(engine: &mut Engine, definitions: &Value) {
    let Some(object) = definitions.as_object() else {
        log::warn!("workflows file is not an object, nothing loaded");
        return;
    };

    for (name, lines) in object.iter() {
        if lines.as_array().is_none() {
            log::warn!("workflow '{}' is not an array of command lines, skipped", name);
            continue;
        }
        engine.set_configuration_setting("workflows", &name.to_string(), lines.clone());
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_init_framework_registers_catalogs() {
        let engine = init_framework(ApplicationDescriptor {
            application_name: "harness".to_string(),
            application_version: "1.2.3".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert!(engine.rules.contains("stringToDataType"));
        assert!(engine.commands.contains("workflow"));
        assert_eq!(
            engine.get_configuration_setting("system", "applicationName"),
            Some(&Value::from("harness"))
        );
    }

    #[test]
    fn test_client_rule_collision_aborts_startup() {
        let result = init_framework(ApplicationDescriptor {
            client_rules: vec![(
                "stringToBoolean".to_string(),
                rule!(|input: &Value, _meta: &Value| input.clone()),
            )],
            ..Default::default()
        });

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("stringToBoolean"));
    }

    #[test]
    fn test_client_tables_are_merged() {
        let mut engine = init_framework(ApplicationDescriptor {
            client_rules: vec![(
                "customEcho".to_string(),
                rule!(|input: &Value, _meta: &Value| input.clone()),
            )],
            client_commands: vec![(
                "customCommand".to_string(),
                command!(|_engine: &mut Engine, _input: &Value, _meta: &Value| {
                    CommandOutput::proceed(Value::from(true))
                }),
            )],
            ..Default::default()
        })
        .unwrap();

        assert!(engine.rules.contains("customEcho"));

        engine.enqueue_command("customCommand", &[]);
        let output = DispatchLoop::new().process_command_queue(&mut engine);
        assert_eq!(output, Value::from(true));
    }

    #[test]
    fn test_loaded_configuration_is_typed() {
        let path = std::env::temp_dir().join(format!(
            "rigging-bootstrap-{}-config.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{
                "system.debugMode": "true",
                "system.logging.level": "3",
                "system.greeting": "hello there",
                "system.alreadyTyped": 42
            }"#,
        )
        .unwrap();

        let engine = init_framework(ApplicationDescriptor {
            config_path: Some(path.clone()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            engine.get_configuration_setting("system", "debugMode"),
            Some(&Value::from(true))
        );
        assert_eq!(
            engine.get_configuration_setting("system.logging", "level"),
            Some(&Value::from(3i64))
        );
        assert_eq!(
            engine.get_configuration_setting("system", "greeting"),
            Some(&Value::from("hello there"))
        );
        assert_eq!(
            engine.get_configuration_setting("system", "alreadyTyped"),
            Some(&Value::from(42i64))
        );

        std::fs::remove_file(path).ok();
    }
}
