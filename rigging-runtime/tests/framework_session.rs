use rigging_engine::prelude::*;
use rigging_runtime::bootstrap::{init_framework, ApplicationDescriptor};
use std::sync::{Arc, Mutex};
use valu3::value::Value;

fn framework_engine() -> Engine {
    init_framework(ApplicationDescriptor {
        application_name: "harness".to_string(),
        application_version: "0.0.1".to_string(),
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn string_to_boolean_chain_converts_yes() {
    let engine = framework_engine();

    let output = engine
        .process_rules(
            Value::from("YES"),
            &RuleMetadata::none(),
            &["stringToBoolean".to_string()],
        )
        .unwrap();

    assert_eq!(output, Value::from(true));
}

#[test]
fn coercion_chain_types_loaded_settings() {
    let engine = framework_engine();
    let chain = ["stringToDataType".to_string()];

    let typed = engine
        .process_rules(Value::from("3.1415926535897932384626433832"), &RuleMetadata::none(), &chain)
        .unwrap();
    assert!(matches!(typed, Value::Number(n) if n.is_float()));

    let typed = engine
        .process_rules(Value::from("12"), &RuleMetadata::none(), &chain)
        .unwrap();
    assert_eq!(typed, Value::from(12i64));
}

#[test]
fn configuration_setting_is_typed_on_write() {
    let mut engine = framework_engine();
    engine.set_configuration_setting("system", "debugMode", Value::from("true"));

    assert_eq!(
        engine.get_configuration_setting("system", "debugMode"),
        Some(&Value::from(true))
    );
}

#[test]
fn priority_enqueue_runs_between_head_and_pending() {
    let trace: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let mut client_commands = Vec::new();
    for name in ["A", "B", "C"] {
        let trace = trace.clone();
        let recorder = command!(move |engine: &mut Engine, input: &Value, _meta: &Value| {
            let invoked = input.as_array().unwrap().values[0].as_string();
            trace.lock().unwrap().push(invoked.clone());
            if invoked == "A" {
                engine.enqueue_command_next("C", &[]);
            }
            CommandOutput::proceed(Value::from(true))
        });
        client_commands.push((name.to_string(), recorder));
    }

    let mut engine = init_framework(ApplicationDescriptor {
        client_commands,
        ..Default::default()
    })
    .unwrap();

    engine.enqueue_command("A", &[]);
    engine.enqueue_command("B", &[]);

    DispatchLoop::new().process_command_queue(&mut engine);

    assert_eq!(*trace.lock().unwrap(), vec!["A", "C", "B"]);
}

#[test]
fn unknown_command_is_reported_and_skipped() {
    let mut engine = framework_engine();
    engine.enqueue_command("doesNotExist", &[]);
    engine.enqueue_command(
        "changeConfigurationSetting",
        &["system.survived".to_string(), "yes".to_string()],
    );

    let mut dispatch = DispatchLoop::new();
    dispatch.process_command_queue(&mut engine);

    assert!(!dispatch.is_terminated());
    assert_eq!(
        engine.get_configuration_setting("system", "survived"),
        Some(&Value::from(true))
    );
}

#[test]
fn saved_configuration_reloads_with_types_intact() {
    let scratch_dir = std::env::temp_dir().join(format!("rigging-session-{}", std::process::id()));
    std::fs::create_dir_all(&scratch_dir).unwrap();

    let mut engine = framework_engine();
    engine.set_configuration_setting(
        "system",
        "appConfigPath",
        Value::from(scratch_dir.display().to_string()),
    );
    engine.set_configuration_setting("system", "debugMode", Value::from("true"));
    engine.set_configuration_setting("system.logging", "level", Value::from("3"));

    engine.enqueue_command("saveConfiguration", &[]);
    let output = DispatchLoop::new().process_command_queue(&mut engine);
    assert_eq!(output, Value::from(true));

    let reloaded = init_framework(ApplicationDescriptor {
        config_path: Some(scratch_dir.join("config.json")),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(
        reloaded.get_configuration_setting("system", "debugMode"),
        Some(&Value::from(true))
    );
    assert_eq!(
        reloaded.get_configuration_setting("system.logging", "level"),
        Some(&Value::from(3i64))
    );

    std::fs::remove_dir_all(scratch_dir).ok();
}

#[test]
fn startup_workflow_expands_before_queued_commands() {
    let workflows_path = std::env::temp_dir().join(format!(
        "rigging-session-{}-workflows.json",
        std::process::id()
    ));
    std::fs::write(
        &workflows_path,
        r#"{
            "startup": [
                "changeConfigurationSetting system.startupRan yes",
                "version"
            ]
        }"#,
    )
    .unwrap();

    let mut engine = init_framework(ApplicationDescriptor {
        workflows_path: Some(workflows_path.clone()),
        ..Default::default()
    })
    .unwrap();

    // The session seeds the workflow command, then a user command behind it;
    // the expansion must fully run first.
    engine.enqueue_command("workflow", &["startup".to_string()]);
    engine.enqueue_command(
        "changeConfigurationSetting",
        &["system.userRan".to_string(), "yes".to_string()],
    );

    DispatchLoop::new().process_command_queue(&mut engine);

    assert_eq!(
        engine.get_configuration_setting("system", "startupRan"),
        Some(&Value::from(true))
    );
    assert_eq!(
        engine.get_configuration_setting("system", "userRan"),
        Some(&Value::from(true))
    );

    std::fs::remove_file(workflows_path).ok();
}

#[test]
fn client_rules_compose_with_framework_rules() {
    let engine = init_framework(ApplicationDescriptor {
        client_rules: vec![(
            "surroundWithBrackets".to_string(),
            rule!(|input: &Value, _meta: &Value| {
                format!("[{}]", input.as_str()).to_value()
            }),
        )],
        ..Default::default()
    })
    .unwrap();

    let output = engine
        .process_rules(
            Value::from("quiet"),
            &RuleMetadata::none(),
            &[
                "convertStringToUpperCase".to_string(),
                "surroundWithBrackets".to_string(),
            ],
        )
        .unwrap();

    assert_eq!(output, Value::from("[QUIET]"));
}
