use log::{debug, error};
use rigging_engine::prelude::{DispatchLoop, Engine};
use rigging_runtime::bootstrap::{init_framework, ApplicationDescriptor};
use rigging_runtime::cli::Cli;
use rigging_runtime::log::init_tracing;
use rigging_runtime::repl;
use rigging_runtime::settings::Settings;

fn main() {
    init_tracing();

    debug!("Starting Rigging Runtime");

    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("Runtime Error: {}", err);
            return;
        }
    };

    let settings = Settings::load();

    let descriptor = ApplicationDescriptor {
        application_name: "rigging".to_string(),
        application_version: env!("CARGO_PKG_VERSION").to_string(),
        application_description:
            "A pluggable automation framework driven by named rules and commands".to_string(),
        root_path: std::env::current_dir().unwrap_or_default(),
        config_path: cli.config_path.clone().map(Into::into),
        workflows_path: cli.workflows_path.clone().map(Into::into),
        client_rules: Vec::new(),
        client_commands: Vec::new(),
    };

    let mut engine = match init_framework(descriptor) {
        Ok(engine) => engine,
        Err(err) => {
            error!("Bootstrap failed: {:#}", err);
            std::process::exit(1);
        }
    };

    let mut dispatch = DispatchLoop::new();

    seed_startup_workflow(&mut engine, &settings);

    let argument_driven = cli.command.is_some();
    if let Some(words) = cli.command {
        engine.enqueue_command(&words[0], &words[1..]);
    }

    // The pre-seeded queue drains completely before any interactive input
    // is accepted.
    dispatch.process_command_queue(&mut engine);

    if !argument_driven && !dispatch.is_terminated() && !argument_driven_configuration(&engine) {
        repl::run(&mut engine, &mut dispatch, &settings);
    }
}

fn seed_startup_workflow(engine: &mut Engine, settings: &Settings) {
    if engine
        .get_configuration_setting("workflows", &settings.startup_workflow)
        .is_some()
    {
        engine.enqueue_command("workflow", &[settings.startup_workflow.clone()]);
    }
}

/// Applications may disable the interactive prompt from configuration, the
/// same switch the argument-driven interface flips implicitly.
fn argument_driven_configuration(engine: &Engine) -> bool {
    engine
        .get_configuration_setting("system", "argumentDrivenInterface")
        .and_then(|value| value.as_bool().copied())
        .unwrap_or(false)
}
