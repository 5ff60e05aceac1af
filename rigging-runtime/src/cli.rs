use clap::{Arg, Command};

#[derive(Debug)]
pub enum Error {
    ConfigNotFound(String),
    WorkflowsNotFound(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ConfigNotFound(path) => write!(f, "Configuration file not found: {}", path),
            Error::WorkflowsNotFound(path) => write!(f, "Workflows file not found: {}", path),
        }
    }
}

impl std::error::Error for Error {}

#[derive(Debug)]
pub struct Cli {
    pub config_path: Option<String>,
    pub workflows_path: Option<String>,
    /// One command to run through the argument-driven interface instead of
    /// the interactive prompt.
    pub command: Option<Vec<String>>,
}

impl Cli {
    pub fn load() -> Result<Cli, Error> {
        let matches = Command::new("Rigging Runtime")
            .version(env!("CARGO_PKG_VERSION"))
            .arg(
                Arg::new("config")
                    .long("config")
                    .help("Configuration file to load (flat namespace.name JSON)")
                    .required(false),
            )
            .arg(
                Arg::new("workflows")
                    .long("workflows")
                    .help("Workflow definitions file to load")
                    .required(false),
            )
            .arg(
                Arg::new("command")
                    .help("Command to run instead of starting the interactive prompt")
                    .required(false)
                    .num_args(0..)
                    .trailing_var_arg(true),
            )
            .get_matches();

        let config_path = match matches.get_one::<String>("config") {
            Some(path) => Some(existing(path).ok_or_else(|| Error::ConfigNotFound(path.clone()))?),
            None => find_default_file("config.json"),
        };

        let workflows_path = match matches.get_one::<String>("workflows") {
            Some(path) => {
                Some(existing(path).ok_or_else(|| Error::WorkflowsNotFound(path.clone()))?)
            }
            None => find_default_file("workflows.json"),
        };

        let command = matches
            .get_many::<String>("command")
            .map(|words| words.cloned().collect::<Vec<String>>())
            .filter(|words| !words.is_empty());

        Ok(Cli {
            config_path,
            workflows_path,
            command,
        })
    }
}

fn existing(path: &str) -> Option<String> {
    if std::path::Path::new(path).exists() {
        Some(path.to_string())
    } else {
        None
    }
}

fn find_default_file(file: &str) -> Option<String> {
    existing(file)
}
