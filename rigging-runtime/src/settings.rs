use std::env;

pub struct Settings {
    /**
     * Prompt shown before each interactive command line
     *
     * Environment variable: RIGGING_PROMPT
     * Default: "> "
     */
    pub prompt: String,
    /**
     * Name of the workflow expanded at session start
     *
     * The workflow runs ahead of any argument-driven or typed command. If
     * no workflow with this name was loaded, the session starts with an
     * empty queue.
     * Environment variable: RIGGING_STARTUP_WORKFLOW
     * Default: startup
     */
    pub startup_workflow: String,
    /**
     * Token that ends the interactive session (case-insensitive)
     *
     * Environment variable: RIGGING_EXIT_TOKEN
     * Default: exit
     */
    pub exit_token: String,
}

impl Settings {
    pub fn load() -> Self {
        let prompt = env::var("RIGGING_PROMPT").unwrap_or_else(|_| "> ".to_string());

        let startup_workflow =
            env::var("RIGGING_STARTUP_WORKFLOW").unwrap_or_else(|_| "startup".to_string());

        let exit_token = env::var("RIGGING_EXIT_TOKEN").unwrap_or_else(|_| "exit".to_string());

        log::debug!("RIGGING_PROMPT = {:?}", prompt);
        log::debug!("RIGGING_STARTUP_WORKFLOW = {}", startup_workflow);
        log::debug!("RIGGING_EXIT_TOKEN = {}", exit_token);

        Self {
            prompt,
            startup_workflow,
            exit_token,
        }
    }
}
