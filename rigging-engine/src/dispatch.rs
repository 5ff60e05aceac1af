use crate::commands::Signal;
use crate::engine::Engine;
use crate::queue::QueueError;
use serde::Serialize;
use valu3::value::Value;

/// Session states of the dispatch loop.
///
/// Idle -> Draining on the first drain of a non-empty queue; Draining ->
/// BlockedOnInput when the queue empties in interactive mode; any state ->
/// Terminated once a command signals exit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SessionState {
    Idle,
    Draining,
    BlockedOnInput,
    Terminated,
}

/// Drains the command queue to empty, one entry at a time, resolving and
/// invoking each command. This is the only place where queued program input
/// turns into command execution: the queue is fully drained before control
/// returns, so a multi-step workflow can never interleave with freshly
/// typed commands.
#[derive(Debug, Clone)]
pub struct DispatchLoop {
    state: SessionState,
}

impl Default for DispatchLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchLoop {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state == SessionState::Terminated
    }

    /// Entered by the host right before it blocks on the next line of
    /// external input.
    pub fn block_on_input(&mut self) {
        if self.state != SessionState::Terminated {
            self.state = SessionState::BlockedOnInput;
        }
    }

    pub fn terminate(&mut self) {
        self.state = SessionState::Terminated;
    }

    /// Drains the queue, returning the last command's output. Unknown
    /// command names are reported and skipped so one bad entry cannot halt
    /// the session; a command signalling exit terminates the loop with any
    /// remaining entries left unprocessed.
    pub fn process_command_queue(&mut self, engine: &mut Engine) -> Value {
        self.state = SessionState::Draining;
        let mut last_output = Value::Null;

        while !engine.queue.is_empty() {
            let entry = match engine.queue.dequeue() {
                Ok(entry) => entry,
                // Guarded above; an empty queue means nothing to do.
                Err(QueueError::Empty) => break,
            };

            let command = match engine.commands.resolve(&entry.name) {
                Ok(command) => command,
                Err(err) => {
                    log::error!("{}", err);
                    continue;
                }
            };

            log::debug!("dispatching command: {} {:?}", entry.name, entry.args);

            let result = command(engine, &entry.invocation(), &Value::Null);
            last_output = result.output;

            if result.signal == Signal::Exit {
                self.state = SessionState::Terminated;
                return last_output;
            }
        }

        self.state = SessionState::Idle;
        last_output
    }
}
