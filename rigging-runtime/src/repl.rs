use crate::settings::Settings;
use colored::Colorize;
use rigging_engine::prelude::*;
use std::io::{self, BufRead, Write};

/// The interactive surface: one blocking line read per prompt, translated
/// into a queue entry and drained to empty before the next read. The queue
/// is always empty when the prompt appears, so a multi-step workflow can
/// never interleave with freshly typed commands.
pub fn run(engine: &mut Engine, dispatch: &mut DispatchLoop, settings: &Settings) {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !dispatch.is_terminated() {
        dispatch.block_on_input();

        print!("{}", settings.prompt.cyan());
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            // EOF or a broken pipe ends the session like an exit token.
            Some(Err(_)) | None => {
                dispatch.terminate();
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.eq_ignore_ascii_case(&settings.exit_token) {
            dispatch.terminate();
            break;
        }

        let Some(entry) = CommandQueueEntry::parse(trimmed) else {
            continue;
        };

        engine.queue.enqueue(entry);
        dispatch.process_command_queue(engine);
    }
}
