use std::collections::VecDeque;
use std::fmt::Display;
use valu3::prelude::*;
use valu3::value::Value;

#[derive(Debug)]
pub enum QueueError {
    Empty,
}

impl Display for QueueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueError::Empty => write!(f, "Dequeue called on an empty command queue"),
        }
    }
}

impl std::error::Error for QueueError {}

/// One pending command invocation: a command name plus its raw argument
/// strings, exactly as typed or enqueued.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandQueueEntry {
    pub name: String,
    pub args: Vec<String>,
}

impl CommandQueueEntry {
    pub fn new(name: &str, args: &[String]) -> Self {
        Self {
            name: name.to_string(),
            args: args.to_vec(),
        }
    }

    /// Splits one command line on whitespace: first word is the command
    /// name, the rest are its arguments. Blank lines produce no entry.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let name = words.next()?;

        Some(Self {
            name: name.to_string(),
            args: words.map(|word| word.to_string()).collect(),
        })
    }

    /// The `inputData` handed to the command: the full invocation array
    /// `[commandName, arg1, arg2, ..]`, index 0 being the command's own
    /// name.
    pub fn invocation(&self) -> Value {
        let mut words = vec![self.name.to_value()];
        words.extend(self.args.iter().map(|arg| arg.to_value()));
        words.to_value()
    }
}

/// Ordered queue of pending command invocations. FIFO by default;
/// [`CommandQueue::enqueue_next`] inserts at the head for commands that must
/// run ahead of everything already pending (workflow expansion).
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    entries: VecDeque<CommandQueueEntry>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, entry: CommandQueueEntry) {
        self.entries.push_back(entry);
    }

    pub fn enqueue_next(&mut self, entry: CommandQueueEntry) {
        self.entries.push_front(entry);
    }

    /// Inserts a whole block at the head, preserving the block's internal
    /// order ahead of all currently pending entries.
    pub fn enqueue_next_sequence(&mut self, entries: Vec<CommandQueueEntry>) {
        for entry in entries.into_iter().rev() {
            self.entries.push_front(entry);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Callers are expected to guard with [`CommandQueue::is_empty`];
    /// dequeuing an empty queue is a precondition violation.
    pub fn dequeue(&mut self) -> Result<CommandQueueEntry, QueueError> {
        self.entries.pop_front().ok_or(QueueError::Empty)
    }
}
