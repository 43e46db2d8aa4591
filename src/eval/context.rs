use crate::parse::{self, SubCommand};

/// Context for evaluating a single sub-command.
#[derive(Debug)]
pub struct CommandContext<'a> {
    /// The trimmed text of this sub-command.
    pub raw: &'a str,
    /// Canonical one- or two-word name used for rule matching.
    pub name: String,
    /// True when the sub-command reads the previous one's output through `|`.
    pub pipe_receiver: bool,
}

impl<'a> CommandContext<'a> {
    /// Build a context for a standalone command (never a pipe receiver).
    pub fn from_command(raw: &'a str) -> Self {
        Self {
            raw,
            name: parse::command_name(raw),
            pipe_receiver: false,
        }
    }

    /// Build a context for the segment at `index` of a split command.
    pub fn from_segment(segments: &'a [SubCommand], index: usize) -> Option<Self> {
        let segment = segments.get(index)?;
        Some(Self {
            raw: &segment.text,
            name: parse::command_name(&segment.text),
            pipe_receiver: parse::is_pipe_receiver(index, segments),
        })
    }

    /// Mark this context as reading from a pipe.
    pub fn piped(mut self) -> Self {
        self.pipe_receiver = true;
        self
    }
}
