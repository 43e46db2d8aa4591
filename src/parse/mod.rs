pub mod shell;
pub mod tokenize;
pub mod types;

pub use shell::{find_operator_splits, is_pipe_receiver, split_at, split_command, split_commands};
pub use tokenize::{command_name, strip_path_prefix};
pub use types::{Operator, OperatorSplit, SplitCommand, SubCommand};
