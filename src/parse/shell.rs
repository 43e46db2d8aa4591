use super::types::{Operator, OperatorSplit, SplitCommand, SubCommand};

/// Find every top-level `&&`, `||` and `|` in a command, in order.
///
/// From the cursor, each operator literal is searched independently and the
/// earliest hit wins; ties go to the first literal in [`Operator::ALL`]. The
/// cursor then moves past the match, so operators never overlap. Quotes are
/// not respected: `echo 'a|b'` splits at the pipe.
pub fn find_operator_splits(command: &str) -> Vec<OperatorSplit> {
    let mut splits = Vec::new();
    let mut cursor = 0;

    while cursor < command.len() {
        let rest = &command[cursor..];
        let earliest = Operator::ALL
            .iter()
            .filter_map(|&op| rest.find(op.as_str()).map(|idx| (idx, op)))
            .min_by_key(|&(idx, _)| idx);

        let Some((idx, operator)) = earliest else {
            break;
        };

        let split = OperatorSplit {
            position: cursor + idx,
            operator,
        };
        cursor = split.end();
        splits.push(split);
    }

    splits
}

/// Partition a command at the given split points.
///
/// Segments are trimmed and empty ones are dropped. Each kept segment carries
/// the operator that directly precedes it in the raw string.
pub fn split_at(command: &str, splits: &[OperatorSplit]) -> Vec<SubCommand> {
    let mut ordered = splits.to_vec();
    ordered.sort_by_key(|s| s.position);

    let mut segments = Vec::new();
    let mut cursor = 0;
    let mut preceded_by = None;

    for split in &ordered {
        // Overlapping split points can only come from a hand-built list.
        if split.position < cursor {
            continue;
        }
        push_segment(&mut segments, &command[cursor..split.position], preceded_by);
        preceded_by = Some(split.operator);
        cursor = split.end();
    }
    push_segment(&mut segments, &command[cursor.min(command.len())..], preceded_by);

    segments
}

fn push_segment(segments: &mut Vec<SubCommand>, raw: &str, preceded_by: Option<Operator>) {
    let text = raw.trim();
    if !text.is_empty() {
        segments.push(SubCommand {
            text: text.to_string(),
            preceded_by,
        });
    }
}

/// Tokenize and split a command in one step.
pub fn split_command(command: &str) -> SplitCommand {
    let splits = find_operator_splits(command);
    let segments = split_at(command, &splits);
    SplitCommand {
        segments,
        operators: splits.iter().map(|s| s.operator).collect(),
    }
}

/// Just the sub-command texts of a compound command.
pub fn split_commands(command: &str) -> Vec<String> {
    split_command(command)
        .segments
        .into_iter()
        .map(|s| s.text)
        .collect()
}

/// Whether the segment at `index` reads the previous segment's output.
///
/// The first segment never does, even after a stray leading `|`.
pub fn is_pipe_receiver(index: usize, segments: &[SubCommand]) -> bool {
    index > 0
        && segments
            .get(index)
            .is_some_and(|s| s.preceded_by == Some(Operator::Pipe))
}
