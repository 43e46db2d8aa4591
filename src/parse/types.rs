//! Types produced by the operator splitter and consumed by the eval layer.

/// Shell operator separating consecutive sub-commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `&&` — run next only if previous succeeded
    And,
    /// `||` — run next only if previous failed
    Or,
    /// `|` — pipe stdout
    Pipe,
}

impl Operator {
    /// Scan order used to break ties when several operators start at the same offset.
    pub const ALL: [Operator; 3] = [Operator::And, Operator::Or, Operator::Pipe];

    /// The operator's shell syntax.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Pipe => "|",
        }
    }

    /// Length of the operator in bytes.
    pub fn len(self) -> usize {
        self.as_str().len()
    }
}

/// One operator occurrence in a raw command string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorSplit {
    /// Byte offset of the operator's first character.
    pub position: usize,
    pub operator: Operator,
}

impl OperatorSplit {
    pub fn len(&self) -> usize {
        self.operator.len()
    }

    /// Byte offset just past the operator.
    pub fn end(&self) -> usize {
        self.position + self.len()
    }
}

/// A trimmed, non-empty piece of a compound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubCommand {
    pub text: String,
    /// The operator immediately before this segment's text in the raw string.
    ///
    /// Attached while splitting, so dropping empty segments can never shift
    /// a segment onto the wrong operator. `a | | b` gives `b` a `Pipe`;
    /// `a | && b` gives `b` an `And`.
    pub preceded_by: Option<Operator>,
}

/// A decomposed compound command.
///
/// For `ls -la` there is one segment and no operators.
/// For `a && b | c` there are three segments and two operators (`&&`, `|`).
/// `operators` keeps every operator found, including ones that bordered a
/// dropped empty segment, so its length is not tied to `segments`.
#[derive(Debug, Clone, Default)]
pub struct SplitCommand {
    pub segments: Vec<SubCommand>,
    pub operators: Vec<Operator>,
}
