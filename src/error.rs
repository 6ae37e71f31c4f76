use thiserror::Error;

use crate::crossword::Variable;

/// Reasons a puzzle structure can't be built. These are violations of the structure's own
/// contract; once a `Crossword` exists the solver assumes it is well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("structure has no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("variable {0} has zero length")]
    ZeroLength(Variable),

    #[error("variable {variable} runs outside the {width}x{height} grid")]
    OutOfBounds {
        variable: Variable,
        width: usize,
        height: usize,
    },

    #[error("variable {0} appears more than once")]
    Duplicate(Variable),

    #[error("variables {0} and {1} share more than one cell")]
    SharedRun(Variable, Variable),
}

/// The ways a solving run can end without a complete assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolveFailure {
    /// No assignment satisfies the puzzle under the given word list.
    #[error("no solution")]
    NoSolution,

    /// The configured time limit ran out before the search finished.
    #[error("search timed out")]
    TimedOut,
}
