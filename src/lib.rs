//! Crossword filling as a constraint satisfaction problem.
//!
//! A [`Crossword`] describes the grid: its slots, how they cross, and the candidate words. The
//! [`Solver`] seeds a [`Domains`] store from it, makes the store node- and arc-consistent, and then
//! runs a backtracking search guided by the MRV/degree and least-constraining-value heuristics.

mod assignment;
mod config;
mod consistency;
mod crossword;
mod domains;
mod error;
mod search;

pub use assignment::Assignment;
pub use config::{SolverConfig, ValueOrdering};
pub use consistency::{enforce_arc_consistency, revise, ArcQueue};
pub use crossword::{Crossword, Direction, GridCoord, Overlap, Variable, Word};
pub use domains::{enforce_node_consistency, Domains};
pub use error::{SolveFailure, StructureError};
pub use search::{
    assignment_complete, consistent, order_domain_values, select_unassigned_variable, Solution,
    Solver, Statistics, VariableRank,
};

/// The expected maximum number of slots appearing in a grid.
pub const MAX_SLOT_COUNT: usize = 256;

/// The expected maximum length for a single slot.
pub const MAX_SLOT_LENGTH: usize = 21;

/// An identifier for a given slot, based on its index in the crossword's `variables` field.
pub type SlotId = usize;

/// An identifier for a given word, based on its index in the crossword's `words` field.
pub type WordId = usize;

/// An ordered pair of crossing slots. Revising the arc `(x, y)` prunes `x` against `y`.
pub type Arc = (SlotId, SlotId);
