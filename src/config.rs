use instant::Duration;

/// How `order_domain_values` prices a candidate word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueOrdering {
    /// Count how many unassigned neighbors still hold the very same word. Choosing it would rule
    /// that word out for them through the no-reuse rule.
    #[default]
    WordEquality,

    /// Count how many candidates of the unassigned neighbors disagree with the word's letter at
    /// the crossing, i.e. how many values choosing it would actually rule out.
    LetterCompatibility,
}

/// Knobs for a solving run. The defaults give plain backtracking over the AC-3-pruned domains.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    pub value_ordering: ValueOrdering,

    /// Re-run arc consistency after every tentative assignment, undoing its pruning on backtrack.
    pub forward_checking: bool,

    /// Give up with `SolveFailure::TimedOut` once this much time has passed. Checked between
    /// candidate trials.
    pub time_limit: Option<Duration>,
}

impl SolverConfig {
    pub fn new() -> SolverConfig {
        SolverConfig::default()
    }

    pub fn with_value_ordering(mut self, value_ordering: ValueOrdering) -> SolverConfig {
        self.value_ordering = value_ordering;
        self
    }

    pub fn with_forward_checking(mut self, forward_checking: bool) -> SolverConfig {
        self.forward_checking = forward_checking;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> SolverConfig {
        self.time_limit = Some(time_limit);
        self
    }
}
