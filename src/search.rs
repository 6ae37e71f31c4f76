use std::cmp::Ordering;
use std::collections::HashSet;

use instant::{Duration, Instant};
use log::{debug, trace};

use crate::assignment::Assignment;
use crate::config::{SolverConfig, ValueOrdering};
use crate::consistency::{propagate, ArcQueue};
use crate::crossword::{Crossword, Variable};
use crate::domains::{self, Domains};
use crate::error::SolveFailure;
use crate::{Arc, SlotId, WordId};

/// A struct tracking statistics about a solving run.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    /// Search nodes expanded, i.e. times a variable was picked for assignment.
    pub states: u64,
    /// Search nodes abandoned after every candidate failed.
    pub backtracks: u64,
    /// Arc revisions that removed at least one word.
    pub revisions: u64,
    pub duration: Duration,
}

/// A complete assignment and how long it took to find.
#[derive(Debug, Clone)]
pub struct Solution {
    pub assignment: Assignment,
    pub statistics: Statistics,
}

impl Solution {
    /// Each slot alongside the word filling it, in slot order.
    pub fn entries<'a>(
        &'a self,
        crossword: &'a Crossword,
    ) -> impl Iterator<Item = (&'a Variable, &'a str)> + 'a {
        self.assignment.iter().map(move |(slot_id, word_id)| {
            (crossword.variable(slot_id), crossword.word(word_id).as_str())
        })
    }

    /// The word filling the given slot.
    pub fn word<'a>(&self, crossword: &'a Crossword, slot_id: SlotId) -> Option<&'a str> {
        self.assignment.get(slot_id).map(|word_id| crossword.word(word_id).as_str())
    }
}

/// True iff every slot in the puzzle has a word.
pub fn assignment_complete(crossword: &Crossword, assignment: &Assignment) -> bool {
    assignment.len() == crossword.slot_count()
}

/// Check a (possibly partial) assignment: every word fits its slot, no word is used twice anywhere
/// in the grid, and crossing slots that are both assigned agree on the shared letter.
pub fn consistent(crossword: &Crossword, assignment: &Assignment) -> bool {
    let mut used: HashSet<WordId> = HashSet::with_capacity(assignment.len());

    for (slot_id, word_id) in assignment.iter() {
        if !used.insert(word_id) {
            return false;
        }

        let word = crossword.word(word_id);
        if word.len() != crossword.variable(slot_id).length {
            return false;
        }

        for &neighbor in crossword.neighbors(slot_id) {
            let (Some(overlap), Some(other_word_id)) =
                (crossword.overlap(slot_id, neighbor), assignment.get(neighbor))
            else {
                continue;
            };

            let other_word = crossword.word(other_word_id);
            if word.glyphs.get(overlap.first) != other_word.glyphs.get(overlap.second) {
                return false;
            }
        }
    }

    true
}

/// How urgently a slot should be filled. Slots with fewer remaining candidates come first (MRV),
/// and among those, slots crossing more other slots come first (degree). Lower ranks are
/// preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableRank {
    pub remaining_values: usize,
    pub degree: usize,
}

impl VariableRank {
    pub fn of(crossword: &Crossword, domains: &Domains, slot_id: SlotId) -> VariableRank {
        VariableRank {
            remaining_values: domains.len(slot_id),
            degree: crossword.degree(slot_id),
        }
    }
}

impl Ord for VariableRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.remaining_values
            .cmp(&other.remaining_values)
            .then_with(|| other.degree.cmp(&self.degree))
    }
}

impl PartialOrd for VariableRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pick the unassigned slot with the best `VariableRank`. Remaining ties go to the lowest slot id.
/// Returns `None` once every slot is assigned.
pub fn select_unassigned_variable(
    crossword: &Crossword,
    domains: &Domains,
    assignment: &Assignment,
) -> Option<SlotId> {
    (0..crossword.slot_count())
        .filter(|&slot_id| !assignment.is_assigned(slot_id))
        .min_by_key(|&slot_id| VariableRank::of(crossword, domains, slot_id))
}

/// How many options choosing `word_id` for `slot_id` would take away from the unassigned slots
/// crossing it. See `ValueOrdering` for what counts as taking an option away.
pub(crate) fn value_cost(
    crossword: &Crossword,
    domains: &Domains,
    assignment: &Assignment,
    slot_id: SlotId,
    word_id: WordId,
    ordering: ValueOrdering,
) -> usize {
    let word = crossword.word(word_id);

    crossword
        .neighbors(slot_id)
        .iter()
        .filter(|&&neighbor| !assignment.is_assigned(neighbor))
        .map(|&neighbor| match ordering {
            ValueOrdering::WordEquality => usize::from(domains.contains(neighbor, word_id)),
            ValueOrdering::LetterCompatibility => {
                let Some(overlap) = crossword.overlap(slot_id, neighbor) else {
                    return 0;
                };
                let letter = word.glyphs.get(overlap.first);

                // `BitSet`'s iterator under-reports its upper bound, so `Filter::count` panics.
                domains.words(neighbor).fold(0, |disagreeing, other| {
                    let other_letter = crossword.word(other).glyphs.get(overlap.second);
                    disagreeing + usize::from(other_letter != letter)
                })
            }
        })
        .sum()
}

/// The slot's candidates, least constraining first. Equal-cost candidates keep word-list order.
pub fn order_domain_values(
    crossword: &Crossword,
    domains: &Domains,
    slot_id: SlotId,
    assignment: &Assignment,
    ordering: ValueOrdering,
) -> Vec<WordId> {
    let mut costed: Vec<(WordId, usize)> = domains
        .words(slot_id)
        .map(|word_id| {
            (word_id, value_cost(crossword, domains, assignment, slot_id, word_id, ordering))
        })
        .collect();

    costed.sort_by_key(|&(_, cost)| cost);

    costed.into_iter().map(|(word_id, _)| word_id).collect()
}

/// One solving run over a crossword. The solver owns its domain store, so every run (and every
/// thread) needs its own `Solver`.
pub struct Solver<'a> {
    crossword: &'a Crossword,
    domains: Domains,
    config: SolverConfig,
    statistics: Statistics,
    deadline: Option<Instant>,
}

impl<'a> Solver<'a> {
    pub fn new(crossword: &'a Crossword) -> Solver<'a> {
        Solver::with_config(crossword, SolverConfig::default())
    }

    pub fn with_config(crossword: &'a Crossword, config: SolverConfig) -> Solver<'a> {
        Solver {
            crossword,
            domains: Domains::new(crossword),
            config,
            statistics: Statistics::default(),
            deadline: None,
        }
    }

    pub fn crossword(&self) -> &'a Crossword {
        self.crossword
    }

    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn enforce_node_consistency(&mut self) {
        domains::enforce_node_consistency(self.crossword, &mut self.domains);
    }

    /// AC-3 over this run's domains. See [`crate::enforce_arc_consistency`].
    pub fn enforce_arc_consistency(&mut self, arcs: Option<&[Arc]>) -> bool {
        let queue = match arcs {
            Some(arcs) => ArcQueue::with_arcs(arcs.iter().copied()),
            None => ArcQueue::all_arcs(self.crossword),
        };

        propagate(self.crossword, &mut self.domains, queue, &mut self.statistics.revisions)
    }

    /// Enforce node and arc consistency, then search for a complete assignment.
    pub fn solve(&mut self) -> Result<Solution, SolveFailure> {
        let start = Instant::now();
        self.statistics = Statistics::default();
        self.domains = Domains::new(self.crossword);
        self.deadline = self.config.time_limit.map(|time_limit| start + time_limit);

        let result = self.solve_inner();
        self.statistics.duration = start.elapsed();

        match result {
            Ok(assignment) => {
                debug!("found a solution: {:?}", self.statistics);
                Ok(Solution { assignment, statistics: self.statistics.clone() })
            }
            Err(failure) => {
                debug!("{}: {:?}", failure, self.statistics);
                Err(failure)
            }
        }
    }

    fn solve_inner(&mut self) -> Result<Assignment, SolveFailure> {
        self.enforce_node_consistency();
        if let Some(slot_id) = self.first_empty_domain() {
            debug!("no word fits slot {}", self.crossword.variable(slot_id));
            return Err(SolveFailure::NoSolution);
        }

        if !self.enforce_arc_consistency(None) {
            return Err(SolveFailure::NoSolution);
        }
        if let Some(slot_id) = self.first_empty_domain() {
            debug!("no word fits slot {}", self.crossword.variable(slot_id));
            return Err(SolveFailure::NoSolution);
        }

        let mut assignment = Assignment::new(self.crossword.slot_count());
        self.backtrack(&mut assignment)?;

        Ok(assignment)
    }

    fn first_empty_domain(&self) -> Option<SlotId> {
        (0..self.crossword.slot_count()).find(|&slot_id| self.domains.is_empty(slot_id))
    }

    /// Extend `assignment` depth-first until it is complete. On `Ok` the assignment is complete.
    /// On `Err` it is left exactly as it was passed in: `NoSolution` means no extension of it
    /// works, `TimedOut` means the search was cut short.
    pub fn backtrack(&mut self, assignment: &mut Assignment) -> Result<(), SolveFailure> {
        if assignment_complete(self.crossword, assignment) {
            return Ok(());
        }

        let Some(slot_id) = select_unassigned_variable(self.crossword, &self.domains, assignment)
        else {
            return Err(SolveFailure::NoSolution);
        };
        self.statistics.states += 1;

        let values = order_domain_values(
            self.crossword,
            &self.domains,
            slot_id,
            assignment,
            self.config.value_ordering,
        );
        trace!(
            "filling slot {} from {} candidates",
            self.crossword.variable(slot_id),
            values.len()
        );

        for word_id in values {
            self.check_deadline()?;

            assignment.assign(slot_id, word_id);
            if !consistent(self.crossword, assignment) {
                assignment.unassign(slot_id);
                continue;
            }
            trace!("trying {} in slot {}", self.crossword.word(word_id).as_str(), slot_id);

            let snapshot = self.config.forward_checking.then(|| self.domains.clone());
            let pruned = snapshot.is_some() && !self.forward_check(assignment, slot_id, word_id);
            let outcome =
                if pruned { Err(SolveFailure::NoSolution) } else { self.backtrack(assignment) };

            match outcome {
                Ok(()) => return Ok(()),
                Err(failure) => {
                    if let Some(snapshot) = snapshot {
                        self.domains = snapshot;
                    }
                    assignment.unassign(slot_id);

                    if failure != SolveFailure::NoSolution {
                        return Err(failure);
                    }
                }
            }
        }

        self.statistics.backtracks += 1;
        Err(SolveFailure::NoSolution)
    }

    /// Propagate a tentative choice: narrow the slot to the word, take the word away from every
    /// other unassigned slot, and restore arc consistency around whatever changed. Returns false if
    /// some slot runs out of candidates. The caller owns undoing the domain changes.
    fn forward_check(&mut self, assignment: &Assignment, slot_id: SlotId, word_id: WordId) -> bool {
        self.domains.restrict_to(slot_id, word_id);

        let mut queue = ArcQueue::new();
        for &neighbor in self.crossword.neighbors(slot_id) {
            queue.enqueue((neighbor, slot_id));
        }

        for other in 0..self.crossword.slot_count() {
            if other == slot_id || assignment.is_assigned(other) {
                continue;
            }
            if !self.domains.remove(other, word_id) {
                continue;
            }
            if self.domains.is_empty(other) {
                trace!(
                    "{} was the last candidate for slot {}",
                    self.crossword.word(word_id).as_str(),
                    other
                );
                return false;
            }
            for &neighbor in self.crossword.neighbors(other) {
                queue.enqueue((neighbor, other));
            }
        }

        propagate(self.crossword, &mut self.domains, queue, &mut self.statistics.revisions)
    }

    fn check_deadline(&self) -> Result<(), SolveFailure> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(SolveFailure::TimedOut),
            _ => Ok(()),
        }
    }
}
