//! Helpers shared across integration tests.

use std::collections::HashSet;

use crossfill::{consistent, Crossword, Solution};

/// Turn template rows into a structure: `#` is a block, anything else is a fillable cell.
pub fn structure(template: &str) -> Vec<Vec<bool>> {
    template
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.chars().map(|c| c != '#').collect())
        .collect()
}

pub fn puzzle(template: &str, words: &[&str]) -> Crossword {
    Crossword::new(structure(template), words.iter().copied()).expect("invalid test structure")
}

/// Check every invariant a returned solution must satisfy, independently of the solver's own
/// `consistent` check.
pub fn assert_valid_solution(crossword: &Crossword, solution: &Solution) {
    assert_eq!(solution.assignment.len(), crossword.slot_count(), "every slot is filled");
    assert!(consistent(crossword, &solution.assignment));

    let mut seen = HashSet::new();
    for (variable, word) in solution.entries(crossword) {
        assert_eq!(word.chars().count(), variable.length, "{} doesn't fit {}", word, variable);
        assert!(seen.insert(word), "{} is used twice", word);
    }

    for x in 0..crossword.slot_count() {
        for &y in crossword.neighbors(x) {
            let overlap = crossword.overlap(x, y).unwrap();
            let first = solution.word(crossword, x).unwrap().chars().nth(overlap.first);
            let second = solution.word(crossword, y).unwrap().chars().nth(overlap.second);
            assert_eq!(first, second, "slots {} and {} disagree", x, y);
        }
    }
}
