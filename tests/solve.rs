mod common;

use crossfill::{
    Crossword, Direction, SolveFailure, Solver, SolverConfig, ValueOrdering, Variable,
};

use common::{assert_valid_solution, puzzle};

const SQUARE: &str = "
    ___
    ___
    ___
";

/// Rows CAB/ODE/WET read down as COW/ADE/BET, plus a few words that fit nowhere.
const SQUARE_WORDS: &[&str] = &["CAT", "CAB", "ODE", "ZZZ", "WET", "COW", "ADE", "BET", "QI"];

fn crossing_pair(words: &[&str]) -> Crossword {
    Crossword::from_variables(
        3,
        3,
        vec![
            Variable::new(0, 0, Direction::Across, 3),
            Variable::new(0, 1, Direction::Down, 3),
        ],
        words.iter().copied(),
    )
    .unwrap()
}

#[test]
fn test_single_cell_keeps_only_words_of_its_length() {
    let cell = Variable::new(0, 0, Direction::Across, 1);
    let crossword = Crossword::from_variables(1, 1, vec![cell], ["A", "BB"]).unwrap();
    let mut solver = Solver::new(&crossword);

    solver.enforce_node_consistency();
    assert_eq!(solver.domains().words(0).collect::<Vec<_>>(), vec![0]);

    let solution = solver.solve().unwrap();
    assert_eq!(solution.word(&crossword, 0), Some("A"));
    assert_valid_solution(&crossword, &solution);
}

#[test]
fn test_crossing_pair_is_pruned_then_filled() {
    let crossword = crossing_pair(&["CAT", "DOG", "ANT", "OWL"]);
    let mut solver = Solver::new(&crossword);

    solver.enforce_node_consistency();
    assert!(solver.enforce_arc_consistency(None));

    // The across slot's middle letter must start a word: CAT (A -> ANT) and DOG (O -> OWL) stay.
    let across: Vec<&str> =
        solver.domains().words(0).map(|word| crossword.word(word).as_str()).collect();
    let down: Vec<&str> =
        solver.domains().words(1).map(|word| crossword.word(word).as_str()).collect();
    assert_eq!(across, vec!["CAT", "DOG"]);
    assert_eq!(down, vec!["ANT", "OWL"]);

    let solution = solver.solve().unwrap();
    assert_eq!(solution.word(&crossword, 0), Some("CAT"));
    assert_eq!(solution.word(&crossword, 1), Some("ANT"));
    assert_valid_solution(&crossword, &solution);
}

#[test]
fn test_word_is_never_reused_across_unrelated_slots() {
    let template = "
        ___
        ###
        ___
    ";

    let crossword = puzzle(template, &["SKY"]);
    assert_eq!(Solver::new(&crossword).solve().unwrap_err(), SolveFailure::NoSolution);

    let crossword = puzzle(template, &["SKY", "SEA"]);
    let solution = Solver::new(&crossword).solve().unwrap();
    assert_ne!(solution.word(&crossword, 0), solution.word(&crossword, 1));
    assert_valid_solution(&crossword, &solution);
}

#[test]
fn test_slot_without_words_of_its_length_fails_before_search() {
    // A four-letter slot crossing nothing, next to a fillable three-letter slot.
    let crossword = puzzle(
        "
        ____
        ####
        ___#
        ",
        &["CAT", "DOG"],
    );
    let mut solver = Solver::new(&crossword);

    assert_eq!(solver.solve().unwrap_err(), SolveFailure::NoSolution);
    assert_eq!(solver.statistics().states, 0);
}

#[test]
fn test_emptied_domain_during_arc_consistency_fails_before_search() {
    let crossword = crossing_pair(&["CAT", "DOG"]);
    let mut solver = Solver::new(&crossword);

    assert_eq!(solver.solve().unwrap_err(), SolveFailure::NoSolution);
    assert_eq!(solver.statistics().states, 0);
    assert!(solver.statistics().revisions > 0);
}

#[test]
fn test_exhausted_search_reports_no_solution() {
    // Both slots can only hold AA, and the crossing agrees, but it can't be used twice.
    let crossword = puzzle(
        "
        __
        _#
        ",
        &["AA"],
    );
    let mut solver = Solver::new(&crossword);

    assert_eq!(solver.solve().unwrap_err(), SolveFailure::NoSolution);
    assert!(solver.statistics().states > 0);
    assert!(solver.statistics().backtracks > 0);
}

#[test]
fn test_word_square_is_filled() {
    let crossword = puzzle(SQUARE, SQUARE_WORDS);
    assert_eq!(crossword.slot_count(), 6);

    let solution = Solver::new(&crossword).solve().unwrap();
    assert_valid_solution(&crossword, &solution);
}

#[test]
fn test_every_configuration_fills_the_word_square() {
    let crossword = puzzle(SQUARE, SQUARE_WORDS);

    for ordering in [ValueOrdering::WordEquality, ValueOrdering::LetterCompatibility] {
        for forward_checking in [false, true] {
            let config = SolverConfig::new()
                .with_value_ordering(ordering)
                .with_forward_checking(forward_checking);

            let solution = Solver::with_config(&crossword, config).solve().unwrap();
            assert_valid_solution(&crossword, &solution);
        }
    }
}

#[test]
fn test_word_square_missing_a_word_has_no_solution() {
    let words: Vec<&str> = SQUARE_WORDS.iter().copied().filter(|&word| word != "BET").collect();
    let crossword = puzzle(SQUARE, &words);

    for forward_checking in [false, true] {
        let config = SolverConfig::new().with_forward_checking(forward_checking);
        assert_eq!(
            Solver::with_config(&crossword, config).solve().unwrap_err(),
            SolveFailure::NoSolution
        );
    }
}

#[test]
fn test_puzzle_without_slots_is_trivially_solved() {
    let crossword = puzzle("_#\n#_", &["A"]);
    let solution = Solver::new(&crossword).solve().unwrap();

    assert!(solution.assignment.is_empty());
    assert_eq!(solution.entries(&crossword).count(), 0);
}
