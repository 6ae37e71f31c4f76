use std::collections::{HashMap, HashSet};
use std::fmt::{self, Debug, Display, Formatter};

use smallvec::SmallVec;

use crate::error::StructureError;
use crate::{SlotId, WordId, MAX_SLOT_LENGTH};

/// Zero-indexed row and column of a cell in the grid, where row 0 is the top row.
pub type GridCoord = (usize, usize);

/// Direction that a slot is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Across,
    Down,
}

/// One fillable word position in the grid. Two variables are the same slot iff their position,
/// direction and length all match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Variable {
        Variable { row, col, direction, length }
    }

    /// Generate the coords for each cell of this variable, in word order.
    pub fn cells(&self) -> impl Iterator<Item = GridCoord> {
        let Variable { row, col, direction, length } = *self;

        (0..length).map(move |idx| match direction {
            Direction::Across => (row, col + idx),
            Direction::Down => (row + idx, col),
        })
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::Across => "across",
            Direction::Down => "down",
        };
        write!(f, "({}, {}) {} : {}", self.row, self.col, direction, self.length)
    }
}

/// The character offsets at which two crossing slots must agree: the letter at `first` in the
/// first slot's word equals the letter at `second` in the second slot's word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Overlap {
    pub first: usize,
    pub second: usize,
}

impl Overlap {
    /// The same crossing seen from the other slot.
    pub fn reversed(self) -> Overlap {
        Overlap { first: self.second, second: self.first }
    }
}

/// A candidate word. Offsets into a word count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub string: String,
    pub glyphs: SmallVec<[char; MAX_SLOT_LENGTH]>,
}

impl Word {
    pub fn new(string: String) -> Word {
        let glyphs = string.chars().collect();
        Word { string, glyphs }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.string
    }
}

/// The static description of a puzzle: grid geometry, slots, the crossings between them, and the
/// candidate words. Never mutated once built.
pub struct Crossword {
    width: usize,
    height: usize,
    structure: Vec<Vec<bool>>,
    variables: Vec<Variable>,
    words: Vec<Word>,
    overlaps: Vec<Vec<Option<Overlap>>>,
    neighbors: Vec<SmallVec<[SlotId; MAX_SLOT_LENGTH]>>,
}

impl Debug for Crossword {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Crossword")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("variables", &self.variables)
            .field("words", &format!("({} entries)", self.words.len()))
            .finish()
    }
}

impl Crossword {
    /// Build a crossword from a grid of fillable (`true`) and blocked (`false`) cells. Every
    /// maximal run of two or more fillable cells becomes a variable: across runs first, then down
    /// runs, each in row-major order of their starting cell.
    pub fn new<I, S>(structure: Vec<Vec<bool>>, words: I) -> Result<Crossword, StructureError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let height = structure.len();
        let width = structure.first().map(|row| row.len()).ok_or(StructureError::Empty)?;

        for (row, cells) in structure.iter().enumerate() {
            if cells.len() != width {
                return Err(StructureError::RaggedRow { row, expected: width, found: cells.len() });
            }
        }

        let mut variables = vec![];

        for row in 0..height {
            for col in 0..width {
                if structure[row][col] && (col == 0 || !structure[row][col - 1]) {
                    let length = (col..width).take_while(|&c| structure[row][c]).count();
                    if length > 1 {
                        variables.push(Variable::new(row, col, Direction::Across, length));
                    }
                }
            }
        }

        for row in 0..height {
            for col in 0..width {
                if structure[row][col] && (row == 0 || !structure[row - 1][col]) {
                    let length = (row..height).take_while(|&r| structure[r][col]).count();
                    if length > 1 {
                        variables.push(Variable::new(row, col, Direction::Down, length));
                    }
                }
            }
        }

        Crossword::build(width, height, structure, variables, words)
    }

    /// Build a crossword from an explicit list of variables. Unlike [`Crossword::new`] this allows
    /// single-cell slots. The fillable cells are exactly the ones some variable covers.
    pub fn from_variables<I, S>(
        width: usize,
        height: usize,
        variables: Vec<Variable>,
        words: I,
    ) -> Result<Crossword, StructureError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if width == 0 || height == 0 {
            return Err(StructureError::Empty);
        }

        let mut structure = vec![vec![false; width]; height];
        let mut seen: HashSet<Variable> = HashSet::with_capacity(variables.len());

        for &variable in &variables {
            if variable.length == 0 {
                return Err(StructureError::ZeroLength(variable));
            }
            if !seen.insert(variable) {
                return Err(StructureError::Duplicate(variable));
            }

            for (row, col) in variable.cells() {
                if row >= height || col >= width {
                    return Err(StructureError::OutOfBounds { variable, width, height });
                }
                structure[row][col] = true;
            }
        }

        Crossword::build(width, height, structure, variables, words)
    }

    fn build<I, S>(
        width: usize,
        height: usize,
        structure: Vec<Vec<bool>>,
        variables: Vec<Variable>,
        words: I,
    ) -> Result<Crossword, StructureError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        // Which (slot, offset) pairs touch each cell; crossings fall out of cells with two entries.
        let mut entries_by_cell: HashMap<GridCoord, SmallVec<[(SlotId, usize); 2]>> =
            HashMap::new();

        for (slot_id, variable) in variables.iter().enumerate() {
            for (offset, cell) in variable.cells().enumerate() {
                entries_by_cell.entry(cell).or_default().push((slot_id, offset));
            }
        }

        let slot_count = variables.len();
        let mut overlaps: Vec<Vec<Option<Overlap>>> = vec![vec![None; slot_count]; slot_count];

        for entries in entries_by_cell.values() {
            for &(x, first) in entries {
                for &(y, second) in entries {
                    if x == y {
                        continue;
                    }
                    if overlaps[x][y].is_some() {
                        return Err(StructureError::SharedRun(variables[x], variables[y]));
                    }
                    overlaps[x][y] = Some(Overlap { first, second });
                }
            }
        }

        let neighbors = overlaps
            .iter()
            .map(|row| (0..slot_count).filter(|&other| row[other].is_some()).collect())
            .collect();

        let mut seen_words: HashSet<String> = HashSet::new();
        let words = words
            .into_iter()
            .map(Into::into)
            .filter(|word: &String| seen_words.insert(word.clone()))
            .map(Word::new)
            .collect();

        Ok(Crossword { width, height, structure, variables, words, overlaps, neighbors })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn structure(&self) -> &[Vec<bool>] {
        &self.structure
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, slot_id: SlotId) -> &Variable {
        &self.variables[slot_id]
    }

    pub fn slot_count(&self) -> usize {
        self.variables.len()
    }

    /// Look up the id of a slot by its attributes.
    pub fn slot_id(&self, variable: &Variable) -> Option<SlotId> {
        self.variables.iter().position(|candidate| candidate == variable)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, word_id: WordId) -> &Word {
        &self.words[word_id]
    }

    /// The crossing between `x` and `y`, with `first` indexing into `x`'s word. `None` if the
    /// slots don't share a cell, including when `x == y`.
    pub fn overlap(&self, x: SlotId, y: SlotId) -> Option<Overlap> {
        self.overlaps[x][y]
    }

    /// Slots crossing `slot_id`, in ascending id order.
    pub fn neighbors(&self, slot_id: SlotId) -> &[SlotId] {
        &self.neighbors[slot_id]
    }

    pub fn degree(&self, slot_id: SlotId) -> usize {
        self.neighbors[slot_id].len()
    }
}
