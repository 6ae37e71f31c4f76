use bit_set::BitSet;
use log::trace;

use crate::crossword::Crossword;
use crate::{SlotId, WordId};

/// The candidate words still considered possible for each slot. Domains only ever shrink while
/// consistency is being enforced; search may narrow them further but always restores a snapshot
/// on undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    domains: Vec<BitSet>,
}

impl Domains {
    /// Seed every slot's domain with the full word list.
    pub fn new(crossword: &Crossword) -> Domains {
        let word_count = crossword.words().len();
        let full: BitSet = (0..word_count).collect();

        Domains { domains: vec![full; crossword.slot_count()] }
    }

    pub fn get(&self, slot_id: SlotId) -> &BitSet {
        &self.domains[slot_id]
    }

    /// How many candidates remain for the slot.
    pub fn len(&self, slot_id: SlotId) -> usize {
        self.domains[slot_id].len()
    }

    pub fn is_empty(&self, slot_id: SlotId) -> bool {
        self.domains[slot_id].is_empty()
    }

    pub fn contains(&self, slot_id: SlotId, word_id: WordId) -> bool {
        self.domains[slot_id].contains(word_id)
    }

    /// Iterate over the slot's candidates in word-list order.
    pub fn words(&self, slot_id: SlotId) -> impl Iterator<Item = WordId> + '_ {
        self.domains[slot_id].iter()
    }

    /// Returns whether the word was present.
    pub fn remove(&mut self, slot_id: SlotId, word_id: WordId) -> bool {
        self.domains[slot_id].remove(word_id)
    }

    /// Narrow the slot's domain down to a single word.
    pub fn restrict_to(&mut self, slot_id: SlotId, word_id: WordId) {
        let domain = &mut self.domains[slot_id];
        domain.clear();
        domain.insert(word_id);
    }

    pub fn slot_count(&self) -> usize {
        self.domains.len()
    }
}

/// Remove from every slot's domain the words whose length differs from the slot's length. This is
/// the only unary constraint in the puzzle.
pub fn enforce_node_consistency(crossword: &Crossword, domains: &mut Domains) {
    for (slot_id, variable) in crossword.variables().iter().enumerate() {
        let wrong_length: Vec<WordId> = domains
            .words(slot_id)
            .filter(|&word_id| crossword.word(word_id).len() != variable.length)
            .collect();

        for word_id in wrong_length {
            domains.remove(slot_id, word_id);
        }

        trace!(
            "slot {} has {} candidates of length {}",
            variable,
            domains.len(slot_id),
            variable.length
        );
    }
}
