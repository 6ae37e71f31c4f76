use bit_set::BitSet;
use smallvec::{smallvec, SmallVec};

use crate::{SlotId, WordId, MAX_SLOT_COUNT};

/// A partial mapping from slots to words, grown and shrunk as the search assigns and undoes
/// choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    words: SmallVec<[Option<WordId>; MAX_SLOT_COUNT]>,
    assigned: BitSet,
}

impl Assignment {
    /// An empty assignment for a puzzle with `slot_count` slots.
    pub fn new(slot_count: usize) -> Assignment {
        Assignment {
            words: smallvec![None; slot_count],
            assigned: BitSet::with_capacity(slot_count),
        }
    }

    /// Returns the word previously assigned to the slot, if any.
    pub fn assign(&mut self, slot_id: SlotId, word_id: WordId) -> Option<WordId> {
        self.assigned.insert(slot_id);
        self.words[slot_id].replace(word_id)
    }

    pub fn unassign(&mut self, slot_id: SlotId) -> Option<WordId> {
        self.assigned.remove(slot_id);
        self.words[slot_id].take()
    }

    pub fn get(&self, slot_id: SlotId) -> Option<WordId> {
        self.words[slot_id]
    }

    pub fn is_assigned(&self, slot_id: SlotId) -> bool {
        self.assigned.contains(slot_id)
    }

    /// Number of assigned slots.
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    pub fn slot_count(&self) -> usize {
        self.words.len()
    }

    /// Assigned `(slot, word)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, WordId)> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter_map(|(slot_id, word_id)| word_id.map(|word_id| (slot_id, word_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::Assignment;

    #[test]
    fn test_assign_and_unassign() {
        let mut assignment = Assignment::new(3);
        assert!(assignment.is_empty());

        assert_eq!(assignment.assign(2, 7), None);
        assert_eq!(assignment.assign(0, 4), None);
        assert_eq!(assignment.len(), 2);
        assert!(assignment.is_assigned(2));
        assert!(!assignment.is_assigned(1));
        assert_eq!(assignment.iter().collect::<Vec<_>>(), vec![(0, 4), (2, 7)]);

        assert_eq!(assignment.assign(2, 8), Some(7));
        assert_eq!(assignment.len(), 2);

        assert_eq!(assignment.unassign(2), Some(8));
        assert_eq!(assignment.unassign(2), None);
        assert_eq!(assignment.get(0), Some(4));
        assert_eq!(assignment.len(), 1);
        assert_eq!(assignment.slot_count(), 3);
    }
}
