use std::collections::{HashSet, VecDeque};

use log::{debug, trace};

use crate::crossword::Crossword;
use crate::domains::Domains;
use crate::{Arc, SlotId, WordId};

/// Worklist of arcs waiting to be revised. Arcs come out in the order they went in, and an arc
/// that is already waiting isn't queued a second time.
#[derive(Debug, Default)]
pub struct ArcQueue {
    queue: VecDeque<Arc>,
    pending: HashSet<Arc>,
}

impl ArcQueue {
    pub fn new() -> ArcQueue {
        ArcQueue::default()
    }

    pub fn with_arcs<I>(arcs: I) -> ArcQueue
    where
        I: IntoIterator<Item = Arc>,
    {
        let mut queue = ArcQueue::new();
        for arc in arcs {
            queue.enqueue(arc);
        }
        queue
    }

    /// Every ordered pair `(x, y)` where `y` crosses `x`.
    pub fn all_arcs(crossword: &Crossword) -> ArcQueue {
        ArcQueue::with_arcs((0..crossword.slot_count()).flat_map(|x| {
            crossword.neighbors(x).iter().map(move |&y| (x, y))
        }))
    }

    /// Returns false if the arc was already waiting.
    pub fn enqueue(&mut self, arc: Arc) -> bool {
        if !self.pending.insert(arc) {
            return false;
        }
        self.queue.push_back(arc);
        true
    }

    pub fn pop_front(&mut self) -> Option<Arc> {
        let arc = self.queue.pop_front()?;
        self.pending.remove(&arc);
        Some(arc)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Make `x` arc consistent with `y`: remove every word from `x`'s domain whose letter at the
/// crossing doesn't appear at the crossing in any word of `y`'s domain. Returns whether anything
/// was removed. Slots that don't cross never constrain each other, so that case is a no-op.
pub fn revise(crossword: &Crossword, domains: &mut Domains, x: SlotId, y: SlotId) -> bool {
    let Some(overlap) = crossword.overlap(x, y) else {
        return false;
    };

    let supported: HashSet<char> = domains
        .words(y)
        .filter_map(|word_id| crossword.word(word_id).glyphs.get(overlap.second).copied())
        .collect();

    let unsupported: Vec<WordId> = domains
        .words(x)
        .filter(|&word_id| {
            crossword.word(word_id).glyphs.get(overlap.first)
                .map(|glyph| !supported.contains(glyph))
                .unwrap_or(true)
        })
        .collect();

    for &word_id in &unsupported {
        domains.remove(x, word_id);
    }

    !unsupported.is_empty()
}

/// Run AC-3 until the worklist drains. If `arcs` is given only those arcs seed the worklist,
/// otherwise every arc in the puzzle does. Returns false as soon as any domain is emptied.
pub fn enforce_arc_consistency(
    crossword: &Crossword,
    domains: &mut Domains,
    arcs: Option<&[Arc]>,
) -> bool {
    let queue = match arcs {
        Some(arcs) => ArcQueue::with_arcs(arcs.iter().copied()),
        None => ArcQueue::all_arcs(crossword),
    };

    let mut revisions = 0;
    propagate(crossword, domains, queue, &mut revisions)
}

/// Drain `queue`, revising each arc and re-enqueueing the arcs into any slot whose domain shrank.
/// `revisions` counts the revisions that removed at least one word.
pub(crate) fn propagate(
    crossword: &Crossword,
    domains: &mut Domains,
    mut queue: ArcQueue,
    revisions: &mut u64,
) -> bool {
    trace!("enforcing arc consistency from {} arcs", queue.len());

    while let Some((x, y)) = queue.pop_front() {
        if !revise(crossword, domains, x, y) {
            continue;
        }

        *revisions += 1;
        trace!("revised slot {} against slot {}: {} candidates left", x, y, domains.len(x));

        if domains.is_empty(x) {
            debug!("slot {} has no candidates left", crossword.variable(x));
            return false;
        }

        // Shrinking `x` can strand words in any other slot crossing it.
        for &z in crossword.neighbors(x) {
            if z != y {
                queue.enqueue((z, x));
            }
        }
    }

    true
}
