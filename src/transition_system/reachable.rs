use std::collections::VecDeque;

use bit_set::BitSet;

use crate::alphabet::SymbolIndex;

use super::{StateIndex, TransitionSystem};

/// Type alias for a minimal representative of a state which is its length-lexicographically minimal
/// access sequence and its state index.
pub type MinimalRepresentative = (Vec<SymbolIndex>, StateIndex);

/// Struct that can return the minimal representatives of a transition system. A minimal representative
/// for a state `q` of some transition system is the length-lexicographically minimal word with which
/// `q` can be reached from a given state. Symbols are ordered by their position in the alphabet.
#[derive(Debug, Clone)]
pub struct MinimalRepresentatives<'a, Ts> {
    ts: &'a Ts,
    seen: BitSet,
    queue: VecDeque<MinimalRepresentative>,
}

#[allow(missing_docs)]
impl<'a, Ts> MinimalRepresentatives<'a, Ts>
where
    Ts: TransitionSystem,
{
    pub fn new(ts: &'a Ts, origin: StateIndex) -> Self {
        let mut seen = BitSet::with_capacity(ts.size());
        let mut queue = VecDeque::new();
        if ts.contains_state(origin) {
            seen.insert(origin);
            queue.push_back((vec![], origin));
        }
        Self { ts, seen, queue }
    }
}

impl<'a, Ts> Iterator for MinimalRepresentatives<'a, Ts>
where
    Ts: TransitionSystem,
{
    type Item = MinimalRepresentative;

    fn next(&mut self) -> Option<Self::Item> {
        let (access, q) = self.queue.pop_front()?;
        for sym in self.ts.alphabet().universe() {
            let Some(p) = self.ts.successor_index(q, sym) else {
                continue;
            };
            if self.seen.insert(p) {
                let mut new_access = access.clone();
                new_access.push(sym);
                self.queue.push_back((new_access, p));
            }
        }
        Some((access, q))
    }
}

/// Allows iterating over the indices of all reachable states in a [`TransitionSystem`].
#[derive(Debug, Clone)]
pub struct ReachableStateIndices<'a, Ts>(MinimalRepresentatives<'a, Ts>);

impl<'a, Ts> Iterator for ReachableStateIndices<'a, Ts>
where
    Ts: TransitionSystem,
{
    type Item = StateIndex;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, q)| q)
    }
}

#[allow(missing_docs)]
impl<'a, Ts> ReachableStateIndices<'a, Ts>
where
    Ts: TransitionSystem,
{
    pub fn new(ts: &'a Ts, origin: StateIndex) -> Self {
        Self(MinimalRepresentatives::new(ts, origin))
    }
}
