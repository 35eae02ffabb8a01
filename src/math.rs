use std::hash::Hash;

use crate::transition_system::StateIndex;

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// Assigns dense ids to the given keys in the order in which they are first seen. Returns the id
/// of every key together with the number of distinct keys.
pub fn first_seen_ids<K, I>(keys: I) -> (Vec<usize>, usize)
where
    K: Hash + Eq,
    I: IntoIterator<Item = K>,
{
    let mut seen: Map<K, usize> = Map::default();
    let ids = keys
        .into_iter()
        .map(|key| {
            let next = seen.len();
            *seen.entry(key).or_insert(next)
        })
        .collect();
    (ids, seen.len())
}

/// A partition is a different view on a congruence relation, by grouping the states
/// `0..n` into their respective classes under the relation.
///
/// Every state is assigned the id of its class and classes are numbered densely in the
/// order in which their first member appears. Within a class, the members are kept in
/// ascending order, so the first member of a class is its canonical representative.
#[derive(Debug, Clone)]
pub struct Partition {
    class_of: Vec<usize>,
    classes: Vec<Vec<StateIndex>>,
}

impl Partition {
    /// Creates a partition from the class id of every state, where the id of state `q` is at
    /// position `q`. The ids need not be dense, they are renumbered in first-seen order.
    ///
    /// # Example
    /// ```
    /// use transducers::math::Partition;
    ///
    /// let p = Partition::from_class_ids([7, 3, 7]);
    /// assert_eq!(p.size(), 2);
    /// assert_eq!(p.class_ids(), &[0, 1, 0]);
    /// ```
    pub fn from_class_ids<I: IntoIterator<Item = usize>>(ids: I) -> Self {
        let (class_of, size) = first_seen_ids(ids);
        let mut classes = vec![vec![]; size];
        for (q, &c) in class_of.iter().enumerate() {
            classes[c].push(q);
        }
        Self { class_of, classes }
    }

    /// Builds a new partition from an iterator that yields iterators over the members of each
    /// class. Panics if the classes do not cover `0..n` precisely once.
    pub fn new<X: IntoIterator<Item = StateIndex>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        let groups: Vec<Vec<StateIndex>> = iter
            .into_iter()
            .map(|it| it.into_iter().collect())
            .collect();
        let universe = groups.iter().map(Vec::len).sum();
        let mut ids = vec![usize::MAX; universe];
        for (c, group) in groups.iter().enumerate() {
            for &q in group {
                assert!(
                    q < universe && ids[q] == usize::MAX,
                    "state {q} is not covered precisely once"
                );
                ids[q] = c;
            }
        }
        Self::from_class_ids(ids)
    }

    /// Returns the partition of `0..n` in which every state forms its own class.
    pub fn discrete(n: usize) -> Self {
        Self::from_class_ids(0..n)
    }

    /// Returns the size of the partition, i.e. the number of classes.
    pub fn size(&self) -> usize {
        self.classes.len()
    }

    /// Returns the number of states that are partitioned.
    pub fn universe_size(&self) -> usize {
        self.class_of.len()
    }

    /// Returns true if every class consists of a single state.
    pub fn is_discrete(&self) -> bool {
        self.size() == self.universe_size()
    }

    /// Gives the id of the class containing `state`, if `state` is partitioned at all.
    pub fn class_of(&self, state: StateIndex) -> Option<usize> {
        self.class_of.get(state).copied()
    }

    /// Returns the class id of every state, indexed by state.
    pub fn class_ids(&self) -> &[usize] {
        &self.class_of
    }

    /// Returns the members of the class with the given `id` in ascending order.
    pub fn class(&self, id: usize) -> Option<&[StateIndex]> {
        self.classes.get(id).map(Vec::as_slice)
    }

    /// Iterates over all classes in the order of their ids.
    pub fn classes(&self) -> impl Iterator<Item = &[StateIndex]> + '_ {
        self.classes.iter().map(Vec::as_slice)
    }

    /// Returns the canonical representative of the class with the given `id`, which is its
    /// smallest member.
    pub fn representative(&self, id: usize) -> Option<StateIndex> {
        self.classes.get(id).and_then(|c| c.first()).copied()
    }

    /// Returns true if both states lie in the same class.
    pub fn congruent(&self, p: StateIndex, q: StateIndex) -> bool {
        matches!((self.class_of(p), self.class_of(q)), (Some(c), Some(d)) if c == d)
    }

    /// Checks whether `self` refines `coarser`, meaning every class of `self` is contained in
    /// some class of `coarser`. Partitions over different universes never refine each other.
    pub fn refines(&self, coarser: &Partition) -> bool {
        self.universe_size() == coarser.universe_size()
            && self.classes().all(|class| {
                class
                    .iter()
                    .all(|&q| coarser.congruent(class[0], q))
            })
    }
}

impl PartialEq for Partition {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.refines(other)
    }
}
impl Eq for Partition {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_equality_ignores_class_names() {
        let p = Partition::new([vec![0, 2], vec![1]]);
        let q = Partition::new([vec![1], vec![2, 0]]);
        assert_eq!(p, q);
        assert_eq!(p.class_ids(), &[0, 1, 0]);
        assert_eq!(q.class_ids(), &[0, 1, 0]);
        assert_ne!(p, Partition::discrete(3));
    }

    #[test]
    fn refinement_order() {
        let coarse = Partition::new([vec![0, 1, 2], vec![3]]);
        let fine = Partition::new([vec![0], vec![1, 2], vec![3]]);
        assert!(fine.refines(&coarse));
        assert!(!coarse.refines(&fine));
        assert!(Partition::discrete(4).refines(&fine));
        assert!(!Partition::discrete(3).refines(&fine));
    }

    #[test]
    fn representatives_are_smallest_members() {
        let p = Partition::from_class_ids([1, 0, 1, 0]);
        assert_eq!(p.representative(0), Some(0));
        assert_eq!(p.representative(1), Some(1));
        assert_eq!(p.class(1), Some(&[1, 3][..]));
        assert_eq!(p.representative(2), None);
        assert!(p.congruent(1, 3));
        assert!(!p.congruent(0, 1));
    }

    #[test]
    fn first_seen_numbering() {
        let (ids, n) = first_seen_ids(["b", "a", "b", "c"]);
        assert_eq!(ids, vec![0, 1, 0, 2]);
        assert_eq!(n, 3);
    }
}
