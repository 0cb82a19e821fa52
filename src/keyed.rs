use crate::algebra::RelationAlgebra;
use crate::weighted::{ConflictError, UnionOutcome, WeightedUnionFind};
use core::hash::Hash;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

/// A [`WeightedUnionFind`] over arbitrary hashable keys instead of a dense
/// index range.
///
/// Keys are interned on first use: asserting a relation on a key nobody has
/// seen before silently creates a singleton with the identity self-relation,
/// so there is no out-of-range failure mode here. Lookups never intern; an
/// unseen key is simply unrelated to everything.
pub struct KeyedUnionFind<K, A: RelationAlgebra> {
    ids: FxHashMap<K, u32>,
    inner: WeightedUnionFind<A>,
}

impl<K: Eq + Hash, A: RelationAlgebra> KeyedUnionFind<K, A> {
    pub fn new(algebra: A) -> Self {
        Self {
            ids: FxHashMap::default(),
            inner: WeightedUnionFind::new(0, algebra),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn component_count(&self) -> usize {
        self.inner.component_count()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.ids.contains_key(key)
    }

    /// Interns `key`, returning its dense ID. Idempotent.
    pub fn intern(&mut self, key: K) -> u32 {
        match self.ids.entry(key) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let id = self.inner.push();
                *entry.insert(id)
            }
        }
    }

    pub fn union(&mut self, x: K, y: K, relation: A::Value) -> UnionOutcome {
        let x = self.intern(x);
        let y = self.intern(y);
        self.inner.union(x, y, relation)
    }

    pub fn try_union(
        &mut self,
        x: K,
        y: K,
        relation: A::Value,
    ) -> Result<UnionOutcome, ConflictError<A::Value>> {
        let x = self.intern(x);
        let y = self.intern(y);
        self.inner.try_union(x, y, relation)
    }

    pub fn query(&mut self, x: &K, y: &K) -> Option<A::Value> {
        let x = *self.ids.get(x)?;
        let y = *self.ids.get(y)?;
        self.inner.query(x, y)
    }

    pub fn is_connected(&mut self, x: &K, y: &K) -> bool {
        match (self.ids.get(x), self.ids.get(y)) {
            (Some(&x), Some(&y)) => self.inner.is_connected(x, y),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{OffsetSum, RatioMul};

    #[test]
    fn ratios_over_string_keys() {
        let mut dsu = KeyedUnionFind::new(RatioMul);
        assert_eq!(dsu.union("a", "b", 2.0), UnionOutcome::Merged);
        assert_eq!(dsu.union("b", "c", 3.0), UnionOutcome::Merged);
        assert_eq!(dsu.query(&"a", &"c"), Some(6.0));
        assert_eq!(dsu.query(&"c", &"a"), Some(1.0 / 6.0));
        assert_eq!(dsu.query(&"a", &"unknown"), None);
    }

    #[test]
    fn ratio_conflicts_respect_the_tolerance() {
        let mut dsu = KeyedUnionFind::new(RatioMul);
        dsu.union("a", "b", 2.0);
        assert_eq!(dsu.union("a", "b", 2.5), UnionOutcome::Conflict);
        // Off by far less than the comparison tolerance.
        assert_eq!(
            dsu.union("a", "b", 2.0 + 1e-13),
            UnionOutcome::AlreadyConsistent
        );
    }

    #[test]
    fn union_interns_unseen_keys() {
        let mut dsu = KeyedUnionFind::new(OffsetSum);
        assert!(dsu.is_empty());
        dsu.union("x", "y", 1);
        assert_eq!(dsu.len(), 2);
        assert_eq!(dsu.component_count(), 1);
        assert!(dsu.contains(&"x"));
        dsu.union("x", "x", 0);
        assert_eq!(dsu.len(), 2);
    }

    #[test]
    fn lookups_do_not_intern() {
        let mut dsu = KeyedUnionFind::new(OffsetSum);
        dsu.union("x", "y", 1);
        assert_eq!(dsu.query(&"x", &"ghost"), None);
        assert!(!dsu.is_connected(&"ghost", &"phantom"));
        assert_eq!(dsu.len(), 2);
        assert!(!dsu.contains(&"ghost"));
    }

    #[test]
    fn intern_is_idempotent() {
        let mut dsu = KeyedUnionFind::new(OffsetSum);
        let first = dsu.intern("x");
        assert_eq!(dsu.intern("x"), first);
        assert_eq!(dsu.len(), 1);
        assert_eq!(dsu.component_count(), 1);
        // An interned key relates to itself and nothing else.
        assert_eq!(dsu.query(&"x", &"x"), Some(0));
    }

    #[test]
    fn try_union_over_keys() {
        let mut dsu = KeyedUnionFind::new(OffsetSum);
        assert_eq!(dsu.try_union("p", "q", 3), Ok(UnionOutcome::Merged));
        assert_eq!(
            dsu.try_union("q", "p", 5),
            Err(ConflictError {
                asserted: 5,
                implied: -3,
            })
        );
    }
}
