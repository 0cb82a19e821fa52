use crate::algebra::RelationAlgebra;
use crate::forest::Forest;
use core::fmt::Debug;
use displaydoc::Display;
use thiserror::Error;

/// What became of an asserted relation.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum UnionOutcome {
    /// merged two components
    Merged,
    /// already implied by earlier assertions
    AlreadyConsistent,
    /// contradicts earlier assertions
    Conflict,
}

impl UnionOutcome {
    pub fn merged(self) -> bool {
        self == Self::Merged
    }

    pub fn is_conflict(self) -> bool {
        self == Self::Conflict
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("asserted relation {asserted:?} contradicts the implied relation {implied:?}")]
pub struct ConflictError<R: Debug> {
    pub asserted: R,
    pub implied: R,
}

/// A disjoint-set forest whose edges carry relation values.
///
/// Beyond "same set or not", the structure can answer *how* two related
/// elements compare, as long as every merge was annotated with a relation
/// from the chosen [`RelationAlgebra`]. `relations[x]` always holds the
/// relation of `x` to its current parent; roots hold the identity. Path
/// compression folds those values as it relinks, so the stored relation stays
/// the relation to the (possibly new) parent no matter how often the forest
/// is reshaped.
pub struct WeightedUnionFind<A: RelationAlgebra> {
    forest: Forest,
    relations: Vec<A::Value>,
    algebra: A,
    components: usize,
    // Scratch for `find`, reused across calls to keep compression
    // allocation-free.
    path: Vec<u32>,
}

impl<A: RelationAlgebra> WeightedUnionFind<A> {
    pub fn new(len: u32, algebra: A) -> Self {
        Self {
            forest: Forest::new(len),
            relations: vec![algebra.identity(); len as usize],
            algebra,
            components: len as usize,
            path: Vec::new(),
        }
    }

    pub fn len(&self) -> u32 {
        self.forest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forest.is_empty()
    }

    /// The number of disjoint components. Decreases by exactly one per
    /// [`UnionOutcome::Merged`] and is otherwise untouched.
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// Appends a fresh element in its own singleton component.
    pub fn push(&mut self) -> u32 {
        self.relations.push(self.algebra.identity());
        self.components += 1;
        self.forest.push()
    }

    /// Returns the representative of `x`, compressing the path behind it.
    ///
    /// Compression is two-pass: first trace the parent chain, then relink
    /// every traced node directly under the root. The relation rewrite runs
    /// from the node nearest the root downward, so each fold sees its
    /// parent's already-folded relation to the root:
    /// `r(node, root) = combine(r(node, parent), r(parent, root))`.
    pub fn find(&mut self, x: u32) -> u32 {
        self.path.clear();
        let root = self.forest.trace(x, &mut self.path);
        let mut to_root = self.algebra.identity();
        for &node in self.path.iter().rev() {
            to_root = self.algebra.combine(&self.relations[node as usize], &to_root);
            self.relations[node as usize] = to_root.clone();
            self.forest.set_parent(node, root);
        }
        root
    }

    /// Asserts that `x` relates to `y` by `relation`.
    ///
    /// A contradicted assertion is reported and *not* applied; whether that
    /// means skipping the statement, counting it, or aborting a batch is the
    /// caller's policy (see [`WeightedUnionFind::try_union`] for the aborting
    /// flavor).
    pub fn union(&mut self, x: u32, y: u32, relation: A::Value) -> UnionOutcome {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            let implied = self.relation_between(x, y);
            return if self.algebra.eq(&implied, &relation) {
                UnionOutcome::AlreadyConsistent
            } else {
                UnionOutcome::Conflict
            };
        }

        // Both finds just ran, so these are the relations to the old roots.
        let to_root_x = self.relations[x as usize].clone();
        let to_root_y = self.relations[y as usize].clone();
        let (child, _) = self.forest.link_by_rank(root_x, root_y);

        // The one value that makes `r(x, y) == relation` hold through the new
        // link. From r(x, y) = r(x, rootX) ∘ r(rootX, rootY) ∘ r(rootY, y):
        //     r(rootX, rootY) = invert(r(x, rootX)) ∘ relation ∘ r(y, rootY)
        // and symmetrically with x and y swapped (inverting `relation`) when
        // the tie-break hangs rootY under rootX instead.
        self.relations[child as usize] = if child == root_x {
            self.algebra.combine(
                &self.algebra.invert(&to_root_x),
                &self.algebra.combine(&relation, &to_root_y),
            )
        } else {
            self.algebra.combine(
                &self.algebra.invert(&to_root_y),
                &self.algebra.combine(&self.algebra.invert(&relation), &to_root_x),
            )
        };
        self.components -= 1;
        UnionOutcome::Merged
    }

    /// Like [`WeightedUnionFind::union`], but surfaces a conflict as an error
    /// carrying both the asserted and the implied relation, for callers that
    /// treat a single contradiction as fatal to the whole batch.
    pub fn try_union(
        &mut self,
        x: u32,
        y: u32,
        relation: A::Value,
    ) -> Result<UnionOutcome, ConflictError<A::Value>> {
        match self.union(x, y, relation.clone()) {
            UnionOutcome::Conflict => {
                let implied = self
                    .query(x, y)
                    .expect("conflicting elements share a component");
                Err(ConflictError {
                    asserted: relation,
                    implied,
                })
            }
            outcome => Ok(outcome),
        }
    }

    /// The relation of `x` to `y`, or `None` if nothing connects them yet.
    pub fn query(&mut self, x: u32, y: u32) -> Option<A::Value> {
        if self.find(x) != self.find(y) {
            return None;
        }
        Some(self.relation_between(x, y))
    }

    pub fn is_connected(&mut self, x: u32, y: u32) -> bool {
        self.find(x) == self.find(y)
    }

    /// The folded relation of `x` to its representative. Useful when one
    /// designated element anchors the component (a "ground" everything else
    /// is measured against) and callers want absolute values.
    pub fn relation_to_root(&mut self, x: u32) -> A::Value {
        self.find(x);
        self.relations[x as usize].clone()
    }

    // Only valid immediately after `find(x)` and `find(y)` returned the same
    // root: both stored relations then point at that shared root.
    fn relation_between(&self, x: u32, y: u32) -> A::Value {
        self.algebra.combine(
            &self.relations[x as usize],
            &self.algebra.invert(&self.relations[y as usize]),
        )
    }
}
