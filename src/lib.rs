//! Disjoint-set forests whose edges carry algebraic relation values.
//!
//! A plain union-find answers "are these in the same set?". The structures
//! here additionally answer "and how do they relate?" -- by an offset, a
//! ratio, a parity, or a residue class -- as long as every merge was asserted
//! together with a relation value. Contradictory assertions are detected and
//! reported instead of applied, and queries across components come back as
//! `None` rather than a guess.
//!
//! ```
//! use relset::{OffsetSum, UnionOutcome, WeightedUnionFind};
//!
//! let mut heights = WeightedUnionFind::new(5, OffsetSum);
//! assert_eq!(heights.union(1, 2, 3), UnionOutcome::Merged);
//! assert_eq!(heights.union(2, 3, 2), UnionOutcome::Merged);
//! assert_eq!(heights.query(1, 3), Some(5));
//! assert_eq!(heights.union(1, 3, 4), UnionOutcome::Conflict);
//! assert_eq!(heights.query(0, 1), None);
//! ```
//!
//! [`KeyedUnionFind`] wraps the same machinery for arbitrary hashable keys,
//! interning them on first use. Custom relation types plug in through
//! [`RelationAlgebra`].

mod algebra;
mod forest;
mod keyed;
mod weighted;

pub use algebra::{ModularAdd, OffsetSum, RatioMul, RelationAlgebra, XorParity};
pub use keyed::KeyedUnionFind;
pub use weighted::{ConflictError, UnionOutcome, WeightedUnionFind};
