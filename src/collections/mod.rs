//! Data structures backing the grid model.

mod union_find;

pub use union_find::UnionFind;
