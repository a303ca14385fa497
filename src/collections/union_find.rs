//! Disjoint-set (Union-Find) over a fixed universe of element indices.
//!
//! Tracks a partition of `0..n` under `union` and answers `connected`
//! queries exactly. The grid model uses one instance per connectivity
//! question it needs to answer (see [`crate::grid`]).
//!
//! # Algorithm
//!
//! **Weighted quick-union**: the root of the smaller tree is linked under
//! the root of the larger one, which bounds every tree height by
//! ⌊log₂ n⌋. `find` additionally applies **path halving** (every visited
//! node is re-linked to its grandparent), which brings the amortized cost
//! per operation down to O(α(n)).
//!
//! # References
//!
//! - Tarjan & van Leeuwen (1984), "Worst-Case Analysis of Set Union Algorithms"
//! - Sedgewick & Wayne (2011), *Algorithms*, 4th ed., §1.5

/// Disjoint-set forest with union by size and path halving.
///
/// # Examples
/// ```
/// use percolation::collections::UnionFind;
///
/// let mut uf = UnionFind::new(6);
/// uf.union(0, 1);
/// uf.union(4, 5);
/// assert!(uf.connected(1, 0));
/// assert!(!uf.connected(1, 4));
///
/// uf.union(1, 5);
/// assert!(uf.connected(0, 4));
/// assert_eq!(uf.component_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl UnionFind {
    /// Creates `n` singleton sets `{0}, {1}, ..., {n-1}`.
    ///
    /// # Complexity
    /// O(n)
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            components: n,
        }
    }

    /// Returns the number of elements in the universe.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if the universe is empty.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the root of the set containing `x`, halving the path on
    /// the way up.
    ///
    /// # Panics
    /// Panics if `x >= len()`.
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Merges the sets containing `x` and `y`.
    ///
    /// Returns `true` if a merge happened, `false` if both were already in
    /// the same set (the call is then a no-op).
    ///
    /// # Panics
    /// Panics if `x >= len()` or `y >= len()`.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let mut root_x = self.find(x);
        let mut root_y = self.find(y);
        if root_x == root_y {
            return false;
        }

        if self.size[root_x] < self.size[root_y] {
            std::mem::swap(&mut root_x, &mut root_y);
        }
        // root_x is now the larger tree
        self.parent[root_y] = root_x;
        self.size[root_x] += self.size[root_y];
        self.components -= 1;
        true
    }

    /// Returns `true` if `x` and `y` belong to the same set.
    ///
    /// # Complexity
    /// Amortized O(α(n))
    pub fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Returns the number of disjoint sets.
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// Returns the number of elements in the set containing `x`.
    pub fn component_size(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.size[root]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        let mut uf = UnionFind::new(4);
        assert_eq!(uf.len(), 4);
        assert_eq!(uf.component_count(), 4);
        for i in 0..4 {
            assert_eq!(uf.find(i), i);
            assert_eq!(uf.component_size(i), 1);
        }
    }

    #[test]
    fn test_empty_universe() {
        let uf = UnionFind::new(0);
        assert!(uf.is_empty());
        assert_eq!(uf.component_count(), 0);
    }

    #[test]
    fn test_union_is_idempotent() {
        let mut uf = UnionFind::new(3);
        assert!(uf.union(2, 0));
        assert!(!uf.union(0, 2));
        assert!(!uf.union(2, 2));
        assert_eq!(uf.component_count(), 2);
        assert_eq!(uf.component_size(0), 2);
    }

    #[test]
    fn test_smaller_tree_goes_under_larger() {
        let mut uf = UnionFind::new(5);
        uf.union(0, 1);
        uf.union(0, 2);
        let big_root = uf.find(0);
        // {3} is the smaller side even though it is passed first
        uf.union(3, 0);
        assert_eq!(uf.find(3), big_root);
        assert_eq!(uf.component_size(3), 4);
    }

    #[test]
    fn test_chain_merges_everything() {
        let n = 64;
        let mut uf = UnionFind::new(n);
        for i in 1..n {
            uf.union(i - 1, i);
        }
        assert_eq!(uf.component_count(), 1);
        assert!(uf.connected(0, n - 1));
        assert_eq!(uf.component_size(n / 2), n);
    }

    #[test]
    fn test_disjoint_groups_stay_apart() {
        let mut uf = UnionFind::new(6);
        uf.union(0, 2);
        uf.union(2, 4);
        uf.union(1, 3);
        uf.union(3, 5);
        assert!(uf.connected(0, 4));
        assert!(uf.connected(1, 5));
        assert!(!uf.connected(0, 5));
        assert_eq!(uf.component_count(), 2);
    }
}
