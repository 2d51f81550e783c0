//! Flat-index bijections for the model's variable spaces.
//!
//! The model packs two multi-dimensional variable families into flat
//! vectors: the diner × restaurant × day assignment grid and the
//! triangular space of unordered diner pairs. Keeping the arithmetic in
//! these two small types (instead of scattered through constraint
//! construction) keeps the combinatorial layout auditable.

/// Bijection between (item, restaurant, day) triples and flat indices.
///
/// Layout is row-major: item, then restaurant, then day. The same grid
/// shape serves both the per-diner assignment variables and the per-pair
/// co-location variables.
#[derive(Debug, Clone, Copy)]
pub(crate) struct VarGrid {
    items: usize,
    restaurants: usize,
    days: usize,
}

impl VarGrid {
    pub(crate) fn new(items: usize, restaurants: usize, days: usize) -> Self {
        Self {
            items,
            restaurants,
            days,
        }
    }

    /// Flat index of (item, restaurant, day).
    #[inline]
    pub(crate) fn index(&self, item: usize, restaurant: usize, day: usize) -> usize {
        debug_assert!(item < self.items && restaurant < self.restaurants && day < self.days);
        item * (self.restaurants * self.days) + restaurant * self.days + day
    }

    /// Total number of cells.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.items * self.restaurants * self.days
    }
}

/// Canonical triangular numbering of unordered pairs (i, j) with i < j.
///
/// Index 0 is (0, 1); indices increase with i, then j, matching the order
/// `iter` yields. Avoids storing a full square matrix.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PairTable {
    n: usize,
}

impl PairTable {
    pub(crate) fn new(n: usize) -> Self {
        Self { n }
    }

    /// Number of unordered pairs: n·(n−1)/2.
    #[inline]
    pub(crate) fn count(&self) -> usize {
        self.n * self.n.saturating_sub(1) / 2
    }

    /// Flat index of the pair (i, j), requiring i < j < n.
    #[inline]
    pub(crate) fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < j && j < self.n);
        i * self.n - i * (i + 1) / 2 + (j - i - 1)
    }

    /// All pairs in index order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.n).flat_map(move |i| ((i + 1)..self.n).map(move |j| (i, j)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_grid_round_trip_is_dense() {
        let grid = VarGrid::new(3, 4, 2);
        assert_eq!(grid.len(), 24);

        let mut seen = HashSet::new();
        for item in 0..3 {
            for restaurant in 0..4 {
                for day in 0..2 {
                    let idx = grid.index(item, restaurant, day);
                    assert!(idx < grid.len());
                    assert!(seen.insert(idx), "duplicate index {idx}");
                }
            }
        }
        assert_eq!(seen.len(), grid.len());
    }

    #[test]
    fn test_grid_day_is_fastest_axis() {
        let grid = VarGrid::new(2, 2, 3);
        assert_eq!(grid.index(0, 0, 0), 0);
        assert_eq!(grid.index(0, 0, 1), 1);
        assert_eq!(grid.index(0, 1, 0), 3);
        assert_eq!(grid.index(1, 0, 0), 6);
    }

    #[test]
    fn test_pair_count() {
        assert_eq!(PairTable::new(0).count(), 0);
        assert_eq!(PairTable::new(1).count(), 0);
        assert_eq!(PairTable::new(2).count(), 1);
        assert_eq!(PairTable::new(8).count(), 28);
    }

    #[test]
    fn test_pair_index_matches_iter_order() {
        let pairs = PairTable::new(5);
        for (expected, (i, j)) in pairs.iter().enumerate() {
            assert_eq!(pairs.index(i, j), expected);
        }
    }

    #[test]
    fn test_pair_index_is_bijective() {
        let pairs = PairTable::new(7);
        let indices: HashSet<usize> = pairs.iter().map(|(i, j)| pairs.index(i, j)).collect();
        assert_eq!(indices.len(), pairs.count());
        assert_eq!(indices.iter().max(), Some(&(pairs.count() - 1)));
    }
}
