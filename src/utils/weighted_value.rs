use crate::math::Real;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;

/// A value packed with a cost and a tie-breaking rank.
///
/// Values are ordered by increasing cost. Among values with the same cost,
/// the one with the *smallest* rank compares as the greatest, so a max-heap
/// pops the lowest rank first.
#[derive(Copy, Clone, Debug)]
pub struct WeightedValue<T> {
    pub value: T,
    pub cost: Real,
    pub rank: u64,
}

impl<T> WeightedValue<T> {
    /// Creates a new value packed with a cost value and a rank.
    #[inline]
    pub fn new(value: T, cost: Real, rank: u64) -> WeightedValue<T> {
        WeightedValue { value, cost, rank }
    }
}

impl<T> PartialEq for WeightedValue<T> {
    #[inline]
    fn eq(&self, other: &WeightedValue<T>) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for WeightedValue<T> {}

impl<T> PartialOrd for WeightedValue<T> {
    #[inline]
    fn partial_cmp(&self, other: &WeightedValue<T>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for WeightedValue<T> {
    #[inline]
    fn cmp(&self, other: &WeightedValue<T>) -> Ordering {
        OrderedFloat(self.cost)
            .cmp(&OrderedFloat(other.cost))
            .then_with(|| other.rank.cmp(&self.rank))
    }
}
