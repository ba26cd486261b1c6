use std::cmp::PartialOrd;

/// A pair of elements sorted in increasing order.
///
/// Used as the key of an undirected mesh edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde-serialize",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct SortedPair<T: PartialOrd>([T; 2]);

impl<T: PartialOrd> SortedPair<T> {
    /// Sorts two elements in increasing order into a new pair.
    pub fn new(element1: T, element2: T) -> Self {
        if element1 > element2 {
            SortedPair([element2, element1])
        } else {
            SortedPair([element1, element2])
        }
    }

    /// The smallest element of the pair.
    pub fn min(&self) -> &T {
        &self.0[0]
    }

    /// The largest element of the pair.
    pub fn max(&self) -> &T {
        &self.0[1]
    }
}

#[cfg(test)]
mod tests {
    use super::SortedPair;

    #[test]
    fn order_independent() {
        assert_eq!(SortedPair::new(4u32, 1), SortedPair::new(1, 4));
        assert_eq!(*SortedPair::min(&SortedPair::new(4u32, 1)), 1);
        assert_eq!(*SortedPair::max(&SortedPair::new(4u32, 1)), 4);
    }
}
