use std::cmp::Ordering;

// Dijkstra open list entry.
#[derive(Debug, Clone)]
pub(crate) struct OpenNode<S> {
    pub(crate) state: S,
    pub(crate) parent: Option<S>,
    pub(crate) cost: usize,
    pub(crate) order: usize, // push sequence number
}

impl<S> PartialEq for OpenNode<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.order == other.order
    }
}

impl<S> Eq for OpenNode<S> {}

impl<S> PartialOrd for OpenNode<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed so that BinaryHeap pops the cheapest entry first.
impl<S> Ord for OpenNode<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            // Equal cost: earlier push wins
            .then_with(|| other.order.cmp(&self.order))
    }
}
