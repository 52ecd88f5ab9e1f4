use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Which predecessor links a search records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trace {
    #[default]
    None,
    /// The predecessor that first achieved the best cost; enough for one path.
    First,
    /// Every predecessor achieving the best cost; needed to enumerate all best paths.
    All,
}

/// Everything a single search invocation discovered.
///
/// `distances` holds final costs only. For BFS a state is final once it is
/// enqueued; for Dijkstra once it is popped.
#[derive(Debug, Clone)]
pub struct SearchResult<S> {
    pub(crate) distances: HashMap<S, usize>,
    pub(crate) predecessors: HashMap<S, Vec<S>>,
    pub(crate) reached: Vec<(S, usize)>,
}

impl<S> Default for SearchResult<S> {
    fn default() -> Self {
        SearchResult {
            distances: HashMap::new(),
            predecessors: HashMap::new(),
            reached: Vec::new(),
        }
    }
}

impl<S: Clone + Eq + Hash> SearchResult<S> {
    /// Cost of the first target reached, `None` when no target was reachable.
    pub fn cost(&self) -> Option<usize> {
        self.reached.first().map(|(_, cost)| *cost)
    }

    pub fn target(&self) -> Option<&S> {
        self.reached.first().map(|(state, _)| state)
    }

    /// Targets in the order they were finalized, i.e. by non-decreasing cost.
    pub fn reached(&self) -> &[(S, usize)] {
        &self.reached
    }

    pub fn distance(&self, state: &S) -> Option<usize> {
        self.distances.get(state).copied()
    }

    pub fn distances(&self) -> &HashMap<S, usize> {
        &self.distances
    }

    pub fn into_distances(self) -> HashMap<S, usize> {
        self.distances
    }

    pub(crate) fn record_predecessor(&mut self, state: &S, predecessor: S) {
        let predecessors = self.predecessors.entry(state.clone()).or_default();
        if !predecessors.contains(&predecessor) {
            predecessors.push(predecessor);
        }
    }

    /// Extra equal-cost parent of an already finalized state. Sources never get
    /// one, which keeps the first-predecessor chains acyclic.
    pub(crate) fn record_alternative_predecessor(&mut self, state: &S, predecessor: S) {
        if let Some(predecessors) = self.predecessors.get_mut(state) {
            if !predecessors.contains(&predecessor) {
                predecessors.push(predecessor);
            }
        }
    }

    /// One best path from a source to `target`, following first predecessors.
    /// Needs `Trace::First` or `Trace::All`.
    pub fn path(&self, target: &S) -> Option<Vec<S>> {
        if !self.distances.contains_key(target) {
            return None;
        }

        let mut current = target.clone();
        let mut path = vec![current.clone()];
        while let Some(previous) = self
            .predecessors
            .get(&current)
            .and_then(|predecessors| predecessors.first())
        {
            path.push(previous.clone());
            current = previous.clone();
        }
        path.reverse();
        Some(path)
    }

    /// Every state lying on at least one best path to any of `targets`.
    /// Complete only under `Trace::All`.
    pub fn best_path_states<'a, I>(&self, targets: I) -> HashSet<S>
    where
        I: IntoIterator<Item = &'a S>,
        S: 'a,
    {
        let mut stack: Vec<S> = targets
            .into_iter()
            .filter(|target| self.distances.contains_key(*target))
            .cloned()
            .collect();
        let mut seen: HashSet<S> = stack.iter().cloned().collect();

        while let Some(state) = stack.pop() {
            for predecessor in self.predecessors.get(&state).into_iter().flatten() {
                if seen.insert(predecessor.clone()) {
                    stack.push(predecessor.clone());
                }
            }
        }

        seen
    }
}
