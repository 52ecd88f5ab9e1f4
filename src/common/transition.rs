use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

/// Successor function of a search space.
///
/// `State` is whatever the search needs to tell two configurations apart: a bare
/// position, a position plus facing, a position plus time phase, etc. Costs are
/// the incremental cost of taking the move; BFS ignores them.
///
/// Implementations must be pure: the same state always yields the same moves.
/// Moves that leave the grid or hit a wall are simply not yielded.
pub trait Transition {
    type State: Clone + Eq + Hash + Debug;

    fn successors(&self, state: &Self::State) -> impl Iterator<Item = (Self::State, usize)>;
}

/// Closure-backed transition for ad-hoc graphs.
pub struct FnTransition<S, F> {
    successors: F,
    _state: PhantomData<fn(&S)>,
}

pub fn from_fn<S, F>(successors: F) -> FnTransition<S, F>
where
    F: Fn(&S) -> Vec<(S, usize)>,
{
    FnTransition {
        successors,
        _state: PhantomData,
    }
}

impl<S, F> Transition for FnTransition<S, F>
where
    S: Clone + Eq + Hash + Debug,
    F: Fn(&S) -> Vec<(S, usize)>,
{
    type State = S;

    fn successors(&self, state: &S) -> impl Iterator<Item = (S, usize)> {
        (self.successors)(state).into_iter()
    }
}
