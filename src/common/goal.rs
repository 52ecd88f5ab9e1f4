/// Termination policy of a search.
///
/// The engine asks `is_target` for every state it finalizes, appends accepted
/// states to the reached list, then asks `is_complete` whether it may stop.
/// States whose cost would exceed `max_cost` are never enqueued.
pub trait Goal<S> {
    fn is_target(&self, state: &S) -> bool;

    fn is_complete(&self, reached: &[(S, usize)]) -> bool;

    fn max_cost(&self) -> Option<usize> {
        None
    }
}

/// Stop at the nearest state accepted by the predicate.
pub struct FirstTarget<P>(pub P);

impl<S, P> Goal<S> for FirstTarget<P>
where
    P: Fn(&S) -> bool,
{
    fn is_target(&self, state: &S) -> bool {
        (self.0)(state)
    }

    fn is_complete(&self, reached: &[(S, usize)]) -> bool {
        !reached.is_empty()
    }
}

/// Record every accepted state, stopping early once `expected` of them are found.
pub struct AllTargets<P> {
    pub predicate: P,
    pub expected: Option<usize>,
}

impl<P> AllTargets<P> {
    pub fn new(predicate: P) -> Self {
        AllTargets {
            predicate,
            expected: None,
        }
    }

    pub fn expecting(predicate: P, expected: usize) -> Self {
        AllTargets {
            predicate,
            expected: Some(expected),
        }
    }
}

impl<S, P> Goal<S> for AllTargets<P>
where
    P: Fn(&S) -> bool,
{
    fn is_target(&self, state: &S) -> bool {
        (self.predicate)(state)
    }

    fn is_complete(&self, reached: &[(S, usize)]) -> bool {
        self.expected.is_some_and(|expected| reached.len() >= expected)
    }
}

/// No targets: compute every distance, optionally up to a cost bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exhaust {
    pub max_cost: Option<usize>,
}

impl Exhaust {
    pub fn within(max_cost: usize) -> Self {
        Exhaust {
            max_cost: Some(max_cost),
        }
    }
}

impl<S> Goal<S> for Exhaust {
    fn is_target(&self, _state: &S) -> bool {
        false
    }

    fn is_complete(&self, _reached: &[(S, usize)]) -> bool {
        false
    }

    fn max_cost(&self) -> Option<usize> {
        self.max_cost
    }
}
