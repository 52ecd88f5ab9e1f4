mod frontier;
mod goal;
mod result;
mod transition;

pub(crate) use frontier::OpenNode;
pub use goal::{AllTargets, Exhaust, FirstTarget, Goal};
pub use result::{SearchResult, Trace};
pub use transition::{from_fn, FnTransition, Transition};
