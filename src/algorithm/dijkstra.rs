use crate::common::{Goal, OpenNode, SearchResult, Trace, Transition};
use crate::stat::Stats;

use std::collections::{BinaryHeap, HashMap};
use tracing::{debug, instrument, trace};

/// Best-first search keyed by accumulated cost.
///
/// A state may sit in the open list several times with different costs; only
/// its first pop expands it, and that pop carries its true minimum cost. Pushes
/// that cannot beat the best cost seen so far are dropped. Equal-cost pushes are
/// kept only under [`Trace::All`], where every equally good parent matters.
///
/// Under [`Trace::All`] an early stop is deferred until every open entry at the
/// completing cost has been popped, so the targets keep all their best parents.
#[instrument(skip_all, name = "dijkstra", level = "debug")]
pub fn dijkstra<T, G, I>(
    transition: &T,
    sources: I,
    goal: &G,
    trace: Trace,
    stats: &mut Stats,
) -> SearchResult<T::State>
where
    T: Transition,
    G: Goal<T::State>,
    I: IntoIterator<Item = T::State>,
{
    let mut result = SearchResult::default();
    let mut open = BinaryHeap::new();
    let mut best: HashMap<T::State, usize> = HashMap::new();
    let mut order = 0;
    let max_cost = goal.max_cost();
    let mut settle_cost: Option<usize> = None;
    stats.searches += 1;

    for source in sources {
        if best.insert(source.clone(), 0).is_none() {
            open.push(OpenNode {
                state: source,
                parent: None,
                cost: 0,
                order,
            });
            order += 1;
        }
    }

    while let Some(OpenNode {
        state: current,
        parent,
        cost,
        ..
    }) = open.pop()
    {
        if settle_cost.is_some_and(|limit| cost > limit) {
            debug!("equal-cost parents settled below cost {cost}");
            return result;
        }

        if let Some(finalized) = result.distance(&current) {
            debug_assert!(finalized <= cost);
            if trace == Trace::All && finalized == cost {
                if let Some(parent) = parent {
                    result.record_alternative_predecessor(&current, parent);
                }
            }
            continue;
        }

        trace!("expand state: {current:?} cost: {cost}");
        stats.expanded_nodes += 1;
        result.distances.insert(current.clone(), cost);
        if let Some(parent) = parent {
            if trace != Trace::None {
                result.record_predecessor(&current, parent);
            }
        }

        if settle_cost.is_none() && goal.is_target(&current) {
            result.reached.push((current.clone(), cost));
            if goal.is_complete(&result.reached) {
                debug!("reached {current:?} at cost {cost}");
                if trace != Trace::All {
                    return result;
                }
                settle_cost = Some(cost);
            }
        }

        for (next, step) in transition.successors(&current) {
            let next_cost = cost + step;
            if max_cost.is_some_and(|max_cost| next_cost > max_cost) {
                continue;
            }

            // Only zero-cost moves can lead back to a finalized state at equal cost.
            if let Some(finalized) = result.distance(&next) {
                if trace == Trace::All && finalized == next_cost {
                    result.record_alternative_predecessor(&next, current.clone());
                }
                continue;
            }

            if let Some(&known) = best.get(&next) {
                if next_cost > known || (next_cost == known && trace != Trace::All) {
                    continue;
                }
            }

            best.insert(next.clone(), next_cost);
            stats.generated_nodes += 1;
            open.push(OpenNode {
                state: next,
                parent: Some(current.clone()),
                cost: next_cost,
                order,
            });
            order += 1;
        }
    }

    debug!(
        "open list exhausted, finalized {} states, reached {} targets",
        result.distances.len(),
        result.reached.len()
    );
    result
}
