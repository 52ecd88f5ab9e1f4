use crate::common::{Goal, SearchResult, Trace, Transition};
use crate::stat::Stats;

use std::collections::VecDeque;
use tracing::{debug, instrument, trace};

/// Unweighted breadth-first search from one or more sources.
///
/// Every transition counts as a single step, whatever cost it carries. States are
/// marked discovered when enqueued, so each one enters the queue at most once
/// and its recorded distance is final from that moment on.
#[instrument(skip_all, name = "bfs", level = "debug")]
pub fn bfs<T, G, I>(
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
    let mut queue = VecDeque::new();
    let max_cost = goal.max_cost();
    stats.searches += 1;

    for source in sources {
        if result.distances.contains_key(&source) {
            continue;
        }
        result.distances.insert(source.clone(), 0);
        queue.push_back((source, 0));
    }

    while let Some((current, distance)) = queue.pop_front() {
        trace!("expand state: {current:?} distance: {distance}");
        stats.expanded_nodes += 1;

        if goal.is_target(&current) {
            result.reached.push((current.clone(), distance));
            if goal.is_complete(&result.reached) {
                debug!("reached {current:?} at distance {distance}");
                return result;
            }
        }

        let next_distance = distance + 1;
        if max_cost.is_some_and(|max_cost| next_distance > max_cost) {
            continue;
        }

        for (next, _) in transition.successors(&current) {
            let known = result.distances.get(&next).copied();
            match known {
                Some(known) => {
                    if trace == Trace::All && known == next_distance {
                        result.record_alternative_predecessor(&next, current.clone());
                    }
                }
                None => {
                    stats.generated_nodes += 1;
                    result.distances.insert(next.clone(), next_distance);
                    if trace != Trace::None {
                        result.record_predecessor(&next, current.clone());
                    }
                    queue.push_back((next, next_distance));
                }
            }
        }
    }

    debug!(
        "frontier exhausted, discovered {} states, reached {} targets",
        result.distances.len(),
        result.reached.len()
    );
    result
}
