use crate::common::Transition;
use crate::stat::Stats;

use tracing::{debug, instrument};

/// Count distinct paths from `source` to any target, depth first with an
/// explicit stack.
///
/// No visited set is kept: every stack entry is its own path prefix, so the
/// state itself must rule out cycles (e.g. by carrying a visited bitmask).
/// Targets end a path and are never expanded.
#[instrument(skip_all, name = "count_paths", level = "debug")]
pub fn count_paths<T, P>(transition: &T, source: T::State, is_target: P, stats: &mut Stats) -> usize
where
    T: Transition,
    P: Fn(&T::State) -> bool,
{
    stats.searches += 1;
    let mut stack = vec![source];
    let mut paths = 0;

    while let Some(current) = stack.pop() {
        stats.expanded_nodes += 1;
        if is_target(&current) {
            paths += 1;
            continue;
        }

        for (next, _) in transition.successors(&current) {
            stats.generated_nodes += 1;
            stack.push(next);
        }
    }

    debug!("found {paths} paths");
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::from_fn;
    use crate::map::Position;

    #[test]
    fn test_count_monotone_lattice_paths() {
        // Right/down moves only on a 3x3 grid: C(4, 2) paths corner to corner.
        let lattice = from_fn(|&(x, y): &Position| {
            let mut next = Vec::new();
            if x < 2 {
                next.push(((x + 1, y), 1));
            }
            if y < 2 {
                next.push(((x, y + 1), 1));
            }
            next
        });
        let stats = &mut Stats::default();

        assert_eq!(count_paths(&lattice, (0, 0), |p| *p == (2, 2), stats), 6);
        assert_eq!(count_paths(&lattice, (2, 2), |p| *p == (2, 2), stats), 1);
        assert_eq!(count_paths(&lattice, (0, 0), |p| *p == (9, 9), stats), 0);
    }

    #[test]
    fn test_count_paths_with_visited_mask() {
        // Complete graph on 4 nodes, simple paths 0 -> 3.
        let graph = from_fn(|&(node, visited): &(usize, u8)| {
            (0..4)
                .filter(|next| *next != node && visited & (1 << next) == 0)
                .map(|next| ((next, visited | (1 << next)), 1))
                .collect()
        });
        let stats = &mut Stats::default();

        // direct, via 1, via 2, via 1-2, via 2-1
        assert_eq!(count_paths(&graph, (0, 1), |(node, _)| *node == 3, stats), 5);
    }
}
