use super::{Answer, Solver};
use crate::algorithm::bfs;
use crate::common::{Exhaust, Trace, Transition};
use crate::map::{Grid, Position};
use crate::stat::Stats;

use anyhow::{bail, Context};
use tracing::{debug, info};

/// Garden of plots (`.`) and rocks (`#`) with a single start plot `S`.
pub struct StepCounter {
    rocks: Grid<bool>,
    start: Position,
    steps: usize,
    infinite_steps: usize,
}

/// Plots on the garden, either bounded by its edges or tiled in every direction.
struct Plots<'a> {
    rocks: &'a Grid<bool>,
    tiled: bool,
}

impl Plots<'_> {
    fn is_plot(&self, (x, y): (isize, isize)) -> bool {
        let (height, width) = (self.rocks.height as isize, self.rocks.width as isize);
        if !self.tiled && !((0..height).contains(&x) && (0..width).contains(&y)) {
            return false;
        }
        !self.rocks[(x.rem_euclid(height) as usize, y.rem_euclid(width) as usize)]
    }
}

impl Transition for Plots<'_> {
    type State = (isize, isize);

    fn successors(&self, state: &(isize, isize)) -> impl Iterator<Item = ((isize, isize), usize)> {
        let (x, y) = *state;
        [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
            .into_iter()
            .filter(move |&next| self.is_plot(next))
            .map(|next| (next, 1))
    }
}

impl StepCounter {
    pub fn parse(input: &str, steps: usize, infinite_steps: usize) -> anyhow::Result<Self> {
        let mut start = None;
        let rocks = Grid::parse(input, |position, ch| match ch {
            '#' => Ok(true),
            '.' => Ok(false),
            'S' if start.is_none() => {
                start = Some(position);
                Ok(false)
            }
            'S' => bail!("duplicate start plot"),
            _ => bail!("expected a plot, a rock or S"),
        })?;
        let start = start.context("garden has no start plot S")?;

        Ok(StepCounter {
            rocks,
            start,
            steps,
            infinite_steps,
        })
    }

    /// Plots where a walk of exactly `steps` steps can end.
    ///
    /// Walks can waste moves by stepping back and forth, so a plot counts when it is
    /// reachable within `steps` and its distance has the same parity.
    pub fn reachable(&self, steps: usize, tiled: bool, stats: &mut Stats) -> u64 {
        let plots = Plots {
            rocks: &self.rocks,
            tiled,
        };
        let start = (self.start.0 as isize, self.start.1 as isize);
        let distances =
            bfs(&plots, [start], &Exhaust::within(steps), Trace::None, stats).into_distances();

        distances
            .values()
            .filter(|&&distance| distance <= steps && distance % 2 == steps % 2)
            .count() as u64
    }

    /// The reachable count grows quadratically in whole garden widths when the garden
    /// is square and the walk leaves it along a clear row and column, ending on a
    /// garden edge.
    fn can_extrapolate(&self, steps: usize) -> bool {
        let size = self.rocks.height;
        let (row, column) = self.start;

        size == self.rocks.width
            && steps % size == row
            && row == column
            && steps / size >= 3
            && (0..size).all(|y| !self.rocks[(row, y)])
            && (0..size).all(|x| !self.rocks[(x, column)])
    }

    /// Reachable plots on the infinite tiling.
    pub fn reachable_tiled(&self, steps: usize, stats: &mut Stats) -> u64 {
        if !self.can_extrapolate(steps) {
            return self.reachable(steps, true, stats);
        }

        let size = self.rocks.height;
        let (widths, remainder) = (steps / size, steps % size);
        let [a, b, c] =
            [0, 1, 2].map(|k| self.reachable(remainder + k * size, true, stats) as i128);
        debug!("extrapolating from {a}, {b}, {c} over {widths} garden widths");

        // Newton forward differences of f(0), f(1), f(2).
        let k = widths as i128;
        let total = a + k * (b - a) + k * (k - 1) / 2 * (c - 2 * b + a);
        info!("{total} plots reachable in {steps} steps");
        total as u64
    }
}

impl Solver for StepCounter {
    fn part_one(&self, stats: &mut Stats) -> Answer {
        Answer::Number(self.reachable(self.steps, false, stats))
    }

    fn part_two(&self, stats: &mut Stats) -> Answer {
        Answer::Number(self.reachable_tiled(self.infinite_steps, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper function to setup tracing
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .try_init();
    }

    fn example(steps: usize, infinite_steps: usize) -> StepCounter {
        let input = std::fs::read_to_string("input_file/step_counter/example.txt").unwrap();
        StepCounter::parse(&input, steps, infinite_steps).unwrap()
    }

    #[test]
    fn test_example() {
        init_tracing();
        let garden = example(6, 10);
        let stats = &mut Stats::default();
        assert_eq!(garden.part_one(stats), Answer::Number(16));
        assert_eq!(garden.part_two(stats), Answer::Number(50));
    }

    #[test]
    fn test_example_tiled() {
        init_tracing();
        let garden = example(6, 10);
        let stats = &mut Stats::default();
        // The example's start row is blocked, so these are simulated.
        assert!(!garden.can_extrapolate(50));
        assert_eq!(garden.reachable_tiled(50, stats), 1594);
        assert_eq!(garden.reachable_tiled(100, stats), 6536);
    }

    #[test]
    fn test_extrapolation_matches_simulation() {
        init_tracing();
        let input = ".....\n.....\n..S..\n.....\n.....";
        let garden = StepCounter::parse(input, 4, 22).unwrap();
        let stats = &mut Stats::default();

        assert!(garden.can_extrapolate(22));
        // An open plain reaches (n + 1)^2 plots in n steps.
        assert_eq!(garden.reachable_tiled(22, stats), 529);
        assert_eq!(garden.reachable(22, true, stats), 529);
        assert_eq!(garden.reachable(4, false, stats), 13);
    }

    #[test]
    fn test_rejects_bad_input() {
        init_tracing();
        assert!(StepCounter::parse("...\n.#.\n...", 1, 1).is_err());
        assert!(StepCounter::parse("S.S", 1, 1).is_err());
        assert!(StepCounter::parse("S.x", 1, 1).is_err());
    }
}
