use super::{Answer, Solver};
use crate::algorithm::dijkstra;
use crate::common::{FirstTarget, Trace, Transition};
use crate::map::{Direction, Grid, Position};
use crate::stat::Stats;

use anyhow::Context;

/// Position, heading (none before the first move) and blocks moved straight.
type Crucible = (Position, Option<Direction>, u8);

pub struct ClumsyCrucible {
    heat_loss: Grid<u8>,
}

/// Movement rules: at least `min_run` blocks before turning or stopping,
/// at most `max_run` blocks in a straight line, never reversing.
struct CityMap<'a> {
    heat_loss: &'a Grid<u8>,
    min_run: u8,
    max_run: u8,
}

impl Transition for CityMap<'_> {
    type State = Crucible;

    fn successors(&self, state: &Crucible) -> impl Iterator<Item = (Crucible, usize)> {
        let (position, heading, run) = *state;
        Direction::ALL.into_iter().filter_map(move |direction| {
            let run = match heading {
                None => 1,
                Some(heading) if direction == heading.opposite() => return None,
                Some(heading) if direction == heading => {
                    if run >= self.max_run {
                        return None;
                    }
                    run + 1
                }
                Some(_) if run < self.min_run => return None,
                Some(_) => 1,
            };
            let next = self.heat_loss.step(position, direction)?;
            Some(((next, Some(direction), run), self.heat_loss[next] as usize))
        })
    }
}

impl ClumsyCrucible {
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        let heat_loss = Grid::from_digits(input).context("invalid city map")?;
        Ok(ClumsyCrucible { heat_loss })
    }

    fn least_heat_loss(&self, min_run: u8, max_run: u8, stats: &mut Stats) -> Option<usize> {
        let end = (self.heat_loss.height - 1, self.heat_loss.width - 1);
        let city = CityMap {
            heat_loss: &self.heat_loss,
            min_run,
            max_run,
        };
        // The crucible may only stop once it has moved its minimum run.
        let at_end = |(position, _, run): &Crucible| *position == end && *run >= min_run;

        dijkstra(
            &city,
            [((0, 0), None, 0)],
            &FirstTarget(at_end),
            Trace::None,
            stats,
        )
        .cost()
    }
}

impl Solver for ClumsyCrucible {
    fn part_one(&self, stats: &mut Stats) -> Answer {
        self.least_heat_loss(1, 3, stats).into()
    }

    fn part_two(&self, stats: &mut Stats) -> Answer {
        self.least_heat_loss(4, 10, stats).into()
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

    fn load(name: &str) -> ClumsyCrucible {
        let input = std::fs::read_to_string(format!("input_file/clumsy_crucible/{name}")).unwrap();
        ClumsyCrucible::parse(&input).unwrap()
    }

    #[test]
    fn test_example() {
        init_tracing();
        let crucible = load("example.txt");
        let stats = &mut Stats::default();
        assert_eq!(crucible.part_one(stats), Answer::Number(102));
        assert_eq!(crucible.part_two(stats), Answer::Number(94));
    }

    #[test]
    fn test_ultra_crucible_must_run_before_stopping() {
        init_tracing();
        let crucible = load("example2.txt");
        let stats = &mut Stats::default();
        assert_eq!(crucible.part_one(stats), Answer::Number(59));
        assert_eq!(crucible.part_two(stats), Answer::Number(71));
    }

    #[test]
    fn test_no_reversing_or_long_runs() {
        init_tracing();
        let heat_loss = Grid::from_digits("11111").unwrap();
        let city = CityMap {
            heat_loss: &heat_loss,
            min_run: 1,
            max_run: 3,
        };

        let moves: Vec<_> = city.successors(&((0, 2), Some(Direction::Right), 3)).collect();
        assert!(moves.is_empty());

        let moves: Vec<_> = city.successors(&((0, 2), Some(Direction::Right), 2)).collect();
        assert_eq!(moves, vec![(((0, 3), Some(Direction::Right), 3), 1)]);

        let stats = &mut Stats::default();
        let crucible = ClumsyCrucible { heat_loss };
        // Five blocks in a row cannot be crossed with runs of at most three.
        assert_eq!(crucible.part_one(stats), Answer::NotFound);
    }
}
