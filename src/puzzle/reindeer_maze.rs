use super::{Answer, Solver};
use crate::algorithm::dijkstra;
use crate::common::{AllTargets, SearchResult, Trace, Transition};
use crate::map::{Direction, Grid, Position};
use crate::stat::Stats;

use anyhow::bail;
use std::collections::HashSet;

const STEP_COST: usize = 1;
const TURN_COST: usize = 1000;

type Reindeer = (Position, Direction);

/// Maze scored by steps (1 point) and quarter turns (1000 points).
pub struct ReindeerMaze {
    walls: Grid<bool>,
    start: Position,
    end: Position,
}

impl Transition for ReindeerMaze {
    type State = Reindeer;

    fn successors(&self, state: &Reindeer) -> impl Iterator<Item = (Reindeer, usize)> {
        let (position, facing) = *state;
        let forward = self
            .walls
            .step(position, facing)
            .filter(|&next| !self.walls[next])
            .map(|next| ((next, facing), STEP_COST));

        forward.into_iter().chain([
            ((position, facing.turn_left()), TURN_COST),
            ((position, facing.turn_right()), TURN_COST),
        ])
    }
}

impl ReindeerMaze {
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        let mut start = None;
        let mut end = None;
        let walls = Grid::parse(input, |position, ch| match ch {
            '#' => Ok(true),
            '.' => Ok(false),
            'S' if start.is_none() => {
                start = Some(position);
                Ok(false)
            }
            'E' if end.is_none() => {
                end = Some(position);
                Ok(false)
            }
            'S' | 'E' => bail!("duplicate {ch}"),
            _ => bail!("expected a wall, a tile, S or E"),
        })?;

        let (Some(start), Some(end)) = (start, end) else {
            bail!("maze needs both a start tile S and an end tile E");
        };
        Ok(ReindeerMaze { walls, start, end })
    }

    /// Search every best-scoring way of reaching the end, facing any direction.
    fn search(&self, stats: &mut Stats) -> (SearchResult<Reindeer>, Option<usize>) {
        let result = dijkstra(
            self,
            [(self.start, Direction::Right)],
            &AllTargets::new(|(position, _): &Reindeer| *position == self.end),
            Trace::All,
            stats,
        );
        let lowest = result.cost();
        (result, lowest)
    }
}

impl Solver for ReindeerMaze {
    fn part_one(&self, stats: &mut Stats) -> Answer {
        self.search(stats).1.into()
    }

    fn part_two(&self, stats: &mut Stats) -> Answer {
        let (result, Some(lowest)) = self.search(stats) else {
            return Answer::NotFound;
        };

        let best_ends: Vec<&Reindeer> = result
            .reached()
            .iter()
            .filter(|(_, score)| *score == lowest)
            .map(|(reindeer, _)| reindeer)
            .collect();
        let tiles: HashSet<Position> = result
            .best_path_states(best_ends)
            .into_iter()
            .map(|(position, _)| position)
            .collect();

        Answer::from(tiles.len())
    }
}
