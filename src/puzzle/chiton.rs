use super::{Answer, Solver};
use crate::algorithm::dijkstra;
use crate::common::{FirstTarget, Trace, Transition};
use crate::map::{Grid, Position};
use crate::stat::Stats;

use anyhow::{bail, Context};
use tracing::debug;

/// Cave of risk levels; entering a cell costs its risk.
pub struct Chiton {
    risks: Grid<u8>,
    tiles: usize,
}

struct RiskMap<'a> {
    risks: &'a Grid<u8>,
}

impl Transition for RiskMap<'_> {
    type State = Position;

    fn successors(&self, state: &Position) -> impl Iterator<Item = (Position, usize)> {
        self.risks
            .neighbors(*state)
            .map(move |next| (next, self.risks[next] as usize))
    }
}

impl Chiton {
    pub fn parse(input: &str, tiles: usize) -> anyhow::Result<Self> {
        if tiles == 0 {
            bail!("tile factor must be at least 1");
        }
        let risks = Grid::from_digits(input).context("invalid risk map")?;
        if risks.positions().any(|p| risks[p] == 0) {
            bail!("risk levels range from 1 to 9");
        }
        Ok(Chiton { risks, tiles })
    }

    /// Lowest total risk from the top left to the bottom right, with the path taken.
    pub fn lowest_risk_path(risks: &Grid<u8>, stats: &mut Stats) -> Option<(usize, Vec<Position>)> {
        let end = (risks.height - 1, risks.width - 1);
        let result = dijkstra(
            &RiskMap { risks },
            [(0, 0)],
            &FirstTarget(|p: &Position| *p == end),
            Trace::First,
            stats,
        );
        let risk = result.cost()?;
        let path = result.path(&end)?;
        debug!("lowest risk {risk} along {} cells", path.len());
        Some((risk, path))
    }
}

/// Repeat the map `factor` times each way; every tile step adds 1, wrapping 9 to 1.
fn enlarge(risks: &Grid<u8>, factor: usize) -> Grid<u8> {
    let mut enlarged = Grid::new(risks.height * factor, risks.width * factor, 0u8);
    for (x, y) in enlarged.positions().collect::<Vec<_>>() {
        let source = risks[(x % risks.height, y % risks.width)] as usize;
        let level = source + x / risks.height + y / risks.width;
        enlarged[(x, y)] = (1 + (level - 1) % 9) as u8;
    }
    enlarged
}

impl Solver for Chiton {
    fn part_one(&self, stats: &mut Stats) -> Answer {
        Chiton::lowest_risk_path(&self.risks, stats)
            .map(|(risk, _)| risk)
            .into()
    }

    fn part_two(&self, stats: &mut Stats) -> Answer {
        let enlarged = enlarge(&self.risks, self.tiles);
        Chiton::lowest_risk_path(&enlarged, stats)
            .map(|(risk, _)| risk)
            .into()
    }
}
