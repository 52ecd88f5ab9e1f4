use super::{Answer, Solver};
use crate::algorithm::bfs;
use crate::common::{FirstTarget, Trace, Transition};
use crate::map::{Grid, Position};
use crate::stat::Stats;

use anyhow::bail;

/// Heightmap where each step may climb at most one level (and drop any amount).
pub struct HillClimbing {
    elevations: Grid<u8>,
    start: Position,
    end: Position,
}

impl Transition for HillClimbing {
    type State = Position;

    fn successors(&self, state: &Position) -> impl Iterator<Item = (Position, usize)> {
        let ceiling = self.elevations[*state] + 1;
        self.elevations
            .neighbors(*state)
            .filter(move |&next| self.elevations[next] <= ceiling)
            .map(|next| (next, 1))
    }
}

impl HillClimbing {
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        let marks = Grid::parse(input, |_, ch| match ch {
            'a'..='z' | 'S' | 'E' => Ok(ch),
            _ => bail!("expected a lowercase elevation, S or E"),
        })?;

        let single = |mark: char| -> anyhow::Result<Position> {
            let mut found = marks.find(|&ch| ch == mark);
            match (found.next(), found.next()) {
                (Some(position), None) => Ok(position),
                (None, _) => bail!("heightmap has no {mark}"),
                (Some(_), Some(_)) => bail!("heightmap has more than one {mark}"),
            }
        };
        let start = single('S')?;
        let end = single('E')?;

        let elevations = marks.map(|&ch| match ch {
            'S' => 0,
            'E' => b'z' - b'a',
            _ => ch as u8 - b'a',
        });

        Ok(HillClimbing {
            elevations,
            start,
            end,
        })
    }

    fn fewest_steps<I>(&self, sources: I, stats: &mut Stats) -> Option<usize>
    where
        I: IntoIterator<Item = Position>,
    {
        bfs(
            self,
            sources,
            &FirstTarget(|p: &Position| *p == self.end),
            Trace::None,
            stats,
        )
        .cost()
    }
}

impl Solver for HillClimbing {
    fn part_one(&self, stats: &mut Stats) -> Answer {
        self.fewest_steps([self.start], stats).into()
    }

    fn part_two(&self, stats: &mut Stats) -> Answer {
        let lowest: Vec<Position> = self.elevations.find(|&elevation| elevation == 0).collect();
        self.fewest_steps(lowest, stats).into()
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

    #[test]
    fn test_example() {
        init_tracing();
        let input = std::fs::read_to_string("input_file/hill_climbing/example.txt").unwrap();
        let hill = HillClimbing::parse(&input).unwrap();
        let stats = &mut Stats::default();

        assert_eq!(hill.start, (0, 0));
        assert_eq!(hill.end, (2, 5));
        assert_eq!(hill.part_one(stats), Answer::Number(31));
        assert_eq!(hill.part_two(stats), Answer::Number(29));
    }

    #[test]
    fn test_too_steep() {
        init_tracing();
        let hill = HillClimbing::parse("SacE").unwrap();
        let stats = &mut Stats::default();
        assert_eq!(hill.part_one(stats), Answer::NotFound);
    }

    #[test]
    fn test_rejects_bad_input() {
        init_tracing();
        assert!(HillClimbing::parse("Sab\nbcd").is_err());
        assert!(HillClimbing::parse("SaE\nSbz").is_err());
        assert!(HillClimbing::parse("Sa#E").is_err());
    }
}
