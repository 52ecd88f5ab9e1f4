use super::{Answer, Solver};
use crate::algorithm::bfs;
use crate::common::{FirstTarget, Trace, Transition};
use crate::map::{Grid, Position};
use crate::stat::Stats;

use anyhow::{bail, Context};
use tracing::debug;

/// Square memory space with bytes falling onto it, one per line as `x,y`.
pub struct RamRun {
    size: usize,
    fallen: usize,
    bytes: Vec<Position>,
}

struct MemorySpace {
    corrupted: Grid<bool>,
}

impl Transition for MemorySpace {
    type State = Position;

    fn successors(&self, state: &Position) -> impl Iterator<Item = (Position, usize)> {
        self.corrupted
            .neighbors(*state)
            .filter(move |&next| !self.corrupted[next])
            .map(|next| (next, 1))
    }
}

impl RamRun {
    pub fn parse(input: &str, size: usize, fallen: usize) -> anyhow::Result<Self> {
        if size == 0 {
            bail!("memory space must not be empty");
        }

        let bytes = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(index, line)| {
                let (x, y) = line
                    .split_once(',')
                    .with_context(|| format!("line {}: expected x,y", index + 1))?;
                let x: usize = x
                    .trim()
                    .parse()
                    .with_context(|| format!("line {}: bad x", index + 1))?;
                let y: usize = y
                    .trim()
                    .parse()
                    .with_context(|| format!("line {}: bad y", index + 1))?;
                if x >= size || y >= size {
                    bail!("line {}: byte {x},{y} falls outside the {size}x{size} space", index + 1);
                }
                Ok((x, y))
            })
            .collect::<anyhow::Result<Vec<Position>>>()?;

        Ok(RamRun {
            size,
            fallen,
            bytes,
        })
    }

    /// Fewest steps from the top left corner to the exit once `count` bytes have fallen.
    pub fn steps_after(&self, count: usize, stats: &mut Stats) -> Option<usize> {
        let mut corrupted = Grid::new(self.size, self.size, false);
        // Bytes are given as (x, y) = (column, row).
        for &(x, y) in self.bytes.iter().take(count) {
            corrupted[(y, x)] = true;
        }
        if corrupted[(0, 0)] {
            return None;
        }

        let exit = (self.size - 1, self.size - 1);
        bfs(
            &MemorySpace { corrupted },
            [(0, 0)],
            &FirstTarget(|p: &Position| *p == exit),
            Trace::None,
            stats,
        )
        .cost()
    }

    /// The first byte after which the exit can no longer be reached.
    pub fn first_blocking_byte(&self, stats: &mut Stats) -> Option<Position> {
        if self.steps_after(self.bytes.len(), stats).is_some() {
            return None;
        }

        // Smallest count of fallen bytes that cuts the exit off.
        let (mut low, mut high) = (0, self.bytes.len());
        while low < high {
            let middle = (low + high) / 2;
            if self.steps_after(middle, stats).is_some() {
                low = middle + 1;
            } else {
                high = middle;
            }
        }
        debug!("exit cut off after {low} bytes");
        low.checked_sub(1).map(|index| self.bytes[index])
    }
}

impl Solver for RamRun {
    fn part_one(&self, stats: &mut Stats) -> Answer {
        self.steps_after(self.fallen, stats).into()
    }

    fn part_two(&self, stats: &mut Stats) -> Answer {
        match self.first_blocking_byte(stats) {
            Some((x, y)) => Answer::Text(format!("{x},{y}")),
            None => Answer::NotFound,
        }
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

    fn example() -> RamRun {
        let input = std::fs::read_to_string("input_file/ram_run/example.txt").unwrap();
        RamRun::parse(&input, 7, 12).unwrap()
    }

    #[test]
    fn test_example() {
        init_tracing();
        let ram = example();
        let stats = &mut Stats::default();
        assert_eq!(ram.part_one(stats), Answer::Number(22));
        assert_eq!(ram.part_two(stats), Answer::Text("6,1".to_string()));
    }

    #[test]
    fn test_no_bytes_is_manhattan() {
        init_tracing();
        let ram = example();
        let stats = &mut Stats::default();
        assert_eq!(ram.steps_after(0, stats), Some(12));
    }

    #[test]
    fn test_exit_never_blocked() {
        init_tracing();
        let ram = RamRun::parse("1,0\n", 3, 1).unwrap();
        let stats = &mut Stats::default();
        assert_eq!(ram.part_one(stats), Answer::Number(4));
        assert_eq!(ram.part_two(stats), Answer::NotFound);
    }

    #[test]
    fn test_rejects_bad_input() {
        init_tracing();
        assert!(RamRun::parse("1;2\n", 7, 1).is_err());
        assert!(RamRun::parse("1,x\n", 7, 1).is_err());
        assert!(RamRun::parse("7,0\n", 7, 1).is_err());
    }
}
