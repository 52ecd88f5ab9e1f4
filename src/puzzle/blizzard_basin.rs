use super::{Answer, Solver};
use crate::algorithm::bfs;
use crate::common::{FirstTarget, Trace, Transition};
use crate::map::{Direction, Grid, Position};
use crate::stat::Stats;

use anyhow::{bail, Context};
use tracing::debug;

/// Walled valley with wrapping blizzards.
pub struct BlizzardBasin {
    walls: Grid<bool>,
    blizzards: Vec<(Position, Direction)>,
    start: Position,
    end: Position,
}

/// Blizzard occupancy for every phase of the blizzard cycle.
///
/// Built once per invocation and borrowed by the search; the search state only
/// carries the phase, so the same cell at different times stays distinct.
pub struct BlizzardFrames {
    frames: Vec<Grid<bool>>,
}

impl BlizzardFrames {
    pub fn new(basin: &BlizzardBasin) -> Self {
        let inner_height = basin.walls.height - 2;
        let inner_width = basin.walls.width - 2;
        let period = lcm(inner_height, inner_width);

        let frames = (0..period)
            .map(|minute| {
                let mut occupied = Grid::new(basin.walls.height, basin.walls.width, false);
                for &((x, y), direction) in &basin.blizzards {
                    let (dx, dy) = direction.offset();
                    let shift = minute as isize;
                    let x = (x as isize - 1 + dx * shift).rem_euclid(inner_height as isize) + 1;
                    let y = (y as isize - 1 + dy * shift).rem_euclid(inner_width as isize) + 1;
                    occupied[(x as usize, y as usize)] = true;
                }
                occupied
            })
            .collect();

        BlizzardFrames { frames }
    }

    pub fn period(&self) -> usize {
        self.frames.len()
    }

    pub fn is_clear(&self, phase: usize, position: Position) -> bool {
        !self.frames[phase % self.period()][position]
    }
}

struct Valley<'a> {
    basin: &'a BlizzardBasin,
    frames: &'a BlizzardFrames,
}

impl Transition for Valley<'_> {
    /// Position and minute modulo the blizzard period.
    type State = (Position, usize);

    fn successors(
        &self,
        state: &(Position, usize),
    ) -> impl Iterator<Item = ((Position, usize), usize)> {
        let (position, phase) = *state;
        let next_phase = (phase + 1) % self.frames.period();
        let walls = &self.basin.walls;

        std::iter::once(position)
            .chain(walls.neighbors(position))
            .filter(move |&next| !walls[next] && self.frames.is_clear(next_phase, next))
            .map(move |next| ((next, next_phase), 1))
    }
}

impl BlizzardBasin {
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        let mut blizzards = Vec::new();
        let walls = Grid::parse(input, |position, ch| {
            let direction = match ch {
                '#' => return Ok(true),
                '.' => return Ok(false),
                '^' => Direction::Up,
                'v' => Direction::Down,
                '<' => Direction::Left,
                '>' => Direction::Right,
                _ => bail!("expected a wall, ground or blizzard"),
            };
            blizzards.push((position, direction));
            Ok(false)
        })?;

        if walls.height < 3 || walls.width < 3 {
            bail!("valley is too small");
        }
        let last_row = walls.height - 1;
        let start = (0..walls.width)
            .find(|&y| !walls[(0, y)])
            .map(|y| (0, y))
            .context("no entrance in the top wall")?;
        let end = (0..walls.width)
            .find(|&y| !walls[(last_row, y)])
            .map(|y| (last_row, y))
            .context("no exit in the bottom wall")?;
        if blizzards.iter().any(|&((x, y), _)| {
            x == 0 || y == 0 || x == last_row || y == walls.width - 1
        }) {
            bail!("blizzard outside the valley");
        }

        Ok(BlizzardBasin {
            walls,
            blizzards,
            start,
            end,
        })
    }

    /// Minutes to walk from `from` to `to`, leaving at `minute`.
    pub fn trip(
        &self,
        frames: &BlizzardFrames,
        from: Position,
        to: Position,
        minute: usize,
        stats: &mut Stats,
    ) -> Option<usize> {
        let valley = Valley {
            basin: self,
            frames,
        };
        let minutes = bfs(
            &valley,
            [(from, minute % frames.period())],
            &FirstTarget(|(position, _): &(Position, usize)| *position == to),
            Trace::None,
            stats,
        )
        .cost()?;
        debug!("trip {from:?} -> {to:?} leaving at {minute} takes {minutes}");
        Some(minutes)
    }
}

impl Solver for BlizzardBasin {
    fn part_one(&self, stats: &mut Stats) -> Answer {
        let frames = BlizzardFrames::new(self);
        self.trip(&frames, self.start, self.end, 0, stats).into()
    }

    fn part_two(&self, stats: &mut Stats) -> Answer {
        let frames = BlizzardFrames::new(self);
        let legs = [
            (self.start, self.end),
            (self.end, self.start),
            (self.start, self.end),
        ];

        let mut minute = 0;
        for (from, to) in legs {
            match self.trip(&frames, from, to, minute, stats) {
                Some(minutes) => minute += minutes,
                None => return Answer::NotFound,
            }
        }
        Answer::from(minute)
    }
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn lcm(a: usize, b: usize) -> usize {
    a / gcd(a, b) * b
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
        let input = std::fs::read_to_string("input_file/blizzard_basin/example.txt").unwrap();
        let basin = BlizzardBasin::parse(&input).unwrap();
        let stats = &mut Stats::default();

        assert_eq!(basin.start, (0, 1));
        assert_eq!(basin.end, (5, 6));
        assert_eq!(basin.part_one(stats), Answer::Number(18));
        assert_eq!(basin.part_two(stats), Answer::Number(54));
    }

    #[test]
    fn test_frames_wrap_around() {
        init_tracing();
        let basin = BlizzardBasin::parse(
            "\
#.#####
#.....#
#>....#
#.....#
#...v.#
#.....#
#####.#",
        )
        .unwrap();
        let frames = BlizzardFrames::new(&basin);

        assert_eq!(frames.period(), 5);
        assert!(!frames.is_clear(0, (2, 1)));
        assert!(frames.is_clear(1, (2, 1)));
        assert!(!frames.is_clear(1, (2, 2)));
        assert!(!frames.is_clear(1, (5, 4)));
        assert!(!frames.is_clear(2, (1, 4)));
        // a full cycle restores the start
        assert!(!frames.is_clear(5, (2, 1)));
    }

    #[test]
    fn test_rejects_bad_input() {
        init_tracing();
        assert!(BlizzardBasin::parse("###\n#.#\n###").is_err());
        assert!(BlizzardBasin::parse("#.#\n#x#\n#.#").is_err());
    }

    #[test]
    fn test_lcm() {
        init_tracing();
        assert_eq!(lcm(4, 6), 12);
        assert_eq!(lcm(120, 25), 600);
    }
}
