use super::{Answer, Solver};
use crate::algorithm::bfs;
use crate::common::{Exhaust, Trace, Transition};
use crate::map::{Grid, Position};
use crate::stat::Stats;

use anyhow::bail;
use tracing::debug;

/// Racetrack of walls (`#`) and track (`.`) from `S` to `E`.
pub struct RaceCondition {
    walls: Grid<bool>,
    start: Position,
    end: Position,
    min_saving: usize,
}

impl Transition for RaceCondition {
    type State = Position;

    fn successors(&self, state: &Position) -> impl Iterator<Item = (Position, usize)> {
        self.walls
            .neighbors(*state)
            .filter(move |&next| !self.walls[next])
            .map(|next| (next, 1))
    }
}

impl RaceCondition {
    pub fn parse(input: &str, min_saving: usize) -> anyhow::Result<Self> {
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
            _ => bail!("expected a wall, track, S or E"),
        })?;

        let (Some(start), Some(end)) = (start, end) else {
            bail!("racetrack needs both a start S and an end E");
        };
        Ok(RaceCondition {
            walls,
            start,
            end,
            min_saving,
        })
    }

    /// Picoseconds from every track cell's start, `None` off track or unreachable.
    fn track_times(&self, stats: &mut Stats) -> Grid<Option<usize>> {
        let distances =
            bfs(self, [self.start], &Exhaust::default(), Trace::None, stats).into_distances();
        let mut times = self.walls.map(|_| None);
        for (position, distance) in distances {
            times[position] = Some(distance);
        }
        times
    }

    /// Cheats of at most `max_cheat` picoseconds that save at least `min_saving`.
    ///
    /// A cheat jumps from track cell `a` to track cell `b` through walls in
    /// `|a - b|` (Manhattan) picoseconds and saves `time(b) - time(a) - |a - b|`.
    pub fn count_cheats(&self, max_cheat: usize, min_saving: usize, stats: &mut Stats) -> usize {
        let times = self.track_times(stats);
        let Some(finish) = times[self.end] else {
            debug!("end is unreachable from start");
            return 0;
        };
        debug!("honest race takes {finish} picoseconds");

        let reach = max_cheat as isize;
        let mut cheats = 0;
        for from in times.positions() {
            let Some(leave) = times[from] else { continue };
            for dx in -reach..=reach {
                let rest = reach - dx.abs();
                for dy in -rest..=rest {
                    let (Some(x), Some(y)) = (
                        from.0.checked_add_signed(dx),
                        from.1.checked_add_signed(dy),
                    ) else {
                        continue;
                    };
                    let Some(&Some(arrive)) = times.get((x, y)) else {
                        continue;
                    };
                    let length = dx.unsigned_abs() + dy.unsigned_abs();
                    match arrive.checked_sub(leave + length) {
                        Some(saving) if saving > 0 && saving >= min_saving => cheats += 1,
                        _ => {}
                    }
                }
            }
        }
        cheats
    }
}

impl Solver for RaceCondition {
    fn part_one(&self, stats: &mut Stats) -> Answer {
        Answer::from(self.count_cheats(2, self.min_saving, stats))
    }

    fn part_two(&self, stats: &mut Stats) -> Answer {
        Answer::from(self.count_cheats(20, self.min_saving, stats))
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

    fn example() -> RaceCondition {
        let input = std::fs::read_to_string("input_file/race_condition/example.txt").unwrap();
        RaceCondition::parse(&input, 100).unwrap()
    }

    #[test]
    fn test_short_cheats() {
        init_tracing();
        let race = example();
        let stats = &mut Stats::default();
        assert_eq!(race.count_cheats(2, 1, stats), 44);
        assert_eq!(race.count_cheats(2, 64, stats), 1);
        assert_eq!(race.part_one(stats), Answer::Number(0));
    }

    #[test]
    fn test_long_cheats() {
        init_tracing();
        let race = example();
        let stats = &mut Stats::default();
        assert_eq!(race.count_cheats(20, 50, stats), 285);
        assert_eq!(race.count_cheats(20, 76, stats), 3);
    }

    #[test]
    fn test_straight_track_has_no_cheats() {
        init_tracing();
        let race = RaceCondition::parse("#####\n#S.E#\n#####", 1).unwrap();
        let stats = &mut Stats::default();
        assert_eq!(race.part_two(stats), Answer::Number(0));
    }

    #[test]
    fn test_rejects_bad_input() {
        init_tracing();
        assert!(RaceCondition::parse("#S.#", 1).is_err());
        assert!(RaceCondition::parse("#S.E#E#", 1).is_err());
    }
}
