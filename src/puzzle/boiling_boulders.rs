use super::{Answer, Solver};
use crate::algorithm::bfs;
use crate::common::{Exhaust, Trace, Transition};
use crate::stat::Stats;

use anyhow::{bail, Context};
use std::collections::HashSet;
use tracing::debug;

type Cube = (i32, i32, i32);

const FACES: [Cube; 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

fn adjacent((x, y, z): Cube) -> impl Iterator<Item = Cube> {
    FACES.into_iter().map(move |(dx, dy, dz)| (x + dx, y + dy, z + dz))
}

/// Lava droplet scanned as unit cubes, one `x,y,z` per line.
pub struct BoilingBoulders {
    lava: HashSet<Cube>,
}

/// Air cells inside a box one cube larger than the droplet on every side.
struct Steam<'a> {
    lava: &'a HashSet<Cube>,
    min: Cube,
    max: Cube,
}

impl Steam<'_> {
    fn contains(&self, (x, y, z): Cube) -> bool {
        (self.min.0..=self.max.0).contains(&x)
            && (self.min.1..=self.max.1).contains(&y)
            && (self.min.2..=self.max.2).contains(&z)
    }
}

impl Transition for Steam<'_> {
    type State = Cube;

    fn successors(&self, state: &Cube) -> impl Iterator<Item = (Cube, usize)> {
        adjacent(*state)
            .filter(move |&cube| self.contains(cube) && !self.lava.contains(&cube))
            .map(|cube| (cube, 1))
    }
}

impl BoilingBoulders {
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        let lava = input
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(number, line)| {
                let coordinates = line
                    .split(',')
                    .map(|value| value.trim().parse::<i32>())
                    .collect::<Result<Vec<_>, _>>()
                    .with_context(|| format!("line {}: invalid coordinate", number + 1))?;
                match coordinates[..] {
                    [x, y, z] => Ok((x, y, z)),
                    _ => bail!("line {}: expected x,y,z", number + 1),
                }
            })
            .collect::<anyhow::Result<HashSet<Cube>>>()?;

        if lava.is_empty() {
            bail!("droplet has no cubes");
        }
        Ok(BoilingBoulders { lava })
    }

    /// Cube faces not touching another lava cube.
    pub fn surface_area(&self) -> usize {
        self.lava
            .iter()
            .flat_map(|&cube| adjacent(cube))
            .filter(|cube| !self.lava.contains(cube))
            .count()
    }

    /// Cube faces reachable by steam from outside the droplet.
    pub fn exterior_surface_area(&self, stats: &mut Stats) -> usize {
        let mut min = (i32::MAX, i32::MAX, i32::MAX);
        let mut max = (i32::MIN, i32::MIN, i32::MIN);
        for &(x, y, z) in &self.lava {
            min = (min.0.min(x - 1), min.1.min(y - 1), min.2.min(z - 1));
            max = (max.0.max(x + 1), max.1.max(y + 1), max.2.max(z + 1));
        }

        let steam = Steam {
            lava: &self.lava,
            min,
            max,
        };
        let outside = bfs(&steam, [min], &Exhaust::default(), Trace::None, stats).into_distances();
        debug!("steam fills {} cells between {min:?} and {max:?}", outside.len());

        self.lava
            .iter()
            .flat_map(|&cube| adjacent(cube))
            .filter(|cube| outside.contains_key(cube))
            .count()
    }
}

impl Solver for BoilingBoulders {
    fn part_one(&self, _stats: &mut Stats) -> Answer {
        Answer::from(self.surface_area())
    }

    fn part_two(&self, stats: &mut Stats) -> Answer {
        Answer::from(self.exterior_surface_area(stats))
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
        let input = std::fs::read_to_string("input_file/boiling_boulders/example.txt").unwrap();
        let droplet = BoilingBoulders::parse(&input).unwrap();
        let stats = &mut Stats::default();

        assert_eq!(droplet.part_one(stats), Answer::Number(64));
        assert_eq!(droplet.part_two(stats), Answer::Number(58));
        assert_eq!(stats.searches, 1);
    }

    #[test]
    fn test_two_adjacent_cubes() {
        init_tracing();
        let droplet = BoilingBoulders::parse("1,1,1\n2,1,1\n").unwrap();
        let stats = &mut Stats::default();
        assert_eq!(droplet.surface_area(), 10);
        assert_eq!(droplet.exterior_surface_area(stats), 10);
    }

    #[test]
    fn test_enclosed_air_pocket() {
        init_tracing();
        // Hollow 3x3x3 shell around (1,1,1).
        let mut input = String::new();
        for x in 0..3 {
            for y in 0..3 {
                for z in 0..3 {
                    if (x, y, z) != (1, 1, 1) {
                        input.push_str(&format!("{x},{y},{z}\n"));
                    }
                }
            }
        }
        let droplet = BoilingBoulders::parse(&input).unwrap();
        let stats = &mut Stats::default();
        assert_eq!(droplet.surface_area(), 60);
        assert_eq!(droplet.exterior_surface_area(stats), 54);
    }

    #[test]
    fn test_rejects_bad_input() {
        init_tracing();
        assert!(BoilingBoulders::parse("1,2\n").is_err());
        assert!(BoilingBoulders::parse("1,2,x\n").is_err());
        assert!(BoilingBoulders::parse("\n").is_err());
    }
}
