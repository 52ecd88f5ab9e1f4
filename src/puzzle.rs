mod blizzard_basin;
mod boiling_boulders;
mod chiton;
mod clumsy_crucible;
mod hill_climbing;
mod passage_pathing;
mod race_condition;
mod ram_run;
mod reindeer_maze;
mod step_counter;

pub use blizzard_basin::{BlizzardBasin, BlizzardFrames};
pub use boiling_boulders::BoilingBoulders;
pub use chiton::Chiton;
pub use clumsy_crucible::ClumsyCrucible;
pub use hill_climbing::HillClimbing;
pub use passage_pathing::PassagePathing;
pub use race_condition::RaceCondition;
pub use ram_run::RamRun;
pub use reindeer_maze::ReindeerMaze;
pub use step_counter::StepCounter;

use crate::config::{Part, PuzzleParams};
use crate::stat::Stats;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Puzzle {
    Chiton,
    HillClimbing,
    ClumsyCrucible,
    BlizzardBasin,
    ReindeerMaze,
    RamRun,
    PassagePathing,
    BoilingBoulders,
    StepCounter,
    RaceCondition,
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .to_possible_value()
            .map(|value| value.get_name().to_string())
            .unwrap_or_else(|| format!("{self:?}"));
        f.write_str(&name)
    }
}

/// Final answer of one puzzle part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    Number(u64),
    Text(String),
    NotFound,
}

impl From<Option<usize>> for Answer {
    fn from(value: Option<usize>) -> Self {
        value.map_or(Answer::NotFound, |value| Answer::Number(value as u64))
    }
}

impl From<usize> for Answer {
    fn from(value: usize) -> Self {
        Answer::Number(value as u64)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Number(value) => write!(f, "{value}"),
            Answer::Text(text) => f.write_str(text),
            Answer::NotFound => f.write_str("not found"),
        }
    }
}

pub trait Solver {
    fn part_one(&self, stats: &mut Stats) -> Answer;

    fn part_two(&self, stats: &mut Stats) -> Answer;

    fn solve(&self, part: Part, stats: &mut Stats) -> Answer {
        match part {
            Part::One => self.part_one(stats),
            Part::Two => self.part_two(stats),
        }
    }
}

/// Parse `input` for `puzzle` and return its solver.
pub fn build(
    puzzle: Puzzle,
    input: &str,
    params: &PuzzleParams,
) -> anyhow::Result<Box<dyn Solver>> {
    let solver: Box<dyn Solver> = match puzzle {
        Puzzle::Chiton => Box::new(Chiton::parse(input, params.chiton_tiles)?),
        Puzzle::HillClimbing => Box::new(HillClimbing::parse(input)?),
        Puzzle::ClumsyCrucible => Box::new(ClumsyCrucible::parse(input)?),
        Puzzle::BlizzardBasin => Box::new(BlizzardBasin::parse(input)?),
        Puzzle::ReindeerMaze => Box::new(ReindeerMaze::parse(input)?),
        Puzzle::RamRun => Box::new(RamRun::parse(input, params.ram_size, params.ram_bytes)?),
        Puzzle::PassagePathing => Box::new(PassagePathing::parse(input)?),
        Puzzle::BoilingBoulders => Box::new(BoilingBoulders::parse(input)?),
        Puzzle::StepCounter => Box::new(StepCounter::parse(
            input,
            params.garden_steps,
            params.infinite_garden_steps,
        )?),
        Puzzle::RaceCondition => Box::new(RaceCondition::parse(input, params.cheat_min_saving)?),
    };
    Ok(solver)
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
    fn test_build_parses_every_example() {
        init_tracing();
        let params = PuzzleParams {
            ram_size: 7,
            ram_bytes: 12,
            cheat_min_saving: 50,
            garden_steps: 6,
            infinite_garden_steps: 10,
            ..PuzzleParams::default()
        };
        let cases = [
            (Puzzle::Chiton, "input_file/chiton/example.txt", 40),
            (Puzzle::HillClimbing, "input_file/hill_climbing/example.txt", 31),
            (Puzzle::ClumsyCrucible, "input_file/clumsy_crucible/example.txt", 102),
            (Puzzle::BlizzardBasin, "input_file/blizzard_basin/example.txt", 18),
            (Puzzle::ReindeerMaze, "input_file/reindeer_maze/example1.txt", 7036),
            (Puzzle::RamRun, "input_file/ram_run/example.txt", 22),
            (Puzzle::PassagePathing, "input_file/passage_pathing/example1.txt", 10),
            (Puzzle::BoilingBoulders, "input_file/boiling_boulders/example.txt", 64),
            (Puzzle::StepCounter, "input_file/step_counter/example.txt", 16),
            (Puzzle::RaceCondition, "input_file/race_condition/example.txt", 1),
        ];

        for (puzzle, path, expected) in cases {
            let input = std::fs::read_to_string(path).unwrap();
            let solver = build(puzzle, &input, &params).unwrap();
            let stats = &mut Stats::default();
            assert_eq!(solver.solve(Part::One, stats), Answer::Number(expected), "{puzzle}");
        }
    }

    #[test]
    fn test_answer_display_and_json() {
        init_tracing();
        assert_eq!(Answer::from(Some(3)).to_string(), "3");
        assert_eq!(Answer::from(None).to_string(), "not found");
        assert_eq!(Answer::Text("6,1".into()).to_string(), "6,1");
        assert_eq!(serde_json::to_string(&Answer::Number(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&Answer::NotFound).unwrap(), "null");
        assert_eq!(Puzzle::HillClimbing.to_string(), "hill-climbing");
    }
}
