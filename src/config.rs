use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::puzzle::Puzzle;

#[derive(Parser, Debug)]
#[command(
    name = "grid-search",
    about = "Grid shortest-path search, exercised on search-shaped Advent of Code puzzles.",
    version = "0.1"
)]
pub struct Cli {
    #[arg(long, help = "Path to a YAML config file")]
    pub config: Option<String>,

    #[arg(long, value_enum, help = "Puzzle to solve")]
    pub puzzle: Option<Puzzle>,

    #[arg(long, help = "Path to the puzzle input file")]
    pub input: Option<String>,

    #[arg(long, value_enum, help = "Which part(s) to solve")]
    pub part: Option<Parts>,

    #[arg(long, help = "Print answers as JSON", default_value_t = false)]
    pub json: bool,

    #[arg(long, help = "Log filter, e.g. info or grid_search=debug")]
    pub log_level: Option<String>,

    #[arg(long, help = "Chiton: how many times the cave tiles in each direction")]
    pub chiton_tiles: Option<usize>,

    #[arg(long, help = "RAM run: side length of the memory space")]
    pub ram_size: Option<usize>,

    #[arg(long, help = "RAM run: bytes fallen before part one")]
    pub ram_bytes: Option<usize>,

    #[arg(long, help = "Race condition: minimum picoseconds a cheat must save")]
    pub cheat_min_saving: Option<usize>,

    #[arg(long, help = "Step counter: steps for part one")]
    pub garden_steps: Option<usize>,

    #[arg(long, help = "Step counter: steps on the infinite garden for part two")]
    pub infinite_garden_steps: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Part {
    One,
    Two,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Parts {
    One,
    Two,
    #[default]
    Both,
}

impl Parts {
    pub fn parts(self) -> Vec<Part> {
        match self {
            Parts::One => vec![Part::One],
            Parts::Two => vec![Part::Two],
            Parts::Both => vec![Part::One, Part::Two],
        }
    }
}

/// Knobs that differ between a puzzle's example and the real input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PuzzleParams {
    pub chiton_tiles: usize,
    pub ram_size: usize,
    pub ram_bytes: usize,
    pub cheat_min_saving: usize,
    pub garden_steps: usize,
    pub infinite_garden_steps: usize,
}

impl Default for PuzzleParams {
    fn default() -> Self {
        PuzzleParams {
            chiton_tiles: 5,
            ram_size: 71,
            ram_bytes: 1024,
            cheat_min_saving: 100,
            garden_steps: 64,
            infinite_garden_steps: 26_501_365,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub puzzle: Puzzle,
    pub input_path: String,
    pub part: Parts,
    pub output_json: bool,
    pub log_level: String,
    pub params: PuzzleParams,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            puzzle: Puzzle::Chiton,
            input_path: "input_file/chiton/example.txt".to_string(),
            part: Parts::Both,
            output_json: false,
            log_level: "info".to_string(),
            params: PuzzleParams::default(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("failed to parse YAML config")
    }

    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(puzzle) = cli.puzzle {
            self.puzzle = puzzle;
        }
        if let Some(input) = &cli.input {
            self.input_path = input.clone();
        }
        if let Some(part) = cli.part {
            self.part = part;
        }
        if cli.json {
            self.output_json = true;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = log_level.clone();
        }

        let params = &mut self.params;
        for (value, field) in [
            (cli.chiton_tiles, &mut params.chiton_tiles),
            (cli.ram_size, &mut params.ram_size),
            (cli.ram_bytes, &mut params.ram_bytes),
            (cli.cheat_min_saving, &mut params.cheat_min_saving),
            (cli.garden_steps, &mut params.garden_steps),
            (cli.infinite_garden_steps, &mut params.infinite_garden_steps),
        ] {
            if let Some(value) = value {
                *field = value;
            }
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.input_path.is_empty() {
            return Err(anyhow!("Input path must not be empty"));
        }

        let params = &self.params;
        for (name, value) in [
            ("chiton_tiles", params.chiton_tiles),
            ("ram_size", params.ram_size),
            ("ram_bytes", params.ram_bytes),
        ] {
            if value == 0 {
                return Err(anyhow!("{name} must be greater than 0, got {value}"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_config_with_defaults() {
        let yaml = "\
puzzle: ram-run
input_path: input_file/ram_run/example.txt
part: one
params:
  ram_size: 7
  ram_bytes: 12
";
        let config = Config::from_yaml_str(yaml).unwrap();

        assert_eq!(config.puzzle, Puzzle::RamRun);
        assert_eq!(config.part, Parts::One);
        assert_eq!(config.params.ram_size, 7);
        assert_eq!(config.params.ram_bytes, 12);
        assert_eq!(config.params.cheat_min_saving, 100);
        assert!(!config.output_json);
    }

    #[test]
    fn test_command_line_overrides() {
        let cli = Cli::parse_from([
            "grid-search",
            "--puzzle",
            "race-condition",
            "--input",
            "input_file/race_condition/example.txt",
            "--cheat-min-saving",
            "50",
            "--json",
        ]);
        let config = Config::default().override_from_command_line(&cli).unwrap();

        assert_eq!(config.puzzle, Puzzle::RaceCondition);
        assert_eq!(config.params.cheat_min_saving, 50);
        assert_eq!(config.params.ram_size, 71);
        assert!(config.output_json);
        assert_eq!(config.part.parts(), vec![Part::One, Part::Two]);
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let cli = Cli::parse_from(["grid-search", "--ram-size", "0"]);
        assert!(Config::default().override_from_command_line(&cli).is_err());
        assert!(Config::from_yaml_str("puzzle: not-a-puzzle\n").is_err());
    }

    #[test]
    fn test_shipped_configs_solve_their_examples() {
        use crate::puzzle::{self, Answer};
        use crate::stat::Stats;

        for (path, expected) in [
            ("config/ram_run.yaml", [Answer::Number(22), Answer::Text("6,1".to_string())]),
            ("config/race_condition.yaml", [Answer::Number(1), Answer::Number(285)]),
        ] {
            let config = Config::from_yaml_str(&std::fs::read_to_string(path).unwrap()).unwrap();
            config.validate().unwrap();
            let input = std::fs::read_to_string(&config.input_path).unwrap();
            let solver = puzzle::build(config.puzzle, &input, &config.params).unwrap();
            let stats = &mut Stats::default();

            let answers: Vec<Answer> = config
                .part
                .parts()
                .into_iter()
                .map(|part| solver.solve(part, stats))
                .collect();
            assert_eq!(answers, expected, "{path}");
        }
    }
}
