use super::{Answer, Solver};
use crate::algorithm::count_paths;
use crate::common::Transition;
use crate::stat::Stats;

use anyhow::{bail, Context};
use std::collections::HashMap;
use tracing::debug;

/// Current cave, small caves already visited (bitmask by cave index) and
/// whether the one allowed repeat visit is spent.
type Walk = (usize, u64, bool);

/// Undirected cave system; lowercase caves are small, uppercase caves are big.
pub struct PassagePathing {
    small: Vec<bool>,
    tunnels: Vec<Vec<usize>>,
    start: usize,
    end: usize,
}

impl Transition for PassagePathing {
    type State = Walk;

    fn successors(&self, state: &Walk) -> impl Iterator<Item = (Walk, usize)> {
        let (cave, visited, repeated) = *state;
        self.tunnels[cave].iter().filter_map(move |&next| {
            if next == self.start {
                return None;
            }
            if !self.small[next] {
                return Some(((next, visited, repeated), 1));
            }
            let bit = 1u64 << next;
            match (visited & bit != 0, repeated) {
                (false, _) => Some(((next, visited | bit, repeated), 1)),
                (true, false) => Some(((next, visited, true), 1)),
                (true, true) => None,
            }
        })
    }
}

impl PassagePathing {
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut names = Vec::new();
        let mut tunnels: Vec<Vec<usize>> = Vec::new();

        for (number, line) in input.lines().map(str::trim).enumerate() {
            if line.is_empty() {
                continue;
            }
            let (a, b) = line
                .split_once('-')
                .with_context(|| format!("line {}: expected cave-cave", number + 1))?;
            let mut ids = [0; 2];
            for (id, name) in ids.iter_mut().zip([a, b]) {
                if name.is_empty() || !name.chars().all(|ch| ch.is_ascii_alphabetic()) {
                    bail!("line {}: invalid cave name {name:?}", number + 1);
                }
                *id = *index.entry(name).or_insert_with(|| {
                    names.push(name.to_string());
                    tunnels.push(Vec::new());
                    names.len() - 1
                });
            }
            tunnels[ids[0]].push(ids[1]);
            tunnels[ids[1]].push(ids[0]);
        }

        if names.len() > u64::BITS as usize {
            bail!("at most {} caves are supported", u64::BITS);
        }
        let start = *index.get("start").context("no start cave")?;
        let end = *index.get("end").context("no end cave")?;
        let small: Vec<bool> = names
            .iter()
            .map(|name| name.chars().all(|ch| ch.is_ascii_lowercase()))
            .collect();

        // Two connected big caves would allow endless walks.
        for (cave, next) in tunnels.iter().enumerate() {
            if let Some(&other) = next.iter().find(|&&other| !small[cave] && !small[other]) {
                bail!("big caves {} and {} are connected", names[cave], names[other]);
            }
        }

        debug!("{} caves, start {start}, end {end}", names.len());
        Ok(PassagePathing {
            small,
            tunnels,
            start,
            end,
        })
    }

    /// Number of start-to-end paths, optionally allowing one small cave twice.
    pub fn count(&self, allow_repeat: bool, stats: &mut Stats) -> usize {
        let source = (self.start, 1u64 << self.start, !allow_repeat);
        count_paths(self, source, |&(cave, _, _): &Walk| cave == self.end, stats)
    }
}

impl Solver for PassagePathing {
    fn part_one(&self, stats: &mut Stats) -> Answer {
        Answer::from(self.count(false, stats))
    }

    fn part_two(&self, stats: &mut Stats) -> Answer {
        Answer::from(self.count(true, stats))
    }
}
