use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub searches: usize,
    pub expanded_nodes: usize,
    pub generated_nodes: usize,
    pub time_us: usize,
}

impl Stats {
    pub fn print(&self) {
        info!(
            "Searches {:?} Time(microseconds) {:?} Expanded nodes number: {:?} Generated nodes number: {:?}",
            self.searches, self.time_us, self.expanded_nodes, self.generated_nodes
        );
    }
}
