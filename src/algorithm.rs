mod bfs;
mod dfs;
mod dijkstra;

pub use bfs::bfs;
pub use dfs::count_paths;
pub use dijkstra::dijkstra;
