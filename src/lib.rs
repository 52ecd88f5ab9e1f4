pub mod algorithm;
pub mod common;
pub mod config;
pub mod map;
pub mod puzzle;
pub mod stat;
