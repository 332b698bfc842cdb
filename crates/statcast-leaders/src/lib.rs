// Library root: re-exports all modules so integration tests and the
// report binary can reach the crate's public API.

pub mod app;
pub mod config;
pub mod events;
pub mod leaderboard;
pub mod report;
