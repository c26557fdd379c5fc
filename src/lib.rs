pub mod config;
pub mod errors;
pub mod process;
pub mod report;
pub mod runner;
pub mod stats;
pub mod types;
