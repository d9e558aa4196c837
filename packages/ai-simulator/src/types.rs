//! Shared types for the simulator.

use clap::ValueEnum;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Jsonl,
    /// CSV summary only
    Csv,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum MetricsLevel {
    Basic,
    Detailed,
}
