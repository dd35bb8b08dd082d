// src/runner/mod.rs
mod executor;
mod summary;

pub use executor::Runner;
pub use summary::RunSummary;
