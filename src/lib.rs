// src/lib.rs
pub mod check;
pub mod config;
pub mod runner;

pub use check::{CheckError, CheckRequest, CheckResult, ErrorKind, ReachabilityChecker};
pub use runner::{RunSummary, Runner};
