// src/check/mod.rs
mod checker;
mod error;
mod navigator;
mod request;
mod result;

pub use checker::ReachabilityChecker;
pub use error::{CheckError, ErrorKind, TransportKind};
pub use navigator::{HttpNavigator, NavigationError, Navigator};
pub use request::{parse_target, CheckRequest, DEFAULT_EXPECTED_STATUS};
pub use result::CheckResult;
