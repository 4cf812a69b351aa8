//! Test harness for CLI integration tests.
//!
//! Provides isolated test environments, programmatic project seeding,
//! and CLI assertion helpers using `assert_cmd`.

mod command;
mod env;
mod project;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::TabulaCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
#[allow(unused_imports)]
pub use project::TestProject;
