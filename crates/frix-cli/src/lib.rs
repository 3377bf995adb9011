//! Library surface of the frix CLI, split out so the sweep runner and the
//! output writer are testable.

pub mod config;
pub mod runner;
