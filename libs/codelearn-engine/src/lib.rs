//! CodeLearn evaluation engine.
//!
//! Grades learner submissions: static structure analysis, sandboxed
//! out-of-process execution with timeout and output cap, normalized and
//! similarity-based output comparison, typed test-case evaluation, and
//! feedback/score aggregation under a fixed scoring policy.
//!
//! Entry points: [`evaluate`] and [`report::format_result`].

pub mod compare;
pub mod config;
pub mod evaluate;
pub mod feedback;
pub mod report;
pub mod sandbox;
pub mod similarity;
pub mod structure;
pub mod testcases;


pub use config::ConfigError;
pub use evaluate::evaluate;
