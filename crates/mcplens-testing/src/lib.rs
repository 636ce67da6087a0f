//! Testing infrastructure for mcplens integration tests.
//!
//! This crate provides utilities for writing gateway-log tests:
//! - `TestWorld`: isolated directory tree holding one or more run directories
//! - `fixtures`: builders for `gateway.jsonl` and `rpc-messages.jsonl` lines

pub mod fixtures;
pub mod world;

pub use world::TestWorld;
