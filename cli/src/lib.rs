//! sandbox-deploy library — exposes modules for the CLI binary, the HTTP
//! server, and integration tests.

#![cfg_attr(test, allow(clippy::expect_used))]

pub mod app;
pub mod application;
pub mod cli;
pub mod commands;
pub mod domain;
pub mod infra;
pub mod output;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
