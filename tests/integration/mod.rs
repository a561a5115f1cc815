//! Integration tests module
//!
//! This module contains integration tests for the `lerna-changelog` binary.

pub mod common;
pub mod config;
pub mod fetch;
