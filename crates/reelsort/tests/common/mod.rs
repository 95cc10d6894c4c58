//! Shared test utilities for reelsort integration tests.
//!
//! This module provides:
//! - `TestHarness` for isolated runs against temp incoming/movies/audio dirs
//! - `ConfigBuilder` for creating test configurations programmatically
//! - `StaticLookup`, a canned `MetadataLookup`

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::{StaticLookup, TestHarness};
