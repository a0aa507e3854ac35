//! Shared test utilities for rrr-skills.

pub mod fixtures;
