//! Common utilities for the Canopy query engine.
//!
//! This crate provides shared infrastructure used by all Canopy components:
//! - **Warning System** - colored terminal output for lossy or suspicious input

pub mod warning;
