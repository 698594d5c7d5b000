//! Step definitions for task board synchronization scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
