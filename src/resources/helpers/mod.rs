//! Helpers shared by operation implementations.
pub mod fs;
