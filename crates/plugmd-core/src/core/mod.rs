//! # Core Module
//!
//! Stateless foundations of the engine/extension boundary.
//!
//! - **Shared State** ([`registry`]) - Type-erased, key-addressed storage with
//!   checked typed access, shared between engine and extension
//! - **Force Field** ([`forcefield`]) - Pure Lennard-Jones mathematics and the
//!   cutoff-shifted pairwise kernel that reads its inputs from the registry

pub mod forcefield;
pub mod registry;
