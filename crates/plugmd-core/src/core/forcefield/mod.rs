//! # Force Field Module
//!
//! Lennard-Jones force-field mathematics in reduced units.
//!
//! - [`potentials`] - Pure pair potential and force-factor functions over
//!   squared separations
//! - [`kernel`] - The cutoff-shifted kernel context and the registry-fed
//!   O(n²) pairwise accumulation loop used by the reference extension

pub mod kernel;
pub mod potentials;
