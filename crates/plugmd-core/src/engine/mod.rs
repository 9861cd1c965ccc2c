//! # Engine Module
//!
//! Stateful orchestration of a simulation run.
//!
//! The engine owns the particle state, registers every engine-owned quantity
//! in the state registry before the extension is first called, and drives the
//! time-stepping loop: integrate positions, reset the accumulator entries,
//! hand control to the extension's `evaluate_forces`, then integrate
//! velocities from the returned forces.
//!
//! - **Configuration** ([`config`]) - Validated simulation and run parameters
//! - **Extension Binding** ([`extension`]) - Loading, symbol resolution, and
//!   invocation of the dynamically loaded force extension
//! - **Simulation** ([`simulation`]) - Particle state and the stepping loop
//! - **Progress Reporting** ([`progress`]) - Per-step energy reporting
//! - **Error Handling** ([`error`]) - Engine-level error umbrella

pub mod config;
pub mod error;
pub mod extension;
pub mod progress;
pub mod simulation;
