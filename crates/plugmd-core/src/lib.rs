//! # PlugMD Core Library
//!
//! A small molecular-dynamics time-stepping engine whose force computation is
//! not compiled in, but supplied at runtime by an externally built, dynamically
//! loaded extension. The engine and the extension exchange all data through a
//! single channel: a type-erased, key-addressed shared-state registry.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict two-layer architecture to keep the
//! boundary contract between engine and extension explicit and testable.
//!
//! - **[`core`]: The Foundation.** Contains the stateless building blocks: the
//!   [`StateRegistry`](core::registry::StateRegistry) with its checked typed
//!   access over erased storage, and the pure force-field mathematics
//!   (`potentials`, the cutoff-shifted [`LjKernel`](core::forcefield::kernel::LjKernel)).
//!
//! - **[`engine`]: The Logic Core.** This stateful layer orchestrates a run:
//!   it owns the particle state, populates the registry, loads and binds the
//!   extension ([`Extension`](engine::extension::Extension)), and drives the
//!   time-stepping loop ([`Simulation`](engine::simulation::Simulation)).
//!
//! The reference Lennard-Jones extension lives in its own `cdylib` crate and
//! consumes only the public surface of this library, exactly as a third-party
//! extension would.

pub mod core;
pub mod engine;
