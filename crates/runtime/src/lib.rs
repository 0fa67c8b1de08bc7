//! Runtime orchestration for the deterministic game simulation.
//!
//! This crate wires the pure [`voidgate_core`] engine into an async host: a
//! single background worker owns the authoritative state, commands arrive
//! over an mpsc channel, and every [`voidgate_core::SimEvent`] is fanned out
//! on a broadcast channel stamped with its tick. Consumers embed
//! [`Runtime`] to drive the simulation and interact with the world through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`handle`] exposes the cloneable client façade
//! - [`scene`] declares the injected scene-controller contract
//! - [`input`] converts level-triggered device state into edge events
//! - [`worker`] keeps the background task internal to the crate
pub mod error;
pub mod event;
pub mod handle;
pub mod input;
pub mod runtime;
pub mod scene;

mod worker;

pub use error::{Result, RuntimeError};
pub use event::GameEvent;
pub use handle::RuntimeHandle;
pub use input::EdgeLatch;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use scene::SceneDirector;
