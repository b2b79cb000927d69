//! Generic actor framework for persisted resources.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be served by an actor
//! - [`ResourceActor`] - Generic actor that serializes Get and Action requests
//! - [`ResourceClient`] - Cloneable, typed handle for sending requests
//! - [`FrameworkError`] - Errors raised by the plumbing itself
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
