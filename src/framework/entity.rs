//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract a persisted resource must implement to be
//! served by the generic [`ResourceActor`](crate::framework::ResourceActor).
//!
//! Unlike an in-memory store, the state of these resources lives behind the actor's
//! `Context` (typically a storage gateway). The actor owns no copies of the entities; it only
//! guarantees that every request against the resource type is processed one at a time.
//!
//! # Operations
//! - [`ActorEntity::fetch`] backs the **Get** request (read one resource by id).
//! - [`ActorEntity::handle_action`] backs the **Action** request, the only write path.
//!
//! Creation and deletion are handled outside the actor, so the trait has no hooks for them.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any persisted resource must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// This trait is `#[async_trait]` because both hooks usually await storage. The `Context`
/// type is injected into every hook when the actor is started with `run()`, which lets the
/// storage handle (and any policy) be bound late.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + Debug + 'static {
    /// The unique identifier for this entity.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Enum representing resource-specific mutations (e.g., `ApplyDelta`).
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One error enum covers every hook of the entity, so clients match on a single type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Loads the current state of one resource. `Ok(None)` means the id is unknown.
    async fn fetch(id: &Self::Id, ctx: &Self::Context) -> Result<Option<Self>, Self::Error>;

    /// Applies a resource-specific action.
    async fn handle_action(
        id: &Self::Id,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
