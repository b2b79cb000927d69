//! # Generic Messages
//!
//! Message types exchanged between a `ResourceClient` and its `ResourceActor`.

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The resource surface is deliberately narrow: **Get** reads one resource, **Action** runs a
/// resource-specific mutation. Both are generic over `T: ActorEntity`, so a payload meant
/// for one resource type cannot be sent to another.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
