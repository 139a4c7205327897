use crate::entity::{Event, EventId, UserId};
use crate::KernelError;

/// Event mutations. `Ok(false)` is a declined outcome, not a failure.
///
/// `sign_up` and `withdraw` are registration transitions: the precondition
/// (capacity not yet reached, membership state) must be evaluated by the
/// store atomically with the mutation. Implementations must not read the
/// event, decide, and write in separate store calls — two concurrent
/// sign-ups against the last open slot would both pass the check and break
/// the capacity bound.
#[async_trait::async_trait]
pub trait EventModifier: 'static + Sync + Send {
    /// `Ok(false)` when the event id is already taken.
    async fn create(&self, event: &Event) -> error_stack::Result<bool, KernelError>;

    /// Adds the user to the participant set and bumps the occupancy.
    /// `Ok(false)` when the user is already registered or the event is
    /// full. Fails with [`KernelError::NotFound`] when the event does not
    /// exist.
    async fn sign_up(
        &self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> error_stack::Result<bool, KernelError>;

    /// Removes the user from the participant set and lowers the occupancy.
    /// `Ok(false)` when the user is not registered or the event does not
    /// exist.
    async fn withdraw(
        &self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnEventModifier: 'static + Sync + Send {
    type EventModifier: EventModifier;
    fn event_modifier(&self) -> &Self::EventModifier;
}
