use kernel::interface::update::{DependOnEventModifier, EventModifier};
use kernel::prelude::entity::{EventId, UserId};
use kernel::KernelError;

use crate::transfer::RegistrationDto;

/// Capacity-bounded sign-up and withdrawal. The capacity check and the
/// mutation happen in one conditional store update, so concurrent requests
/// against the same event cannot oversubscribe it.
#[async_trait::async_trait]
pub trait RegistrationService: 'static + Sync + Send + DependOnEventModifier {
    /// `Ok(false)` when the event is full or the user is already
    /// registered; fails when the event does not exist.
    async fn sign_up(&self, dto: RegistrationDto) -> error_stack::Result<bool, KernelError> {
        let event_id = EventId::new(dto.event_id);
        let user_id = UserId::new(dto.user_id);
        self.event_modifier().sign_up(&event_id, &user_id).await
    }

    /// `Ok(false)` when the user is not registered or the event does not
    /// exist.
    async fn withdraw(&self, dto: RegistrationDto) -> error_stack::Result<bool, KernelError> {
        let event_id = EventId::new(dto.event_id);
        let user_id = UserId::new(dto.user_id);
        self.event_modifier().withdraw(&event_id, &user_id).await
    }
}

impl<T> RegistrationService for T where T: DependOnEventModifier {}
