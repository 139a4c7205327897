use crate::entity::{Filter, User, UserId};
use crate::KernelError;

/// User mutations. `Ok(false)` is a declined outcome, not a failure.
///
/// `add_filter` and `remove_filter` must check their precondition and apply
/// the mutation as one indivisible store operation.
#[async_trait::async_trait]
pub trait UserModifier: 'static + Sync + Send {
    /// `Ok(false)` when the id is already taken.
    async fn create(&self, user: &User) -> error_stack::Result<bool, KernelError>;

    /// `Ok(false)` when the filter is already present. Fails with
    /// [`KernelError::NotFound`] when the user does not exist.
    async fn add_filter(
        &self,
        id: &UserId,
        filter: &Filter,
    ) -> error_stack::Result<bool, KernelError>;

    /// `Ok(false)` when the filter is not present or the user does not
    /// exist.
    async fn remove_filter(
        &self,
        id: &UserId,
        filter: &Filter,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnUserModifier: 'static + Sync + Send {
    type UserModifier: UserModifier;
    fn user_modifier(&self) -> &Self::UserModifier;
}
