use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{Filter, User, UserId, UserName};
use kernel::KernelError;

use crate::transfer::{CreateUserDto, GetUserDto, UserDto, UserFilterDto};

#[async_trait::async_trait]
pub trait UserService:
    'static + Sync + Send + DependOnUserQuery + DependOnUserModifier
{
    async fn get_user(
        &self,
        dto: GetUserDto,
    ) -> error_stack::Result<Option<UserDto>, KernelError> {
        let id = UserId::new(dto.id);
        let user = self.user_query().find_by_id(&id).await?;
        Ok(user.map(UserDto::from))
    }

    /// Filters of the user, or an empty list when the user is absent.
    async fn get_filters(&self, dto: GetUserDto) -> error_stack::Result<Vec<String>, KernelError> {
        let id = UserId::new(dto.id);
        let user = self.user_query().find_by_id(&id).await?;
        Ok(user
            .map(|user| UserDto::from(user).filters)
            .unwrap_or_default())
    }

    /// `Ok(false)` when the id is already taken.
    async fn add_user(&self, dto: CreateUserDto) -> error_stack::Result<bool, KernelError> {
        let user = User::new(
            UserId::new(dto.id),
            UserName::new(dto.name),
            dto.filters.into_iter().map(Filter::new).collect(),
        );
        self.user_modifier().create(&user).await
    }

    /// `Ok(false)` when the filter is already present; fails when the user
    /// does not exist.
    async fn add_filter(&self, dto: UserFilterDto) -> error_stack::Result<bool, KernelError> {
        let id = UserId::new(dto.id);
        let filter = Filter::new(dto.filter);
        self.user_modifier().add_filter(&id, &filter).await
    }

    /// `Ok(false)` when the filter is not present or the user is absent.
    async fn remove_filter(&self, dto: UserFilterDto) -> error_stack::Result<bool, KernelError> {
        let id = UserId::new(dto.id);
        let filter = Filter::new(dto.filter);
        self.user_modifier().remove_filter(&id, &filter).await
    }
}

impl<T> UserService for T where T: DependOnUserQuery + DependOnUserModifier {}
