use kernel::prelude::entity::{DestructUser, User};

pub struct GetUserDto {
    pub id: i64,
}

pub struct CreateUserDto {
    pub id: i64,
    pub name: String,
    pub filters: Vec<String>,
}

pub struct UserFilterDto {
    pub id: i64,
    pub filter: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub filters: Vec<String>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        let DestructUser { id, name, filters } = user.into_destruct();
        Self {
            id: *id.as_ref(),
            name: name.as_ref().clone(),
            filters: filters
                .into_iter()
                .map(|filter| filter.as_ref().clone())
                .collect(),
        }
    }
}
