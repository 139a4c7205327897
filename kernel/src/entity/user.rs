mod id;
mod name;

pub use self::{id::*, name::*};
use crate::entity::common::Filter;
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure)]
pub struct User {
    id: UserId,
    name: UserName,
    filters: Vec<Filter>,
}

impl User {
    pub fn new(id: UserId, name: UserName, filters: Vec<Filter>) -> Self {
        Self { id, name, filters }
    }
}
