use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(
    Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Default, Fromln, AsRefln, Serialize,
    Deserialize,
)]
pub struct EventId(i64);

impl EventId {
    pub fn new(id: impl Into<i64>) -> Self {
        Self(id.into())
    }
}
