use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct EventLocation(String);

impl EventLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }
}
