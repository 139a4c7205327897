use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct EventInfo(String);

impl EventInfo {
    pub fn new(info: impl Into<String>) -> Self {
        Self(info.into())
    }
}
