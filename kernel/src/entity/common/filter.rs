use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Free-form interest tag. Users and events both carry a set of these,
/// matching is intersection based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Filter(String);

impl Filter {
    pub fn new(filter: impl Into<String>) -> Self {
        Self(filter.into())
    }
}
