use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Participant count. Used both for the fixed capacity of an event and for
/// its current occupancy.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Default, Fromln, AsRefln, Serialize,
    Deserialize,
)]
pub struct EventCapacity(i32);

impl EventCapacity {
    pub fn new(capacity: impl Into<i32>) -> Self {
        Self(capacity.into())
    }
}
